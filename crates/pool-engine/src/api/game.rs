use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::ball::{rack_positions, BallId};
use crate::components::table::TableGeometry;
use crate::core::physics::{BallMaterial, PhysicsWorld};
use crate::core::registry::BallRegistry;
use crate::core::session::GameSession;
use crate::error::PoolError;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::instance::RenderBuffer;
use crate::renderer::traits::{FrameData, HudState, Renderer};
use crate::systems::pockets::{PocketDistance, PocketResolver, PotEvent};
use crate::systems::render;
use crate::systems::shot::{PowerMeter, ShotController, ShotPhase};

/// Every tunable of the game. The defaults are the shipped values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Frames per second; one physics step of `1 / fps` runs per frame.
    pub fps: u32,
    /// Table area width in pixels.
    pub screen_width: f32,
    /// Table area height in pixels. The HUD panel sits below it.
    pub screen_height: f32,
    /// Height of the HUD panel under the table.
    pub bottom_panel: f32,
    pub ball_diameter: f32,
    pub pocket_diameter: f32,
    pub ball_mass: f32,
    /// Ball restitution (0 = dead, 1 = perfectly elastic).
    pub elasticity: f32,
    /// Maximum force the rolling-friction motor may apply to a ball.
    pub friction_max_force: f32,
    /// Upper bound of the power meter.
    pub max_power: i32,
    /// Power gained or lost per charging frame.
    pub power_step: i32,
    /// Power represented by one meter bar.
    pub power_per_bar: i32,
    pub starting_lives: u32,
    /// Where the cue ball starts, and where it returns after a scratch.
    pub cue_start: Vec2,
    /// Off-table spot where a potted cue ball waits.
    pub parking_spot: Vec2,
    /// Centre of the first ball of the rack's back column.
    pub rack_origin: Vec2,
    /// Zero for a level table.
    pub gravity: Vec2,
    pub pocket_distance: PocketDistance,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fps: 120,
            screen_width: 1200.0,
            screen_height: 678.0,
            bottom_panel: 50.0,
            ball_diameter: 36.0,
            pocket_diameter: 66.0,
            ball_mass: 5.0,
            elasticity: 0.8,
            friction_max_force: 1000.0,
            max_power: 13000,
            power_step: 100,
            power_per_bar: 2000,
            starting_lives: 3,
            cue_start: Vec2::new(888.0, 339.0),
            parking_spot: Vec2::new(-100.0, -100.0),
            rack_origin: Vec2::new(250.0, 267.0),
            gravity: Vec2::ZERO,
            pocket_distance: PocketDistance::Legacy,
        }
    }
}

impl GameConfig {
    /// Seconds simulated per frame.
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.fps as f32
    }

    pub fn ball_radius(&self) -> f32 {
        self.ball_diameter / 2.0
    }

    pub fn ball_material(&self) -> BallMaterial {
        BallMaterial {
            mass: self.ball_mass,
            restitution: self.elasticity,
            friction_force: self.friction_max_force,
        }
    }

    pub fn power_meter(&self) -> PowerMeter {
        PowerMeter {
            max_power: self.max_power,
            step: self.power_step,
            per_bar: self.power_per_bar,
        }
    }

    pub fn pocket_resolver(&self) -> PocketResolver {
        PocketResolver {
            distance: self.pocket_distance,
            parking_spot: self.parking_spot,
        }
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), PoolError> {
        check("fps", self.fps as f32, (1..=1000).contains(&self.fps), "1..=1000")?;
        check("screen_width", self.screen_width, self.screen_width > 0.0, "> 0")?;
        check("screen_height", self.screen_height, self.screen_height > 0.0, "> 0")?;
        check("bottom_panel", self.bottom_panel, self.bottom_panel >= 0.0, ">= 0")?;
        check("ball_diameter", self.ball_diameter, self.ball_diameter > 0.0, "> 0")?;
        check("pocket_diameter", self.pocket_diameter, self.pocket_diameter > 0.0, "> 0")?;
        check("ball_mass", self.ball_mass, self.ball_mass > 0.0, "> 0")?;
        check(
            "elasticity",
            self.elasticity,
            (0.0..=1.0).contains(&self.elasticity),
            "0.0..=1.0",
        )?;
        check(
            "friction_max_force",
            self.friction_max_force,
            self.friction_max_force >= 0.0,
            ">= 0",
        )?;
        check("max_power", self.max_power as f32, self.max_power > 0, "> 0")?;
        check(
            "power_step",
            self.power_step as f32,
            self.power_step > 0 && self.power_step <= self.max_power,
            "1..=max_power",
        )?;
        check("power_per_bar", self.power_per_bar as f32, self.power_per_bar > 0, "> 0")?;
        check(
            "starting_lives",
            self.starting_lives as f32,
            self.starting_lives > 0,
            ">= 1",
        )?;
        Ok(())
    }
}

fn check(name: &'static str, value: f32, ok: bool, safe_range: &'static str) -> Result<(), PoolError> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(PoolError::UnsafeConstant {
            name,
            value,
            safe_range,
        })
    }
}

/// One game of pool practice: the table, the balls, the shot cycle and the
/// session score, advanced one frame at a time.
pub struct PoolGame {
    config: GameConfig,
    physics: PhysicsWorld,
    registry: BallRegistry,
    table: TableGeometry,
    resolver: PocketResolver,
    shot: ShotController,
    session: GameSession,
    render_buffer: RenderBuffer,
    hud: HudState,
    stationary: bool,
    frame_count: u64,
    shots_taken: u32,
}

impl PoolGame {
    /// Build the table, rack the fifteen object balls and place the cue ball.
    pub fn new(config: GameConfig) -> Result<Self, PoolError> {
        config.validate()?;

        let mut physics = PhysicsWorld::new(config.gravity, config.ball_material());
        let table = TableGeometry::standard(config.pocket_diameter);
        table.build(&mut physics)?;

        let mut registry = BallRegistry::new();
        let radius = config.ball_radius();
        for (i, pos) in rack_positions(config.rack_origin, config.ball_diameter)
            .into_iter()
            .enumerate()
        {
            registry.spawn(&mut physics, BallId(i as u8 + 1), radius, pos);
        }
        registry.spawn(&mut physics, BallId::CUE, radius, config.cue_start);

        log::info!(
            "Table ready: {} balls, {} pockets, {} lives",
            registry.len(),
            table.pockets().len(),
            config.starting_lives
        );

        Ok(Self {
            resolver: config.pocket_resolver(),
            shot: ShotController::new(config.power_meter()),
            session: GameSession::new(config.starting_lives),
            physics,
            registry,
            table,
            render_buffer: RenderBuffer::new(),
            hud: HudState::default(),
            stationary: true,
            frame_count: 0,
            shots_taken: 0,
            config,
        })
    }

    /// Run one frame:
    /// 1. Physics step
    /// 2. Pocket resolution
    /// 3. Table and balls into the render buffer
    /// 4. Shot cycle (cue respawn, aim, charge) and its sprites
    /// 5. HUD and draw
    /// 6. Input drain
    pub fn frame(&mut self, input: &mut InputQueue, renderer: &mut dyn Renderer) -> Vec<PotEvent> {
        self.physics.step(self.config.fixed_dt());

        let pots = self.resolver.resolve(
            self.table.pockets(),
            &mut self.physics,
            &mut self.registry,
            &mut self.session,
        );

        self.render_buffer.clear();
        render::push_table(&mut self.render_buffer);
        render::push_balls(&mut self.render_buffer, &self.registry, &self.physics);

        self.stationary = self.registry.all_stationary(&self.physics);
        self.update_shot(input.pointer());

        self.refresh_hud();
        render::push_hud(&mut self.render_buffer, &self.hud, &self.config);
        renderer.draw(&FrameData {
            instances: &self.render_buffer.instances,
            hud: &self.hud,
            screen_width: self.config.screen_width,
            screen_height: self.config.screen_height + self.config.bottom_panel,
        });

        for event in input.drain() {
            self.handle_input(event);
        }

        self.frame_count += 1;
        pots
    }

    fn update_shot(&mut self, pointer: Vec2) {
        let game_over = self.session.is_game_over();
        if self.stationary && !game_over && self.session.take_cue_ball_potted() {
            self.respawn_cue_ball();
        }

        let cue = self.cue_position();
        self.shot.update(self.stationary, game_over, cue, pointer);

        match self.shot.phase() {
            ShotPhase::Aiming => {
                render::push_cue_stick(&mut self.render_buffer, cue, self.shot.state().aim_angle);
            }
            ShotPhase::Charging => {
                render::push_cue_stick(&mut self.render_buffer, cue, self.shot.state().aim_angle);
                render::push_power_bars(&mut self.render_buffer, cue, self.shot.power_bars());
            }
            ShotPhase::InMotion => {}
        }
    }

    fn respawn_cue_ball(&mut self) {
        if let Some(cue) = self.registry.cue_ball() {
            self.physics.set_position(cue.handle, self.config.cue_start);
            self.physics.set_velocity(cue.handle, Vec2::ZERO);
            log::info!("Cue ball back on the table");
        }
    }

    fn handle_input(&mut self, event: InputEvent) {
        let accepts_shot = self.stationary && !self.session.is_game_over();
        match event {
            InputEvent::PointerDown { .. } if accepts_shot => {
                self.shot.press();
            }
            InputEvent::PointerUp { .. } if accepts_shot => {
                if let Some(impulse) = self.shot.release() {
                    self.strike(impulse);
                }
            }
            InputEvent::Quit => self.session.quit(),
            _ => {}
        }
    }

    fn strike(&mut self, impulse: Vec2) {
        if let Some(cue) = self.registry.cue_ball() {
            self.physics
                .apply_impulse_at_local_point(cue.handle, impulse, Vec2::ZERO);
            self.shots_taken += 1;
        }
    }

    fn refresh_hud(&mut self) {
        let lives = self.session.lives();
        let game_over = self.session.is_game_over();
        self.hud.lives = lives;
        self.hud.game_over = game_over;
        self.hud.potted.clear();
        self.hud.potted.extend_from_slice(self.session.potted());
        self.hud.phase = self.shot.phase();
        self.hud.power_bars = match self.hud.phase {
            ShotPhase::Charging => self.shot.power_bars(),
            _ => 0,
        };
        self.hud.texts = render::hud_texts(lives, game_over, &self.config);
    }

    // -- Accessors --

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn shot(&self) -> &ShotController {
        &self.shot
    }

    pub fn registry(&self) -> &BallRegistry {
        &self.registry
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn table(&self) -> &TableGeometry {
        &self.table
    }

    /// Draw list produced by the last frame.
    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    /// HUD state produced by the last frame.
    pub fn hud(&self) -> &HudState {
        &self.hud
    }

    /// Cue ball centre.
    pub fn cue_position(&self) -> Vec2 {
        self.registry
            .cue_ball()
            .map(|cue| self.physics.position(cue.handle))
            .unwrap_or(self.config.cue_start)
    }

    /// Whether every ball was at rest as of the last frame.
    pub fn is_stationary(&self) -> bool {
        self.stationary
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn shots_taken(&self) -> u32 {
        self.shots_taken
    }
}
