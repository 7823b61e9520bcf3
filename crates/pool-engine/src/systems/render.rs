use glam::Vec2;

use crate::api::game::GameConfig;
use crate::core::physics::PhysicsWorld;
use crate::core::registry::BallRegistry;
use crate::renderer::instance::{sprites, RenderBuffer, RenderInstance};
use crate::renderer::traits::{HudState, HudText, TextSize};

/// Power bar sprite size and spacing, relative to the cue ball centre.
const BAR_WIDTH: f32 = 10.0;
const BAR_HEIGHT: f32 = 20.0;
const BAR_SPACING: f32 = 15.0;
const BAR_OFFSET: Vec2 = Vec2::new(-30.0, 30.0);

/// Potted-ball icons along the HUD panel.
const ICON_MARGIN: f32 = 10.0;
const ICON_SPACING: f32 = 50.0;

/// Table artwork at the origin, drawn first.
pub fn push_table(buffer: &mut RenderBuffer) {
    buffer.push(RenderInstance::top_left(sprites::TABLE, 0.0, 0.0, 0.0, 0.0));
}

/// One sprite per ball, placed by its top-left corner.
pub fn push_balls(buffer: &mut RenderBuffer, registry: &BallRegistry, physics: &PhysicsWorld) {
    for ball in registry.balls() {
        let pos = physics.position(ball.handle);
        let size = ball.radius * 2.0;
        buffer.push(RenderInstance::top_left(
            ball.id.0 as u32,
            pos.x - ball.radius,
            pos.y - ball.radius,
            size,
            size,
        ));
    }
}

/// Cue stick centred on the cue ball, rotated to the aim angle.
pub fn push_cue_stick(buffer: &mut RenderBuffer, cue: Vec2, aim_angle: f32) {
    buffer.push(RenderInstance::centered(sprites::CUE_STICK, cue.x, cue.y, aim_angle));
}

/// A row of power bars just below the cue ball.
pub fn push_power_bars(buffer: &mut RenderBuffer, cue: Vec2, bars: u32) {
    let origin = cue + BAR_OFFSET;
    for bar in 0..bars {
        buffer.push(RenderInstance::top_left(
            sprites::POWER_BAR,
            origin.x + bar as f32 * BAR_SPACING,
            origin.y,
            BAR_WIDTH,
            BAR_HEIGHT,
        ));
    }
}

/// Bottom panel plus a row of potted-ball icons.
pub fn push_hud(buffer: &mut RenderBuffer, hud: &HudState, config: &GameConfig) {
    let panel_top = config.screen_height;
    buffer.push(RenderInstance::top_left(
        sprites::PANEL,
        0.0,
        panel_top,
        config.screen_width,
        config.bottom_panel,
    ));

    for (i, id) in hud.potted.iter().enumerate() {
        buffer.push(RenderInstance::top_left(
            id.0 as u32,
            ICON_MARGIN + i as f32 * ICON_SPACING,
            panel_top + ICON_MARGIN,
            config.ball_diameter,
            config.ball_diameter,
        ));
    }
}

/// Lives counter, and the game-over banner once the session has ended.
pub fn hud_texts(lives: u32, game_over: bool, config: &GameConfig) -> Vec<HudText> {
    let mut texts = vec![HudText {
        text: format!("LIVES: {lives}"),
        x: config.screen_width - 200.0,
        y: config.screen_height + 10.0,
        size: TextSize::Regular,
    }];
    if game_over {
        texts.push(HudText {
            text: "GAME OVER".to_string(),
            x: config.screen_width / 2.0 - 160.0,
            y: config.screen_height / 2.0,
            size: TextSize::Large,
        });
    }
    texts
}
