//! Aiming, power charge and cue strike.

use glam::Vec2;
use serde::Serialize;

/// Where the shot cycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShotPhase {
    /// Balls at rest; the cue follows the pointer.
    Aiming,
    /// Button held; power oscillates until release.
    Charging,
    /// Balls rolling, or the session is over. No shot input is accepted.
    InMotion,
}

/// Snapshot of the shot state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotState {
    pub phase: ShotPhase,
    /// Current charge, always within `[0, max_power]`.
    pub power: i32,
    /// +1 while power climbs, -1 while it falls.
    pub direction: i32,
    /// Aim angle in degrees, y-up convention.
    pub aim_angle: f32,
}

/// Tuning for the power meter.
#[derive(Debug, Clone, Copy)]
pub struct PowerMeter {
    pub max_power: i32,
    /// Change in power per charging frame.
    pub step: i32,
    /// Power represented by one bar on the meter.
    pub per_bar: i32,
}

/// Shot-taking state machine.
pub struct ShotController {
    state: ShotState,
    meter: PowerMeter,
}

impl ShotController {
    pub fn new(meter: PowerMeter) -> Self {
        Self {
            state: ShotState {
                phase: ShotPhase::Aiming,
                power: 0,
                direction: 1,
                aim_angle: 0.0,
            },
            meter,
        }
    }

    pub fn state(&self) -> &ShotState {
        &self.state
    }

    pub fn phase(&self) -> ShotPhase {
        self.state.phase
    }

    /// Per-frame update.
    ///
    /// With balls moving (or the game over) the controller sits in `InMotion`. Otherwise
    /// the aim tracks the live pointer, and a held button charges power.
    pub fn update(&mut self, stationary: bool, game_over: bool, cue: Vec2, pointer: Vec2) {
        if !stationary || game_over {
            if self.state.phase != ShotPhase::InMotion {
                log::debug!("Shot controller waiting for balls to settle");
                self.state.phase = ShotPhase::InMotion;
                self.reset_power();
            }
            return;
        }

        if self.state.phase == ShotPhase::InMotion {
            log::debug!("Balls at rest, aiming");
            self.state.phase = ShotPhase::Aiming;
        }

        self.state.aim_angle = aim_angle(cue, pointer);

        if self.state.phase == ShotPhase::Charging {
            self.charge();
        }
    }

    /// Advance the power meter by one frame: a triangle wave between 0 and
    /// `max_power`, reversing whenever a bound is reached. A step that would
    /// overshoot a bound stops on it.
    pub fn charge(&mut self) {
        let power = self.state.power + self.meter.step * self.state.direction;
        self.state.power = power.clamp(0, self.meter.max_power);
        if self.state.power >= self.meter.max_power || self.state.power <= 0 {
            self.state.direction = -self.state.direction;
        }
    }

    /// Button down. Starts charging if the controller is aiming.
    pub fn press(&mut self) -> bool {
        if self.state.phase != ShotPhase::Aiming {
            return false;
        }
        self.state.phase = ShotPhase::Charging;
        log::debug!("Charging shot");
        true
    }

    /// Button up. When charging, returns the impulse for the cue ball built
    /// from the last aim angle and current power, then resets the meter.
    pub fn release(&mut self) -> Option<Vec2> {
        if self.state.phase != ShotPhase::Charging {
            return None;
        }
        let impulse = shot_impulse(self.state.aim_angle, self.state.power);
        log::info!(
            "Shot fired: angle {:.1}°, power {}",
            self.state.aim_angle,
            self.state.power
        );
        self.state.phase = ShotPhase::Aiming;
        self.reset_power();
        Some(impulse)
    }

    /// Number of bars shown on the power meter (rounded up).
    pub fn power_bars(&self) -> u32 {
        let per_bar = self.meter.per_bar.max(1);
        ((self.state.power.max(0) + per_bar - 1) / per_bar) as u32
    }

    fn reset_power(&mut self) {
        self.state.power = 0;
        self.state.direction = 1;
    }
}

/// Aim angle in degrees from the cue ball toward the pointer's opposite side,
/// with y flipped so that "up" on screen is positive.
pub fn aim_angle(cue: Vec2, pointer: Vec2) -> f32 {
    let x_dist = cue.x - pointer.x;
    let y_dist = -(cue.y - pointer.y);
    y_dist.atan2(x_dist).to_degrees()
}

/// Impulse for a strike at `angle` degrees with the given power.
pub fn shot_impulse(angle: f32, power: i32) -> Vec2 {
    let (sin, cos) = angle.to_radians().sin_cos();
    let power = power as f32;
    Vec2::new(power * -cos, power * sin)
}
