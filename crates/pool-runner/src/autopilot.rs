//! Scripted player for headless runs.

use glam::Vec2;
use pool_engine::{InputEvent, InputQueue, PoolGame, ShotPhase};

use crate::runner::InputSource;

/// Frames the button is held for, cycled shot by shot. At the default meter
/// settings these land at 4000, 7000 and 10000 power.
const HOLD_FRAMES: [u32; 3] = [40, 70, 100];

/// Frames to wait for a fired shot to set the balls moving before aiming
/// again anyway.
const ROLL_TIMEOUT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pilot {
    /// Waiting for the table to come to rest.
    Ready,
    /// Button held for `frames` frames so far.
    Charging { frames: u32 },
    /// Shot released; waiting for it to take effect.
    Rolling { frames: u32 },
}

/// Shoots the cue ball at the nearest object ball, over and over, until the
/// rack is cleared, the game is lost or the frame budget runs out.
pub struct Autopilot {
    state: Pilot,
    shots: usize,
    frames: u64,
    max_frames: u64,
    quit_sent: bool,
}

impl Autopilot {
    pub fn new(max_frames: u64) -> Self {
        Self {
            state: Pilot::Ready,
            shots: 0,
            frames: 0,
            max_frames,
            quit_sent: false,
        }
    }

    /// Shots released so far.
    pub fn shots(&self) -> usize {
        self.shots
    }

    fn hold_frames(&self) -> u32 {
        HOLD_FRAMES[self.shots % HOLD_FRAMES.len()]
    }

    fn finished(&self, game: &PoolGame) -> bool {
        self.frames >= self.max_frames
            || game.session().is_game_over()
            || game.registry().object_balls_remaining() == 0
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, game: &PoolGame, queue: &mut InputQueue) {
        if self.quit_sent {
            return;
        }
        self.frames += 1;

        if self.finished(game) {
            log::info!("Autopilot done after {} frames, {} shots", self.frames, self.shots);
            queue.push(InputEvent::Quit);
            self.quit_sent = true;
            return;
        }

        let phase = game.shot().phase();
        self.state = match self.state {
            Pilot::Ready => {
                if !game.is_stationary() || phase != ShotPhase::Aiming {
                    Pilot::Ready
                } else if let Some(target) = nearest_object_ball(game) {
                    log::debug!("Autopilot aiming at ({:.0}, {:.0})", target.x, target.y);
                    queue.push(InputEvent::PointerMove {
                        x: target.x,
                        y: target.y,
                    });
                    queue.push(InputEvent::PointerDown {
                        x: target.x,
                        y: target.y,
                    });
                    Pilot::Charging { frames: 0 }
                } else {
                    Pilot::Ready
                }
            }
            Pilot::Charging { .. } if phase != ShotPhase::Charging => Pilot::Ready,
            Pilot::Charging { frames } => {
                let frames = frames + 1;
                if frames >= self.hold_frames() {
                    let pointer = queue.pointer();
                    queue.push(InputEvent::PointerUp {
                        x: pointer.x,
                        y: pointer.y,
                    });
                    self.shots += 1;
                    Pilot::Rolling { frames: 0 }
                } else {
                    Pilot::Charging { frames }
                }
            }
            Pilot::Rolling { frames } => {
                if phase == ShotPhase::InMotion || frames >= ROLL_TIMEOUT {
                    Pilot::Ready
                } else {
                    Pilot::Rolling { frames: frames + 1 }
                }
            }
        };
    }
}

/// Centre of the object ball closest to the cue ball.
fn nearest_object_ball(game: &PoolGame) -> Option<Vec2> {
    let cue = game.cue_position();
    game.registry()
        .balls()
        .iter()
        .filter(|ball| !ball.is_cue())
        .map(|ball| game.physics().position(ball.handle))
        .min_by(|a, b| a.distance_squared(cue).total_cmp(&b.distance_squared(cue)))
}
