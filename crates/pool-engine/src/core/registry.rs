use glam::Vec2;

use crate::components::ball::{Ball, BallId};
use crate::core::physics::PhysicsWorld;

/// Ordered storage of the balls still in play.
///
/// Object balls come first in creation order; the cue ball is always the last
/// entry. Each entry carries its own identity, so removing a ball removes its
/// sprite mapping in the same operation.
pub struct BallRegistry {
    balls: Vec<Ball>,
}

impl BallRegistry {
    pub fn new() -> Self {
        Self {
            balls: Vec::with_capacity(BallId::OBJECT_BALLS + 1),
        }
    }

    /// Create a ball body in `physics` and register it.
    ///
    /// Object balls are inserted ahead of the cue ball if one already exists.
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, id: BallId, radius: f32, pos: Vec2) -> Ball {
        let handle = physics.create_dynamic_ball(radius, pos);
        let ball = Ball {
            handle,
            id,
            radius,
            alive: true,
        };
        let at = match self.balls.last() {
            Some(last) if last.is_cue() && !id.is_cue() => self.balls.len() - 1,
            _ => self.balls.len(),
        };
        self.balls.insert(at, ball);
        ball
    }

    /// All balls in play, cue ball last.
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// The cue ball, if one has been spawned.
    pub fn cue_ball(&self) -> Option<&Ball> {
        self.balls.last().filter(|b| b.is_cue())
    }

    /// Remove the object ball at `index` from the registry and from physics.
    /// The cue ball is never removed; asking for it returns `None`.
    pub fn remove_ball(&mut self, physics: &mut PhysicsWorld, index: usize) -> Option<Ball> {
        match self.balls.get(index) {
            Some(ball) if ball.is_cue() => {
                log::warn!("Refusing to remove the cue ball from the registry");
                return None;
            }
            None => return None,
            _ => {}
        }

        let mut ball = self.balls.remove(index);
        physics.remove_body(ball.handle);
        ball.alive = false;
        Some(ball)
    }

    /// Whether every ball has come to rest.
    ///
    /// Velocity components are truncated toward zero first, so a residual
    /// drift below one unit per second counts as stopped.
    pub fn all_stationary(&self, physics: &PhysicsWorld) -> bool {
        self.balls.iter().all(|ball| {
            let vel = physics.velocity(ball.handle);
            vel.x as i32 == 0 && vel.y as i32 == 0
        })
    }

    /// Number of balls in play (object balls + cue ball).
    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    /// Object balls still on the table.
    pub fn object_balls_remaining(&self) -> usize {
        self.balls.iter().filter(|b| !b.is_cue()).count()
    }
}

impl Default for BallRegistry {
    fn default() -> Self {
        Self::new()
    }
}
