//! Ball identities and the opening rack layout.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::physics::BallHandle;

/// Visual identity of a ball: object balls are numbered 1-15, the cue ball
/// is 16. The number selects the ball's sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BallId(pub u8);

impl BallId {
    pub const CUE: BallId = BallId(16);

    /// Number of object balls in a full rack.
    pub const OBJECT_BALLS: usize = 15;

    pub fn is_cue(self) -> bool {
        self == Self::CUE
    }
}

/// A ball on the table: a non-owning physics handle plus its identity.
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub handle: BallHandle,
    pub id: BallId,
    pub radius: f32,
    /// Cleared when the ball leaves the registry.
    pub alive: bool,
}

impl Ball {
    pub fn is_cue(&self) -> bool {
        self.id.is_cue()
    }
}

/// Opening positions for the 15 object balls, in creation order.
///
/// Five columns of 5, 4, 3, 2 and 1 balls. Columns step right by
/// `diameter + 1`; each column is shifted down by half a diameter so the
/// rack forms a triangle pointing right:
/// ```text
///  1
///     6
///  2     10
///     7     13
///  3     11    15
///     8     14
///  4     12
///     9
///  5
/// ```
pub fn rack_positions(origin: Vec2, diameter: f32) -> Vec<Vec2> {
    let spacing = diameter + 1.0;
    let mut positions = Vec::with_capacity(BallId::OBJECT_BALLS);
    let mut rows = 5;

    for col in 0..5 {
        for row in 0..rows {
            let x = origin.x + col as f32 * spacing;
            let y = origin.y + row as f32 * spacing + col as f32 * diameter / 2.0;
            positions.push(Vec2::new(x, y));
        }
        rows -= 1;
    }

    positions
}
