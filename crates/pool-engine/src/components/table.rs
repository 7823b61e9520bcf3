//! Static table layout: cushion outlines and pocket mouths.

use glam::Vec2;

use crate::core::physics::{PhysicsWorld, PolygonHandle};
use crate::error::PoolError;

/// Cushion outlines in screen coordinates, matching the table artwork.
/// Top pair, bottom pair, then left and right.
const CUSHIONS: [[(f32, f32); 4]; 6] = [
    [(88.0, 56.0), (109.0, 77.0), (555.0, 77.0), (564.0, 56.0)],
    [(621.0, 56.0), (630.0, 77.0), (1081.0, 77.0), (1102.0, 56.0)],
    [(89.0, 621.0), (110.0, 600.0), (556.0, 600.0), (564.0, 621.0)],
    [(622.0, 621.0), (630.0, 600.0), (1081.0, 600.0), (1102.0, 621.0)],
    [(56.0, 96.0), (77.0, 117.0), (77.0, 560.0), (56.0, 581.0)],
    [(1143.0, 96.0), (1122.0, 117.0), (1122.0, 560.0), (1143.0, 581.0)],
];

/// Pocket centres, in the order they are checked.
const POCKETS: [(f32, f32); 6] = [
    (55.0, 63.0),
    (592.0, 48.0),
    (1134.0, 64.0),
    (55.0, 616.0),
    (592.0, 629.0),
    (1134.0, 616.0),
];

/// A pocket is purely geometric; it never takes part in the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pocket {
    pub center: Vec2,
    /// Capture radius (half the pocket diameter).
    pub radius: f32,
}

/// Immutable description of the table.
#[derive(Debug, Clone)]
pub struct TableGeometry {
    cushions: Vec<Vec<Vec2>>,
    pockets: Vec<Pocket>,
}

impl TableGeometry {
    pub fn new(cushions: Vec<Vec<Vec2>>, pockets: Vec<Pocket>) -> Self {
        Self { cushions, pockets }
    }

    /// The standard six-pocket table.
    pub fn standard(pocket_diameter: f32) -> Self {
        let cushions = CUSHIONS
            .iter()
            .map(|outline| outline.iter().map(|&(x, y)| Vec2::new(x, y)).collect())
            .collect();
        let pockets = POCKETS
            .iter()
            .map(|&(x, y)| Pocket {
                center: Vec2::new(x, y),
                radius: pocket_diameter / 2.0,
            })
            .collect();
        Self::new(cushions, pockets)
    }

    pub fn cushions(&self) -> &[Vec<Vec2>] {
        &self.cushions
    }

    pub fn pockets(&self) -> &[Pocket] {
        &self.pockets
    }

    /// Add one static polygon per cushion to the physics world.
    ///
    /// All or nothing: if any outline is rejected, the cushions already added
    /// are removed again before the error is returned.
    pub fn build(&self, physics: &mut PhysicsWorld) -> Result<Vec<PolygonHandle>, PoolError> {
        let mut handles = Vec::with_capacity(self.cushions.len());
        for (index, outline) in self.cushions.iter().enumerate() {
            match physics.create_static_polygon(outline) {
                Some(handle) => handles.push(handle),
                None => {
                    for handle in handles {
                        physics.remove_polygon(handle);
                    }
                    return Err(PoolError::InvalidCushion {
                        index,
                        vertex_count: outline.len(),
                    });
                }
            }
        }
        Ok(handles)
    }
}
