//! Pocket detection, run once per frame right after the physics step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::ball::BallId;
use crate::components::table::Pocket;
use crate::core::physics::PhysicsWorld;
use crate::core::registry::BallRegistry;
use crate::core::session::GameSession;

/// How the gap between a ball centre and a pocket centre is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PocketDistance {
    /// `sqrt(dx²) + dy²`, i.e. `|dx| + dy²`. Vertical offsets grow
    /// quadratically, so pockets capture far more readily along x than y.
    /// This is the behaviour the game has always shipped with.
    #[default]
    Legacy,
    /// True Euclidean distance, `sqrt(dx² + dy²)`.
    Euclidean,
}

impl PocketDistance {
    pub fn measure(self, ball: Vec2, pocket: Vec2) -> f32 {
        let dx = (ball.x - pocket.x).abs();
        let dy = (ball.y - pocket.y).abs();
        match self {
            PocketDistance::Legacy => (dx * dx).sqrt() + dy * dy,
            PocketDistance::Euclidean => (dx * dx + dy * dy).sqrt(),
        }
    }
}

/// Something that dropped during a resolver pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PotEvent {
    /// The cue ball went down and was parked off the table.
    CueBall { pocket: usize },
    /// An object ball went down and left play.
    ObjectBall { id: BallId, pocket: usize },
}

/// Pocket rules applied to every ball each frame.
#[derive(Debug, Clone, Copy)]
pub struct PocketResolver {
    pub distance: PocketDistance,
    /// Where a potted cue ball waits until the next shot.
    pub parking_spot: Vec2,
}

impl PocketResolver {
    /// Test every ball against every pocket and apply the consequences.
    ///
    /// Works from a snapshot of the registry: a ball is judged at most once
    /// (first matching pocket wins) and object balls are removed only after
    /// the scan completes.
    pub fn resolve(
        &self,
        pockets: &[Pocket],
        physics: &mut PhysicsWorld,
        registry: &mut BallRegistry,
        session: &mut GameSession,
    ) -> Vec<PotEvent> {
        let snapshot: Vec<(usize, BallId, Vec2)> = registry
            .balls()
            .iter()
            .enumerate()
            .map(|(index, ball)| (index, ball.id, physics.position(ball.handle)))
            .collect();

        let mut events = Vec::new();
        let mut removals = Vec::new();

        for (index, id, pos) in snapshot {
            let Some(pocket) = pockets
                .iter()
                .position(|p| self.distance.measure(pos, p.center) <= p.radius)
            else {
                continue;
            };

            if id.is_cue() {
                session.record_cue_pot();
                if let Some(cue) = registry.cue_ball() {
                    physics.set_position(cue.handle, self.parking_spot);
                    physics.set_velocity(cue.handle, Vec2::ZERO);
                }
                events.push(PotEvent::CueBall { pocket });
            } else {
                session.record_object_pot(id);
                removals.push(index);
                events.push(PotEvent::ObjectBall { id, pocket });
            }
        }

        // Back to front so earlier indices stay valid.
        for index in removals.into_iter().rev() {
            registry.remove_ball(physics, index);
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::physics::BallMaterial;

    const PARKING: Vec2 = Vec2::new(-100.0, -100.0);

    fn resolver(distance: PocketDistance) -> PocketResolver {
        PocketResolver {
            distance,
            parking_spot: PARKING,
        }
    }

    fn pocket(x: f32, y: f32) -> Pocket {
        Pocket {
            center: Vec2::new(x, y),
            radius: 33.0,
        }
    }

    struct Table {
        physics: PhysicsWorld,
        registry: BallRegistry,
        session: GameSession,
    }

    fn table(object_balls: &[(u8, Vec2)], cue: Vec2) -> Table {
        let mut physics = PhysicsWorld::new(Vec2::ZERO, BallMaterial::default());
        let mut registry = BallRegistry::new();
        for &(n, pos) in object_balls {
            registry.spawn(&mut physics, BallId(n), 18.0, pos);
        }
        registry.spawn(&mut physics, BallId::CUE, 18.0, cue);
        Table {
            physics,
            registry,
            session: GameSession::new(3),
        }
    }

    #[test]
    fn legacy_distance_is_abs_dx_plus_dy_squared() {
        let p = Vec2::new(100.0, 100.0);
        assert!((PocketDistance::Legacy.measure(Vec2::new(120.0, 100.0), p) - 20.0).abs() < 1e-4);
        assert!((PocketDistance::Legacy.measure(Vec2::new(100.0, 106.0), p) - 36.0).abs() < 1e-4);
        assert!((PocketDistance::Legacy.measure(Vec2::new(97.0, 102.0), p) - 7.0).abs() < 1e-4);
    }

    #[test]
    fn euclidean_distance() {
        let d = PocketDistance::Euclidean.measure(Vec2::new(103.0, 104.0), Vec2::new(100.0, 100.0));
        assert!((d - 5.0).abs() < 1e-4);
    }

    #[test]
    fn legacy_capture_is_asymmetric() {
        let p = pocket(500.0, 300.0);
        // 30 units sideways is inside the radius, 6 units vertically is not.
        assert!(PocketDistance::Legacy.measure(Vec2::new(530.0, 300.0), p.center) <= p.radius);
        assert!(PocketDistance::Legacy.measure(Vec2::new(500.0, 306.0), p.center) > p.radius);
        assert!(PocketDistance::Euclidean.measure(Vec2::new(500.0, 306.0), p.center) <= p.radius);
    }

    #[test]
    fn object_ball_in_pocket_is_removed_and_recorded() {
        let mut t = table(
            &[(1, Vec2::new(400.0, 300.0)), (2, Vec2::new(55.0, 63.0))],
            Vec2::new(888.0, 339.0),
        );
        let events = resolver(PocketDistance::Legacy).resolve(
            &[pocket(55.0, 63.0)],
            &mut t.physics,
            &mut t.registry,
            &mut t.session,
        );

        assert_eq!(events, vec![PotEvent::ObjectBall { id: BallId(2), pocket: 0 }]);
        assert_eq!(t.registry.len(), 2);
        assert_eq!(t.session.potted(), &[BallId(2)]);
        assert_eq!(t.session.lives(), 3);
        assert!(t.registry.cue_ball().is_some());
    }

    #[test]
    fn several_object_balls_removed_in_one_pass() {
        let mut t = table(
            &[
                (1, Vec2::new(55.0, 63.0)),
                (2, Vec2::new(400.0, 300.0)),
                (3, Vec2::new(1134.0, 616.0)),
            ],
            Vec2::new(888.0, 339.0),
        );
        let pockets = [pocket(55.0, 63.0), pocket(1134.0, 616.0)];
        resolver(PocketDistance::Legacy).resolve(&pockets, &mut t.physics, &mut t.registry, &mut t.session);

        let ids: Vec<BallId> = t.registry.balls().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![BallId(2), BallId::CUE]);
        assert_eq!(t.session.potted(), &[BallId(1), BallId(3)]);
    }

    #[test]
    fn cue_ball_is_parked_not_removed() {
        let mut t = table(&[(1, Vec2::new(400.0, 300.0))], Vec2::new(55.0, 63.0));
        let cue = t.registry.cue_ball().unwrap().handle;
        t.physics.set_velocity(cue, Vec2::new(40.0, 40.0));

        let events = resolver(PocketDistance::Legacy).resolve(
            &[pocket(55.0, 63.0)],
            &mut t.physics,
            &mut t.registry,
            &mut t.session,
        );

        assert_eq!(events, vec![PotEvent::CueBall { pocket: 0 }]);
        assert_eq!(t.registry.len(), 2);
        assert_eq!(t.session.lives(), 2);
        assert!(t.session.cue_ball_potted());
        assert!(t.session.potted().is_empty());
        assert_eq!(t.physics.position(cue), PARKING);
        assert_eq!(t.physics.velocity(cue), Vec2::ZERO);
    }

    #[test]
    fn cue_ball_over_overlapping_pockets_costs_one_life() {
        let mut t = table(&[], Vec2::new(300.0, 300.0));
        let pockets = [pocket(300.0, 300.0), pocket(305.0, 300.0), pocket(295.0, 300.0)];

        let events = resolver(PocketDistance::Legacy).resolve(
            &pockets,
            &mut t.physics,
            &mut t.registry,
            &mut t.session,
        );

        assert_eq!(events.len(), 1);
        assert_eq!(t.session.lives(), 2);
    }

    #[test]
    fn object_ball_over_overlapping_pockets_recorded_once() {
        let mut t = table(&[(4, Vec2::new(300.0, 300.0))], Vec2::new(888.0, 339.0));
        let pockets = [pocket(300.0, 300.0), pocket(310.0, 300.0)];

        let events = resolver(PocketDistance::Legacy).resolve(
            &pockets,
            &mut t.physics,
            &mut t.registry,
            &mut t.session,
        );

        assert_eq!(events, vec![PotEvent::ObjectBall { id: BallId(4), pocket: 0 }]);
        assert_eq!(t.session.potted(), &[BallId(4)]);
        assert_eq!(t.registry.len(), 1);
    }

    #[test]
    fn parked_cue_ball_is_not_potted_again() {
        let mut t = table(&[], PARKING);
        let pockets: Vec<Pocket> = crate::components::table::TableGeometry::standard(66.0)
            .pockets()
            .to_vec();
        let events = resolver(PocketDistance::Legacy).resolve(
            &pockets,
            &mut t.physics,
            &mut t.registry,
            &mut t.session,
        );
        assert!(events.is_empty());
        assert_eq!(t.session.lives(), 3);
    }
}
