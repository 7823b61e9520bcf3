use glam::Vec2;
use rapier2d::prelude::*;

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam to nalgebra and back
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn vec2_to_point(v: Vec2) -> nalgebra::Point2<f32> {
    nalgebra::Point2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Damping factor of the surface friction motor. Large enough that the motor
/// always saturates at its force cap, which turns it into a constant
/// deceleration rather than a velocity-proportional drag.
const FRICTION_MOTOR_DAMPING: f32 = 1.0e5;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Physical properties shared by every ball on the table.
#[derive(Debug, Clone, Copy)]
pub struct BallMaterial {
    /// Mass of each ball (unitless, uniform across balls).
    pub mass: f32,
    /// Restitution for ball-ball and ball-cushion contacts.
    pub restitution: f32,
    /// Force cap of the friction constraint pinning a ball to the table.
    pub friction_force: f32,
}

impl Default for BallMaterial {
    fn default() -> Self {
        Self {
            mass: 5.0,
            restitution: 0.8,
            friction_force: 1000.0,
        }
    }
}

/// Opaque handle to a dynamic ball: its body, collider and friction joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BallHandle {
    body: RigidBodyHandle,
    collider: ColliderHandle,
    joint: ImpulseJointHandle,
}

/// Opaque handle to a static polygon (a cushion).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolygonHandle {
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate for the table: ball bodies, static cushions
/// and the per-ball friction joints. Every Rapier object lives in the arenas
/// owned here; callers only ever see [`BallHandle`] / [`PolygonHandle`].
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    /// Immovable body the friction joints hang off (the table surface).
    surface: RigidBodyHandle,
    material: BallMaterial,
}

impl PhysicsWorld {
    /// Create a new physics world with the given gravity vector.
    /// Table-top play uses `Vec2::ZERO`; for Y-down coordinates a positive Y
    /// pulls balls toward the bottom of the screen.
    pub fn new(gravity: Vec2, material: BallMaterial) -> Self {
        let mut bodies = RigidBodySet::new();
        let surface = bodies.insert(RigidBodyBuilder::fixed().build());

        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            surface,
            material,
        }
    }

    /// Material applied to balls created from now on.
    pub fn material(&self) -> BallMaterial {
        self.material
    }

    /// Create a dynamic ball at `position` and pin it to the table surface
    /// with a force-capped friction joint anchored at that position.
    pub fn create_dynamic_ball(&mut self, radius: f32, position: Vec2) -> BallHandle {
        let rb = RigidBodyBuilder::dynamic()
            .translation(vec2_to_na(position))
            .ccd_enabled(true)
            .build();
        let body = self.bodies.insert(rb);

        let collider = ColliderBuilder::ball(radius)
            .mass(self.material.mass)
            .restitution(self.material.restitution)
            .friction(0.0)
            .build();
        let collider = self
            .colliders
            .insert_with_parent(collider, body, &mut self.bodies);

        let joint = self.friction_joint(position);
        let joint = self.impulse_joints.insert(self.surface, body, joint, true);

        BallHandle {
            body,
            collider,
            joint,
        }
    }

    /// Create an immovable convex polygon from world-space points.
    /// Returns `None` when the points do not span a convex area.
    pub fn create_static_polygon(&mut self, points: &[Vec2]) -> Option<PolygonHandle> {
        let hull: Vec<nalgebra::Point2<f32>> = points.iter().copied().map(vec2_to_point).collect();
        let collider = ColliderBuilder::convex_hull(&hull)?
            .restitution(self.material.restitution)
            .friction(0.0)
            .build();

        let body = self.bodies.insert(RigidBodyBuilder::fixed().build());
        let collider = self
            .colliders
            .insert_with_parent(collider, body, &mut self.bodies);

        Some(PolygonHandle { body, collider })
    }

    /// Remove a ball together with its collider and friction joint.
    pub fn remove_body(&mut self, handle: BallHandle) {
        self.bodies.remove(
            handle.body,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Remove a static polygon and its collider.
    pub fn remove_polygon(&mut self, handle: PolygonHandle) {
        self.bodies.remove(
            handle.body,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Advance the simulation by exactly one step of `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.align_friction_to_heading();
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Apply an instantaneous impulse at a point given in the ball's local frame.
    pub fn apply_impulse_at_local_point(&mut self, handle: BallHandle, impulse: Vec2, local_point: Vec2) {
        if let Some(rb) = self.bodies.get_mut(handle.body) {
            let world_point = *rb.position() * vec2_to_point(local_point);
            rb.apply_impulse_at_point(vec2_to_na(impulse), world_point, true);
        }
    }

    /// Current centre of a ball in world space.
    pub fn position(&self, handle: BallHandle) -> Vec2 {
        self.bodies
            .get(handle.body)
            .map(|rb| na_to_vec2(rb.translation()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Current linear velocity of a ball.
    pub fn velocity(&self, handle: BallHandle) -> Vec2 {
        self.bodies
            .get(handle.body)
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Teleport a ball.
    pub fn set_position(&mut self, handle: BallHandle, pos: Vec2) {
        if let Some(rb) = self.bodies.get_mut(handle.body) {
            rb.set_translation(vec2_to_na(pos), true);
        }
    }

    /// Set the linear velocity of a ball directly.
    pub fn set_velocity(&mut self, handle: BallHandle, vel: Vec2) {
        if let Some(rb) = self.bodies.get_mut(handle.body) {
            rb.set_linvel(vec2_to_na(vel), true);
        }
    }

    /// Whether the handle still refers to a live body.
    pub fn contains(&self, handle: BallHandle) -> bool {
        self.bodies.contains(handle.body)
    }

    /// Number of rigid bodies, including the table surface.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of colliders (balls + cushions).
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Number of friction joints.
    pub fn joint_count(&self) -> usize {
        self.impulse_joints.len()
    }

    // -- private helpers --

    /// All axes stay free; a zero-velocity motor with a capped force on the
    /// joint's X axis stands in for rolling resistance. The axis is turned
    /// onto the ball's heading before every step (see
    /// [`Self::align_friction_to_heading`]), so the cap bounds the whole
    /// friction force and the ball slows along a straight line.
    fn friction_joint(&self, anchor: Vec2) -> GenericJoint {
        GenericJointBuilder::new(JointAxesMask::empty())
            .local_anchor1(vec2_to_point(anchor))
            .local_anchor2(nalgebra::Point2::origin())
            .motor_model(JointAxis::LinX, MotorModel::ForceBased)
            .motor_velocity(JointAxis::LinX, 0.0, FRICTION_MOTOR_DAMPING)
            .motor_max_force(JointAxis::LinX, self.material.friction_force)
            .build()
    }

    /// Rotate each friction joint's frame so its X axis points along the
    /// ball's velocity. Balls at rest keep their last frame.
    fn align_friction_to_heading(&mut self) {
        for (_, joint) in self.impulse_joints.iter_mut() {
            let Some(rb) = self.bodies.get(joint.body2) else {
                continue;
            };
            let vel = rb.linvel();
            if vel.norm_squared() <= f32::EPSILON {
                continue;
            }
            let anchor = joint.data.local_frame1.translation.vector;
            joint
                .data
                .set_local_frame1(nalgebra::Isometry2::new(anchor, vel.y.atan2(vel.x)));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 120.0;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(Vec2::ZERO, BallMaterial::default())
    }

    #[test]
    fn create_and_remove_ball() {
        let mut world = world();
        let ball = world.create_dynamic_ball(18.0, Vec2::new(100.0, 100.0));
        // surface + ball
        assert_eq!(world.body_count(), 2);
        assert_eq!(world.joint_count(), 1);
        assert!(world.contains(ball));
        assert!(world.impulse_joints.get(ball.joint).is_some());
        assert!(world.colliders.get(ball.collider).is_some());

        world.remove_body(ball);
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.joint_count(), 0);
        assert_eq!(world.collider_count(), 0);
        assert!(!world.contains(ball));
    }

    #[test]
    fn removed_ball_reads_as_zero() {
        let mut world = world();
        let ball = world.create_dynamic_ball(18.0, Vec2::new(100.0, 100.0));
        world.remove_body(ball);
        assert_eq!(world.position(ball), Vec2::ZERO);
        assert_eq!(world.velocity(ball), Vec2::ZERO);
        // Mutations on a stale handle are ignored.
        world.set_velocity(ball, Vec2::new(10.0, 0.0));
        world.apply_impulse_at_local_point(ball, Vec2::new(10.0, 0.0), Vec2::ZERO);
    }

    #[test]
    fn impulse_changes_velocity_by_inverse_mass() {
        let mut world = world();
        let ball = world.create_dynamic_ball(18.0, Vec2::new(600.0, 300.0));
        world.step(DT);

        world.apply_impulse_at_local_point(ball, Vec2::new(1000.0, 0.0), Vec2::ZERO);
        world.step(DT);

        // 1000 / mass 5 = 200, minus at most one step of friction.
        let vel = world.velocity(ball);
        assert!(vel.x > 190.0 && vel.x <= 200.01, "vel={:?}", vel);
        assert!(vel.y.abs() < 0.001, "vel={:?}", vel);
    }

    #[test]
    fn friction_decelerates_then_stops() {
        let mut world = world();
        let ball = world.create_dynamic_ball(18.0, Vec2::new(600.0, 300.0));
        world.step(DT);
        world.set_velocity(ball, Vec2::new(300.0, 0.0));

        for _ in 0..60 {
            world.step(DT);
        }
        let half_second = world.velocity(ball).x;
        assert!(
            half_second > 0.0 && half_second < 300.0,
            "ball should be slowing but still rolling: vx={}",
            half_second
        );

        for _ in 0..600 {
            world.step(DT);
        }
        let vel = world.velocity(ball);
        assert_eq!(vel.x as i32, 0, "ball should have stopped: {:?}", vel);
        assert_eq!(vel.y as i32, 0, "ball should have stopped: {:?}", vel);
    }

    #[test]
    fn diagonal_roll_keeps_heading_and_decelerates_uniformly() {
        let mut world = world();
        let start = Vec2::new(600.0, 300.0);
        let ball = world.create_dynamic_ball(18.0, start);
        world.step(DT);

        let launch = Vec2::new(759.0, 251.0);
        let heading = launch.y.atan2(launch.x).to_degrees();
        world.set_velocity(ball, launch);

        // Cap 1000 on mass 5: 200 px/s^2 along the direction of travel.
        let decel = BallMaterial::default().friction_force / BallMaterial::default().mass;
        for frame in 1..=360 {
            world.step(DT);
            let vel = world.velocity(ball);
            let expected = launch.length() - decel * frame as f32 * DT;
            assert!(
                (vel.length() - expected).abs() < 2.0,
                "frame {frame}: speed {} expected {expected}",
                vel.length()
            );
            let vel_heading = vel.y.atan2(vel.x).to_degrees();
            assert!(
                (vel_heading - heading).abs() < 1.0,
                "frame {frame}: heading {vel_heading} drifted from {heading}"
            );
        }

        for _ in 0..240 {
            world.step(DT);
        }
        let vel = world.velocity(ball);
        assert_eq!((vel.x as i32, vel.y as i32), (0, 0), "ball should have stopped: {vel:?}");

        let travel = world.position(ball) - start;
        let travel_heading = travel.y.atan2(travel.x).to_degrees();
        assert!(
            (travel_heading - heading).abs() < 1.0,
            "ball curved off its aim line: {travel_heading} vs {heading}"
        );
    }

    #[test]
    fn set_position_and_velocity_directly() {
        let mut world = world();
        let ball = world.create_dynamic_ball(18.0, Vec2::new(100.0, 100.0));

        world.set_position(ball, Vec2::new(-100.0, -100.0));
        world.set_velocity(ball, Vec2::new(50.0, -30.0));

        assert_eq!(world.position(ball), Vec2::new(-100.0, -100.0));
        let vel = world.velocity(ball);
        assert!((vel.x - 50.0).abs() < 0.001);
        assert!((vel.y + 30.0).abs() < 0.001);
    }

    #[test]
    fn static_polygon_rejects_degenerate_outline() {
        let mut world = world();
        let collinear = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(20.0, 0.0),
        ];
        assert!(world.create_static_polygon(&collinear).is_none());
        assert_eq!(world.collider_count(), 0);
    }

    #[test]
    fn ball_rebounds_off_static_polygon() {
        let mut world = world();
        let wall = world
            .create_static_polygon(&[
                Vec2::new(109.0, 77.0),
                Vec2::new(88.0, 56.0),
                Vec2::new(564.0, 56.0),
                Vec2::new(555.0, 77.0),
            ])
            .expect("cushion is convex");
        assert!(world.colliders.get(wall.collider).is_some());
        assert!(world.bodies.get(wall.body).is_some());

        let ball = world.create_dynamic_ball(18.0, Vec2::new(300.0, 200.0));
        world.step(DT);
        world.set_velocity(ball, Vec2::new(0.0, -600.0));

        for _ in 0..120 {
            world.step(DT);
        }

        let pos = world.position(ball);
        let vel = world.velocity(ball);
        assert!(pos.y > 77.0, "ball must not pass the cushion: {:?}", pos);
        assert!(vel.y > 0.0, "ball should be moving away after the bounce: {:?}", vel);
    }

    #[test]
    fn two_balls_collide_and_exchange_momentum() {
        let mut world = world();
        let a = world.create_dynamic_ball(18.0, Vec2::new(400.0, 300.0));
        let b = world.create_dynamic_ball(18.0, Vec2::new(500.0, 300.0));
        world.step(DT);
        world.set_velocity(a, Vec2::new(800.0, 0.0));

        for _ in 0..30 {
            world.step(DT);
        }

        assert!(world.velocity(b).x > 0.0, "struck ball should move right");
        assert!(world.velocity(a).x < world.velocity(b).x);
    }

    #[test]
    fn gravity_pulls_ball_down() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 900.0), BallMaterial::default());
        let ball = world.create_dynamic_ball(18.0, Vec2::new(100.0, 0.0));
        for _ in 0..60 {
            world.step(DT);
        }
        assert!(world.position(ball).y > 0.0);
    }

    #[test]
    fn material_defaults() {
        let mat = BallMaterial::default();
        assert!((mat.mass - 5.0).abs() < f32::EPSILON);
        assert!((mat.restitution - 0.8).abs() < f32::EPSILON);
        assert!((mat.friction_force - 1000.0).abs() < f32::EPSILON);
    }
}
