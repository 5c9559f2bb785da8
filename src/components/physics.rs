use glam::{Quat, Vec3};

use super::LocalTransform;

/// Ground locomotion for the actor.
#[derive(Debug)]
pub struct GroundMovement {
    speed: f32,
    trail: bool,
    inside_flow_zone: bool,
    velocity: Vec3,
    last_speed_multiplier: f32,
}

impl GroundMovement {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            trail: false,
            inside_flow_zone: false,
            velocity: Vec3::ZERO,
            last_speed_multiplier: 1.0,
        }
    }

    /// Move along `direction` projected onto the ground plane for one step of
    /// `dt` seconds, and face the direction of travel.
    pub fn move_actor(
        &mut self,
        transform: &mut LocalTransform,
        direction: Vec3,
        speed_multiplier: f32,
        dt: f32,
    ) {
        let flat = Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero();
        self.velocity = flat * self.speed * speed_multiplier;
        self.last_speed_multiplier = speed_multiplier;
        transform.position += self.velocity * dt;
        if flat != Vec3::ZERO {
            transform.rotation = Quat::from_rotation_y(flat.x.atan2(flat.z));
        }
    }

    pub fn stop(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    pub fn set_trail(&mut self, enabled: bool) {
        self.trail = enabled;
    }

    pub fn trail_enabled(&self) -> bool {
        self.trail
    }

    pub fn enter_flow_zone(&mut self) {
        self.inside_flow_zone = true;
    }

    pub fn leave_flow_zone(&mut self) {
        self.inside_flow_zone = false;
    }

    pub fn is_inside_flow_zone(&self) -> bool {
        self.inside_flow_zone
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn last_speed_multiplier(&self) -> f32 {
        self.last_speed_multiplier
    }
}
