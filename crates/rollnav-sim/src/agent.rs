use glam::Vec3;
use serde::{Deserialize, Serialize};

use rollnav_core::math::signed_angle_deg;
use rollnav_core::transform::{ParentFrame, Transform, VelocitySource};

/// Steering parameters for [`NavAgent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Cruise speed (units/s).
    pub speed: f32,
    /// Maximum turn rate (degrees/s).
    pub angular_speed: f32,
    /// Speed change rate (units/s^2).
    pub acceleration: f32,
    /// Distance at which a waypoint counts as reached.
    pub stopping_distance: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            speed: 3.5,
            angular_speed: 120.0,
            acceleration: 8.0,
            stopping_distance: 0.5,
        }
    }
}

/// Waypoint-following navigation agent. Owns the parent transform the rolling
/// mesh hangs from and reports its velocity each frame.
#[derive(Debug, Clone)]
pub struct NavAgent {
    pub config: AgentConfig,
    pub transform: Transform,
    waypoints: Vec<Vec3>,
    next: usize,
    looping: bool,
    speed: f32,
    velocity: Vec3,
}

impl NavAgent {
    pub fn new(config: AgentConfig, start: Transform, waypoints: Vec<Vec3>, looping: bool) -> Self {
        Self {
            config,
            transform: start,
            waypoints,
            next: 0,
            looping,
            speed: 0.0,
            velocity: Vec3::ZERO,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Heading about +Y in degrees, 0 along +Z.
    pub fn heading_deg(&self) -> f32 {
        let f = self.transform.forward();
        f.x.atan2(f.z).to_degrees()
    }

    /// The waypoint currently being steered toward, if any remain.
    pub fn target(&self) -> Option<Vec3> {
        self.waypoints.get(self.next).copied()
    }

    pub fn is_finished(&self) -> bool {
        self.target().is_none()
    }

    /// Steer toward the current waypoint, then move.
    pub fn tick(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        self.advance_waypoint();

        let desired_speed = match self.target() {
            Some(target) => {
                self.turn_toward(target, dt);
                self.config.speed
            },
            None => 0.0,
        };

        let max_change = self.config.acceleration * dt;
        self.speed += (desired_speed - self.speed).clamp(-max_change, max_change);

        self.velocity = self.transform.forward() * self.speed;
        self.transform.translation += self.velocity * dt;
    }

    fn advance_waypoint(&mut self) {
        while let Some(target) = self.target() {
            let to_target = flat(target - self.transform.translation);
            if to_target.length() > self.config.stopping_distance {
                return;
            }
            self.next += 1;
            if self.next >= self.waypoints.len() && self.looping {
                self.next = 0;
                tracing::debug!("Agent lap complete");
                return;
            }
        }
    }

    fn turn_toward(&mut self, target: Vec3, dt: f32) {
        let Some(desired) = flat(target - self.transform.translation).try_normalize() else {
            return;
        };
        let forward = self.transform.forward();
        // Positive is a rotation toward `desired` about +Y.
        let delta = signed_angle_deg(forward, desired, Vec3::Y);
        let max_turn = self.config.angular_speed * dt;
        let turn = delta.clamp(-max_turn, max_turn);
        if turn != 0.0 {
            self.transform.rotate_around(self.transform.translation, Vec3::Y, turn);
        }
    }
}

fn flat(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

impl VelocitySource for NavAgent {
    fn velocity(&self) -> Vec3 {
        self.velocity
    }
}

impl ParentFrame for NavAgent {
    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    fn up(&self) -> Vec3 {
        self.transform.up()
    }
}
