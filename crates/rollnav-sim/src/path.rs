use std::f32::consts::TAU;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Points per lap on the circle path.
const CIRCLE_SEGMENTS: usize = 24;
/// Gates on the slalom path.
const SLALOM_GATES: usize = 8;

/// Waypoint layouts for the simulated agent. Every path starts at the origin
/// heading along +Z.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    /// One long straight run.
    Straight,
    /// Closed loop curving toward +X.
    #[default]
    Circle,
    /// Alternating gates either side of the +Z axis.
    Slalom,
    /// Closed square with four sharp corners.
    Square,
}

impl PathKind {
    /// Waypoints for this layout; `scale` is the circle radius, square side,
    /// or slalom gate spacing in world units.
    pub fn waypoints(self, scale: f32) -> Vec<Vec3> {
        match self {
            Self::Straight => vec![Vec3::new(0.0, 0.0, scale * 10.0)],
            Self::Circle => (1..=CIRCLE_SEGMENTS)
                .map(|i| {
                    let theta = TAU * i as f32 / CIRCLE_SEGMENTS as f32;
                    Vec3::new(scale - scale * theta.cos(), 0.0, scale * theta.sin())
                })
                .collect(),
            Self::Slalom => (1..=SLALOM_GATES)
                .map(|i| {
                    let side = if i % 2 == 1 { 0.5 } else { -0.5 };
                    Vec3::new(side * scale, 0.0, i as f32 * scale)
                })
                .collect(),
            Self::Square => vec![
                Vec3::new(0.0, 0.0, scale),
                Vec3::new(scale, 0.0, scale),
                Vec3::new(scale, 0.0, 0.0),
                Vec3::ZERO,
            ],
        }
    }

    /// Whether the agent should wrap back to the first waypoint.
    pub fn loops(self) -> bool {
        matches!(self, Self::Circle | Self::Square)
    }
}
