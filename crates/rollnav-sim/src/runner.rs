use glam::Vec3;
use serde::{Deserialize, Serialize};

use rollnav_core::controller::RollController;
use rollnav_core::curvature::TiltRequest;
use rollnav_core::error::ConfigError;
use rollnav_core::tilt::TiltPhase;
use rollnav_core::transform::{Parented, Transform};

use crate::agent::NavAgent;
use crate::config::SimConfig;

/// One simulated frame, as written to the output stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub frame: u32,
    pub time: f32,
    pub position: Vec3,
    pub heading_deg: f32,
    pub speed: f32,
    pub roll_deg: f32,
    pub tilt_deg: f32,
    pub total_tilt_deg: f32,
    pub phase: TiltPhase,
    pub request: Option<TiltRequest>,
    /// World-space up vector of the mesh after this frame.
    pub mesh_up: Vec3,
}

/// Aggregate figures for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub frames: u32,
    pub distance: f32,
    pub total_roll_deg: f32,
    pub max_abs_tilt_deg: f32,
    pub final_tilt_deg: f32,
    pub frames_tilting: u32,
    pub outward_requests: u32,
    pub inward_requests: u32,
    pub neutral_requests: u32,
}

impl RunSummary {
    pub fn from_records(records: &[FrameRecord]) -> Self {
        let mut summary = Self {
            frames: records.len() as u32,
            ..Self::default()
        };
        for pair in records.windows(2) {
            summary.distance += (pair[1].position - pair[0].position).length();
        }
        for r in records {
            summary.total_roll_deg += r.roll_deg;
            summary.max_abs_tilt_deg = summary.max_abs_tilt_deg.max(r.total_tilt_deg.abs());
            if r.phase != TiltPhase::Idle {
                summary.frames_tilting += 1;
            }
            match r.request {
                Some(TiltRequest::Outward { .. }) => summary.outward_requests += 1,
                Some(TiltRequest::Inward { .. }) => summary.inward_requests += 1,
                Some(TiltRequest::Neutral { .. }) => summary.neutral_requests += 1,
                None => {},
            }
        }
        summary.final_tilt_deg = records.last().map_or(0.0, |r| r.total_tilt_deg);
        summary
    }
}

/// Fixed-step host loop: moves the agent, then ticks the controller against
/// it, the way an engine runs navigation before per-object scripts.
pub struct Simulation {
    config: SimConfig,
    agent: NavAgent,
    controller: RollController,
    mesh_local: Transform,
    frame: u32,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let agent = NavAgent::new(
            config.agent.clone(),
            Transform::IDENTITY,
            config.path.waypoints(config.path_scale),
            config.path.loops(),
        );
        let controller = RollController::new(config.roll.clone())?;
        Ok(Self {
            config,
            agent,
            controller,
            mesh_local: Transform::IDENTITY,
            frame: 0,
        })
    }

    pub fn controller(&self) -> &RollController {
        &self.controller
    }

    pub fn agent(&self) -> &NavAgent {
        &self.agent
    }

    /// World transform of the rolling mesh.
    pub fn mesh_world(&self) -> Transform {
        self.agent.transform.mul_transform(&self.mesh_local)
    }

    pub fn is_done(&self) -> bool {
        self.frame >= self.config.frames
    }

    /// Advance one frame.
    pub fn step(&mut self) -> FrameRecord {
        let dt = self.config.dt;

        if self.config.stop_at_frame == Some(self.frame) {
            tracing::info!(frame = self.frame, "Stopping tilt");
            self.controller.stop_tilting();
        }
        if self.config.reset_at_frame == Some(self.frame) {
            tracing::info!(frame = self.frame, "Resetting tilt");
            self.controller.reset_tilting();
        }

        self.agent.tick(dt);

        let parent = self.agent.transform;
        let mut mesh = Parented {
            parent: &parent,
            local: &mut self.mesh_local,
        };
        let report = self.controller.tick(dt, &self.agent, &parent, &mut mesh);

        let record = FrameRecord {
            frame: self.frame,
            time: (self.frame + 1) as f32 * dt,
            position: parent.translation,
            heading_deg: self.agent.heading_deg(),
            speed: self.agent.speed(),
            roll_deg: report.roll_deg,
            tilt_deg: report.tilt_deg,
            total_tilt_deg: self.controller.total_angle(),
            phase: report.phase,
            request: report.request,
            mesh_up: self.mesh_world().up(),
        };
        self.frame += 1;
        record
    }

    /// Run the remaining frames.
    pub fn run(&mut self) -> Vec<FrameRecord> {
        let remaining = self.config.frames.saturating_sub(self.frame) as usize;
        let mut records = Vec::with_capacity(remaining);
        while !self.is_done() {
            records.push(self.step());
        }
        tracing::debug!(frames = records.len(), "Simulation finished");
        records
    }
}
