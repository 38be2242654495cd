//! End-to-end runs: agent steering, controller ticking, and mesh transform
//! composed together over whole paths.

use glam::Vec3;

use rollnav_core::config::RollConfig;
use rollnav_core::controller::RollController;
use rollnav_core::test_helpers::{run_headings, turning_headings};
use rollnav_core::tilt::TiltPhase;
use rollnav_sim::config::SimConfig;
use rollnav_sim::path::PathKind;
use rollnav_sim::runner::{RunSummary, Simulation};

fn run(config: SimConfig) -> (Simulation, RunSummary) {
    let mut sim = Simulation::new(config).expect("valid config");
    let records = sim.run();
    let summary = RunSummary::from_records(&records);
    (sim, summary)
}

#[test]
fn circle_banks_one_way() {
    let (sim, summary) = run(SimConfig {
        frames: 900,
        path: PathKind::Circle,
        ..SimConfig::default()
    });
    let amount = sim.controller().config().tilt_amount;
    // Continuous turning in one direction only ever asks for one side.
    assert!(
        summary.outward_requests == 0 || summary.inward_requests == 0,
        "{summary:?}"
    );
    assert!(summary.max_abs_tilt_deg > amount * 0.5, "{summary:?}");
    assert!(summary.max_abs_tilt_deg <= amount + 0.5, "{summary:?}");
}

#[test]
fn mesh_lean_matches_accumulated_bank() {
    let mut sim = Simulation::new(SimConfig {
        frames: 700,
        path: PathKind::Circle,
        ..SimConfig::default()
    })
    .unwrap();
    sim.run();

    // Bank rotates about the parent's forward axis and roll about the mesh's
    // own right axis, so the right axis seen from the parent only carries
    // the bank.
    let parent = sim.agent().transform;
    let right = parent.inverse_transform_direction(sim.mesh_world().right());
    let lean = right.y.atan2(right.x).to_degrees();
    let total = sim.controller().total_angle();
    assert!((lean - total).abs() < 0.05, "lean {lean} vs bank {total}");
    assert!(right.z.abs() < 1e-3);
}

#[test]
fn roll_tracks_distance() {
    let (sim, summary) = run(SimConfig {
        frames: 600,
        path: PathKind::Straight,
        ..SimConfig::default()
    });
    let radius = sim.controller().config().object_radius;
    let expected = summary.distance * 360.0 / (2.0 * std::f32::consts::PI * radius);
    assert!(
        (summary.total_roll_deg - expected).abs() < expected * 0.02,
        "roll {} vs expected {expected}",
        summary.total_roll_deg
    );
}

#[test]
fn slalom_alternates_bank_direction() {
    let (_, summary) = run(SimConfig {
        frames: 1800,
        path: PathKind::Slalom,
        path_scale: 8.0,
        ..SimConfig::default()
    });
    assert!(summary.outward_requests > 0, "{summary:?}");
    assert!(summary.inward_requests > 0, "{summary:?}");
}

#[test]
fn stop_freezes_bank_until_reset() {
    let (sim, summary) = run(SimConfig {
        frames: 600,
        path: PathKind::Circle,
        stop_at_frame: Some(120),
        ..SimConfig::default()
    });
    assert_eq!(sim.controller().phase(), TiltPhase::Halted);
    assert!(summary.final_tilt_deg.abs() <= summary.max_abs_tilt_deg);

    let (sim, _) = run(SimConfig {
        frames: 600,
        path: PathKind::Circle,
        stop_at_frame: Some(120),
        reset_at_frame: Some(240),
        ..SimConfig::default()
    });
    assert_ne!(sim.controller().phase(), TiltPhase::Halted);
}

#[test]
fn clamped_large_dt_stays_in_bounds() {
    let (_, summary) = run(SimConfig {
        frames: 200,
        dt: 0.5,
        path: PathKind::Square,
        roll: RollConfig {
            tilt_boundary: 1.0,
            tilt_speed: 50.0,
            clamp_tilt: true,
            ..RollConfig::default()
        },
        ..SimConfig::default()
    });
    assert!(summary.max_abs_tilt_deg <= 30.0 + 1e-3, "{summary:?}");
}

#[test]
fn helper_turn_converges_to_bank_amount() {
    let dt = 1.0 / 30.0;
    let mut ctrl = RollController::default();
    let headings = turning_headings(0.0, -60.0, dt, 600);
    let reports = run_headings(&mut ctrl, &headings, dt, Vec3::Z * 2.0);
    assert!((ctrl.total_angle() - 30.0).abs() < 0.5);
    assert!(reports.iter().all(|r| r.roll_deg > 0.0));
}
