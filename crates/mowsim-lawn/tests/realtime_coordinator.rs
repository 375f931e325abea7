//! A coordinator driving a realtime mower paints the lawn as it ticks.

use std::sync::Arc;
use std::time::Duration;

use mowsim_core::MowerPhase;
use mowsim_engine::{Mower, MowerConfig, RealtimeMower};
use mowsim_lawn::{CellMark, Lawn, Mediator, MowerCoordinator};
use mowsim_test_utils::RecordingListener;

fn coordinator(rows: i64, cols: i64) -> MowerCoordinator<Arc<RealtimeMower>, Lawn> {
    let mower = RealtimeMower::with_config(
        rows,
        cols,
        MowerConfig::with_tick_period(Duration::from_millis(2)),
    )
    .unwrap();
    MowerCoordinator::new(Arc::new(mower), Lawn::try_new(rows, cols).unwrap())
}

#[test]
fn realtime_run_cuts_whole_lawn() {
    let c = coordinator(4, 5);
    c.start_mowing();
    assert!(c.mower().wait_until_finished(Duration::from_secs(5)));
    assert!(c.renderer().is_fully_cut());
    assert_eq!(c.phase(), MowerPhase::Finished);
    assert_eq!(c.phase().to_string(), "Mowing completed!");
}

#[test]
fn lawn_tracks_listener_progress_across_pause() {
    let c = coordinator(5, 5);
    let rec = Arc::new(RecordingListener::new());
    c.mower().add_listener(rec.clone());

    c.start_mowing();
    assert!(rec.wait_for(4, Duration::from_secs(5)));
    c.stop_mowing();
    // Let an in-flight tick land before comparing.
    std::thread::sleep(Duration::from_millis(20));
    assert_eq!(c.phase(), MowerPhase::Paused);

    let lawn = c.renderer().clone();
    for cell in rec.cells() {
        assert_eq!(
            lawn.cell(i64::from(cell.row), i64::from(cell.col)),
            Some(CellMark::Cut)
        );
    }
    assert_eq!(lawn.cut_count(), rec.len());

    c.start_mowing();
    assert!(c.mower().wait_until_finished(Duration::from_secs(5)));
    assert_eq!(c.renderer().cut_count(), 25);
}

#[test]
fn dropping_coordinator_stops_ticking() {
    let rec = Arc::new(RecordingListener::new());
    {
        let c = coordinator(10, 10);
        c.mower().add_listener(rec.clone());
        c.start_mowing();
        assert!(rec.wait_for(1, Duration::from_secs(5)));
    }
    let after_drop = rec.len();
    std::thread::sleep(Duration::from_millis(30));
    assert_eq!(rec.len(), after_drop);
}
