//! The prelude is enough to wire a mower to a lawn.

use std::sync::Arc;
use std::time::Duration;

use mowsim::prelude::*;
use mowsim_test_utils::RecordingListener;

#[test]
fn prelude_lockstep_round_trip() {
    let c = MowerCoordinator::new(LockstepMower::new(3, 3), Lawn::try_new(3, 3).unwrap());
    assert_eq!(c.phase().message(), "Mower is idle. Press Start to begin mowing.");
    c.start_mowing();
    assert_eq!(c.phase(), MowerPhase::Mowing);
    assert_eq!(c.mower().run_to_completion(), 9);
    assert_eq!(c.renderer().to_string(), "...\n...\n...\n");
}

#[test]
fn prelude_realtime_matches_traversal_order() {
    let config = MowerConfig::with_tick_period(Duration::from_millis(1));
    let mower = Arc::new(RealtimeMower::with_config(3, 4, config).unwrap());
    let rec = Arc::new(RecordingListener::new());
    mower.add_listener(rec.clone());
    let lawn = Lawn::try_with_dims(mower.dims()).unwrap();
    let c = MowerCoordinator::new(Arc::clone(&mower), lawn);

    c.start_mowing();
    assert!(mower.wait_until_finished(Duration::from_secs(5)));
    let expected: Vec<Cell> = Traversal::new(GridDims::new(3, 4)).collect();
    assert_eq!(rec.cells(), expected);
    assert!(c.renderer().is_fully_cut());
}

#[test]
fn lawn_larger_than_cap_is_rejected_not_allocated() {
    assert!(matches!(
        Lawn::try_new(i64::MAX, i64::MAX),
        Err(LawnError::TooManyCells { .. })
    ));
    // The engine itself still accepts the clamped dimensions.
    let mower = LockstepMower::new(i64::MAX, i64::MAX);
    assert_eq!(mower.dims(), GridDims::new(i64::MAX, i64::MAX));
}

#[test]
fn zero_tick_period_is_a_config_error() {
    let config = MowerConfig::with_tick_period(Duration::ZERO);
    assert!(matches!(
        RealtimeMower::with_config(2, 2, config),
        Err(ConfigError::ZeroTickPeriod)
    ));
}
