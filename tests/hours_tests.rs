use fleetlog::core::calculator::hours::{compute_hours, try_compute_hours};
use fleetlog::errors::AppError;

#[test]
fn test_day_shift() {
    assert_eq!(compute_hours(Some("08:00"), Some("17:00")), 9);
}

#[test]
fn test_overnight_shift_wraps() {
    assert_eq!(compute_hours(Some("22:00"), Some("06:00")), 8);
    assert_eq!(compute_hours(Some("23:30"), Some("00:15")), 0);
}

#[test]
fn test_missing_side_is_zero() {
    assert_eq!(compute_hours(None, Some("10:00")), 0);
    assert_eq!(compute_hours(Some("10:00"), None), 0);
    assert_eq!(compute_hours(None, None), 0);
    assert_eq!(compute_hours(Some(""), Some("10:00")), 0);
}

#[test]
fn test_malformed_is_zero() {
    assert_eq!(compute_hours(Some("10:00"), Some("invalid")), 0);
    assert_eq!(compute_hours(Some("25:00"), Some("10:00")), 0);
    assert_eq!(compute_hours(Some("8:00"), Some("10:00")), 0);
}

#[test]
fn test_partial_hours_truncate() {
    assert_eq!(compute_hours(Some("08:00"), Some("16:59")), 8);
    assert_eq!(compute_hours(Some("08:10"), Some("09:05")), 0);
}

#[test]
fn test_same_start_and_end_is_zero() {
    assert_eq!(compute_hours(Some("12:00"), Some("12:00")), 0);
}

#[test]
fn test_try_compute_reports_malformed_time() {
    match try_compute_hours(Some("10:00"), Some("invalid")) {
        Err(AppError::InvalidTime(t)) => assert_eq!(t, "invalid"),
        other => panic!("unexpected: {other:?}"),
    }
    assert!(matches!(try_compute_hours(None, Some("10:00")), Ok(None)));
    assert!(matches!(try_compute_hours(Some("07:00"), Some("19:30")), Ok(Some(12))));
}
