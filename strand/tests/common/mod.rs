#![allow(dead_code)]

use std::time::Duration;

/// One scheduling "time unit" used by the timing-based tests.
pub const UNIT: Duration = Duration::from_millis(25);

/// Routes `log` output to the test harness. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
