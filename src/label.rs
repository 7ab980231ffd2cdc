//! Run labels.
//!
//! Every frame written during one run shares a label derived from the
//! wall-clock time the run started. The label is captured once and handed
//! to the selector as a plain string.

use chrono::{Local, Timelike};

/// Default prefix placed before the time-of-day digits.
pub const DEFAULT_LABEL_PREFIX: &str = "run_";

/// Build a run label from a prefix and a time of day.
///
/// Hour, minute and second are concatenated as unpadded decimals, so
/// 09:05:07 becomes `957`.
///
/// # Example
///
/// ```
/// use chrono::NaiveTime;
/// use framesift::run_label;
///
/// let time = NaiveTime::from_hms_opt(14, 3, 59).unwrap();
/// assert_eq!(run_label("run_", &time), "run_14359");
/// ```
pub fn run_label<T: Timelike>(prefix: &str, time: &T) -> String {
    format!(
        "{prefix}{}{}{}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

/// Capture the label for a run starting now, in local time.
pub fn run_label_now(prefix: &str) -> String {
    let label = run_label(prefix, &Local::now());
    log::debug!("Run label: {label}");
    label
}
