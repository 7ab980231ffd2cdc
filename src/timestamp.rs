//! Filesystem-safe timestamp formatting.
//!
//! Frame file names embed the playback offset of the frame they hold, as
//! `H-MM-SS.CC` (hours, minutes, seconds, hundredths). Colons are replaced
//! by dashes so the result can be used directly inside a file name.

const MICROS_PER_SECOND: u64 = 1_000_000;
const MICROS_PER_CENTISECOND: f64 = 10_000.0;

/// Separator used in place of `:` between clock fields.
pub const FIELD_SEPARATOR: char = '-';

/// Format a playback offset in seconds as `H-MM-SS.CC`.
///
/// The offset is first brought to microsecond resolution, then the
/// sub-second part is rounded (half to even) to hundredths. Hours are not
/// padded and do not wrap at 24. Negative and non-finite inputs are treated
/// as zero.
///
/// # Example
///
/// ```
/// use framesift::format_duration;
///
/// assert_eq!(format_duration(0.2), "0-00-00.20");
/// assert_eq!(format_duration(3725.0), "1-02-05.00");
/// ```
pub fn format_duration(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };

    let total_micros = (seconds * MICROS_PER_SECOND as f64).round_ties_even() as u64;
    let mut whole_seconds = total_micros / MICROS_PER_SECOND;
    let micros = total_micros % MICROS_PER_SECOND;

    // No sub-second component: the fraction is a literal `.00`, never computed.
    if micros == 0 {
        return normalize(format!("{}.00", clock(whole_seconds)));
    }

    let mut centis = (micros as f64 / MICROS_PER_CENTISECOND).round_ties_even() as u64;
    if centis >= 100 {
        whole_seconds += 1;
        centis -= 100;
    }

    normalize(format!("{}.{centis:02}", clock(whole_seconds)))
}

fn clock(whole_seconds: u64) -> String {
    let hours = whole_seconds / 3600;
    let minutes = (whole_seconds % 3600) / 60;
    let seconds = whole_seconds % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

fn normalize(formatted: String) -> String {
    formatted.replace(':', &FIELD_SEPARATOR.to_string())
}
