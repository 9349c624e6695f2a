use chrono::{TimeZone, Utc};

pub type DateTime = chrono::DateTime<Utc>;
pub type ChronoDuration = chrono::Duration;

pub fn now() -> DateTime {
    Utc::now()
}

pub trait DateTimeExt<Tz: TimeZone> {
    /// Elapsed time from `earlier` up to `self`, saturating at zero when
    /// `earlier` lies in the future (e.g. clock skew against the server).
    fn elapsed_since(&self, earlier: chrono::DateTime<Tz>) -> std::time::Duration;
}

impl DateTimeExt<Utc> for DateTime {
    fn elapsed_since(&self, earlier: chrono::DateTime<Utc>) -> std::time::Duration {
        self.signed_duration_since(earlier)
            .to_std()
            .unwrap_or_default()
    }
}

/// Round to whole seconds, half away from zero.
pub fn round_secs(d: std::time::Duration) -> u64 {
    let secs = d.as_secs();
    if d.subsec_millis() >= 500 {
        secs + 1
    } else {
        secs
    }
}

/// Renders a duration rounded to whole seconds as `1h2m3s`, `4m5s` or `6s`.
pub fn format_duration(d: std::time::Duration) -> String {
    let total = round_secs(d);
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
