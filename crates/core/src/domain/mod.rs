pub mod chat;
pub mod contract;
pub mod recommendation;

use chrono::{DateTime, SecondsFormat, Utc};

/// ISO-8601 UTC with millisecond precision, e.g. `2026-01-27T10:00:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn iso_timestamp_uses_millis_and_z_suffix() {
        let at = Utc.with_ymd_and_hms(2026, 1, 27, 10, 0, 0).unwrap();
        assert_eq!(iso_timestamp(at), "2026-01-27T10:00:00.000Z");
    }
}
