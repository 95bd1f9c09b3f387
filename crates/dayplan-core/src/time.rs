//! Wall-clock arithmetic on the "HH:MM" minute grid.
//!
//! Every time in the crate is a minute offset from midnight (`0..=1439`).
//! Text only appears at the edges: user input, serialized files and rendered
//! output.

use chrono::{NaiveTime, Timelike};

use crate::error::PlanError;

/// Last minute of the day (23:59).
pub const LAST_MINUTE: i64 = 24 * 60 - 1;

/// Parse a 24-hour "HH:MM" string into minutes since midnight.
///
/// Both fields must be exactly two ASCII digits separated by `:`.
pub fn time_to_minutes(text: &str) -> Result<i64, PlanError> {
    let invalid = || PlanError::InvalidTimeFormat {
        input: text.to_string(),
    };

    let (hour, minute) = text.split_once(':').ok_or_else(invalid)?;
    let hour = two_digits(hour).ok_or_else(invalid)?;
    let minute = two_digits(minute).ok_or_else(invalid)?;

    if hour > 23 || minute > 59 {
        return Err(invalid());
    }

    Ok(hour * 60 + minute)
}

fn two_digits(field: &str) -> Option<i64> {
    let bytes = field.as_bytes();
    if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(i64::from(bytes[0] - b'0') * 10 + i64::from(bytes[1] - b'0'))
}

/// Format minutes since midnight as zero-padded "HH:MM".
///
/// Out-of-range values are clamped to `00:00..=23:59`.
pub fn minutes_to_time(minutes: i64) -> String {
    let m = minutes.clamp(0, LAST_MINUTE);
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// Minute offset of a wall-clock time, seconds truncated.
pub fn minutes_from_naive(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Serde adapter storing a minute offset as "HH:MM".
pub mod hhmm {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(minutes: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::minutes_to_time(*minutes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::time_to_minutes(&text).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter storing an optional minute offset as "HH:MM" or null.
pub mod hhmm_option {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        minutes: &Option<i64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match minutes {
            Some(m) => serializer.serialize_some(&super::minutes_to_time(*m)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<i64>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) if !text.is_empty() => super::time_to_minutes(&text)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_times() {
        assert_eq!(time_to_minutes("00:00"), Ok(0));
        assert_eq!(time_to_minutes("08:00"), Ok(480));
        assert_eq!(time_to_minutes("12:34"), Ok(754));
        assert_eq!(time_to_minutes("23:59"), Ok(1439));
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in [
            "", "8:00", "08:0", "08.00", "0800", "24:00", "12:60", "ab:cd", "08:00 ", " 08:00",
            "-1:00", "+8:00", "08:00:00",
        ] {
            assert_eq!(
                time_to_minutes(bad),
                Err(PlanError::InvalidTimeFormat {
                    input: bad.to_string()
                }),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn formats_and_clamps() {
        assert_eq!(minutes_to_time(0), "00:00");
        assert_eq!(minutes_to_time(545), "09:05");
        assert_eq!(minutes_to_time(1439), "23:59");
        assert_eq!(minutes_to_time(-30), "00:00");
        assert_eq!(minutes_to_time(5000), "23:59");
    }

    #[test]
    fn round_trips_every_minute() {
        for m in 0..=LAST_MINUTE {
            assert_eq!(time_to_minutes(&minutes_to_time(m)), Ok(m));
        }
    }

    #[test]
    fn naive_time_truncates_seconds() {
        let t = NaiveTime::from_hms_opt(14, 7, 59).unwrap();
        assert_eq!(minutes_from_naive(t), 14 * 60 + 7);
    }

    #[test]
    fn serde_adapters_use_wall_clock_text() {
        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Probe {
            #[serde(with = "hhmm")]
            at: i64,
            #[serde(with = "hhmm_option", default)]
            due: Option<i64>,
        }

        let probe = Probe { at: 480, due: Some(615) };
        let json = serde_json::to_string(&probe).unwrap();
        assert_eq!(json, r#"{"at":"08:00","due":"10:15"}"#);
        assert_eq!(serde_json::from_str::<Probe>(&json).unwrap(), probe);

        let missing: Probe = serde_json::from_str(r#"{"at":"09:30"}"#).unwrap();
        assert_eq!(missing.due, None);

        assert!(serde_json::from_str::<Probe>(r#"{"at":"9:30"}"#).is_err());
    }
}
