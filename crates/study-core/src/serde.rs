use serde::{Deserialize, Deserializer};

/// Wire format for timestamps: UTC, second precision, no offset.
pub const WIRE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// `#[serde(with = "study_core::serde::wire_datetime")]` for `DateTime<Utc>` fields.
pub mod wire_datetime {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::WIRE_DATETIME_FORMAT;

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(WIRE_DATETIME_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, WIRE_DATETIME_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
///
/// Use together with `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde::Serialize;

    #[derive(Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "wire_datetime")]
        at: DateTime<Utc>,
    }

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        group: Option<Option<i64>>,
    }

    #[test]
    fn test_wire_datetime_drops_fraction_and_offset() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
            + chrono::Duration::milliseconds(250);
        let json = serde_json::to_string(&Stamped { at }).unwrap();
        assert_eq!(json, r#"{"at":"2024-03-09T07:05:01"}"#);
    }

    #[test]
    fn test_wire_datetime_parses_own_output() {
        let parsed: Stamped = serde_json::from_str(r#"{"at":"2023-12-31T23:59:59"}"#).unwrap();
        assert_eq!(
            parsed.at,
            Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap()
        );
    }

    #[test]
    fn test_wire_datetime_rejects_offsets() {
        let parsed = serde_json::from_str::<Stamped>(r#"{"at":"2023-12-31T23:59:59+02:00"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_double_option_states() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.group, None);

        let cleared: Patch = serde_json::from_str(r#"{"group":null}"#).unwrap();
        assert_eq!(cleared.group, Some(None));

        let set: Patch = serde_json::from_str(r#"{"group":4}"#).unwrap();
        assert_eq!(set.group, Some(Some(4)));
    }
}
