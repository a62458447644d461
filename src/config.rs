use serde::{Deserialize, Serialize};

/// Construction options for a [`CalendarDelta`](crate::CalendarDelta).
///
/// Relative fields default to `0`. Absolute fields default to `None`
/// (unset); `Some(0)` is a real value for the zero-based fields (`weekday`,
/// `hour`, `minute`, `second`, `millisecond`, `microsecond`) and unset for the
/// one-based ones. Inputs may be out of range: normalization carries and
/// clamps them when the delta is built.
///
/// Unknown keys are rejected when deserializing, so a typo in a config file
/// does not silently become a zero offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeltaConfig {
    pub years:        i64,
    pub months:       i64,
    pub days:         i64,
    pub weeks:        i64,
    pub hours:        i64,
    pub minutes:      i64,
    pub seconds:      i64,
    pub milliseconds: i64,
    pub microseconds: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year:        Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month:       Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day:         Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday:     Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour:        Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute:      Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second:      Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub millisecond: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub microsecond: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let config = DeltaConfig::default();
        assert_eq!(config.years, 0);
        assert_eq!(config.weeks, 0);
        assert_eq!(config.year, None);
        assert_eq!(config.microsecond, None);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: DeltaConfig =
            serde_json::from_str(r#"{"months": 1, "day": 31, "hour": 0}"#).unwrap();
        assert_eq!(
            config,
            DeltaConfig {
                months: 1,
                day: Some(31),
                hour: Some(0),
                ..DeltaConfig::default()
            }
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown_keys() {
        let result = serde_json::from_str::<DeltaConfig>(r#"{"monthz": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_skips_unset_absolute_fields() {
        let config = DeltaConfig {
            days: 3,
            weekday: Some(4),
            ..DeltaConfig::default()
        };
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["days"], 3);
        assert_eq!(json["weekday"], 4);
        assert!(json.get("year").is_none());
    }
}
