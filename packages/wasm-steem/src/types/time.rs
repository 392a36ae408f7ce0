use crate::encoding::{Encode, Encoder};
use crate::error::{DecodeError, EncodeError};
use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone, Timelike, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// steemd timestamp format; no offset, always UTC
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// UTC instant with whole-second precision, as the chain stores it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(DateTime<Utc>);

impl Time {
    /// Parse the chain's timestamp format
    pub fn parse(value: &str) -> Result<Self, DecodeError> {
        let naive = NaiveDateTime::parse_from_str(value, TIME_FORMAT).map_err(|e| {
            DecodeError::MalformedScalar(format!("Invalid timestamp {:?}: {}", value, e))
        })?;
        Ok(Time(Utc.from_utc_datetime(&naive)))
    }

    pub fn from_unix(seconds: i64) -> Option<Self> {
        Utc.timestamp_opt(seconds, 0).single().map(Time)
    }

    pub fn unix_seconds(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn checked_add_seconds(&self, seconds: i64) -> Option<Self> {
        let delta = TimeDelta::try_seconds(seconds)?;
        self.0.checked_add_signed(delta).map(Time)
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(value: DateTime<Utc>) -> Self {
        Time(value.with_nanosecond(0).unwrap_or(value))
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Time::parse(&value).map_err(de::Error::custom)
    }
}

/// Seconds since the epoch as a fixed 4-byte little-endian value
impl Encode for Time {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        let seconds = u32::try_from(self.unix_seconds())
            .map_err(|_| EncodeError::TimestampOutOfRange(self.to_string()))?;
        enc.write_u32(seconds);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode_to_vec;

    #[test]
    fn test_parse_is_utc() {
        let time = Time::parse("2016-04-06T08:29:27").unwrap();
        assert_eq!(time.unix_seconds(), 1459931367);
        assert_eq!(time.to_string(), "2016-04-06T08:29:27");
    }

    #[test]
    fn test_json_roundtrip_format() {
        let time: Time = serde_json::from_str("\"2017-02-07T13:02:51\"").unwrap();
        assert_eq!(
            serde_json::to_string(&time).unwrap(),
            "\"2017-02-07T13:02:51\""
        );
    }

    #[test]
    fn test_malformed_timestamps() {
        for wire in [
            "\"2017-02-07 13:02:51\"",
            "\"2017-02-07T13:02:51Z\"",
            "\"2017-02-07T13:02:51+01:00\"",
            "\"yesterday\"",
            "\"\"",
            "1486472571",
        ] {
            assert!(serde_json::from_str::<Time>(wire).is_err(), "{}", wire);
        }
        assert!(matches!(
            Time::parse("nope"),
            Err(DecodeError::MalformedScalar(_))
        ));
    }

    #[test]
    fn test_encode_fixed_le_seconds() {
        let time = Time::parse("2016-04-06T08:29:27").unwrap();
        assert_eq!(hex::encode(encode_to_vec(&time).unwrap()), "e7c80457");
    }

    #[test]
    fn test_encode_out_of_range() {
        let before_epoch = Time::parse("1969-12-31T23:59:59").unwrap();
        assert!(matches!(
            encode_to_vec(&before_epoch),
            Err(EncodeError::TimestampOutOfRange(_))
        ));

        let far_future = Time::from_unix(u32::MAX as i64 + 1).unwrap();
        assert!(encode_to_vec(&far_future).is_err());
    }

    #[test]
    fn test_from_datetime_drops_subseconds() {
        let dt = Utc.timestamp_opt(1459931367, 750_000_000).single().unwrap();
        let time = Time::from(dt);
        assert_eq!(time, Time::from_unix(1459931367).unwrap());
    }

    #[test]
    fn test_add_seconds() {
        let time = Time::parse("2016-04-06T08:29:27").unwrap();
        assert_eq!(
            time.checked_add_seconds(30).unwrap().to_string(),
            "2016-04-06T08:29:57"
        );
    }

    #[test]
    fn test_add_seconds_overflow_is_none() {
        let time = Time::parse("2016-04-06T08:29:27").unwrap();
        assert_eq!(time.checked_add_seconds(i64::MAX), None);
        assert_eq!(time.checked_add_seconds(i64::MIN), None);
        assert_eq!(time.checked_add_seconds(1 << 43), None);
    }
}
