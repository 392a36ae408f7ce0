use crate::encoding::{Encode, Encoder};
use crate::error::{DecodeError, EncodeError};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Accepts an integer as either a JSON number or a JSON string of digits
struct ScalarVisitor<T> {
    expecting: &'static str,
    marker: PhantomData<T>,
}

impl<T> ScalarVisitor<T> {
    fn new(expecting: &'static str) -> Self {
        ScalarVisitor {
            expecting,
            marker: PhantomData,
        }
    }
}

fn malformed<E: de::Error>(expecting: &str, got: impl fmt::Display) -> E {
    E::custom(DecodeError::MalformedScalar(format!(
        "expected {}, got {}",
        expecting, got
    )))
}

impl<'de, T> de::Visitor<'de> for ScalarVisitor<T>
where
    T: TryFrom<i64> + TryFrom<u64> + FromStr,
{
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{} as number or string", self.expecting)
    }

    fn visit_i64<E>(self, value: i64) -> Result<T, E>
    where
        E: de::Error,
    {
        T::try_from(value).map_err(|_| malformed(self.expecting, value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<T, E>
    where
        E: de::Error,
    {
        T::try_from(value).map_err(|_| malformed(self.expecting, value))
    }

    fn visit_f64<E>(self, value: f64) -> Result<T, E>
    where
        E: de::Error,
    {
        Err(malformed(self.expecting, value))
    }

    fn visit_str<E>(self, value: &str) -> Result<T, E>
    where
        E: de::Error,
    {
        if value.is_empty() || !value.trim_start_matches('-').bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed(self.expecting, format!("{:?}", value)));
        }
        value
            .parse()
            .map_err(|_| malformed(self.expecting, format!("{:?}", value)))
    }

    fn visit_bool<E>(self, value: bool) -> Result<T, E>
    where
        E: de::Error,
    {
        Err(malformed(self.expecting, value))
    }

    fn visit_unit<E>(self) -> Result<T, E>
    where
        E: de::Error,
    {
        Err(malformed(self.expecting, "null"))
    }
}

macro_rules! scalar_wrapper {
    ($(#[$meta:meta])* $name:ident, $inner:ty, $expecting:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(pub $inner);

        impl $name {
            pub fn value(self) -> $inner {
                self.0
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                $name(value)
            }
        }

        impl From<$name> for $inner {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.0.serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer
                    .deserialize_any(ScalarVisitor::<$inner>::new($expecting))
                    .map($name)
            }
        }
    };
}

scalar_wrapper!(
    /// Signed integer field
    Int,
    i64,
    "a signed 64-bit integer"
);

scalar_wrapper!(
    /// Object id field
    Id,
    u64,
    "an unsigned 64-bit id"
);

scalar_wrapper!(
    /// Unsigned 32-bit field (block numbers, counters)
    UInt32,
    u32,
    "an unsigned 32-bit integer"
);

impl Encode for Id {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.write_uvarint(self.0);
        Ok(())
    }
}

impl Encode for UInt32 {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.write_uvarint(self.0 as u64);
        Ok(())
    }
}

/// List of strings that also accepts a single bare string on the wire
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StringSlice(pub Vec<String>);

impl StringSlice {
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for StringSlice {
    fn from(value: Vec<String>) -> Self {
        StringSlice(value)
    }
}

impl Serialize for StringSlice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StringSlice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(String),
            Many(Vec<String>),
            Nothing(()),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::One(value) => StringSlice(vec![value]),
            Raw::Many(values) => StringSlice(values),
            Raw::Nothing(()) => StringSlice::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode_to_vec;
    use rstest::rstest;

    #[rstest]
    #[case("42")]
    #[case("\"42\"")]
    fn test_number_and_string_normalize(#[case] wire: &str) {
        assert_eq!(serde_json::from_str::<Int>(wire).unwrap(), Int(42));
        assert_eq!(serde_json::from_str::<Id>(wire).unwrap(), Id(42));
        assert_eq!(serde_json::from_str::<UInt32>(wire).unwrap(), UInt32(42));
    }

    #[test]
    fn test_negative_int() {
        assert_eq!(serde_json::from_str::<Int>("-7").unwrap(), Int(-7));
        assert_eq!(serde_json::from_str::<Int>("\"-7\"").unwrap(), Int(-7));
        assert!(serde_json::from_str::<UInt32>("-7").is_err());
    }

    #[rstest]
    #[case("true")]
    #[case("null")]
    #[case("1.5")]
    #[case("\"\"")]
    #[case("\"12a\"")]
    #[case("\" 12\"")]
    #[case("[1]")]
    #[case("{}")]
    fn test_malformed_scalar(#[case] wire: &str) {
        let err = serde_json::from_str::<Int>(wire).unwrap_err();
        assert!(
            err.to_string().contains("Malformed scalar") || err.is_data(),
            "unexpected error for {}: {}",
            wire,
            err
        );
    }

    #[test]
    fn test_uint32_range() {
        assert!(serde_json::from_str::<UInt32>("4294967296").is_err());
        assert!(serde_json::from_str::<UInt32>("\"4294967296\"").is_err());
        assert_eq!(
            serde_json::from_str::<UInt32>("4294967295").unwrap(),
            UInt32(u32::MAX)
        );
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Int(-3)).unwrap(), "-3");
        assert_eq!(serde_json::to_string(&UInt32(9)).unwrap(), "9");
    }

    #[test]
    fn test_wrappers_encode_as_varint() {
        assert_eq!(encode_to_vec(&UInt32(127)).unwrap(), vec![0x7f]);
        assert_eq!(encode_to_vec(&UInt32(128)).unwrap(), vec![0x80, 0x01]);
        assert_eq!(encode_to_vec(&Id(16384)).unwrap(), vec![0x80, 0x80, 0x01]);
    }

    #[test]
    fn test_string_slice_shapes() {
        let one: StringSlice = serde_json::from_str("\"steem\"").unwrap();
        assert_eq!(one.as_slice(), ["steem".to_string()]);

        let many: StringSlice = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert_eq!(many.into_vec(), vec!["a".to_string(), "b".to_string()]);

        let none: StringSlice = serde_json::from_str("null").unwrap();
        assert!(none.as_slice().is_empty());

        assert!(serde_json::from_str::<StringSlice>("{}").is_err());
    }
}
