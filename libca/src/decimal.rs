//! Serde form of rule numbers: written as decimal strings, read from strings or plain integers.
//!
//! JSON integers lose precision past 64 bits, so anything wider has to come as a string.
//! Use with `#[serde(with = "libca::decimal")]`, or `libca::decimal::option` for an `Option`.

use std::fmt;

use num_bigint::BigUint;
use serde::{
    Deserializer, Serializer,
    de::{self, Visitor},
};

pub fn serialize<S>(number: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&number.to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DecimalVisitor)
}

struct DecimalVisitor;

impl<'de> Visitor<'de> for DecimalVisitor {
    type Value = BigUint;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a non-negative integer or a string of decimal digits")
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(BigUint::from(value))
    }

    fn visit_u128<E>(self, value: u128) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(BigUint::from(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        value.trim().parse().map_err(de::Error::custom)
    }
}

pub mod option {
    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    struct Decimal(#[serde(with = "crate::decimal")] BigUint);

    pub fn serialize<S>(number: &Option<BigUint>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match number {
            Some(number) => serializer.serialize_some(&number.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BigUint>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let number = Option::<Decimal>::deserialize(deserializer)?;
        Ok(number.map(|Decimal(number)| number))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Numbers {
        #[serde(with = "crate::decimal")]
        number: BigUint,

        #[serde(default, with = "crate::decimal::option")]
        maybe: Option<BigUint>,
    }

    #[test]
    fn test_reads_integers_and_strings() {
        let numbers: Numbers = serde_json::from_str(r#"{ "number": 30, "maybe": "110" }"#).unwrap();
        assert_eq!(numbers.number, BigUint::from(30u32));
        assert_eq!(numbers.maybe, Some(BigUint::from(110u32)));

        let numbers: Numbers = serde_json::from_str(r#"{ "number": "30" }"#).unwrap();
        assert_eq!(numbers.maybe, None);

        let wide = "340282366920938463463374607431768211456";
        let numbers: Numbers =
            serde_json::from_str(&format!(r#"{{ "number": "{wide}", "maybe": null }}"#)).unwrap();
        assert_eq!(numbers.number, BigUint::from(1u32) << 128u32);
    }

    #[test]
    fn test_writes_strings() {
        let numbers = Numbers {
            number: BigUint::from(60u32),
            maybe: None,
        };
        assert_eq!(
            serde_json::to_string(&numbers).unwrap(),
            r#"{"number":"60","maybe":null}"#
        );
    }

    #[test]
    fn test_rejects_non_numbers() {
        for json in [
            r#"{ "number": -1 }"#,
            r#"{ "number": "-1" }"#,
            r#"{ "number": "ten" }"#,
            r#"{ "number": 1.5 }"#,
            r#"{ "number": "" }"#,
        ] {
            assert!(serde_json::from_str::<Numbers>(json).is_err(), "{json}");
        }
    }
}
