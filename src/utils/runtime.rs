//! Movie runtime as a `"<minutes> mins"` JSON string.
//!
//! Stored as a plain INTEGER column; the custom serde impls only affect the
//! wire format.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, sqlx::Type, ToSchema)]
#[sqlx(transparent)]
#[schema(value_type = String, example = "102 mins")]
pub struct Runtime(pub i32);

impl Runtime {
    pub fn minutes(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mins", self.0)
    }
}

impl Serialize for Runtime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{} mins", self.0))
    }
}

impl<'de> Deserialize<'de> for Runtime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(RuntimeVisitor)
    }
}

struct RuntimeVisitor;

impl Visitor<'_> for RuntimeVisitor {
    type Value = Runtime;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(r#"a string of the form "<minutes> mins""#)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Runtime, E> {
        let minutes = value
            .strip_suffix(" mins")
            .and_then(|m| m.parse::<i32>().ok())
            .ok_or_else(|| E::custom("invalid runtime format"))?;

        Ok(Runtime(minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize() {
        let body = serde_json::to_string(&Runtime(90)).unwrap();
        assert_eq!(body, r#""90 mins""#);
    }

    #[test]
    fn test_deserialize() {
        let runtime: Runtime = serde_json::from_str(r#""120 mins""#).unwrap();
        assert_eq!(runtime, Runtime(120));
    }

    #[test]
    fn test_deserialize_rejects_malformed_values() {
        for input in [
            r#""abc mins""#,
            r#""123 minsx""#,
            r#""123""#,
            r#""mins""#,
            r#""123  mins""#,
            "90",
            "null",
        ] {
            assert!(
                serde_json::from_str::<Runtime>(input).is_err(),
                "expected {input} to be rejected"
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Runtime(102).to_string(), "102 mins");
    }
}
