// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Delegate enum-by-name codec.
//!
//! Generic literal-name formatting against a concrete enum descriptor: the
//! converter facade reuses this for all name lookups rather than
//! reimplementing them. Tokens are JSON scalars (`serde_json::Value`).

use crate::descriptor::{EnumDescriptor, EnumValue};
use crate::error::{Error, Result};
use serde_json::Value;
use std::sync::Arc;

/// Render a value as its declared member name on its own concrete type.
///
/// # Errors
///
/// [`Error::LiteralUndefined`] when the value's constant has no declared
/// member.
pub fn encode_literal(value: &EnumValue) -> Result<Value> {
    let literal = value.literal()?;
    Ok(Value::String(literal.to_string()))
}

/// Parse a JSON scalar back to a value of the given concrete type.
///
/// Strings resolve by member name, integers by member value.
///
/// # Errors
///
/// [`Error::LiteralUndefined`] for an unknown name or value,
/// [`Error::MalformedToken`] for token shapes that are neither string nor
/// integer.
pub fn decode_literal(descriptor: &Arc<EnumDescriptor>, token: &Value) -> Result<EnumValue> {
    match token {
        Value::String(literal) => EnumValue::new(descriptor, literal),
        Value::Number(number) => {
            let raw = number
                .as_i64()
                .ok_or_else(|| Error::MalformedToken(number.to_string()))?;
            let variant =
                descriptor
                    .variant_by_value(raw)
                    .ok_or_else(|| Error::LiteralUndefined {
                        type_name: descriptor.name.clone(),
                        literal: Some(raw.to_string()),
                    })?;
            Ok(EnumValue::from_value(descriptor, variant.value))
        }
        other => Err(Error::MalformedToken(other.to_string())),
    }
}

/// Human-readable JSON token kind, for mismatch diagnostics.
pub(crate) fn token_kind(token: &Value) -> &'static str {
    match token {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::EnumVariant;
    use serde_json::json;

    fn durability() -> Arc<EnumDescriptor> {
        Arc::new(EnumDescriptor::new(
            "Durability",
            vec![
                EnumVariant::new("Volatile", 0),
                EnumVariant::new("TransientLocal", 1),
            ],
        ))
    }

    #[test]
    fn test_encode_declared_member() {
        let desc = durability();
        let value = EnumValue::new(&desc, "TransientLocal").unwrap();
        assert_eq!(encode_literal(&value).unwrap(), json!("TransientLocal"));
    }

    #[test]
    fn test_encode_undeclared_value_fails() {
        let desc = durability();
        let value = EnumValue::from_value(&desc, 99);
        assert_eq!(
            encode_literal(&value),
            Err(Error::LiteralUndefined {
                type_name: "Durability".into(),
                literal: Some("99".into()),
            })
        );
    }

    #[test]
    fn test_decode_by_name_and_value() {
        let desc = durability();
        let by_name = decode_literal(&desc, &json!("Volatile")).unwrap();
        assert_eq!(by_name.value(), 0);

        let by_value = decode_literal(&desc, &json!(1)).unwrap();
        assert_eq!(by_value.literal_name(), Some("TransientLocal"));
    }

    #[test]
    fn test_decode_unknown_fails() {
        let desc = durability();
        assert!(matches!(
            decode_literal(&desc, &json!("Persistent")),
            Err(Error::LiteralUndefined { .. })
        ));
        assert!(matches!(
            decode_literal(&desc, &json!(7)),
            Err(Error::LiteralUndefined { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_other_shapes() {
        let desc = durability();
        assert!(matches!(
            decode_literal(&desc, &json!(true)),
            Err(Error::MalformedToken(_))
        ));
        assert!(matches!(
            decode_literal(&desc, &json!(1.5)),
            Err(Error::MalformedToken(_))
        ));
        assert!(matches!(
            decode_literal(&desc, &json!(["Volatile"])),
            Err(Error::MalformedToken(_))
        ));
    }
}
