// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Converter facade: orchestrates token parsing, resolution, validation and
//! representative synthesis around the delegate name codec.

use crate::codec;
use crate::container::{ContainerLoader, ContainerSet, TypeContainer};
use crate::descriptor::{DeclaredType, EnumDescriptor, EnumValue};
use crate::error::{Error, Result};
use crate::representative::RepresentativeCache;
use crate::resolve::{KnownTypes, LookupStats, TypeResolver};
use crate::token::EnumToken;
use crate::validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// When to qualify an encoded literal with its concrete type name.
///
/// Changes the wire format, so the default is explicit: every value is
/// qualified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    /// Every enum value is written as `"<TypeName>.<Literal>"`.
    #[default]
    AlwaysQualify,
    /// Only values at abstract-typed positions are qualified; concretely
    /// declared fields are written as bare literals.
    QualifyAbstractOnly,
}

/// Builder for [`Converter`] configuration.
///
/// Containers, known types, behavior mode and the reference loader are set
/// here once; the built converter is read-only.
#[derive(Default)]
pub struct ConverterBuilder {
    containers: Vec<Arc<TypeContainer>>,
    known: KnownTypes,
    behavior: Behavior,
    deep_search: bool,
    loader: Option<Box<dyn ContainerLoader>>,
}

impl ConverterBuilder {
    /// Create a builder with defaults: no containers, no known types,
    /// [`Behavior::AlwaysQualify`], deep search enabled.
    pub fn new() -> Self {
        Self {
            deep_search: true,
            ..Self::default()
        }
    }

    /// Append a root container (insertion order is search priority).
    pub fn container(mut self, container: Arc<TypeContainer>) -> Self {
        self.containers.push(container);
        self
    }

    /// Append several root containers.
    pub fn containers(mut self, containers: impl IntoIterator<Item = Arc<TypeContainer>>) -> Self {
        self.containers.extend(containers);
        self
    }

    /// Register an allow-listed type, consulted before any search.
    pub fn known_type(mut self, descriptor: Arc<EnumDescriptor>) -> Self {
        self.known.register(descriptor);
        self
    }

    /// Set the qualification behavior.
    pub fn behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Enable or disable the walk through referenced containers.
    pub fn deep_search(mut self, enabled: bool) -> Self {
        self.deep_search = enabled;
        self
    }

    /// Supply the loader used to expand container references at build time.
    pub fn loader(mut self, loader: impl ContainerLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Build the converter. Reference closures are expanded here.
    pub fn build(self) -> Converter {
        let containers =
            ContainerSet::new(self.containers, self.deep_search, self.loader.as_deref());
        Converter {
            resolver: TypeResolver::new(containers, self.known),
            representatives: RepresentativeCache::new(),
            behavior: self.behavior,
        }
    }
}

/// Enum token converter.
///
/// Configuration is fixed at construction; the only mutable state is the
/// pair of insert-if-absent caches, so a converter can be shared freely
/// across threads.
#[derive(Debug)]
pub struct Converter {
    resolver: TypeResolver,
    representatives: RepresentativeCache,
    behavior: Behavior,
}

impl Converter {
    /// Start building a converter.
    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::new()
    }

    /// Configured behavior mode.
    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    /// Resolution cache hit/miss counters.
    pub fn cache_stats(&self) -> LookupStats {
        self.resolver.cache_stats()
    }

    /// Number of synthesized representatives.
    pub fn representative_count(&self) -> usize {
        self.representatives.len()
    }

    /// Decode a JSON token at a position with the given declared type.
    ///
    /// `null` decodes to `None` without touching the resolver. A bare
    /// number is accepted only against a concrete declared type. A string
    /// token is parsed: qualified forms resolve the type name and validate
    /// the literal; the literal-only form is legal only against a concrete
    /// declared type under [`Behavior::QualifyAbstractOnly`].
    pub fn decode_value(
        &self,
        token: &Value,
        declared: &DeclaredType,
    ) -> Result<Option<EnumValue>> {
        match token {
            Value::Null => Ok(None),
            Value::Number(number) => match declared {
                DeclaredType::Any => Err(Error::NumericNotConvertible(number.to_string())),
                DeclaredType::Concrete(descriptor) => {
                    codec::decode_literal(descriptor, token).map(Some)
                }
            },
            Value::String(text) => {
                let parsed = EnumToken::parse(text)?;
                match &parsed.type_name {
                    Some(type_name) => {
                        let descriptor = self.resolver.resolve(type_name)?;
                        validate::check_enum_literal(&descriptor, Some(&parsed.literal))?;
                        codec::decode_literal(&descriptor, &Value::String(parsed.literal))
                            .map(Some)
                    }
                    None => match (declared, self.behavior) {
                        (DeclaredType::Concrete(descriptor), Behavior::QualifyAbstractOnly) => {
                            validate::check_enum_literal(descriptor, Some(&parsed.literal))?;
                            codec::decode_literal(descriptor, token).map(Some)
                        }
                        _ => Err(Error::MalformedToken(text.clone())),
                    },
                }
            }
            other => Err(Error::MalformedToken(other.to_string())),
        }
    }

    /// Encode a value at a position with the given declared type.
    ///
    /// `None` encodes to `null`. Whether the output is qualified depends on
    /// the behavior mode and the DECLARED type, not the runtime type: a
    /// concrete value stored through an abstract field still qualifies
    /// under [`Behavior::QualifyAbstractOnly`].
    pub fn encode_value(&self, value: Option<&EnumValue>, declared: &DeclaredType) -> Result<Value> {
        let Some(value) = value else {
            return Ok(Value::Null);
        };

        // Validation runs against the value's own runtime concrete type.
        let literal = value.literal()?;

        let qualify = match self.behavior {
            Behavior::AlwaysQualify => true,
            Behavior::QualifyAbstractOnly => declared.is_abstract(),
        };

        if qualify {
            let representative = self.representatives.synthesize(
                value.type_name(),
                value.descriptor().underlying,
                literal,
                value.value(),
            );
            codec::encode_literal(&representative)
        } else {
            codec::encode_literal(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{EnumVariant, TypeDescriptor};
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

    fn converter(behavior: Behavior) -> Converter {
        let container = Arc::new(
            TypeContainer::new("core")
                .with_type(Arc::new(TypeDescriptor::enum_type(durability()))),
        );
        Converter::builder()
            .container(container)
            .behavior(behavior)
            .build()
    }

    #[test]
    fn test_encode_null() {
        let converter = converter(Behavior::AlwaysQualify);
        assert_eq!(
            converter.encode_value(None, &DeclaredType::Any).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_encode_always_qualifies() {
        let converter = converter(Behavior::AlwaysQualify);
        let value = EnumValue::new(&durability(), "Volatile").unwrap();

        let abstract_pos = converter
            .encode_value(Some(&value), &DeclaredType::Any)
            .unwrap();
        assert_eq!(abstract_pos, json!("Durability.Volatile"));

        let concrete_pos = converter
            .encode_value(Some(&value), &DeclaredType::Concrete(durability()))
            .unwrap();
        assert_eq!(concrete_pos, json!("Durability.Volatile"));
    }

    #[test]
    fn test_encode_qualify_abstract_only() {
        let converter = converter(Behavior::QualifyAbstractOnly);
        let value = EnumValue::new(&durability(), "Volatile").unwrap();

        // Bare literal at a concretely declared position.
        let concrete_pos = converter
            .encode_value(Some(&value), &DeclaredType::Concrete(durability()))
            .unwrap();
        assert_eq!(concrete_pos, json!("Volatile"));

        // The same value through an abstract field still qualifies.
        let abstract_pos = converter
            .encode_value(Some(&value), &DeclaredType::Any)
            .unwrap();
        assert_eq!(abstract_pos, json!("Durability.Volatile"));
    }

    #[test]
    fn test_encode_undeclared_value_fails() {
        let converter = converter(Behavior::AlwaysQualify);
        let value = EnumValue::from_value(&durability(), 99);
        assert!(matches!(
            converter.encode_value(Some(&value), &DeclaredType::Any),
            Err(Error::LiteralUndefined { .. })
        ));
    }

    #[test]
    fn test_encode_reuses_representatives() {
        let converter = converter(Behavior::AlwaysQualify);
        let value = EnumValue::new(&durability(), "Volatile").unwrap();

        converter
            .encode_value(Some(&value), &DeclaredType::Any)
            .unwrap();
        converter
            .encode_value(Some(&value), &DeclaredType::Any)
            .unwrap();
        assert_eq!(converter.representative_count(), 1);
    }

    #[test]
    fn test_decode_null_skips_resolver() {
        let converter = converter(Behavior::AlwaysQualify);
        let decoded = converter
            .decode_value(&Value::Null, &DeclaredType::Any)
            .unwrap();
        assert_eq!(decoded, None);
        assert_eq!(converter.cache_stats().misses, 0);
    }

    #[test]
    fn test_decode_qualified() {
        let converter = converter(Behavior::AlwaysQualify);
        let decoded = converter
            .decode_value(&json!("Durability.TransientLocal"), &DeclaredType::Any)
            .unwrap()
            .expect("non-null");
        assert_eq!(decoded.type_name(), "Durability");
        assert_eq!(decoded.literal_name(), Some("TransientLocal"));
    }

    #[test]
    fn test_decode_numeric_against_abstract_fails() {
        let converter = converter(Behavior::AlwaysQualify);
        assert_eq!(
            converter.decode_value(&json!(5), &DeclaredType::Any),
            Err(Error::NumericNotConvertible("5".into()))
        );
    }

    #[test]
    fn test_decode_numeric_against_concrete() {
        let converter = converter(Behavior::AlwaysQualify);
        let decoded = converter
            .decode_value(&json!(1), &DeclaredType::Concrete(durability()))
            .unwrap()
            .expect("non-null");
        assert_eq!(decoded.literal_name(), Some("TransientLocal"));

        assert!(matches!(
            converter.decode_value(&json!(9), &DeclaredType::Concrete(durability())),
            Err(Error::LiteralUndefined { .. })
        ));
    }

    #[test]
    fn test_decode_bare_literal_rules() {
        // Legal: concrete declared type + qualify-abstract-only.
        let converter = converter(Behavior::QualifyAbstractOnly);
        let decoded = converter
            .decode_value(&json!("Volatile"), &DeclaredType::Concrete(durability()))
            .unwrap()
            .expect("non-null");
        assert_eq!(decoded.value(), 0);

        // Illegal: abstract declared type cannot infer the concrete type.
        assert_eq!(
            converter.decode_value(&json!("Volatile"), &DeclaredType::Any),
            Err(Error::MalformedToken("Volatile".into()))
        );

        // Illegal: always-qualify never accepts bare literals.
        let strict = self::converter(Behavior::AlwaysQualify);
        assert_eq!(
            strict.decode_value(&json!("Volatile"), &DeclaredType::Concrete(durability())),
            Err(Error::MalformedToken("Volatile".into()))
        );
    }

    #[test]
    fn test_decode_unknown_type_and_literal() {
        let converter = converter(Behavior::AlwaysQualify);
        assert_eq!(
            converter.decode_value(&json!("Ghost.Value"), &DeclaredType::Any),
            Err(Error::TypeNotFound("Ghost".into()))
        );
        assert_eq!(
            converter.decode_value(&json!("Durability.NonExisting"), &DeclaredType::Any),
            Err(Error::LiteralUndefined {
                type_name: "Durability".into(),
                literal: Some("NonExisting".into()),
            })
        );
    }

    #[test]
    fn test_decode_rejects_other_shapes() {
        let converter = converter(Behavior::AlwaysQualify);
        assert!(matches!(
            converter.decode_value(&json!(true), &DeclaredType::Any),
            Err(Error::MalformedToken(_))
        ));
        assert!(matches!(
            converter.decode_value(&json!({}), &DeclaredType::Any),
            Err(Error::MalformedToken(_))
        ));
    }

    #[test]
    fn test_known_type_wins_over_container() {
        let allow_listed = Arc::new(EnumDescriptor::new(
            "Durability",
            vec![EnumVariant::new("Special", 9)],
        ));
        let container = Arc::new(
            TypeContainer::new("core")
                .with_type(Arc::new(TypeDescriptor::enum_type(durability()))),
        );
        let converter = Converter::builder()
            .container(container)
            .known_type(allow_listed)
            .build();

        let decoded = converter
            .decode_value(&json!("Durability.Special"), &DeclaredType::Any)
            .unwrap()
            .expect("non-null");
        assert_eq!(decoded.value(), 9);
        // The container's "Volatile" member is shadowed by the allow-list.
        assert!(converter
            .decode_value(&json!("Durability.Volatile"), &DeclaredType::Any)
            .is_err());
    }

    #[test]
    fn test_converter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Converter>();
    }
}
