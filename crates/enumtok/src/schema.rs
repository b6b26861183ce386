// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record-level integration: struct schemas with declared enum fields.
//!
//! A [`StructDescriptor`] declares named fields whose types are either enum
//! positions (abstract or concrete) or nested structs; a [`Record`] holds
//! the corresponding values. [`Converter::encode_record`] and
//! [`Converter::decode_record`] walk the schema field by field, applying
//! the token conversion at every enum position. All fields are nullable.

use crate::codec::token_kind;
use crate::convert::Converter;
use crate::descriptor::{DeclaredType, EnumValue};
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Declared kind of a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Enum position with its statically declared type.
    Enum(DeclaredType),
    /// Nested struct.
    Struct(Arc<StructDescriptor>),
}

/// A named field declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Declared kind.
    pub kind: FieldKind,
}

/// Struct schema: named fields in declaration order.
///
/// Declaration order is also the JSON member order on encode.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructDescriptor {
    /// Struct name.
    pub name: String,
    /// Declared fields.
    pub fields: Vec<FieldDescriptor>,
}

impl StructDescriptor {
    /// Create an empty schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add an enum field with an explicit declared type.
    pub fn enum_field(mut self, name: impl Into<String>, declared: DeclaredType) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            kind: FieldKind::Enum(declared),
        });
        self
    }

    /// Add an enum field declared as the abstract placeholder.
    pub fn abstract_enum_field(self, name: impl Into<String>) -> Self {
        self.enum_field(name, DeclaredType::Any)
    }

    /// Add a nested struct field.
    pub fn nested_field(mut self, name: impl Into<String>, nested: Arc<StructDescriptor>) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            kind: FieldKind::Struct(nested),
        });
        self
    }

    /// Get a field declaration by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A record field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Absent value.
    Null,
    /// Enum value at an enum position.
    Enum(EnumValue),
    /// Nested record at a struct position.
    Record(Record),
}

/// Typed record over a struct schema.
#[derive(Debug, Clone)]
pub struct Record {
    descriptor: Arc<StructDescriptor>,
    values: HashMap<String, FieldValue>,
}

// An explicitly nulled field and a never-set field compare equal.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor
            && self
                .descriptor
                .fields
                .iter()
                .all(|f| self.value_of(&f.name) == other.value_of(&f.name))
    }
}

impl Record {
    /// Create a record with all fields null.
    pub fn new(descriptor: &Arc<StructDescriptor>) -> Self {
        Self {
            descriptor: descriptor.clone(),
            values: HashMap::new(),
        }
    }

    /// Get the schema.
    pub fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }

    /// Set an enum field.
    pub fn set_enum(&mut self, name: &str, value: EnumValue) -> Result<()> {
        match self.field_kind(name)? {
            FieldKind::Enum(_) => {
                self.values.insert(name.to_string(), FieldValue::Enum(value));
                Ok(())
            }
            FieldKind::Struct(_) => Err(Error::TypeMismatch {
                expected: "enum field".into(),
                found: "struct field".into(),
            }),
        }
    }

    /// Set a nested record field.
    pub fn set_record(&mut self, name: &str, record: Record) -> Result<()> {
        match self.field_kind(name)? {
            FieldKind::Struct(_) => {
                self.values
                    .insert(name.to_string(), FieldValue::Record(record));
                Ok(())
            }
            FieldKind::Enum(_) => Err(Error::TypeMismatch {
                expected: "struct field".into(),
                found: "enum field".into(),
            }),
        }
    }

    /// Set a field back to null.
    pub fn set_null(&mut self, name: &str) -> Result<()> {
        self.field_kind(name)?;
        self.values.insert(name.to_string(), FieldValue::Null);
        Ok(())
    }

    /// Get an enum field value (`None` when null).
    pub fn enum_field(&self, name: &str) -> Result<Option<&EnumValue>> {
        match self.field_kind(name)? {
            FieldKind::Enum(_) => match self.values.get(name) {
                Some(FieldValue::Enum(value)) => Ok(Some(value)),
                _ => Ok(None),
            },
            FieldKind::Struct(_) => Err(Error::TypeMismatch {
                expected: "enum field".into(),
                found: "struct field".into(),
            }),
        }
    }

    /// Get a nested record field (`None` when null).
    pub fn record_field(&self, name: &str) -> Result<Option<&Record>> {
        match self.field_kind(name)? {
            FieldKind::Struct(_) => match self.values.get(name) {
                Some(FieldValue::Record(record)) => Ok(Some(record)),
                _ => Ok(None),
            },
            FieldKind::Enum(_) => Err(Error::TypeMismatch {
                expected: "struct field".into(),
                found: "enum field".into(),
            }),
        }
    }

    fn field_kind(&self, name: &str) -> Result<&FieldKind> {
        self.descriptor
            .field(name)
            .map(|f| &f.kind)
            .ok_or_else(|| Error::FieldNotFound(name.to_string()))
    }

    /// Current field value, with explicit nulls normalized to `None`.
    fn value_of(&self, name: &str) -> Option<&FieldValue> {
        match self.values.get(name) {
            Some(FieldValue::Null) | None => None,
            other => other,
        }
    }
}

impl Converter {
    /// Encode a record to a JSON object, members in declaration order.
    pub fn encode_record(&self, record: &Record) -> Result<Value> {
        let mut members = Map::new();
        for field in &record.descriptor().fields {
            let token = match (&field.kind, record.value_of(&field.name)) {
                (FieldKind::Enum(declared), None) => self.encode_value(None, declared)?,
                (FieldKind::Enum(declared), Some(FieldValue::Enum(value))) => {
                    self.encode_value(Some(value), declared)?
                }
                (FieldKind::Struct(_), None) => Value::Null,
                (FieldKind::Struct(_), Some(FieldValue::Record(nested))) => {
                    self.encode_record(nested)?
                }
                (FieldKind::Enum(_), Some(_)) => {
                    return Err(Error::TypeMismatch {
                        expected: "enum value".into(),
                        found: "record".into(),
                    })
                }
                (FieldKind::Struct(_), Some(_)) => {
                    return Err(Error::TypeMismatch {
                        expected: "record".into(),
                        found: "enum value".into(),
                    })
                }
            };
            members.insert(field.name.clone(), token);
        }
        Ok(Value::Object(members))
    }

    /// Decode a JSON object into a record over the given schema.
    ///
    /// Unknown members are rejected; missing members decode as null.
    pub fn decode_record(
        &self,
        json: &Value,
        descriptor: &Arc<StructDescriptor>,
    ) -> Result<Record> {
        let members = json.as_object().ok_or_else(|| Error::TypeMismatch {
            expected: "object".into(),
            found: token_kind(json).into(),
        })?;

        for name in members.keys() {
            if descriptor.field(name).is_none() {
                return Err(Error::FieldNotFound(name.clone()));
            }
        }

        let mut record = Record::new(descriptor);
        for field in &descriptor.fields {
            let token = members.get(&field.name).unwrap_or(&Value::Null);
            match &field.kind {
                FieldKind::Enum(declared) => {
                    if let Some(value) = self.decode_value(token, declared)? {
                        record
                            .values
                            .insert(field.name.clone(), FieldValue::Enum(value));
                    }
                }
                FieldKind::Struct(nested) => {
                    if !token.is_null() {
                        let decoded = self.decode_record(token, nested)?;
                        record
                            .values
                            .insert(field.name.clone(), FieldValue::Record(decoded));
                    }
                }
            }
        }
        Ok(record)
    }
}
