//! Type Descriptions
//!
//! The small type language values are checked against. A description is a
//! named type (`"uuid"`, `"Customer[]?"`), an enum of literals, or an object
//! shape. Named types are normalized once into a [`TypeName`] tree so the
//! walkers match on variants instead of re-stripping suffixes.

use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::Value;

// ============================================================================
// Scalar kinds
// ============================================================================

/// Built-in leaf types validated identically when encoding and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Json,
    Bool,
    String,
    Cep,
    Email,
    Phone,
    SafeHtml,
    Xml,
    Hex,
    Uuid,
    Base64,
    Url,
    Int,
    Uint,
    Float,
    Money,
    Void,
    LatLng,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 18] = [
        ScalarKind::Json,
        ScalarKind::Bool,
        ScalarKind::String,
        ScalarKind::Cep,
        ScalarKind::Email,
        ScalarKind::Phone,
        ScalarKind::SafeHtml,
        ScalarKind::Xml,
        ScalarKind::Hex,
        ScalarKind::Uuid,
        ScalarKind::Base64,
        ScalarKind::Url,
        ScalarKind::Int,
        ScalarKind::Uint,
        ScalarKind::Float,
        ScalarKind::Money,
        ScalarKind::Void,
        ScalarKind::LatLng,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Json => "json",
            ScalarKind::Bool => "bool",
            ScalarKind::String => "string",
            ScalarKind::Cep => "cep",
            ScalarKind::Email => "email",
            ScalarKind::Phone => "phone",
            ScalarKind::SafeHtml => "safehtml",
            ScalarKind::Xml => "xml",
            ScalarKind::Hex => "hex",
            ScalarKind::Uuid => "uuid",
            ScalarKind::Base64 => "base64",
            ScalarKind::Url => "url",
            ScalarKind::Int => "int",
            ScalarKind::Uint => "uint",
            ScalarKind::Float => "float",
            ScalarKind::Money => "money",
            ScalarKind::Void => "void",
            ScalarKind::LatLng => "latlng",
        }
    }

    /// Kinds that accept any string unchanged.
    pub fn is_plain_string(self) -> bool {
        matches!(
            self,
            ScalarKind::String
                | ScalarKind::Cep
                | ScalarKind::Email
                | ScalarKind::Phone
                | ScalarKind::SafeHtml
                | ScalarKind::Xml
        )
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Named types
// ============================================================================

/// The bare name left once every suffix is stripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BaseType {
    Scalar(ScalarKind),
    /// Binary buffer natively, base64 text on the wire.
    Bytes,
    Cpf,
    Cnpj,
    /// Calendar date natively, `YYYY-MM-DD` on the wire.
    Date,
    /// UTC timestamp natively, zone-less ISO-8601 on the wire.
    DateTime,
    /// Anything else: looked up in the type table when walked.
    Reference(String),
}

impl BaseType {
    pub fn parse(name: &str) -> Self {
        if let Some(kind) = ScalarKind::from_name(name) {
            return BaseType::Scalar(kind);
        }
        match name {
            "bytes" => BaseType::Bytes,
            "cpf" => BaseType::Cpf,
            "cnpj" => BaseType::Cnpj,
            "date" => BaseType::Date,
            "datetime" => BaseType::DateTime,
            other => BaseType::Reference(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            BaseType::Scalar(kind) => kind.name(),
            BaseType::Bytes => "bytes",
            BaseType::Cpf => "cpf",
            BaseType::Cnpj => "cnpj",
            BaseType::Date => "date",
            BaseType::DateTime => "datetime",
            BaseType::Reference(name) => name,
        }
    }
}

/// A named type with its `?` / `[]` suffixes resolved into a tree.
///
/// Suffixes are peeled outermost first with `?` checked before `[]`, so
/// `int[]?` is a nullable array of ints and `int?[]` an array of nullable ints.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
    Base(BaseType),
    Nullable(Box<TypeName>),
    Array(Box<TypeName>),
}

impl TypeName {
    pub fn parse(name: &str) -> Self {
        if let Some(inner) = name.strip_suffix('?') {
            TypeName::Nullable(Box::new(TypeName::parse(inner)))
        } else if let Some(inner) = name.strip_suffix("[]") {
            TypeName::Array(Box::new(TypeName::parse(inner)))
        } else {
            TypeName::Base(BaseType::parse(name))
        }
    }

    /// Whether null may stand in for a value of this type without any
    /// further checks: nullable names and exactly `void`.
    pub fn accepts_null(&self) -> bool {
        matches!(
            self,
            TypeName::Nullable(_) | TypeName::Base(BaseType::Scalar(ScalarKind::Void))
        )
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::Base(base) => f.write_str(base.name()),
            TypeName::Nullable(inner) => write!(f, "{inner}?"),
            TypeName::Array(inner) => write!(f, "{inner}[]"),
        }
    }
}

// ============================================================================
// Descriptions
// ============================================================================

/// A node of the type language.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescription {
    /// `"string"`, `"Address?"`, `"uint[]"`, ...
    Named(TypeName),
    /// The value must equal one of these literals.
    Enum(Vec<Value>),
    /// Record with exactly these fields, in declaration order.
    Object(Vec<(String, TypeDescription)>),
}

impl TypeDescription {
    pub fn named(name: &str) -> Self {
        TypeDescription::Named(TypeName::parse(name))
    }

    pub fn enumeration<V: Into<Value>>(literals: impl IntoIterator<Item = V>) -> Self {
        TypeDescription::Enum(literals.into_iter().map(Into::into).collect())
    }

    pub fn object<K, T>(fields: impl IntoIterator<Item = (K, T)>) -> Self
    where
        K: Into<String>,
        T: Into<TypeDescription>,
    {
        TypeDescription::Object(
            fields
                .into_iter()
                .map(|(name, ty)| (name.into(), ty.into()))
                .collect(),
        )
    }
}

impl From<&str> for TypeDescription {
    fn from(name: &str) -> Self {
        TypeDescription::named(name)
    }
}

impl From<TypeName> for TypeDescription {
    fn from(name: TypeName) -> Self {
        TypeDescription::Named(name)
    }
}

impl fmt::Display for TypeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescription::Named(name) => name.fmt(f),
            TypeDescription::Enum(literals) => {
                for (index, literal) in literals.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    match literal {
                        Value::String(s) => f.write_str(s)?,
                        Value::Null => {}
                        other => f.write_str(&other.to_json_string())?,
                    }
                }
                Ok(())
            }
            TypeDescription::Object(_) => f.write_str("object"),
        }
    }
}

/// JSON strings are named types, arrays are enums, objects are shapes.
/// Shape fields keep document order.
impl<'de> Deserialize<'de> for TypeDescription {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DescriptionVisitor)
    }
}

struct DescriptionVisitor;

impl<'de> Visitor<'de> for DescriptionVisitor {
    type Value = TypeDescription;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a type name, an array of enum literals, or an object shape")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<TypeDescription, E> {
        Ok(TypeDescription::named(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<TypeDescription, A::Error> {
        let mut literals = Vec::new();
        while let Some(literal) = seq.next_element::<Value>()? {
            literals.push(literal);
        }
        Ok(TypeDescription::Enum(literals))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TypeDescription, A::Error> {
        let mut fields: Vec<(String, TypeDescription)> = Vec::new();
        while let Some((name, ty)) = map.next_entry::<String, TypeDescription>()? {
            match fields.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = ty,
                None => fields.push((name, ty)),
            }
        }
        Ok(TypeDescription::Object(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixes_strip_outermost_first() {
        assert_eq!(
            TypeName::parse("int[]?"),
            TypeName::Nullable(Box::new(TypeName::Array(Box::new(TypeName::Base(
                BaseType::Scalar(ScalarKind::Int)
            )))))
        );
        assert_eq!(
            TypeName::parse("int?[]"),
            TypeName::Array(Box::new(TypeName::Nullable(Box::new(TypeName::Base(
                BaseType::Scalar(ScalarKind::Int)
            )))))
        );
    }

    #[test]
    fn test_display_reproduces_source() {
        for name in ["uuid", "Customer?", "date[]", "bytes?[]?", "x[][]"] {
            assert_eq!(TypeName::parse(name).to_string(), name);
        }
    }

    #[test]
    fn test_base_names() {
        assert_eq!(BaseType::parse("datetime"), BaseType::DateTime);
        assert_eq!(BaseType::parse("safehtml"), BaseType::Scalar(ScalarKind::SafeHtml));
        assert_eq!(
            BaseType::parse("Customer"),
            BaseType::Reference("Customer".to_string())
        );
    }

    #[test]
    fn test_only_nullable_and_void_accept_null() {
        assert!(TypeName::parse("string?").accepts_null());
        assert!(TypeName::parse("void").accepts_null());
        assert!(!TypeName::parse("void[]").accepts_null());
        assert!(!TypeName::parse("string?[]").accepts_null());
    }

    #[test]
    fn test_enum_display_joins_literals() {
        let ty = TypeDescription::enumeration(vec![Value::from("red"), Value::from(2), Value::Null]);
        assert_eq!(ty.to_string(), "red,2,");
    }

    #[test]
    fn test_deserialize_keeps_field_order() {
        let ty: TypeDescription =
            serde_json::from_str(r#"{"zeta":"string","alpha":["a","b"],"mid":{"x":"int?"}}"#)
                .expect("parse");
        let TypeDescription::Object(fields) = ty else {
            panic!("expected object shape");
        };
        let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        assert_eq!(
            fields[1].1,
            TypeDescription::enumeration(["a", "b"])
        );
        assert_eq!(
            fields[2].1,
            TypeDescription::object([("x", "int?")])
        );
    }
}
