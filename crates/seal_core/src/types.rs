//! Logical column types and the alias table used by type checking.
//!
//! Data engines spell the same logical type in different ways: Arrow calls a
//! string column `Utf8` (or `LargeUtf8`, `Utf8View`), dataframe libraries call
//! it `String`, and schema authors often write `str`. [`TypeName`] is the
//! canonical form; [`TypeName::parse`] folds every accepted spelling onto it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Canonical logical type of a column.
///
/// Names outside the alias table are kept verbatim in [`TypeName::Other`] and
/// only ever match the exact same spelling.
///
/// # Example
///
/// ```rust
/// use seal_core::TypeName;
///
/// assert_eq!(TypeName::parse("Utf8"), TypeName::String);
/// assert_eq!(TypeName::parse("i64"), TypeName::Int64);
/// assert!(TypeName::Int64.accepts("Int64"));
/// assert!(!TypeName::Int64.accepts("Utf8"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
    Boolean,
    Date,
    Datetime,
    /// Column whose every value is null and whose type is therefore unknown
    Null,
    /// A type name with no entry in the alias table
    Other(String),
}

/// Canonical names paired with every spelling they accept.
///
/// The canonical name is always the first entry of its alias list.
const ALIASES: &[(&str, &[&str])] = &[
    ("Int8", &["Int8", "i8"]),
    ("Int16", &["Int16", "i16"]),
    ("Int32", &["Int32", "i32"]),
    ("Int64", &["Int64", "i64"]),
    ("UInt8", &["UInt8", "u8"]),
    ("UInt16", &["UInt16", "u16"]),
    ("UInt32", &["UInt32", "u32"]),
    ("UInt64", &["UInt64", "u64"]),
    ("Float32", &["Float32", "f32"]),
    ("Float64", &["Float64", "f64"]),
    (
        "String",
        &["String", "Utf8", "str", "LargeUtf8", "Utf8View"],
    ),
    ("Boolean", &["Boolean", "bool"]),
    ("Date", &["Date", "Date32", "Date64"]),
    ("Datetime", &["Datetime", "Timestamp"]),
    ("Null", &["Null"]),
];

impl TypeName {
    /// Resolves any accepted spelling to its canonical type.
    ///
    /// Arrow renders timestamps with their unit (`Timestamp(Microsecond, None)`),
    /// so any name starting with `Timestamp` or `Datetime` resolves to
    /// [`TypeName::Datetime`].
    pub fn parse(name: &str) -> Self {
        let name = name.trim();

        if name.starts_with("Timestamp(") || name.starts_with("Datetime(") {
            return TypeName::Datetime;
        }

        for (canonical, aliases) in ALIASES {
            if aliases.contains(&name) {
                return Self::from_canonical(canonical);
            }
        }

        TypeName::Other(name.to_string())
    }

    fn from_canonical(canonical: &str) -> Self {
        match canonical {
            "Int8" => TypeName::Int8,
            "Int16" => TypeName::Int16,
            "Int32" => TypeName::Int32,
            "Int64" => TypeName::Int64,
            "UInt8" => TypeName::UInt8,
            "UInt16" => TypeName::UInt16,
            "UInt32" => TypeName::UInt32,
            "UInt64" => TypeName::UInt64,
            "Float32" => TypeName::Float32,
            "Float64" => TypeName::Float64,
            "String" => TypeName::String,
            "Boolean" => TypeName::Boolean,
            "Date" => TypeName::Date,
            "Datetime" => TypeName::Datetime,
            "Null" => TypeName::Null,
            other => TypeName::Other(other.to_string()),
        }
    }

    /// Returns the canonical spelling of this type.
    pub fn canonical_name(&self) -> &str {
        match self {
            TypeName::Int8 => "Int8",
            TypeName::Int16 => "Int16",
            TypeName::Int32 => "Int32",
            TypeName::Int64 => "Int64",
            TypeName::UInt8 => "UInt8",
            TypeName::UInt16 => "UInt16",
            TypeName::UInt32 => "UInt32",
            TypeName::UInt64 => "UInt64",
            TypeName::Float32 => "Float32",
            TypeName::Float64 => "Float64",
            TypeName::String => "String",
            TypeName::Boolean => "Boolean",
            TypeName::Date => "Date",
            TypeName::Datetime => "Datetime",
            TypeName::Null => "Null",
            TypeName::Other(name) => name,
        }
    }

    /// Returns every spelling accepted for this type.
    pub fn aliases(&self) -> Vec<&str> {
        ALIASES
            .iter()
            .find(|(canonical, _)| *canonical == self.canonical_name())
            .map(|(_, aliases)| aliases.to_vec())
            .unwrap_or_else(|| vec![self.canonical_name()])
    }

    /// Returns true if a data source reporting `actual` satisfies this type.
    pub fn accepts(&self, actual: &str) -> bool {
        TypeName::parse(actual) == *self
    }

    /// Returns true for integer and floating point types.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TypeName::Int8
                | TypeName::Int16
                | TypeName::Int32
                | TypeName::Int64
                | TypeName::UInt8
                | TypeName::UInt16
                | TypeName::UInt32
                | TypeName::UInt64
                | TypeName::Float32
                | TypeName::Float64
        )
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        TypeName::parse(name)
    }
}

impl Serialize for TypeName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.canonical_name())
    }
}

impl<'de> Deserialize<'de> for TypeName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(TypeName::parse(&name))
    }
}

/// A declared field of a compiled schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    /// Column name the declaration applies to
    pub name: String,

    /// Type the column is required to have
    #[serde(rename = "type")]
    pub declared_type: TypeName,
}

impl FieldDeclaration {
    /// Creates a new field declaration.
    pub fn new(name: impl Into<String>, declared_type: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }
}
