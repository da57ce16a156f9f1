//! Storage and semantic type enumerations.
//!
//! Types serialize with the `type/...` identifiers the query builder
//! understands, e.g. `BaseType::Integer` ⇄ `"type/Integer"`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical storage type of a field, as reported by the driver at sync time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BaseType {
    #[serde(rename = "type/Integer")]
    Integer,
    #[serde(rename = "type/BigInteger")]
    BigInteger,
    #[serde(rename = "type/Decimal")]
    Decimal,
    #[serde(rename = "type/Float")]
    Float,
    #[serde(rename = "type/Text")]
    Text,
    #[serde(rename = "type/UUID")]
    Uuid,
    #[serde(rename = "type/Date")]
    Date,
    #[serde(rename = "type/Time")]
    Time,
    #[serde(rename = "type/DateTime")]
    DateTime,
    #[serde(rename = "type/Boolean")]
    Boolean,
    #[serde(rename = "type/Dictionary")]
    Dictionary,
    #[serde(rename = "type/Array")]
    Array,
    #[serde(rename = "type/*")]
    Unknown,
}

impl BaseType {
    /// The `type/...` identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseType::Integer => "type/Integer",
            BaseType::BigInteger => "type/BigInteger",
            BaseType::Decimal => "type/Decimal",
            BaseType::Float => "type/Float",
            BaseType::Text => "type/Text",
            BaseType::Uuid => "type/UUID",
            BaseType::Date => "type/Date",
            BaseType::Time => "type/Time",
            BaseType::DateTime => "type/DateTime",
            BaseType::Boolean => "type/Boolean",
            BaseType::Dictionary => "type/Dictionary",
            BaseType::Array => "type/Array",
            BaseType::Unknown => "type/*",
        }
    }

    /// The data class a fingerprint for this type must belong to.
    pub fn class(&self) -> TypeClass {
        match self {
            BaseType::Integer | BaseType::BigInteger | BaseType::Decimal | BaseType::Float => {
                TypeClass::Number
            }
            BaseType::Text | BaseType::Uuid => TypeClass::Text,
            BaseType::Date | BaseType::Time | BaseType::DateTime => TypeClass::DateTime,
            BaseType::Boolean => TypeClass::Boolean,
            BaseType::Dictionary | BaseType::Array | BaseType::Unknown => TypeClass::General,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.class() == TypeClass::Number
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, BaseType::Integer | BaseType::BigInteger)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, BaseType::Decimal | BaseType::Float)
    }

    pub fn is_temporal(&self) -> bool {
        self.class() == TypeClass::DateTime
    }

    pub fn is_text(&self) -> bool {
        matches!(self, BaseType::Text)
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical data class. Fingerprints are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeClass {
    #[serde(rename = "type/Number")]
    Number,
    #[serde(rename = "type/Text")]
    Text,
    #[serde(rename = "type/DateTime")]
    DateTime,
    #[serde(rename = "type/Boolean")]
    Boolean,
    #[serde(rename = "type/*")]
    General,
}

impl TypeClass {
    pub const ALL: [TypeClass; 5] = [
        TypeClass::Number,
        TypeClass::Text,
        TypeClass::DateTime,
        TypeClass::Boolean,
        TypeClass::General,
    ];
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TypeClass::Number => "type/Number",
            TypeClass::Text => "type/Text",
            TypeClass::DateTime => "type/DateTime",
            TypeClass::Boolean => "type/Boolean",
            TypeClass::General => "type/*",
        };
        f.write_str(s)
    }
}

/// Semantic classification of a field beyond its storage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpecialType {
    #[serde(rename = "type/PK")]
    PrimaryKey,
    #[serde(rename = "type/FK")]
    ForeignKey,
    #[serde(rename = "type/Name")]
    Name,
    #[serde(rename = "type/Category")]
    Category,
    #[serde(rename = "type/Enum")]
    Enum,
    #[serde(rename = "type/City")]
    City,
    #[serde(rename = "type/State")]
    State,
    #[serde(rename = "type/Country")]
    Country,
    #[serde(rename = "type/ZipCode")]
    ZipCode,
    #[serde(rename = "type/Latitude")]
    Latitude,
    #[serde(rename = "type/Longitude")]
    Longitude,
    #[serde(rename = "type/URL")]
    Url,
    #[serde(rename = "type/ImageURL")]
    ImageUrl,
    #[serde(rename = "type/AvatarURL")]
    AvatarUrl,
    #[serde(rename = "type/Email")]
    Email,
    #[serde(rename = "type/SerializedJSON")]
    SerializedJson,
    #[serde(rename = "type/Description")]
    Description,
    #[serde(rename = "type/Number")]
    Number,
    #[serde(rename = "type/Quantity")]
    Quantity,
    #[serde(rename = "type/Income")]
    Income,
    #[serde(rename = "type/Discount")]
    Discount,
    #[serde(rename = "type/Price")]
    Price,
    #[serde(rename = "type/Score")]
    Score,
    #[serde(rename = "type/UNIXTimestampSeconds")]
    UnixTimestampSeconds,
    #[serde(rename = "type/UNIXTimestampMilliseconds")]
    UnixTimestampMilliseconds,
    #[serde(rename = "type/CreationTimestamp")]
    CreationTimestamp,
}

impl SpecialType {
    /// Geographic coordinate (latitude or longitude).
    pub fn is_coordinate(&self) -> bool {
        matches!(self, SpecialType::Latitude | SpecialType::Longitude)
    }

    /// Special types that refine a plain number and keep it binnable.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SpecialType::Number
                | SpecialType::Quantity
                | SpecialType::Income
                | SpecialType::Discount
                | SpecialType::Price
                | SpecialType::Score
        )
    }

    /// Special types that make a stored number or string behave as a timestamp.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            SpecialType::UnixTimestampSeconds
                | SpecialType::UnixTimestampMilliseconds
                | SpecialType::CreationTimestamp
        )
    }

    /// Low-cardinality discrete markers whose values are worth enumerating.
    pub fn is_category_like(&self) -> bool {
        matches!(self, SpecialType::Category | SpecialType::Enum)
    }
}

/// Who may see a field and where.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisibilityType {
    #[default]
    Normal,
    DetailsOnly,
    Sensitive,
    Hidden,
    Retired,
}
