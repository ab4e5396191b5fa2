use std::fmt;

use myddl_error::{Error, Result};

/// Column type families, one per `ColumnKind` variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Integer,
    Decimal,
    String,
    Text,
    DateTime,
}

impl Family {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::Text => "text",
            Self::DateTime => "datetime",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    TinyInt,
    SmallInt,
    MediumInt,
    Int,
    BigInt,
    Decimal,
    Float,
    Double,
    Char,
    Varchar,
    TinyText,
    Text,
    MediumText,
    LongText,
    DateTime,
    Timestamp,
}

impl SqlType {
    /// Parse a type tag and make sure it belongs to `family`
    ///
    /// # Examples
    ///
    /// ```
    /// use myddl_schema::{Family, SqlType};
    ///
    /// assert_eq!(SqlType::parse(Family::Integer, "INTEGER").unwrap(), SqlType::Int);
    /// assert!(SqlType::parse(Family::Integer, "varchar").is_err());
    /// ```
    pub fn parse(family: Family, tag: &str) -> Result<Self> {
        let ty = match tag.trim().to_ascii_lowercase().as_str() {
            "tinyint" => Self::TinyInt,
            "smallint" => Self::SmallInt,
            "mediumint" => Self::MediumInt,
            "int" | "integer" => Self::Int,
            "bigint" => Self::BigInt,
            "decimal" | "numeric" => Self::Decimal,
            "float" => Self::Float,
            "double" => Self::Double,
            "char" => Self::Char,
            "varchar" => Self::Varchar,
            "tinytext" => Self::TinyText,
            "text" => Self::Text,
            "mediumtext" => Self::MediumText,
            "longtext" => Self::LongText,
            "datetime" => Self::DateTime,
            "timestamp" => Self::Timestamp,
            _ => {
                return Err(Error::InvalidType {
                    family: family.as_str(),
                    ty: tag.into(),
                })
            }
        };

        if ty.family() != family {
            return Err(Error::InvalidType {
                family: family.as_str(),
                ty: tag.into(),
            });
        }

        Ok(ty)
    }

    pub fn family(&self) -> Family {
        match self {
            Self::TinyInt | Self::SmallInt | Self::MediumInt | Self::Int | Self::BigInt => {
                Family::Integer
            }
            Self::Decimal | Self::Float | Self::Double => Family::Decimal,
            Self::Char | Self::Varchar => Family::String,
            Self::TinyText | Self::Text | Self::MediumText | Self::LongText => Family::Text,
            Self::DateTime | Self::Timestamp => Family::DateTime,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TinyInt => "tinyint",
            Self::SmallInt => "smallint",
            Self::MediumInt => "mediumint",
            Self::Int => "int",
            Self::BigInt => "bigint",
            Self::Decimal => "decimal",
            Self::Float => "float",
            Self::Double => "double",
            Self::Char => "char",
            Self::Varchar => "varchar",
            Self::TinyText => "tinytext",
            Self::Text => "text",
            Self::MediumText => "mediumtext",
            Self::LongText => "longtext",
            Self::DateTime => "datetime",
            Self::Timestamp => "timestamp",
        }
    }

    /// Inclusive integer bounds, `None` outside the integer family
    pub fn int_bounds(&self, unsigned: bool) -> Option<(i128, i128)> {
        let bounds = match (self, unsigned) {
            (Self::TinyInt, false) => (i8::MIN as i128, i8::MAX as i128),
            (Self::TinyInt, true) => (0, u8::MAX as i128),
            (Self::SmallInt, false) => (i16::MIN as i128, i16::MAX as i128),
            (Self::SmallInt, true) => (0, u16::MAX as i128),
            (Self::MediumInt, false) => (-8_388_608, 8_388_607),
            (Self::MediumInt, true) => (0, 16_777_215),
            (Self::Int, false) => (i32::MIN as i128, i32::MAX as i128),
            (Self::Int, true) => (0, u32::MAX as i128),
            (Self::BigInt, false) => (i64::MIN as i128, i64::MAX as i128),
            (Self::BigInt, true) => (0, u64::MAX as i128),
            _ => return None,
        };

        Some(bounds)
    }

    /// Maximum declared length (char/varchar) or value length (text)
    pub fn max_length(&self) -> Option<u64> {
        match self {
            Self::Char => Some(255),
            Self::Varchar => Some(65_535),
            Self::TinyText => Some(255),
            Self::Text => Some(65_535),
            Self::MediumText => Some(16_777_215),
            Self::LongText => Some(4_294_967_295),
            _ => None,
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(SqlType::parse(Family::Text, " MediumText ").unwrap(), SqlType::MediumText);
        assert_eq!(SqlType::parse(Family::Decimal, "numeric").unwrap(), SqlType::Decimal);
        assert_eq!(
            SqlType::parse(Family::String, "text").unwrap_err(),
            Error::InvalidType {
                family: "string",
                ty: "text".into()
            }
        );
        assert!(matches!(
            SqlType::parse(Family::Integer, "bit"),
            Err(Error::InvalidType { .. })
        ));
    }

    #[test]
    fn test_bounds() {
        assert_eq!(SqlType::TinyInt.int_bounds(false), Some((-128, 127)));
        assert_eq!(SqlType::BigInt.int_bounds(true), Some((0, 18_446_744_073_709_551_615)));
        assert_eq!(SqlType::Varchar.int_bounds(false), None);
        assert_eq!(SqlType::LongText.max_length(), Some(4_294_967_295));
    }
}
