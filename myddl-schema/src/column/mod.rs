//! # Column
//!
//! A column is a name, the common nullability/default/comment metadata and
//! one `ColumnKind` carrying the type specific attributes.
//!
//! Every setter validates before it mutates: a failing call leaves the column
//! untouched, and a stored default is always the output of `check`.

mod datetime;
mod decimal;
mod integer;
mod string;

use chrono::{DateTime, FixedOffset};
use myddl_error::{Error, Result};

use crate::{
    naming::{quote_ident, quote_str, validate_name},
    Ddl, Family, SqlType, Value,
};

pub use datetime::{is_current_timestamp, DateTimeDef, CURRENT_TIMESTAMP};
pub use decimal::{DecimalDef, MAX_PRECISION, MAX_SCALE};
pub use integer::IntegerDef;
pub use string::{Encoding, StringDef, TextDef};

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKind {
    Integer(IntegerDef),
    Decimal(DecimalDef),
    String(StringDef),
    Text(TextDef),
    DateTime(DateTimeDef),
}

impl ColumnKind {
    pub fn sql_type(&self) -> SqlType {
        match self {
            Self::Integer(def) => def.sql_type(),
            Self::Decimal(def) => def.sql_type(),
            Self::String(def) => def.sql_type(),
            Self::Text(def) => def.sql_type(),
            Self::DateTime(def) => def.sql_type(),
        }
    }

    /// Validate and coerce, absent input is "no value"
    pub fn check(&self, value: &Value) -> Result<Option<Value>> {
        if value.is_absent() {
            return Ok(None);
        }

        let value = match self {
            Self::Integer(def) => def.check(value)?,
            Self::Decimal(def) => def.check(value)?,
            Self::String(def) => def.check(value)?,
            Self::Text(def) => def.check(value)?,
            Self::DateTime(def) => def.check(value)?,
        };

        Ok(Some(value))
    }

    fn type_token(&self) -> String {
        match self {
            Self::Integer(def) => def.type_token(),
            Self::Decimal(def) => def.type_token(),
            Self::String(def) => def.type_token(),
            Self::Text(def) => def.type_token(),
            Self::DateTime(def) => def.type_token(),
        }
    }

    fn push_attributes(&self, parts: &mut Vec<String>) {
        match self {
            Self::Integer(def) => def.push_attributes(parts),
            Self::Decimal(def) => def.push_attributes(parts),
            Self::String(def) => def.push_attributes(parts),
            Self::Text(def) => def.push_attributes(parts),
            Self::DateTime(_) => {}
        }
    }

    fn render_value(&self, value: &Value) -> String {
        match self {
            Self::Decimal(def) => def.render_value(value),
            Self::DateTime(def) => def.render_value(value),
            _ => value.to_string(),
        }
    }

    fn encoding_mut(&mut self) -> Option<&mut Encoding> {
        match self {
            Self::String(def) => Some(&mut def.encoding),
            Self::Text(def) => Some(&mut def.encoding),
            _ => None,
        }
    }

    fn encoding(&self) -> Option<&Encoding> {
        match self {
            Self::String(def) => Some(&def.encoding),
            Self::Text(def) => Some(&def.encoding),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    nullable: bool,
    default: Option<Value>,
    comment: String,
    kind: ColumnKind,
}

impl Column {
    fn new(name: &str, kind: ColumnKind) -> Result<Self> {
        validate_name("column", name)?;

        Ok(Self {
            name: name.into(),
            nullable: false,
            default: None,
            comment: String::new(),
            kind,
        })
    }

    /// Integer column, `ty` is one of `tinyint`, `smallint`, `mediumint`,
    /// `int` and `bigint`
    ///
    /// # Examples
    ///
    /// ```
    /// use myddl_schema::{Column, Ddl};
    ///
    /// let mut col = Column::integer("id", "int").unwrap();
    /// col.set_unsigned(true).unwrap().set_auto_increment(true).unwrap();
    ///
    /// assert_eq!(col.build_create(), "`id` int UNSIGNED NOT NULL AUTO_INCREMENT");
    /// ```
    pub fn integer(name: &str, ty: &str) -> Result<Self> {
        let ty = SqlType::parse(Family::Integer, ty)?;
        Self::new(name, ColumnKind::Integer(IntegerDef::new(ty)))
    }

    /// `decimal(precision, scale)` column
    ///
    /// # Examples
    ///
    /// ```
    /// use myddl_schema::{Column, Ddl, Value};
    ///
    /// let mut col = Column::decimal("price", 10, 2).unwrap();
    /// col.set_default(1).unwrap();
    ///
    /// assert_eq!(col.default(), Some(&Value::F64(1.0)));
    /// assert_eq!(col.build_create(), r#"`price` decimal(10,2) NOT NULL DEFAULT "1.00""#);
    /// ```
    pub fn decimal(name: &str, precision: u32, scale: u32) -> Result<Self> {
        Self::new(
            name,
            ColumnKind::Decimal(DecimalDef::new(SqlType::Decimal, Some((precision, scale)))?),
        )
    }

    /// `decimal`, `float` or `double` with an optional `(precision, scale)`
    pub fn float(name: &str, ty: &str, precision: Option<(u32, u32)>) -> Result<Self> {
        let ty = SqlType::parse(Family::Decimal, ty)?;
        Self::new(name, ColumnKind::Decimal(DecimalDef::new(ty, precision)?))
    }

    pub fn char(name: &str, length: u64) -> Result<Self> {
        Self::new(
            name,
            ColumnKind::String(StringDef::new(SqlType::Char, length)?),
        )
    }

    /// # Examples
    ///
    /// ```
    /// use myddl_schema::{Column, Ddl};
    ///
    /// let mut col = Column::varchar("name", 255).unwrap();
    /// col.set_nullable(true)
    ///     .unwrap()
    ///     .set_default("bar")
    ///     .unwrap()
    ///     .set_comment("x")
    ///     .unwrap();
    ///
    /// assert_eq!(col.build_create(), r#"`name` varchar(255) DEFAULT "bar" COMMENT "x""#);
    /// ```
    pub fn varchar(name: &str, length: u64) -> Result<Self> {
        Self::new(
            name,
            ColumnKind::String(StringDef::new(SqlType::Varchar, length)?),
        )
    }

    /// `char` or `varchar`
    pub fn string(name: &str, ty: &str, length: u64) -> Result<Self> {
        let ty = SqlType::parse(Family::String, ty)?;
        Self::new(name, ColumnKind::String(StringDef::new(ty, length)?))
    }

    /// `tinytext`, `text`, `mediumtext` or `longtext`
    pub fn text(name: &str, ty: &str) -> Result<Self> {
        let ty = SqlType::parse(Family::Text, ty)?;
        Self::new(name, ColumnKind::Text(TextDef::new(ty)))
    }

    pub fn datetime(name: &str) -> Result<Self> {
        Self::new(name, ColumnKind::DateTime(DateTimeDef::new(SqlType::DateTime)))
    }

    pub fn timestamp(name: &str) -> Result<Self> {
        Self::new(
            name,
            ColumnKind::DateTime(DateTimeDef::new(SqlType::Timestamp)),
        )
    }

    /// `datetime` or `timestamp`
    pub fn temporal(name: &str, ty: &str) -> Result<Self> {
        let ty = SqlType::parse(Family::DateTime, ty)?;
        Self::new(name, ColumnKind::DateTime(DateTimeDef::new(ty)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql_type(&self) -> SqlType {
        self.kind.sql_type()
    }

    pub fn kind(&self) -> &ColumnKind {
        &self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn is_unsigned(&self) -> bool {
        match &self.kind {
            ColumnKind::Integer(def) => def.unsigned,
            ColumnKind::Decimal(def) => def.unsigned,
            _ => false,
        }
    }

    pub fn is_auto_increment(&self) -> bool {
        matches!(&self.kind, ColumnKind::Integer(def) if def.auto_increment)
    }

    /// Declared length of `char`/`varchar`, maximum length of text types
    pub fn length(&self) -> Option<u64> {
        match &self.kind {
            ColumnKind::String(def) => Some(def.length),
            ColumnKind::Text(def) => Some(def.max_length()),
            _ => None,
        }
    }

    pub fn precision(&self) -> Option<(u32, u32)> {
        match &self.kind {
            ColumnKind::Decimal(def) => def.precision,
            _ => None,
        }
    }

    pub fn is_binary(&self) -> bool {
        self.kind.encoding().map(|e| e.binary).unwrap_or_default()
    }

    pub fn charset(&self) -> &str {
        self.kind.encoding().map(|e| e.charset()).unwrap_or_default()
    }

    pub fn collation(&self) -> &str {
        self.kind.encoding().map(|e| e.collation()).unwrap_or_default()
    }

    pub fn is_default_current(&self) -> bool {
        matches!(&self.kind, ColumnKind::DateTime(def) if def.default_current)
    }

    pub fn is_on_update_current(&self) -> bool {
        matches!(&self.kind, ColumnKind::DateTime(def) if def.on_update_current)
    }

    pub fn time_zone(&self) -> Option<FixedOffset> {
        match &self.kind {
            ColumnKind::DateTime(def) => Some(def.zone),
            _ => None,
        }
    }

    /// Stored UTC default converted to the column zone
    pub fn default_local(&self) -> Option<DateTime<FixedOffset>> {
        match (&self.kind, &self.default) {
            (ColumnKind::DateTime(def), Some(Value::DateTime(dt))) => Some(def.to_local(dt)),
            _ => None,
        }
    }

    /// Validate and coerce `value` against this column
    ///
    /// # Examples
    ///
    /// ```
    /// use myddl_schema::{Column, Value};
    ///
    /// let col = Column::integer("n", "tinyint").unwrap();
    ///
    /// assert_eq!(col.check("12").unwrap(), Some(Value::I64(12)));
    /// assert_eq!(col.check("").unwrap(), None);
    /// assert!(col.check(300).is_err());
    /// ```
    pub fn check<V: Into<Value>>(&self, value: V) -> Result<Option<Value>> {
        self.kind.check(&value.into())
    }

    pub fn set_nullable(&mut self, nullable: bool) -> Result<&mut Self> {
        if nullable && self.is_auto_increment() {
            return Err(self.auto_increment_conflict("nullable"));
        }

        self.nullable = nullable;
        Ok(self)
    }

    /// Set or clear (`Null`, empty string) the default
    ///
    /// `CURRENT_TIMESTAMP` on a temporal column sets the current-timestamp
    /// default instead of a literal.
    pub fn set_default<V: Into<Value>>(&mut self, value: V) -> Result<&mut Self> {
        let value = value.into();

        if let (ColumnKind::DateTime(def), Value::Str(s)) = (&mut self.kind, &value) {
            if is_current_timestamp(s) {
                def.default_current = true;
                self.default = None;
                return Ok(self);
            }
        }

        let default = self.kind.check(&value)?;
        if default.is_some() && self.is_auto_increment() {
            return Err(self.auto_increment_conflict("default"));
        }

        if let ColumnKind::DateTime(def) = &mut self.kind {
            def.default_current = false;
        }
        self.default = default;

        Ok(self)
    }

    /// Toggle `DEFAULT CURRENT_TIMESTAMP`, clearing any literal default
    pub fn set_default_current(&mut self, current: bool) -> Result<&mut Self> {
        match &mut self.kind {
            ColumnKind::DateTime(def) => {
                def.default_current = current;
                if current {
                    self.default = None;
                }
                Ok(self)
            }
            _ => Err(self.invalid_attribute("current timestamp default")),
        }
    }

    pub fn set_on_update_current(&mut self, current: bool) -> Result<&mut Self> {
        match &mut self.kind {
            ColumnKind::DateTime(def) => {
                def.on_update_current = current;
                Ok(self)
            }
            _ => Err(self.invalid_attribute("on update")),
        }
    }

    /// Zone used to read offset-less input and to render defaults
    pub fn set_time_zone(&mut self, zone: FixedOffset) -> Result<&mut Self> {
        match &mut self.kind {
            ColumnKind::DateTime(def) => {
                def.zone = zone;
                Ok(self)
            }
            _ => Err(self.invalid_attribute("time zone")),
        }
    }

    pub fn set_comment<S: ToString>(&mut self, comment: S) -> Result<&mut Self> {
        self.comment = comment.to_string();
        Ok(self)
    }

    pub fn set_unsigned(&mut self, unsigned: bool) -> Result<&mut Self> {
        let mut kind = self.kind.clone();
        match &mut kind {
            ColumnKind::Integer(def) => def.unsigned = unsigned,
            ColumnKind::Decimal(def) => def.unsigned = unsigned,
            _ => return Err(self.invalid_attribute("unsigned")),
        }

        self.replace_kind(kind)
    }

    pub fn set_auto_increment(&mut self, auto_increment: bool) -> Result<&mut Self> {
        if !matches!(self.kind, ColumnKind::Integer(_)) {
            return Err(self.invalid_attribute("auto increment"));
        }

        if auto_increment {
            if self.nullable {
                return Err(self.auto_increment_conflict("nullable"));
            }

            if self.has_default() {
                return Err(self.auto_increment_conflict("default"));
            }
        }

        if let ColumnKind::Integer(def) = &mut self.kind {
            def.auto_increment = auto_increment;
        }

        Ok(self)
    }

    pub fn set_length(&mut self, length: u64) -> Result<&mut Self> {
        let mut kind = self.kind.clone();
        match &mut kind {
            ColumnKind::String(def) => {
                string::validate_length(def.ty, length)?;
                def.length = length;
            }
            _ => return Err(self.invalid_attribute("length")),
        }

        self.replace_kind(kind)
    }

    pub fn set_precision(&mut self, precision: u32, scale: u32) -> Result<&mut Self> {
        let mut kind = self.kind.clone();
        match &mut kind {
            ColumnKind::Decimal(def) => {
                decimal::validate_precision(precision, scale)?;
                def.precision = Some((precision, scale));
            }
            _ => return Err(self.invalid_attribute("precision")),
        }

        self.replace_kind(kind)
    }

    pub fn set_binary(&mut self, binary: bool) -> Result<&mut Self> {
        match self.kind.encoding_mut() {
            Some(encoding) => encoding.binary = binary,
            None => return Err(self.invalid_attribute("binary")),
        }

        Ok(self)
    }

    pub fn set_charset<S: ToString>(&mut self, charset: S) -> Result<&mut Self> {
        match self.kind.encoding_mut() {
            Some(encoding) => encoding.charset = charset.to_string(),
            None => return Err(self.invalid_attribute("charset")),
        }

        Ok(self)
    }

    pub fn set_collation<S: ToString>(&mut self, collation: S) -> Result<&mut Self> {
        match self.kind.encoding_mut() {
            Some(encoding) => encoding.collation = collation.to_string(),
            None => return Err(self.invalid_attribute("collation")),
        }

        Ok(self)
    }

    /// `ADD COLUMN` fragment, placed after `after` when given
    pub fn build_add(&self, after: Option<&Column>) -> String {
        let mut sql = format!("ADD COLUMN {}", self.build_create());
        if let Some(after) = after {
            sql.push_str(&format!(" AFTER {}", quote_ident(&after.name)));
        }

        sql
    }

    /// `CHANGE COLUMN` fragment replacing `old` with this definition
    pub fn build_change(&self, old: &Column) -> String {
        format!(
            "CHANGE COLUMN {} {}",
            quote_ident(&old.name),
            self.build_create()
        )
    }

    /// Swap in a new kind, re-checking the stored default against it
    fn replace_kind(&mut self, kind: ColumnKind) -> Result<&mut Self> {
        let default = match &self.default {
            Some(value) => kind.check(value)?,
            None => None,
        };

        self.kind = kind;
        self.default = default;

        Ok(self)
    }

    fn invalid_attribute(&self, attribute: &'static str) -> Error {
        Error::InvalidAttribute {
            column: self.name.clone(),
            ty: self.sql_type().as_str().into(),
            attribute,
        }
    }

    fn auto_increment_conflict(&self, attribute: &'static str) -> Error {
        Error::AutoIncrementConflict {
            column: self.name.clone(),
            attribute,
        }
    }
}

impl Ddl for Column {
    fn build_create(&self) -> String {
        let mut parts = Vec::<String>::new();

        // Name and type with its width
        parts.push(format!("{} {}", quote_ident(&self.name), self.kind.type_token()));

        // UNSIGNED, BINARY, CHARACTER SET, COLLATE
        self.kind.push_attributes(&mut parts);

        if !self.nullable {
            parts.push("NOT NULL".into());
        }

        if self.is_auto_increment() {
            parts.push("AUTO_INCREMENT".into());
        }

        if self.is_default_current() {
            parts.push(format!("DEFAULT {}", CURRENT_TIMESTAMP));
        } else if let Some(default) = &self.default {
            parts.push(format!(
                "DEFAULT {}",
                quote_str(&self.kind.render_value(default))
            ));
        }

        if self.is_on_update_current() {
            parts.push(format!("ON UPDATE {}", CURRENT_TIMESTAMP));
        }

        if !self.comment.is_empty() {
            parts.push(format!("COMMENT {}", quote_str(&self.comment)));
        }

        parts.join(" ")
    }

    fn build_drop(&self) -> String {
        format!("DROP COLUMN {}", quote_ident(&self.name))
    }
}
