use myddl_error::{Error, Result};

use crate::{SqlType, Value};

/// Binary flag, character set and collation of character columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoding {
    pub(crate) binary: bool,
    pub(crate) charset: String,
    pub(crate) collation: String,
}

impl Encoding {
    pub fn is_binary(&self) -> bool {
        self.binary
    }

    pub fn charset(&self) -> &str {
        &self.charset
    }

    pub fn collation(&self) -> &str {
        &self.collation
    }

    fn push_attributes(&self, parts: &mut Vec<String>) {
        if self.binary {
            parts.push("BINARY".into());
        }

        if !self.charset.is_empty() {
            parts.push(format!("CHARACTER SET {}", self.charset));
        }

        if !self.collation.is_empty() {
            parts.push(format!("COLLATE {}", self.collation));
        }
    }
}

/// `char` and `varchar`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringDef {
    pub(crate) ty: SqlType,
    pub(crate) length: u64,
    pub(crate) encoding: Encoding,
}

impl StringDef {
    pub(crate) fn new(ty: SqlType, length: u64) -> Result<Self> {
        validate_length(ty, length)?;

        Ok(Self {
            ty,
            length,
            encoding: Encoding::default(),
        })
    }

    pub fn sql_type(&self) -> SqlType {
        self.ty
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    pub(crate) fn check(&self, value: &Value) -> Result<Value> {
        check_length(self.ty, self.length, value)
    }

    pub(crate) fn type_token(&self) -> String {
        format!("{}({})", self.ty, self.length)
    }

    pub(crate) fn push_attributes(&self, parts: &mut Vec<String>) {
        self.encoding.push_attributes(parts);
    }
}

/// `tinytext`, `text`, `mediumtext` and `longtext`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDef {
    pub(crate) ty: SqlType,
    pub(crate) encoding: Encoding,
}

impl TextDef {
    pub(crate) fn new(ty: SqlType) -> Self {
        Self {
            ty,
            encoding: Encoding::default(),
        }
    }

    pub fn sql_type(&self) -> SqlType {
        self.ty
    }

    pub fn max_length(&self) -> u64 {
        self.ty.max_length().unwrap_or_default()
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    pub(crate) fn check(&self, value: &Value) -> Result<Value> {
        check_length(self.ty, self.max_length(), value)
    }

    pub(crate) fn type_token(&self) -> String {
        self.ty.as_str().into()
    }

    pub(crate) fn push_attributes(&self, parts: &mut Vec<String>) {
        self.encoding.push_attributes(parts);
    }
}

pub(crate) fn validate_length(ty: SqlType, length: u64) -> Result<()> {
    let max = ty.max_length().unwrap_or_default();
    if length > max {
        return Err(Error::InvalidLength {
            ty: ty.as_str().into(),
            max,
            length,
        });
    }

    Ok(())
}

fn check_length(ty: SqlType, max: u64, value: &Value) -> Result<Value> {
    let s = match value {
        Value::Str(s) => s.clone(),
        _ => value.to_string(),
    };

    let length = s.chars().count() as u64;
    if length > max {
        log::trace!("Reject {} value of length {}, max {}", ty, length, max);
        return Err(Error::StringLength {
            ty: ty.as_str().into(),
            max,
            length,
        });
    }

    Ok(Value::Str(s))
}
