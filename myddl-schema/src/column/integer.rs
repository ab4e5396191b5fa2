use myddl_error::{Error, Result};

use crate::{SqlType, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerDef {
    pub(crate) ty: SqlType,
    pub(crate) unsigned: bool,
    pub(crate) auto_increment: bool,
}

impl IntegerDef {
    pub(crate) fn new(ty: SqlType) -> Self {
        Self {
            ty,
            unsigned: false,
            auto_increment: false,
        }
    }

    pub fn sql_type(&self) -> SqlType {
        self.ty
    }

    pub fn is_unsigned(&self) -> bool {
        self.unsigned
    }

    pub fn is_auto_increment(&self) -> bool {
        self.auto_increment
    }

    /// Inclusive `(min, max)`
    pub fn bounds(&self) -> (i128, i128) {
        // Integer types always have bounds
        self.ty.int_bounds(self.unsigned).unwrap_or((0, 0))
    }

    pub(crate) fn check(&self, value: &Value) -> Result<Value> {
        let (min, max) = self.bounds();
        let out_of_range = |value: String| Error::IntRange { min, max, value };

        let n = match value {
            Value::Bool(v) => *v as i128,
            Value::I64(v) => *v as i128,
            Value::U64(v) => *v as i128,
            Value::F64(v) if v.is_finite() && v.fract() == 0.0 => {
                // `as` saturates past the i128 range
                if *v < i128::MIN as f64 || *v >= i128::MAX as f64 {
                    return Err(out_of_range(value.to_string()));
                }
                *v as i128
            }
            Value::Str(s) => {
                let s = s.trim();
                match s.parse::<i128>() {
                    Ok(n) => n,
                    // Too many digits for i128
                    Err(_) if is_integer_literal(s) => return Err(out_of_range(s.into())),
                    Err(_) => return Err(Error::IntType(s.into())),
                }
            }
            _ => return Err(Error::IntType(value.to_string())),
        };

        if n < min || n > max {
            return Err(out_of_range(n.to_string()));
        }

        // Bounds were checked above, so the narrowing is lossless
        Ok(if self.unsigned {
            Value::U64(n as u64)
        } else {
            Value::I64(n as i64)
        })
    }

    pub(crate) fn type_token(&self) -> String {
        self.ty.as_str().into()
    }

    pub(crate) fn push_attributes(&self, parts: &mut Vec<String>) {
        if self.unsigned {
            parts.push("UNSIGNED".into());
        }
    }
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
