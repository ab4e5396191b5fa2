use myddl_error::{Error, Result};

use crate::{SqlType, Value};

pub const MAX_PRECISION: u32 = 65;
pub const MAX_SCALE: u32 = 30;

/// `decimal`, `float` and `double`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalDef {
    pub(crate) ty: SqlType,
    pub(crate) precision: Option<(u32, u32)>,
    pub(crate) unsigned: bool,
}

impl DecimalDef {
    pub(crate) fn new(ty: SqlType, precision: Option<(u32, u32)>) -> Result<Self> {
        // MySQL's own default for a bare `decimal`
        let precision = match (ty, precision) {
            (SqlType::Decimal, None) => Some((10, 0)),
            (_, p) => p,
        };

        if let Some((precision, scale)) = precision {
            validate_precision(precision, scale)?;
        }

        Ok(Self {
            ty,
            precision,
            unsigned: false,
        })
    }

    pub fn sql_type(&self) -> SqlType {
        self.ty
    }

    /// `(precision, scale)`
    pub fn precision(&self) -> Option<(u32, u32)> {
        self.precision
    }

    pub fn is_unsigned(&self) -> bool {
        self.unsigned
    }

    /// Exclusive `(min, max)`, before the unsigned restriction
    pub fn bounds(&self) -> (f64, f64) {
        let max = match (self.precision, self.ty) {
            (Some((precision, scale)), _) => 10f64.powi((precision - scale) as i32),
            (None, SqlType::Float) => f32::MAX as f64,
            (None, _) => f64::MAX,
        };

        (-max, max)
    }

    pub(crate) fn check(&self, value: &Value) -> Result<Value> {
        let v = match value {
            Value::Bool(v) => *v as u8 as f64,
            Value::I64(v) => *v as f64,
            Value::U64(v) => *v as f64,
            Value::F64(v) => *v,
            Value::Str(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::FloatType(s.clone()))?,
            _ => return Err(Error::FloatType(value.to_string())),
        };

        if !v.is_finite() {
            return Err(Error::FloatType(value.to_string()));
        }

        // Bounds apply to the value as it will be stored and rendered
        let rounded = match self.precision {
            Some((_, scale)) => round_to_scale(v, scale),
            None => v,
        };

        let (min, max) = self.bounds();
        if self.unsigned && rounded < 0.0 {
            return Err(Error::FloatRange {
                min: 0.0,
                max,
                value: v.to_string(),
            });
        }

        if rounded <= min || rounded >= max {
            return Err(Error::FloatRange {
                min,
                max,
                value: v.to_string(),
            });
        }

        Ok(Value::F64(rounded))
    }

    pub(crate) fn type_token(&self) -> String {
        match self.precision {
            Some((precision, scale)) => format!("{}({},{})", self.ty, precision, scale),
            None => self.ty.as_str().into(),
        }
    }

    pub(crate) fn push_attributes(&self, parts: &mut Vec<String>) {
        if self.unsigned {
            parts.push("UNSIGNED".into());
        }
    }

    /// Fixed `scale` digits when a precision is declared
    pub(crate) fn render_value(&self, value: &Value) -> String {
        match (value, self.precision) {
            (Value::F64(v), Some((_, scale))) => format!("{:.*}", scale as usize, v),
            _ => value.to_string(),
        }
    }
}

/// Same digits `render_value` prints, with `-0` folded into `0`
fn round_to_scale(v: f64, scale: u32) -> f64 {
    let rounded = format!("{:.*}", scale as usize, v).parse::<f64>().unwrap_or(v);
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

pub(crate) fn validate_precision(precision: u32, scale: u32) -> Result<()> {
    if precision == 0 || precision > MAX_PRECISION || scale > MAX_SCALE || scale > precision {
        return Err(Error::InvalidPrecision { precision, scale });
    }

    Ok(())
}
