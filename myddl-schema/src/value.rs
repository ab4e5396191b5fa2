use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};

macro_rules! impl_from_for_signedint {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::I64(v as i64)
                }
            }
        )+
    };
}

macro_rules! impl_from_for_unsignedint {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::U64(v as u64)
                }
            }
        )+
    };
}

macro_rules! impl_from_for_float {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::F64(v as f64)
                }
            }
        )+
    };
}

/// Candidate or stored value of a column.
///
/// Input values are arbitrary; the output of `Column::check` is always the
/// variant matching the column family (`I64`/`U64` for integers, `F64` for
/// decimals, `Str` for strings, `DateTime` in UTC for temporal columns).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    Str(String),
    DateTime(DateTime<Utc>),
}

impl Value {
    /// `Null` and the empty string both mean "no value"
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Str(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            Self::U64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::U64(v) => Some(*v),
            Self::I64(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::DateTime(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Bool(v) => write!(f, "{}", if *v { 1 } else { 0 }),
            Self::I64(v) => write!(f, "{}", v),
            Self::U64(v) => write!(f, "{}", v),
            Self::F64(v) => write!(f, "{}", v),
            Self::Str(v) => write!(f, "{}", v),
            Self::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::DateTime(v)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Self::DateTime(v.with_timezone(&Utc))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Self::Null)
    }
}

impl_from_for_signedint! {i8, i16, i32, i64}
impl_from_for_unsignedint! {u8, u16, u32, u64}
impl_from_for_float! {f32, f64}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_absent() {
        assert!(Value::Null.is_absent());
        assert!(Value::from("").is_absent());
        assert!(Value::from(None::<i32>).is_absent());
        assert!(!Value::from(0).is_absent());
        assert!(!Value::from(" ").is_absent());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(-3i8), Value::I64(-3));
        assert_eq!(Value::from(3u16), Value::U64(3));
        assert_eq!(Value::from(Some("a")), Value::Str("a".into()));
        assert_eq!(Value::U64(u64::MAX).as_i64(), None);
        assert_eq!(Value::I64(-1).as_u64(), None);
        assert_eq!(Value::I64(7).as_u64(), Some(7));
    }
}
