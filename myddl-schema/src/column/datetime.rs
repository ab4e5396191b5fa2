use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use myddl_error::{Error, Result};

use crate::{SqlType, Value};

/// Default/on-update sentinel, never stored as a literal
pub const CURRENT_TIMESTAMP: &str = "CURRENT_TIMESTAMP";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// `datetime` and `timestamp`
///
/// Values are stored in UTC. Strings without an offset are read in `zone`,
/// and defaults are rendered back in `zone`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeDef {
    pub(crate) ty: SqlType,
    pub(crate) default_current: bool,
    pub(crate) on_update_current: bool,
    pub(crate) zone: FixedOffset,
}

impl DateTimeDef {
    pub(crate) fn new(ty: SqlType) -> Self {
        Self {
            ty,
            default_current: false,
            on_update_current: false,
            zone: Utc.fix(),
        }
    }

    pub fn sql_type(&self) -> SqlType {
        self.ty
    }

    pub fn is_default_current(&self) -> bool {
        self.default_current
    }

    pub fn is_on_update_current(&self) -> bool {
        self.on_update_current
    }

    pub fn time_zone(&self) -> FixedOffset {
        self.zone
    }

    pub(crate) fn check(&self, value: &Value) -> Result<Value> {
        let invalid = || Error::DateTimeType(value.to_string());

        let dt = match value {
            Value::DateTime(v) => *v,
            Value::I64(secs) => DateTime::from_timestamp(*secs, 0).ok_or_else(invalid)?,
            Value::U64(secs) => i64::try_from(*secs)
                .ok()
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .ok_or_else(invalid)?,
            Value::F64(v) if v.is_finite() => {
                let secs = v.floor();
                let nanos = (((v - secs) * 1e9).round() as u32).min(999_999_999);
                DateTime::from_timestamp(secs as i64, nanos).ok_or_else(invalid)?
            }
            Value::Str(s) => self.parse(s.trim()).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };

        Ok(Value::DateTime(dt))
    }

    fn parse(&self, s: &str) -> Option<DateTime<Utc>> {
        if is_current_timestamp(s) {
            return Some(Utc::now());
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }

        let naive = NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })?;

        self.zone
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub(crate) fn type_token(&self) -> String {
        self.ty.as_str().into()
    }

    pub(crate) fn to_local(&self, dt: &DateTime<Utc>) -> DateTime<FixedOffset> {
        dt.with_timezone(&self.zone)
    }

    pub(crate) fn render_value(&self, value: &Value) -> String {
        match value {
            Value::DateTime(dt) => self.to_local(dt).format(DISPLAY_FORMAT).to_string(),
            _ => value.to_string(),
        }
    }
}

pub fn is_current_timestamp(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case(CURRENT_TIMESTAMP)
}
