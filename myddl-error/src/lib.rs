pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("InvalidType: `{ty}` is not a {family} type")]
    InvalidType { family: &'static str, ty: String },
    #[error("InvalidLength: `{ty}` length {length} exceeds {max}")]
    InvalidLength { ty: String, max: u64, length: u64 },
    #[error("InvalidPrecision: precision {precision}, scale {scale}")]
    InvalidPrecision { precision: u32, scale: u32 },
    #[error("StringLength: `{ty}` value length {length} exceeds {max}")]
    StringLength { ty: String, max: u64, length: u64 },
    #[error("IntRange: `{value}` is not between {min} and {max}")]
    IntRange { min: i128, max: i128, value: String },
    #[error("FloatRange: `{value}` is not between {min} and {max}")]
    FloatRange { min: f64, max: f64, value: String },
    #[error("IntType: `{0}` is not an integer")]
    IntType(String),
    #[error("FloatType: `{0}` is not a number")]
    FloatType(String),
    #[error("DateTimeType: `{0}` is not a date time")]
    DateTimeType(String),
    #[error("AutoIncrementConflict: column `{column}` cannot be auto increment and {attribute}")]
    AutoIncrementConflict {
        column: String,
        attribute: &'static str,
    },
    #[error("InvalidAttribute: column `{column}` of type `{ty}` has no {attribute}")]
    InvalidAttribute {
        column: String,
        ty: String,
        attribute: &'static str,
    },
    #[error("DuplicateColumn: `{column}` repeated in `{constraint}`")]
    DuplicateColumn { constraint: String, column: String },
    #[error("DuplicateParentColumn: `{column}` repeated in parent columns of `{constraint}`")]
    DuplicateParentColumn { constraint: String, column: String },
    #[error("NoColumn: `{0}` has no column")]
    NoColumn(String),
    #[error("MoreChildColumns: `{constraint}` has {child} columns but {parent} parent columns")]
    MoreChildColumns {
        constraint: String,
        child: usize,
        parent: usize,
    },
    #[error("MoreParentColumns: `{constraint}` has {child} columns but {parent} parent columns")]
    MoreParentColumns {
        constraint: String,
        child: usize,
        parent: usize,
    },
    #[error("InvalidRule: `{0}`")]
    InvalidRule(String),
    #[error("ReservedName: `{0}`")]
    ReservedName(String),
    #[error("InvalidName: `{0}`")]
    InvalidName(String),
    #[error("AlreadySet: {kind} `{name}`")]
    AlreadySet { kind: &'static str, name: String },
    #[error("NotSet: {kind} `{name}`")]
    NotSet { kind: &'static str, name: String },
    #[error("ColumnInUse: column `{column}` is used by `{constraint}`")]
    ColumnInUse { column: String, constraint: String },
    #[error("Immutable: {kind} `{name}`")]
    Immutable { kind: &'static str, name: String },
    #[error("Config: `{0}`")]
    Config(String),
}

#[macro_export]
macro_rules! invalid_name {
    ($($arg:tt)*) => { $crate::Error::InvalidName(format!($($arg)*)) };
}

#[macro_export]
macro_rules! config {
    ($($arg:tt)*) => { $crate::Error::Config(format!($($arg)*)) };
}

#[macro_export]
macro_rules! already_set {
    ($kind:expr, $name:expr) => {
        $crate::Error::AlreadySet {
            kind: $kind,
            name: $name.to_string(),
        }
    };
}

#[macro_export]
macro_rules! not_set {
    ($kind:expr, $name:expr) => {
        $crate::Error::NotSet {
            kind: $kind,
            name: $name.to_string(),
        }
    };
}

#[macro_export]
macro_rules! immutable {
    ($kind:expr, $name:expr) => {
        $crate::Error::Immutable {
            kind: $kind,
            name: $name.to_string(),
        }
    };
}
