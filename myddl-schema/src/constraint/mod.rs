//! # Constraint
//!
//! Primary keys, unique keys, indexes and foreign keys. Constraints refer to
//! columns by name only; whether those columns exist is checked by the table
//! they are attached to.

mod foreign_key;
mod index;
mod primary_key;
mod unique_key;

use std::fmt;

use myddl_error::{Error, Result};

use crate::{
    naming::{collect_names, find_duplicate, validate_key_name},
    Ddl, Key,
};

pub use foreign_key::ForeignKey;
pub use index::Index;
pub use primary_key::PrimaryKey;
pub use unique_key::UniqueKey;

/// `ON UPDATE` / `ON DELETE` action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferentialAction {
    Cascade,
    #[default]
    Restrict,
    SetDefault,
    SetNull,
}

impl ReferentialAction {
    /// Case-insensitive, `NO ACTION` is the same as `RESTRICT` in MySQL
    ///
    /// # Examples
    ///
    /// ```
    /// use myddl_schema::ReferentialAction;
    ///
    /// assert_eq!(ReferentialAction::parse("no action").unwrap(), ReferentialAction::Restrict);
    /// assert!(ReferentialAction::parse("DROP").is_err());
    /// ```
    pub fn parse(rule: &str) -> Result<Self> {
        let normalized = rule
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();

        match normalized.as_str() {
            "CASCADE" => Ok(Self::Cascade),
            "RESTRICT" | "NO ACTION" => Ok(Self::Restrict),
            "SET DEFAULT" => Ok(Self::SetDefault),
            "SET NULL" => Ok(Self::SetNull),
            _ => Err(Error::InvalidRule(rule.into())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::SetDefault => "SET DEFAULT",
            Self::SetNull => "SET NULL",
        }
    }
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    PrimaryKey(PrimaryKey),
    UniqueKey(UniqueKey),
    Index(Index),
    ForeignKey(ForeignKey),
}

impl Constraint {
    fn key(&self) -> &dyn Key {
        match self {
            Self::PrimaryKey(k) => k,
            Self::UniqueKey(k) => k,
            Self::Index(k) => k,
            Self::ForeignKey(k) => k,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::PrimaryKey(_) => "primary key",
            Self::UniqueKey(_) => "unique key",
            Self::Index(_) => "index",
            Self::ForeignKey(_) => "foreign key",
        }
    }

    /// Display name, `PRIMARY KEY` for the unnamed primary key
    pub fn label(&self) -> &str {
        match self {
            Self::PrimaryKey(_) => "PRIMARY KEY",
            _ => self.name(),
        }
    }
}

impl Ddl for Constraint {
    fn build_create(&self) -> String {
        self.key().build_create()
    }

    fn build_drop(&self) -> String {
        self.key().build_drop()
    }
}

impl Key for Constraint {
    fn name(&self) -> &str {
        self.key().name()
    }

    fn columns(&self) -> &[String] {
        self.key().columns()
    }

    fn build_add(&self) -> String {
        self.key().build_add()
    }
}

impl From<PrimaryKey> for Constraint {
    fn from(v: PrimaryKey) -> Self {
        Self::PrimaryKey(v)
    }
}

impl From<UniqueKey> for Constraint {
    fn from(v: UniqueKey) -> Self {
        Self::UniqueKey(v)
    }
}

impl From<Index> for Constraint {
    fn from(v: Index) -> Self {
        Self::Index(v)
    }
}

impl From<ForeignKey> for Constraint {
    fn from(v: ForeignKey) -> Self {
        Self::ForeignKey(v)
    }
}

/// Name, then non-empty column list without duplicates
pub(crate) fn validate_named<T, S>(name: &str, columns: T) -> Result<Vec<String>>
where
    T: IntoIterator<Item = S>,
    S: ToString,
{
    validate_key_name(name)?;

    let columns = collect_names(columns);
    if columns.is_empty() {
        return Err(Error::NoColumn(name.into()));
    }

    if let Some(column) = find_duplicate(&columns) {
        return Err(Error::DuplicateColumn {
            constraint: name.into(),
            column: column.clone(),
        });
    }

    Ok(columns)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_named_validation() {
        for name in ["", "primary", "Primary", "PRIMARY"] {
            assert_eq!(
                UniqueKey::new(name, ["a"]).unwrap_err(),
                Error::ReservedName(name.into())
            );
            assert!(matches!(Index::new(name, ["a"]), Err(Error::ReservedName(_))));
            assert!(matches!(
                ForeignKey::references(name, ["a"], "p"),
                Err(Error::ReservedName(_))
            ));
        }

        assert_eq!(
            Index::new("i", Vec::<&str>::new()).unwrap_err(),
            Error::NoColumn("i".into())
        );
        assert_eq!(
            UniqueKey::new("u", ["a", "b", "b"]).unwrap_err(),
            Error::DuplicateColumn {
                constraint: "u".into(),
                column: "b".into()
            }
        );
    }

    #[test]
    fn test_dispatch() {
        let list: Vec<Constraint> = vec![
            PrimaryKey::new(["id"]).unwrap().into(),
            UniqueKey::new("u", ["email"]).unwrap().into(),
            Index::new("i", ["name"]).unwrap().into(),
            ForeignKey::references("f", ["group_id"], "group").unwrap().into(),
        ];

        let drops = list.iter().map(|c| c.build_drop()).collect::<Vec<_>>();
        assert_eq!(
            drops,
            [
                "DROP PRIMARY KEY",
                "DROP INDEX `u`",
                "DROP INDEX `i`",
                "DROP FOREIGN KEY `f`"
            ]
        );
        assert_eq!(list[0].label(), "PRIMARY KEY");
        assert_eq!(list[3].label(), "f");
        assert_eq!(list[3].columns(), ["group_id"]);
        assert_eq!(list[2].kind(), "index");
    }
}
