use myddl_error::{Error, Result};

use crate::{
    naming::{collect_names, find_duplicate, quote_list},
    Ddl, Key,
};

/// The unnamed primary key of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    columns: Vec<String>,
}

impl PrimaryKey {
    /// # Examples
    ///
    /// ```
    /// use myddl_schema::{Ddl, Key, PrimaryKey};
    ///
    /// let pk = PrimaryKey::new(["a", "b"]).unwrap();
    ///
    /// assert!(pk.is_composite());
    /// assert_eq!(pk.build_create(), "PRIMARY KEY (`a`, `b`)");
    /// assert_eq!(pk.build_add(), "ADD PRIMARY KEY (`a`, `b`)");
    /// assert_eq!(pk.build_drop(), "DROP PRIMARY KEY");
    /// ```
    pub fn new<T, S>(columns: T) -> Result<Self>
    where
        T: IntoIterator<Item = S>,
        S: ToString,
    {
        let pk = Self {
            columns: collect_names(columns),
        };
        pk.validate()?;

        Ok(pk)
    }

    pub fn is_composite(&self) -> bool {
        self.columns.len() > 1
    }

    fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(Error::NoColumn("PRIMARY KEY".into()));
        }

        if let Some(column) = find_duplicate(&self.columns) {
            return Err(Error::DuplicateColumn {
                constraint: "PRIMARY KEY".into(),
                column: column.clone(),
            });
        }

        Ok(())
    }
}

impl Ddl for PrimaryKey {
    fn build_create(&self) -> String {
        format!("PRIMARY KEY {}", quote_list(&self.columns))
    }

    fn build_drop(&self) -> String {
        "DROP PRIMARY KEY".into()
    }
}

impl Key for PrimaryKey {
    fn name(&self) -> &str {
        ""
    }

    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn build_add(&self) -> String {
        format!("ADD {}", self.build_create())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validate() {
        assert_eq!(
            PrimaryKey::new(Vec::<String>::new()).unwrap_err(),
            Error::NoColumn("PRIMARY KEY".into())
        );
        assert_eq!(
            PrimaryKey::new(["a", "b", "a"]).unwrap_err(),
            Error::DuplicateColumn {
                constraint: "PRIMARY KEY".into(),
                column: "a".into()
            }
        );

        let pk = PrimaryKey::new(["id"]).unwrap();
        assert!(!pk.is_composite());
        assert_eq!(pk.name(), "");
        assert_eq!(pk.columns(), ["id"]);
    }
}
