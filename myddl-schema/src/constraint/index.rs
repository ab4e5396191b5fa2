use myddl_error::Result;

use crate::{
    naming::{quote_ident, quote_list},
    Ddl, Key,
};

use super::validate_named;

/// Plain (non unique) index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    name: String,
    columns: Vec<String>,
}

impl Index {
    /// # Examples
    ///
    /// ```
    /// use myddl_schema::{Ddl, Index, Key};
    ///
    /// let idx = Index::new("idx_name", ["last", "first"]).unwrap();
    ///
    /// assert_eq!(idx.build_create(), "KEY `idx_name` (`last`, `first`)");
    /// assert_eq!(idx.build_add(), "ADD INDEX `idx_name` (`last`, `first`)");
    /// assert_eq!(idx.build_drop(), "DROP INDEX `idx_name`");
    /// ```
    pub fn new<T, S>(name: &str, columns: T) -> Result<Self>
    where
        T: IntoIterator<Item = S>,
        S: ToString,
    {
        let columns = validate_named(name, columns)?;

        Ok(Self {
            name: name.into(),
            columns,
        })
    }

    /// Exactly `columns`, in the same order
    pub fn covers(&self, columns: &[String]) -> bool {
        self.columns == columns
    }
}

impl Ddl for Index {
    fn build_create(&self) -> String {
        format!(
            "KEY {} {}",
            quote_ident(&self.name),
            quote_list(&self.columns)
        )
    }

    fn build_drop(&self) -> String {
        format!("DROP INDEX {}", quote_ident(&self.name))
    }
}

impl Key for Index {
    fn name(&self) -> &str {
        &self.name
    }

    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn build_add(&self) -> String {
        format!(
            "ADD INDEX {} {}",
            quote_ident(&self.name),
            quote_list(&self.columns)
        )
    }
}
