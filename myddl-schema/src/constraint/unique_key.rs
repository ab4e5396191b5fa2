use myddl_error::Result;

use crate::{
    naming::{quote_ident, quote_list},
    Ddl, Key,
};

use super::validate_named;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueKey {
    name: String,
    columns: Vec<String>,
}

impl UniqueKey {
    /// # Examples
    ///
    /// ```
    /// use myddl_schema::{Ddl, Key, UniqueKey};
    ///
    /// let uk = UniqueKey::new("uk_email", ["email"]).unwrap();
    ///
    /// assert_eq!(uk.build_create(), "UNIQUE KEY `uk_email` (`email`)");
    /// assert_eq!(uk.build_add(), "ADD CONSTRAINT `uk_email` UNIQUE (`email`)");
    /// assert_eq!(uk.build_drop(), "DROP INDEX `uk_email`");
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
}

impl Ddl for UniqueKey {
    fn build_create(&self) -> String {
        format!(
            "UNIQUE KEY {} {}",
            quote_ident(&self.name),
            quote_list(&self.columns)
        )
    }

    /// MySQL drops unique keys as indexes
    fn build_drop(&self) -> String {
        format!("DROP INDEX {}", quote_ident(&self.name))
    }
}

impl Key for UniqueKey {
    fn name(&self) -> &str {
        &self.name
    }

    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn build_add(&self) -> String {
        format!(
            "ADD CONSTRAINT {} UNIQUE {}",
            quote_ident(&self.name),
            quote_list(&self.columns)
        )
    }
}
