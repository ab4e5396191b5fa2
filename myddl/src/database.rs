use crate::{
    error::Result,
    schema::naming::{quote_ident, validate_name},
    DatabaseOptions, State, Table,
};

/// A named set of tables
#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    name: String,
    options: DatabaseOptions,
    tables: Vec<Table>,
    state: State,
}

impl Database {
    pub fn new(name: &str) -> Result<Self> {
        Self::with_options(name, DatabaseOptions::default())
    }

    pub fn with_options(name: &str, options: DatabaseOptions) -> Result<Self> {
        validate_name("database", name)?;
        options.validate()?;

        Ok(Self {
            name: name.into(),
            options,
            tables: Vec::new(),
            state: State::Mutable,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &DatabaseOptions {
        &self.options
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_frozen(&self) -> bool {
        self.state == State::Immutable
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name() == name)
    }

    pub fn freeze(&mut self) {
        if self.state == State::Mutable {
            log::trace!("Freeze database `{}`", self.name);
            self.state = State::Immutable;
        }
    }

    /// Attach a table and freeze it.
    ///
    /// Every foreign key must reference a table already in the database, or
    /// the table itself, and existing columns of it.
    ///
    /// # Examples
    ///
    /// ```
    /// use myddl::{schema::Column, Database, Table};
    ///
    /// let mut table = Table::new("user").unwrap();
    /// table.add_column(Column::integer("id", "int").unwrap()).unwrap();
    ///
    /// let mut db = Database::new("app").unwrap();
    /// db.add_table(table).unwrap();
    ///
    /// assert!(db.table("user").unwrap().is_frozen());
    /// assert_eq!(
    ///     db.build_create(),
    ///     "CREATE DATABASE IF NOT EXISTS `app` DEFAULT CHARACTER SET utf8 COLLATE utf8_general_ci;"
    /// );
    /// ```
    pub fn add_table(&mut self, mut table: Table) -> Result<&mut Self> {
        if self.is_frozen() {
            return Err(crate::error::immutable!("database", self.name));
        }

        if self.table(table.name()).is_some() {
            return Err(crate::error::already_set!("table", table.name()));
        }

        for fk in table.foreign_keys() {
            let parent = if fk.parent_table() == table.name() {
                &table
            } else {
                self.table(fk.parent_table())
                    .ok_or_else(|| crate::error::not_set!("table", fk.parent_table()))?
            };

            if let Some(column) = fk
                .parent_columns()
                .iter()
                .find(|c| parent.column(c).is_none())
            {
                return Err(crate::error::not_set!(
                    "column",
                    format!("{}.{}", parent.name(), column)
                ));
            }
        }

        table.freeze();
        log::trace!("Add table `{}` to database `{}`", table.name(), self.name);
        self.tables.push(table);

        Ok(self)
    }

    /// `CREATE DATABASE IF NOT EXISTS ...;`
    pub fn build_create(&self) -> String {
        let sql = format!(
            "CREATE DATABASE IF NOT EXISTS {} DEFAULT CHARACTER SET {} COLLATE {};",
            quote_ident(&self.name),
            self.options.charset,
            self.options.collation
        );
        log::trace!("Build `{}`", sql);

        sql
    }

    /// `DROP DATABASE IF EXISTS ...;`
    pub fn build_drop(&self) -> String {
        format!("DROP DATABASE IF EXISTS {};", quote_ident(&self.name))
    }

    /// `CREATE TABLE` statements in insertion order, parents before children
    pub fn build_create_tables(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.build_create()).collect()
    }
}
