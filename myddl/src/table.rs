use crate::{
    error::{Error, Result},
    schema::{
        naming::{quote_ident, quote_str, validate_name},
        Column, Constraint, Ddl, ForeignKey, Index, Key, PrimaryKey, UniqueKey,
    },
    TableOptions,
};

/// Registry state, `Mutable -> Immutable` only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Mutable,
    Immutable,
}

/// A table definition: columns in insertion order, at most one primary key,
/// unique keys, indexes and foreign keys.
///
/// Attached columns are only reachable mutably through `column_mut`, which
/// stops working once the table is frozen.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    options: TableOptions,
    columns: Vec<Column>,
    primary_key: Option<PrimaryKey>,
    unique_keys: Vec<UniqueKey>,
    indexes: Vec<Index>,
    foreign_keys: Vec<ForeignKey>,
    state: State,
}

impl Table {
    /// # Examples
    ///
    /// ```
    /// use myddl::{schema::{Column, PrimaryKey}, Table};
    ///
    /// let mut id = Column::integer("id", "int").unwrap();
    /// id.set_unsigned(true).unwrap().set_auto_increment(true).unwrap();
    ///
    /// let mut table = Table::new("foo").unwrap();
    /// table
    ///     .add_column(id)
    ///     .unwrap()
    ///     .set_primary_key(PrimaryKey::new(["id"]).unwrap())
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     table.build_create(),
    ///     "CREATE TABLE IF NOT EXISTS `foo` (`id` int UNSIGNED NOT NULL AUTO_INCREMENT, PRIMARY KEY (`id`)) ENGINE=InnoDB CHARSET=utf8 COLLATE=utf8_general_ci;"
    /// );
    /// ```
    pub fn new(name: &str) -> Result<Self> {
        Self::with_options(name, TableOptions::default())
    }

    pub fn with_options(name: &str, options: TableOptions) -> Result<Self> {
        validate_name("table", name)?;
        options.validate()?;

        Ok(Self {
            name: name.into(),
            options,
            columns: Vec::new(),
            primary_key: None,
            unique_keys: Vec::new(),
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
            state: State::Mutable,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_frozen(&self) -> bool {
        self.state == State::Immutable
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names compare without regard to ASCII case, as in MySQL
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|col| col.name().eq_ignore_ascii_case(name))
    }

    pub fn primary_key(&self) -> Option<&PrimaryKey> {
        self.primary_key.as_ref()
    }

    pub fn unique_keys(&self) -> &[UniqueKey] {
        &self.unique_keys
    }

    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    /// Primary key, unique keys, indexes, foreign keys
    pub fn keys(&self) -> Vec<&dyn Key> {
        let mut keys = Vec::<&dyn Key>::new();
        if let Some(pk) = &self.primary_key {
            keys.push(pk);
        }
        keys.extend(self.unique_keys.iter().map(|k| k as &dyn Key));
        keys.extend(self.indexes.iter().map(|k| k as &dyn Key));
        keys.extend(self.foreign_keys.iter().map(|k| k as &dyn Key));

        keys
    }

    /// Freeze the table, every later mutation fails
    pub fn freeze(&mut self) {
        if self.state == State::Mutable {
            log::trace!("Freeze table `{}`", self.name);
            self.state = State::Immutable;
        }
    }

    pub fn set_options(&mut self, options: TableOptions) -> Result<&mut Self> {
        self.ensure_mutable()?;
        options.validate()?;

        self.options = options;
        Ok(self)
    }

    pub fn set_comment<S: ToString>(&mut self, comment: S) -> Result<&mut Self> {
        self.ensure_mutable()?;

        self.options.comment = comment.to_string();
        Ok(self)
    }

    pub fn add_column(&mut self, column: Column) -> Result<&mut Self> {
        self.ensure_mutable()?;

        if self.column(column.name()).is_some() {
            return Err(crate::error::already_set!("column", column.name()));
        }

        log::trace!("Add column `{}` to table `{}`", column.name(), self.name);
        self.columns.push(column);

        Ok(self)
    }

    /// Mutable access to an attached column while the table is mutable
    pub fn column_mut(&mut self, name: &str) -> Result<&mut Column> {
        self.ensure_mutable()?;

        self.columns
            .iter_mut()
            .find(|col| col.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| crate::error::not_set!("column", name))
    }

    pub fn set_primary_key(&mut self, pk: PrimaryKey) -> Result<&mut Self> {
        self.ensure_mutable()?;

        if self.primary_key.is_some() {
            return Err(crate::error::already_set!("primary key", self.name));
        }
        self.check_columns(pk.columns())?;

        log::trace!("Set primary key of table `{}`", self.name);
        self.primary_key = Some(pk);

        Ok(self)
    }

    pub fn add_unique_key(&mut self, uk: UniqueKey) -> Result<&mut Self> {
        self.ensure_mutable()?;
        self.check_index_name(uk.name())?;
        self.check_columns(uk.columns())?;

        log::trace!("Add unique key `{}` to table `{}`", uk.name(), self.name);
        self.unique_keys.push(uk);

        Ok(self)
    }

    pub fn add_index(&mut self, index: Index) -> Result<&mut Self> {
        self.ensure_mutable()?;
        self.check_index_name(index.name())?;
        self.check_columns(index.columns())?;

        log::trace!("Add index `{}` to table `{}`", index.name(), self.name);
        self.indexes.push(index);

        Ok(self)
    }

    /// Attach a foreign key, creating a covering index named after it unless
    /// an index on exactly its columns already exists
    pub fn add_foreign_key(&mut self, fk: ForeignKey) -> Result<&mut Self> {
        self.ensure_mutable()?;

        if self.foreign_key(fk.name()).is_some() {
            return Err(crate::error::already_set!("foreign key", fk.name()));
        }
        self.check_columns(fk.columns())?;

        let index = if self.indexes.iter().any(|idx| idx.covers(fk.columns())) {
            None
        } else {
            self.check_index_name(fk.name())?;
            Some(Index::new(fk.name(), fk.columns())?)
        };

        if let Some(index) = index {
            log::debug!(
                "Create index `{}` on table `{}` for foreign key",
                index.name(),
                self.name
            );
            self.indexes.push(index);
        }

        log::trace!("Add foreign key `{}` to table `{}`", fk.name(), self.name);
        self.foreign_keys.push(fk);

        Ok(self)
    }

    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<&mut Self> {
        match constraint {
            Constraint::PrimaryKey(pk) => self.set_primary_key(pk),
            Constraint::UniqueKey(uk) => self.add_unique_key(uk),
            Constraint::Index(index) => self.add_index(index),
            Constraint::ForeignKey(fk) => self.add_foreign_key(fk),
        }
    }

    /// `CREATE TABLE IF NOT EXISTS ...;`
    pub fn build_create(&self) -> String {
        let mut defs = self
            .columns
            .iter()
            .map(|col| col.build_create())
            .collect::<Vec<_>>();
        defs.extend(self.keys().iter().map(|key| key.build_create()));

        let mut parts = Vec::<String>::new();

        // Build prefix
        parts.push(format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote_ident(&self.name),
            defs.join(", ")
        ));

        // Build options
        parts.push(format!("ENGINE={}", self.options.engine));
        parts.push(format!("CHARSET={}", self.options.charset));
        parts.push(format!("COLLATE={}", self.options.collation));
        if !self.options.comment.is_empty() {
            parts.push(format!("COMMENT={}", quote_str(&self.options.comment)));
        }

        let sql = format!("{};", parts.join(" "));
        log::trace!("Build `{}`", sql);

        sql
    }

    /// `DROP TABLE IF EXISTS ...;`
    pub fn build_drop(&self) -> String {
        format!("DROP TABLE IF EXISTS {};", quote_ident(&self.name))
    }

    /// `ALTER TABLE ... ADD COLUMN ...;` for a column not yet on the table
    pub fn build_add_column(&self, column: &Column, after: Option<&str>) -> Result<String> {
        if self.column(column.name()).is_some() {
            return Err(crate::error::already_set!("column", column.name()));
        }

        let after = match after {
            Some(name) => Some(
                self.column(name)
                    .ok_or_else(|| crate::error::not_set!("column", name))?,
            ),
            None => None,
        };

        Ok(self.alter(column.build_add(after)))
    }

    /// `ALTER TABLE ... CHANGE COLUMN ...;` replacing `old_name`
    pub fn build_change_column(&self, old_name: &str, column: &Column) -> Result<String> {
        let old = self
            .column(old_name)
            .ok_or_else(|| crate::error::not_set!("column", old_name))?;

        if !column.name().eq_ignore_ascii_case(old_name) && self.column(column.name()).is_some() {
            return Err(crate::error::already_set!("column", column.name()));
        }

        Ok(self.alter(column.build_change(old)))
    }

    /// `ALTER TABLE ... DROP COLUMN ...;`, refused while a constraint uses it
    pub fn build_drop_column(&self, name: &str) -> Result<String> {
        let column = self
            .column(name)
            .ok_or_else(|| crate::error::not_set!("column", name))?;

        if let Some(key) = self
            .keys()
            .into_iter()
            .find(|key| key.columns().iter().any(|c| c.eq_ignore_ascii_case(name)))
        {
            return Err(Error::ColumnInUse {
                column: name.into(),
                constraint: label(key),
            });
        }

        Ok(self.alter(column.build_drop()))
    }

    /// `ALTER TABLE ... ADD ...;` for a constraint over existing columns
    pub fn build_add_constraint(&self, constraint: &Constraint) -> Result<String> {
        match constraint {
            Constraint::PrimaryKey(_) if self.primary_key.is_some() => {
                return Err(crate::error::already_set!("primary key", self.name));
            }
            Constraint::UniqueKey(_) | Constraint::Index(_) => {
                self.check_index_name(constraint.name())?;
            }
            Constraint::ForeignKey(fk) if self.foreign_key(fk.name()).is_some() => {
                return Err(crate::error::already_set!("foreign key", fk.name()));
            }
            _ => {}
        }
        self.check_columns(constraint.columns())?;

        Ok(self.alter(constraint.build_add()))
    }

    /// `ALTER TABLE ... DROP ...;` for a constraint attached to this table
    pub fn build_drop_constraint(&self, constraint: &Constraint) -> Result<String> {
        match constraint {
            Constraint::PrimaryKey(_) => self.build_drop_primary_key(),
            Constraint::UniqueKey(uk) => {
                if !self.unique_keys.iter().any(|k| k.name() == uk.name()) {
                    return Err(crate::error::not_set!("unique key", uk.name()));
                }
                Ok(self.alter(uk.build_drop()))
            }
            Constraint::Index(index) => {
                if !self.indexes.iter().any(|k| k.name() == index.name()) {
                    return Err(crate::error::not_set!("index", index.name()));
                }
                Ok(self.alter(index.build_drop()))
            }
            Constraint::ForeignKey(fk) => self.build_drop_foreign_key(fk.name()),
        }
    }

    pub fn build_drop_primary_key(&self) -> Result<String> {
        let pk = self
            .primary_key
            .as_ref()
            .ok_or_else(|| crate::error::not_set!("primary key", self.name))?;

        Ok(self.alter(pk.build_drop()))
    }

    /// Drop a unique key or an index by name
    pub fn build_drop_index(&self, name: &str) -> Result<String> {
        let fragment = if let Some(uk) = self.unique_keys.iter().find(|k| k.name() == name) {
            uk.build_drop()
        } else if let Some(index) = self.indexes.iter().find(|k| k.name() == name) {
            index.build_drop()
        } else {
            return Err(crate::error::not_set!("index", name));
        };

        Ok(self.alter(fragment))
    }

    pub fn build_drop_foreign_key(&self, name: &str) -> Result<String> {
        let fk = self
            .foreign_key(name)
            .ok_or_else(|| crate::error::not_set!("foreign key", name))?;

        Ok(self.alter(fk.build_drop()))
    }

    fn alter(&self, fragment: String) -> String {
        let sql = format!("ALTER TABLE {} {};", quote_ident(&self.name), fragment);
        log::trace!("Build `{}`", sql);

        sql
    }

    fn foreign_key(&self, name: &str) -> Option<&ForeignKey> {
        self.foreign_keys.iter().find(|fk| fk.name() == name)
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.is_frozen() {
            return Err(crate::error::immutable!("table", self.name));
        }

        Ok(())
    }

    /// Unique keys and indexes share one name space
    fn check_index_name(&self, name: &str) -> Result<()> {
        let taken = self.unique_keys.iter().any(|k| k.name() == name)
            || self.indexes.iter().any(|k| k.name() == name);
        if taken {
            return Err(crate::error::already_set!("index", name));
        }

        Ok(())
    }

    fn check_columns(&self, columns: &[String]) -> Result<()> {
        for name in columns {
            if self.column(name).is_none() {
                return Err(crate::error::not_set!("column", format!("{}.{}", self.name, name)));
            }
        }

        Ok(())
    }
}

fn label(key: &dyn Key) -> String {
    match key.name() {
        "" => "PRIMARY KEY".into(),
        name => name.into(),
    }
}
