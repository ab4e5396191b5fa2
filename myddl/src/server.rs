use crate::{
    error::Result,
    schema::naming::{quote_ident, validate_name},
    Database, State,
};

/// A named set of databases
#[derive(Debug, Clone, PartialEq)]
pub struct Server {
    name: String,
    databases: Vec<Database>,
    state: State,
}

impl Server {
    pub fn new(name: &str) -> Result<Self> {
        validate_name("server", name)?;

        Ok(Self {
            name: name.into(),
            databases: Vec::new(),
            state: State::Mutable,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_frozen(&self) -> bool {
        self.state == State::Immutable
    }

    pub fn databases(&self) -> &[Database] {
        &self.databases
    }

    pub fn database(&self, name: &str) -> Option<&Database> {
        self.databases.iter().find(|db| db.name() == name)
    }

    pub fn freeze(&mut self) {
        if self.state == State::Mutable {
            log::trace!("Freeze server `{}`", self.name);
            self.state = State::Immutable;
        }
    }

    /// Attach a database and freeze it
    pub fn add_database(&mut self, mut database: Database) -> Result<&mut Self> {
        if self.is_frozen() {
            return Err(crate::error::immutable!("server", self.name));
        }

        if self.database(database.name()).is_some() {
            return Err(crate::error::already_set!("database", database.name()));
        }

        database.freeze();
        log::trace!(
            "Add database `{}` to server `{}`",
            database.name(),
            self.name
        );
        self.databases.push(database);

        Ok(self)
    }

    /// Every `CREATE DATABASE` followed by its `USE` and `CREATE TABLE`s
    pub fn build_create(&self) -> Vec<String> {
        let mut sqls = Vec::new();
        for db in &self.databases {
            sqls.push(db.build_create());
            sqls.push(format!("USE {};", quote_ident(db.name())));
            sqls.extend(db.build_create_tables());
        }

        sqls
    }
}

/// Container of servers, owned by the caller
///
/// # Examples
///
/// ```
/// use myddl::{Registry, Server};
///
/// let mut registry = Registry::default();
/// registry.add_server(Server::new("main").unwrap()).unwrap();
///
/// assert!(registry.server("main").unwrap().is_frozen());
/// assert!(registry.server("replica").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    servers: Vec<Server>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    pub fn server(&self, name: &str) -> Result<&Server> {
        self.servers
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| crate::error::not_set!("server", name))
    }

    /// Attach a server and freeze it
    pub fn add_server(&mut self, mut server: Server) -> Result<&mut Self> {
        if self.servers.iter().any(|s| s.name() == server.name()) {
            return Err(crate::error::already_set!("server", server.name()));
        }

        server.freeze();
        log::trace!("Add server `{}`", server.name());
        self.servers.push(server);

        Ok(self)
    }

    pub fn clear_servers(&mut self) {
        log::trace!("Clear {} servers", self.servers.len());
        self.servers.clear();
    }
}
