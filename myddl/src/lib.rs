//! # myddl
//!
//! Declare MySQL servers, databases, tables, columns and constraints as
//! validated values, then render them into `CREATE`, `ALTER` and `DROP`
//! statements.

mod database;
mod options;
mod server;
mod table;

pub use myddl_error as error;
pub use myddl_schema as schema;

pub use database::Database;
pub use options::{DatabaseOptions, TableOptions};
pub use schema::{Column, Constraint, Ddl, ForeignKey, Index, Key, PrimaryKey, UniqueKey, Value};
pub use server::{Registry, Server};
pub use table::{State, Table};

#[cfg(test)]
mod test {
    use crate::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_shareable() {
        assert_send_sync::<Table>();
        assert_send_sync::<Database>();
        assert_send_sync::<Registry>();
    }
}
