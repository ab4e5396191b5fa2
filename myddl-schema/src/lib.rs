mod column;
mod constraint;
mod ddl;
pub mod naming;
mod types;
mod value;

pub use myddl_error as error;

pub use column::{
    is_current_timestamp, Column, ColumnKind, DateTimeDef, DecimalDef, Encoding, IntegerDef,
    StringDef, TextDef, CURRENT_TIMESTAMP, MAX_PRECISION, MAX_SCALE,
};
pub use constraint::{Constraint, ForeignKey, Index, PrimaryKey, ReferentialAction, UniqueKey};
pub use ddl::{Ddl, Key};
pub use types::{Family, SqlType};
pub use value::Value;

#[cfg(test)]
mod test {
    use crate::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_shareable() {
        assert_send_sync::<Column>();
        assert_send_sync::<Constraint>();
        assert_send_sync::<Value>();
    }
}
