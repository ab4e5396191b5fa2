/// Rendering capability shared by columns and constraints.
///
/// Rendering never fails: every object is validated when it is built or
/// mutated, so by the time a fragment is requested it is known to be valid.
pub trait Ddl {
    /// Fragment used inside `CREATE TABLE (...)`
    fn build_create(&self) -> String;

    /// Fragment used inside `ALTER TABLE`
    fn build_drop(&self) -> String;
}

/// Constraints: named, ordered column lists
pub trait Key: Ddl {
    /// Empty for the primary key
    fn name(&self) -> &str;

    fn columns(&self) -> &[String];

    fn build_add(&self) -> String;
}
