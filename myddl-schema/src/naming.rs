//! # Naming
//!
//! Identifier rules shared by columns, constraints and the registries, plus
//! the quoting helpers every renderer goes through.

use std::collections::HashSet;

use myddl_error::{Error, Result};

/// MySQL identifier limit
pub const MAX_NAME_LENGTH: usize = 64;

/// Reserved for the primary key, case-insensitive
pub const PRIMARY: &str = "primary";

/// Validate a column, table or database name
pub fn validate_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(myddl_error::invalid_name!("Empty {} name", kind));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(myddl_error::invalid_name!(
            "{} name `{}` is longer than {} characters",
            kind,
            name,
            MAX_NAME_LENGTH
        ));
    }

    Ok(())
}

/// Validate the name of a unique key, index or foreign key
pub fn validate_key_name(name: &str) -> Result<()> {
    if name.is_empty() || name.eq_ignore_ascii_case(PRIMARY) {
        return Err(Error::ReservedName(name.into()));
    }

    validate_name("constraint", name)
}

/// First repeated entry of `list`
pub fn find_duplicate(list: &[String]) -> Option<&String> {
    let mut seen = HashSet::new();
    list.iter().find(|name| !seen.insert(name.as_str()))
}

pub fn collect_names<T, S>(list: T) -> Vec<String>
where
    T: IntoIterator<Item = S>,
    S: ToString,
{
    list.into_iter().map(|s| s.to_string()).collect()
}

/// Quote an identifier with backticks
///
/// # Examples
///
/// ```
/// use myddl_schema::naming::quote_ident;
///
/// assert_eq!(quote_ident("id"), "`id`");
/// assert_eq!(quote_ident("a`b"), "`a``b`");
/// ```
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Quote a literal with double quotes
pub fn quote_str(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Render `(`a`, `b`)`
pub fn quote_list(list: &[String]) -> String {
    format!(
        "({})",
        list.iter()
            .map(|name| quote_ident(name))
            .collect::<Vec<_>>()
            .join(", ")
    )
}
