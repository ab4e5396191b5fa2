use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    pub engine: String,    // ENGINE=InnoDB
    pub charset: String,   // CHARSET=utf8
    pub collation: String, // COLLATE=utf8_general_ci
    pub comment: String,   // Omitted when empty
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            engine: "InnoDB".into(),
            charset: "utf8".into(),
            collation: "utf8_general_ci".into(),
            comment: String::new(),
        }
    }
}

impl TableOptions {
    /// Parse options, missing keys take their default
    ///
    /// # Examples
    ///
    /// ```
    /// use myddl::TableOptions;
    ///
    /// let options = TableOptions::from_json(r#"{"engine": "MyISAM"}"#).unwrap();
    ///
    /// assert_eq!(options.engine, "MyISAM");
    /// assert_eq!(options.charset, "utf8");
    /// ```
    pub fn from_json(s: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(s)
            .map_err(|e| crate::error::config!("Parse table options error: {}", e))?;
        options.validate()?;

        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        validate_required("engine", &self.engine)?;
        validate_required("charset", &self.charset)?;
        validate_required("collation", &self.collation)?;

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseOptions {
    pub charset: String,
    pub collation: String,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            charset: "utf8".into(),
            collation: "utf8_general_ci".into(),
        }
    }
}

impl DatabaseOptions {
    pub fn from_json(s: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(s)
            .map_err(|e| crate::error::config!("Parse database options error: {}", e))?;
        options.validate()?;

        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        validate_required("charset", &self.charset)?;
        validate_required("collation", &self.collation)?;

        Ok(())
    }
}

fn validate_required(key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(crate::error::config!("Empty `{}`", key));
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_defaults() {
        let options = TableOptions::from_json("{}").unwrap();
        assert_eq!(options, TableOptions::default());

        let options = DatabaseOptions::from_json(r#"{"charset": "utf8mb4"}"#).unwrap();
        assert_eq!(options.charset, "utf8mb4");
        assert_eq!(options.collation, "utf8_general_ci");
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(
            TableOptions::from_json(r#"{"engine": ""}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            TableOptions::from_json(r#"{"engine": 1}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            DatabaseOptions::from_json("not json"),
            Err(Error::Config(_))
        ));
    }
}
