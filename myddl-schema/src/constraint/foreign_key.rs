use myddl_error::{Error, Result};

use crate::{
    naming::{collect_names, find_duplicate, quote_ident, quote_list, validate_name},
    Ddl, Key,
};

use super::{validate_named, ReferentialAction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    name: String,
    columns: Vec<String>,
    parent_table: String,
    parent_columns: Vec<String>,
    update_rule: ReferentialAction,
    delete_rule: ReferentialAction,
}

impl ForeignKey {
    /// Parent columns default to `columns`, rules default to `RESTRICT`.
    ///
    /// Checked in order: name, child columns, parent columns, column counts,
    /// update rule, delete rule, parent table name.
    ///
    /// # Examples
    ///
    /// ```
    /// use myddl_schema::{Ddl, ForeignKey, Key};
    ///
    /// let fk = ForeignKey::new(
    ///     "fk_author",
    ///     ["author_id"],
    ///     "user",
    ///     Some(["id"]),
    ///     Some("cascade"),
    ///     Some("NO ACTION"),
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(
    ///     fk.build_create(),
    ///     "CONSTRAINT `fk_author` FOREIGN KEY (`author_id`) REFERENCES `user` (`id`) ON UPDATE CASCADE ON DELETE RESTRICT"
    /// );
    /// assert_eq!(fk.build_drop(), "DROP FOREIGN KEY `fk_author`");
    /// ```
    pub fn new<C, P, S, T>(
        name: &str,
        columns: C,
        parent_table: &str,
        parent_columns: Option<P>,
        update_rule: Option<&str>,
        delete_rule: Option<&str>,
    ) -> Result<Self>
    where
        C: IntoIterator<Item = S>,
        S: ToString,
        P: IntoIterator<Item = T>,
        T: ToString,
    {
        let columns = validate_named(name, columns)?;

        let parent_columns = match parent_columns {
            Some(list) => collect_names(list),
            None => columns.clone(),
        };
        if let Some(column) = find_duplicate(&parent_columns) {
            return Err(Error::DuplicateParentColumn {
                constraint: name.into(),
                column: column.clone(),
            });
        }

        let (child, parent) = (columns.len(), parent_columns.len());
        if child > parent {
            return Err(Error::MoreChildColumns {
                constraint: name.into(),
                child,
                parent,
            });
        }
        if parent > child {
            return Err(Error::MoreParentColumns {
                constraint: name.into(),
                child,
                parent,
            });
        }

        let update_rule = parse_rule(update_rule)?;
        let delete_rule = parse_rule(delete_rule)?;
        validate_name("table", parent_table)?;

        Ok(Self {
            name: name.into(),
            columns,
            parent_table: parent_table.into(),
            parent_columns,
            update_rule,
            delete_rule,
        })
    }

    /// Same parent column names, `RESTRICT` on both rules
    ///
    /// # Examples
    ///
    /// ```
    /// use myddl_schema::{Ddl, ForeignKey};
    ///
    /// let fk = ForeignKey::references("fk1", ["a_id"], "a").unwrap();
    ///
    /// assert_eq!(
    ///     fk.build_create(),
    ///     "CONSTRAINT `fk1` FOREIGN KEY (`a_id`) REFERENCES `a` (`a_id`) ON UPDATE RESTRICT ON DELETE RESTRICT"
    /// );
    /// ```
    pub fn references<C, S>(name: &str, columns: C, parent_table: &str) -> Result<Self>
    where
        C: IntoIterator<Item = S>,
        S: ToString,
    {
        Self::new(name, columns, parent_table, None::<Vec<String>>, None, None)
    }

    pub fn parent_table(&self) -> &str {
        &self.parent_table
    }

    pub fn parent_columns(&self) -> &[String] {
        &self.parent_columns
    }

    pub fn update_rule(&self) -> ReferentialAction {
        self.update_rule
    }

    pub fn delete_rule(&self) -> ReferentialAction {
        self.delete_rule
    }

    pub fn set_update_rule(&mut self, rule: &str) -> Result<&mut Self> {
        self.update_rule = ReferentialAction::parse(rule)?;
        Ok(self)
    }

    pub fn set_delete_rule(&mut self, rule: &str) -> Result<&mut Self> {
        self.delete_rule = ReferentialAction::parse(rule)?;
        Ok(self)
    }

    fn body(&self) -> String {
        format!(
            "CONSTRAINT {} FOREIGN KEY {} REFERENCES {} {} ON UPDATE {} ON DELETE {}",
            quote_ident(&self.name),
            quote_list(&self.columns),
            quote_ident(&self.parent_table),
            quote_list(&self.parent_columns),
            self.update_rule,
            self.delete_rule
        )
    }
}

fn parse_rule(rule: Option<&str>) -> Result<ReferentialAction> {
    match rule {
        Some(rule) => ReferentialAction::parse(rule),
        None => Ok(ReferentialAction::default()),
    }
}

impl Ddl for ForeignKey {
    fn build_create(&self) -> String {
        self.body()
    }

    fn build_drop(&self) -> String {
        format!("DROP FOREIGN KEY {}", quote_ident(&self.name))
    }
}

impl Key for ForeignKey {
    fn name(&self) -> &str {
        &self.name
    }

    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn build_add(&self) -> String {
        format!("ADD {}", self.body())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn fk(columns: &[&str], parent: Option<&[&str]>) -> Result<ForeignKey> {
        ForeignKey::new(
            "fk",
            columns.iter().copied(),
            "p",
            parent.map(|p| p.iter().copied()),
            None,
            None,
        )
    }

    #[test]
    fn test_duplicates() {
        for columns in [["a", "a", "b"], ["a", "b", "a"], ["b", "a", "a"]] {
            assert!(matches!(
                fk(&columns, None),
                Err(Error::DuplicateColumn { .. })
            ));
        }
        assert_eq!(
            fk(&["a", "b"], Some(&["x", "x"])).unwrap_err(),
            Error::DuplicateParentColumn {
                constraint: "fk".into(),
                column: "x".into()
            }
        );
        // Child duplicates are reported before parent ones
        assert!(matches!(
            fk(&["a", "a"], Some(&["x", "x"])),
            Err(Error::DuplicateColumn { .. })
        ));
    }

    #[test]
    fn test_cardinality() {
        assert_eq!(
            fk(&["a", "b"], Some(&["x"])).unwrap_err(),
            Error::MoreChildColumns {
                constraint: "fk".into(),
                child: 2,
                parent: 1
            }
        );
        assert_eq!(
            fk(&["a"], Some(&["x", "y"])).unwrap_err(),
            Error::MoreParentColumns {
                constraint: "fk".into(),
                child: 1,
                parent: 2
            }
        );
        assert!(matches!(fk(&[], None), Err(Error::NoColumn(_))));
    }

    #[test]
    fn test_rules() {
        let list = [
            ("CASCADE", ReferentialAction::Cascade),
            ("NO ACTION", ReferentialAction::Restrict),
            ("RESTRICT", ReferentialAction::Restrict),
            ("SET DEFAULT", ReferentialAction::SetDefault),
            ("SET NULL", ReferentialAction::SetNull),
        ];
        for (rule, expected) in list {
            let fk = ForeignKey::new("fk", ["a"], "p", None::<[&str; 0]>, Some(rule), Some(rule))
                .unwrap();
            assert_eq!(fk.update_rule(), expected);
            assert_eq!(fk.delete_rule(), expected);
        }

        assert_eq!(
            ForeignKey::new("fk", ["a"], "p", None::<[&str; 0]>, Some("DELETE"), None)
                .unwrap_err(),
            Error::InvalidRule("DELETE".into())
        );
        assert!(matches!(
            ForeignKey::new("fk", ["a"], "p", None::<[&str; 0]>, None, Some("SET")),
            Err(Error::InvalidRule(_))
        ));
    }

    #[test]
    fn test_set_rule_keeps_old_value() {
        let mut fk = ForeignKey::references("fk", ["a"], "p").unwrap();
        fk.set_delete_rule("set null").unwrap();
        assert!(fk.set_delete_rule("bogus").is_err());
        assert_eq!(fk.delete_rule(), ReferentialAction::SetNull);
        assert_eq!(
            fk.build_add(),
            "ADD CONSTRAINT `fk` FOREIGN KEY (`a`) REFERENCES `p` (`a`) ON UPDATE RESTRICT ON DELETE SET NULL"
        );
    }
}
