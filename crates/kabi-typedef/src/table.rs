//! In-memory implementation of the TypedefSource trait.
//!
//! One table per compilation unit. Definitions keep their insertion order so
//! a table serializes the same way every time.

use std::collections::HashMap;

use kabi_core::NodeId;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TypedefError};
use crate::traits::{AliasDef, AliasFragment, TypedefSource};

/// A record that `ident` inside `scope` was declared through `alias`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedefUse {
    /// Enclosing struct or union; absent at top level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<NodeId>,
    pub ident: String,
    pub alias: String,
}

/// Typedef definitions plus the identifiers they govern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TableRepr", into = "TableRepr")]
pub struct TypedefTable {
    /// Definitions in insertion order.
    aliases: Vec<AliasDef>,

    /// Alias name -> position in `aliases`.
    by_name: HashMap<String, usize>,

    /// (scope, ident) -> alias name.
    uses: HashMap<(Option<NodeId>, String), String>,

    /// Insertion order of `uses` keys.
    use_order: Vec<(Option<NodeId>, String)>,
}

impl TypedefTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a typedef definition.
    pub fn define(&mut self, def: AliasDef) -> Result<()> {
        if def.fragments.is_empty() {
            return Err(TypedefError::EmptyDefinition(def.name));
        }
        if self.by_name.contains_key(&def.name) {
            return Err(TypedefError::DuplicateAlias(def.name));
        }
        self.by_name.insert(def.name.clone(), self.aliases.len());
        self.aliases.push(def);
        Ok(())
    }

    /// Shorthand for a definition made only of terminal text.
    pub fn define_terminal(&mut self, name: &str, text: &[&str]) -> Result<()> {
        let fragments = text
            .iter()
            .map(|t| AliasFragment::Terminal((*t).to_string()))
            .collect();
        self.define(AliasDef::new(name, fragments))
    }

    /// Record that `ident` inside `scope` is declared through `alias`.
    ///
    /// Returns the alias previously recorded for the same key, if any.
    pub fn govern(
        &mut self,
        scope: Option<NodeId>,
        ident: impl Into<String>,
        alias: impl Into<String>,
    ) -> Option<String> {
        let key = (scope, ident.into());
        let previous = self.uses.insert(key.clone(), alias.into());
        if previous.is_none() {
            self.use_order.push(key);
        }
        previous
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Definitions in insertion order.
    pub fn aliases(&self) -> impl Iterator<Item = &AliasDef> {
        self.aliases.iter()
    }

    /// Clear all definitions and uses.
    pub fn clear(&mut self) {
        self.aliases.clear();
        self.by_name.clear();
        self.uses.clear();
        self.use_order.clear();
    }
}

impl TypedefSource for TypedefTable {
    fn alias(&self, name: &str) -> Option<&AliasDef> {
        self.by_name.get(name).map(|&i| &self.aliases[i])
    }

    fn governing_alias(&self, scope: Option<NodeId>, ident: &str) -> Option<&str> {
        self.uses
            .get(&(scope, ident.to_string()))
            .map(String::as_str)
    }
}

/// Serialized form: two flat lists.
#[derive(Serialize, Deserialize)]
struct TableRepr {
    #[serde(default)]
    aliases: Vec<AliasDef>,
    #[serde(default)]
    uses: Vec<TypedefUse>,
}

impl TryFrom<TableRepr> for TypedefTable {
    type Error = TypedefError;

    fn try_from(repr: TableRepr) -> Result<Self> {
        let mut table = TypedefTable::new();
        for def in repr.aliases {
            table.define(def)?;
        }
        for u in repr.uses {
            table.govern(u.scope, u.ident, u.alias);
        }
        Ok(table)
    }
}

impl From<TypedefTable> for TableRepr {
    fn from(mut table: TypedefTable) -> Self {
        let uses = table
            .use_order
            .iter()
            .filter_map(|key| {
                table.uses.remove(key).map(|alias| TypedefUse {
                    scope: key.0,
                    ident: key.1.clone(),
                    alias,
                })
            })
            .collect();
        TableRepr {
            aliases: table.aliases,
            uses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_lookup() {
        let mut table = TypedefTable::new();
        table.define_terminal("u32", &["unsigned", "int"]).unwrap();

        let def = table.alias("u32").unwrap();
        assert_eq!(def.fragments.len(), 2);
        assert_eq!(def.fragments[0].text(), "unsigned");
        assert!(table.alias("u64").is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_reject_duplicate_alias() {
        let mut table = TypedefTable::new();
        table.define_terminal("u8", &["unsigned char"]).unwrap();

        let result = table.define_terminal("u8", &["char"]);
        assert_eq!(result, Err(TypedefError::DuplicateAlias("u8".into())));
        assert_eq!(table.alias("u8").unwrap().fragments[0].text(), "unsigned char");
    }

    #[test]
    fn test_reject_empty_definition() {
        let mut table = TypedefTable::new();
        let result = table.define(AliasDef::new("nothing", vec![]));
        assert_eq!(result, Err(TypedefError::EmptyDefinition("nothing".into())));
        assert!(table.is_empty());
    }

    #[test]
    fn test_governing_alias_is_scoped() {
        let mut table = TypedefTable::new();
        table.define_terminal("gfp_t", &["unsigned"]).unwrap();
        table.govern(Some(NodeId(4)), "flags", "gfp_t");

        assert_eq!(table.governing_alias(Some(NodeId(4)), "flags"), Some("gfp_t"));
        assert_eq!(table.governing_alias(Some(NodeId(5)), "flags"), None);
        assert_eq!(table.governing_alias(None, "flags"), None);
    }

    #[test]
    fn test_govern_replaces_previous() {
        let mut table = TypedefTable::new();
        assert_eq!(table.govern(None, "len", "size_t"), None);
        assert_eq!(table.govern(None, "len", "ssize_t"), Some("size_t".into()));
        assert_eq!(table.governing_alias(None, "len"), Some("ssize_t"));
    }

    #[test]
    fn test_json_roundtrip_preserves_order() {
        let mut table = TypedefTable::new();
        table.define_terminal("b", &["int"]).unwrap();
        table
            .define(AliasDef::new("a", vec![AliasFragment::AliasOf("b".into())]))
            .unwrap();
        table.govern(Some(NodeId(2)), "x", "a");
        table.govern(None, "y", "b");

        let json = serde_json::to_string(&table).unwrap();
        let decoded: TypedefTable = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, table);
        let names: Vec<_> = decoded.aliases().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_json_rejects_duplicates() {
        let json = r#"{"aliases":[
            {"name":"t","fragments":[{"terminal":"int"}]},
            {"name":"t","fragments":[{"terminal":"long"}]}
        ]}"#;
        let result: std::result::Result<TypedefTable, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_clear() {
        let mut table = TypedefTable::new();
        table.define_terminal("u16", &["unsigned short"]).unwrap();
        table.govern(None, "port", "u16");
        table.clear();

        assert!(table.is_empty());
        assert_eq!(table.governing_alias(None, "port"), None);
    }
}
