//! Compilation units as handed over by a C front-end.
//!
//! A unit is the type graph of one source file, the ordered list of its
//! top-level symbols and its typedef table. Units are exchanged as JSON:
//!
//! ```json
//! {
//!   "name": "lib/add.c",
//!   "graph": { "nodes": [ { "kind": { "type": "base_type", "name": "int" } } ] },
//!   "symbols": [],
//!   "typedefs": { "aliases": [], "uses": [] }
//! }
//! ```

use std::fs;
use std::path::Path;

use kabi_core::{validate_graph, NodeId, TypeGraph};
use kabi_typedef::TypedefTable;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One parsed source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationUnit {
    /// Source file name, for diagnostics.
    #[serde(default)]
    pub name: String,

    pub graph: TypeGraph,

    /// Top-level symbols in declaration order.
    #[serde(default)]
    pub symbols: Vec<NodeId>,

    #[serde(default)]
    pub typedefs: TypedefTable,
}

impl CompilationUnit {
    /// Assemble a unit from its parts.
    pub fn from_parts(
        name: impl Into<String>,
        graph: TypeGraph,
        symbols: Vec<NodeId>,
        typedefs: TypedefTable,
    ) -> Self {
        Self {
            name: name.into(),
            graph,
            symbols,
            typedefs,
        }
    }

    /// Parse and validate a unit from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let unit: CompilationUnit = serde_json::from_str(json)?;
        unit.validate()?;
        Ok(unit)
    }

    /// Read, parse and validate a unit file.
    ///
    /// A unit without a name takes the file's path as its name.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let mut unit = Self::from_json(&json)?;
        if unit.name.is_empty() {
            unit.name = path.display().to_string();
        }
        tracing::debug!(
            unit = %unit.name,
            nodes = unit.graph.len(),
            symbols = unit.symbols.len(),
            typedefs = unit.typedefs.len(),
            "loaded unit"
        );
        Ok(unit)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Structural checks on the graph and symbol list.
    pub fn validate(&self) -> Result<()> {
        validate_graph(&self.graph, &self.symbols)?;
        Ok(())
    }

    /// Top-level symbols with their names, in declaration order.
    ///
    /// Anonymous symbols are skipped.
    pub fn named_symbols(&self) -> impl Iterator<Item = (NodeId, &str)> {
        self.symbols
            .iter()
            .filter_map(move |&id| self.graph.ident(id).map(|name| (id, name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use kabi_core::{GraphError, TypeKind, TypeNode};

    fn add_unit() -> CompilationUnit {
        let mut graph = TypeGraph::new();
        let int = graph.add(TypeNode::anonymous(TypeKind::BaseType { name: "int".into() }));
        let x = graph.add(TypeNode::named("x", TypeKind::Node { base: int }));
        let f = graph.add(TypeNode::anonymous(TypeKind::Function {
            ret: int,
            params: vec![x],
        }));
        let inc = graph.add(TypeNode::named("inc", TypeKind::Node { base: f }));
        CompilationUnit::from_parts("inc.c", graph, vec![inc], TypedefTable::new())
    }

    #[test]
    fn test_json_roundtrip() {
        let unit = add_unit();
        let json = unit.to_json().unwrap();
        let decoded = CompilationUnit::from_json(&json).unwrap();
        assert_eq!(decoded, unit);
    }

    #[test]
    fn test_minimal_json() {
        let json = r#"{"graph":{"nodes":[]}}"#;
        let unit = CompilationUnit::from_json(json).unwrap();
        assert!(unit.symbols.is_empty());
        assert!(unit.typedefs.is_empty());
    }

    #[test]
    fn test_rejects_dangling_reference() {
        let json = r#"{
            "graph": { "nodes": [ { "ident": "p", "kind": { "type": "pointer", "base": 9 } } ] },
            "symbols": [0]
        }"#;
        let err = CompilationUnit::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            ExportError::Graph(GraphError::DanglingReference { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = CompilationUnit::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ExportError::Json(_)));
    }

    #[test]
    fn test_rejects_duplicate_typedef() {
        let json = r#"{
            "graph": { "nodes": [] },
            "typedefs": { "aliases": [
                { "name": "t", "fragments": [ { "terminal": "int" } ] },
                { "name": "t", "fragments": [ { "terminal": "long" } ] }
            ] }
        }"#;
        assert!(CompilationUnit::from_json(json).is_err());
    }

    #[test]
    fn test_load_names_unit_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inc.json");

        let mut unit = add_unit();
        unit.name.clear();
        fs::write(&path, unit.to_json().unwrap()).unwrap();

        let loaded = CompilationUnit::load(&path).unwrap();
        assert_eq!(loaded.name, path.display().to_string());
        assert_eq!(loaded.graph, unit.graph);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CompilationUnit::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }

    #[test]
    fn test_named_symbols_skip_anonymous() {
        let mut unit = add_unit();
        let anon = unit
            .graph
            .add(TypeNode::anonymous(TypeKind::BaseType { name: "int".into() }));
        unit.symbols.insert(0, anon);

        let names: Vec<_> = unit.named_symbols().map(|(_, name)| name).collect();
        assert_eq!(names, vec!["inc"]);
    }
}
