//! The export walker: from compilation units to per-symbol checksums.

use std::collections::HashSet;
use std::path::Path;

use kabi_signature::TypeSignatureSerializer;

use crate::config::ExportConfig;
use crate::error::Result;
use crate::output::SymbolCrc;
use crate::unit::CompilationUnit;

/// Walks compilation units and checksums every exported symbol.
#[derive(Debug, Clone, Default)]
pub struct ExportWalker {
    config: ExportConfig,
}

impl ExportWalker {
    /// Create a walker.
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Names exported by marker symbols in `unit`, in marker order.
    pub fn exported_names<'u>(&self, unit: &'u CompilationUnit) -> Vec<&'u str> {
        let mut seen = HashSet::new();
        unit.named_symbols()
            .filter_map(|(_, name)| self.config.exported_name(name))
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Checksum the exported symbols of one unit.
    ///
    /// Results follow declaration order of the exported symbols. A marker
    /// whose symbol is not declared in the unit produces nothing.
    pub fn process(&self, unit: &CompilationUnit) -> Vec<SymbolCrc> {
        let exported: HashSet<&str> = self.exported_names(unit).into_iter().collect();
        if exported.is_empty() {
            tracing::debug!(unit = %unit.name, "no exported symbols");
            return Vec::new();
        }

        let mut serializer = TypeSignatureSerializer::new(&unit.graph, &unit.typedefs);
        if self.config.dump_tokens {
            serializer = serializer.with_transcript();
        }

        let mut results = Vec::new();
        for (id, name) in unit.named_symbols() {
            if !exported.contains(name) {
                continue;
            }

            let crc = serializer.checksum_symbol(id);
            let mut result = SymbolCrc::new(name, crc).with_prefix(self.config.crc_prefix.as_str());
            if let Some(tokens) = serializer.transcript() {
                tracing::debug!(symbol = name, tokens, "token stream");
                result = result.with_tokens(tokens);
            }
            results.push(result);
        }

        tracing::debug!(
            unit = %unit.name,
            exported = exported.len(),
            emitted = results.len(),
            "processed unit"
        );
        results
    }

    /// Checksum several units in order.
    ///
    /// Each unit is serialized against its own typedef table.
    pub fn process_all<'u>(
        &self,
        units: impl IntoIterator<Item = &'u CompilationUnit>,
    ) -> Vec<SymbolCrc> {
        units
            .into_iter()
            .flat_map(|unit| self.process(unit))
            .collect()
    }

    /// Load, validate and process one unit file.
    pub fn process_path(&self, path: impl AsRef<Path>) -> Result<Vec<SymbolCrc>> {
        let unit = CompilationUnit::load(path)?;
        Ok(self.process(&unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kabi_core::{TypeGraph, TypeKind, TypeNode};
    use kabi_typedef::TypedefTable;

    /// `int <name>(void)` for each name, plus a marker for each exported name.
    fn unit_with(functions: &[&str], markers: &[&str]) -> CompilationUnit {
        let mut graph = TypeGraph::new();
        let int = graph.add(TypeNode::anonymous(TypeKind::BaseType { name: "int".into() }));
        let f = graph.add(TypeNode::anonymous(TypeKind::Function { ret: int, params: vec![] }));

        let mut symbols = Vec::new();
        for name in functions {
            symbols.push(graph.add(TypeNode::named(*name, TypeKind::Node { base: f })));
        }
        for marker in markers {
            symbols.push(graph.add(TypeNode::named(*marker, TypeKind::Node { base: int })));
        }
        CompilationUnit::from_parts("test.c", graph, symbols, TypedefTable::new())
    }

    fn names(results: &[SymbolCrc]) -> Vec<&str> {
        results.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_declaration_order() {
        let unit = unit_with(
            &["zeta", "alpha", "mid"],
            &["__ksymtab_mid", "__ksymtab_zeta", "__ksymtab_alpha"],
        );
        let results = ExportWalker::default().process(&unit);
        assert_eq!(names(&results), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_unexported_symbols_skipped() {
        let unit = unit_with(&["public", "private"], &["__ksymtab_public"]);
        let results = ExportWalker::default().process(&unit);
        assert_eq!(names(&results), vec!["public"]);
    }

    #[test]
    fn test_marker_without_symbol() {
        let unit = unit_with(&["present"], &["__ksymtab_missing", "__ksymtab_present"]);
        let results = ExportWalker::default().process(&unit);
        assert_eq!(names(&results), vec!["present"]);
    }

    #[test]
    fn test_bare_marker_ignored() {
        let unit = unit_with(&["f"], &["__ksymtab_"]);
        assert!(ExportWalker::default().process(&unit).is_empty());
    }

    #[test]
    fn test_duplicate_markers() {
        let unit = unit_with(&["f"], &["__ksymtab_f", "__ksymtab_f"]);
        let walker = ExportWalker::default();
        assert_eq!(walker.exported_names(&unit), vec!["f"]);
        assert_eq!(walker.process(&unit).len(), 1);
    }

    #[test]
    fn test_output_line() {
        let unit = unit_with(&["get"], &["__ksymtab_get"]);
        let results = ExportWalker::default().process(&unit);
        let line = results[0].to_string();
        assert!(line.starts_with("__crc_get = 0x"));
        assert!(line.ends_with(" ;"));
        assert_eq!(line.len(), "__crc_get = 0x12345678 ;".len());
    }

    #[test]
    fn test_dump_tokens() {
        let unit = unit_with(&["get"], &["__ksymtab_get"]);
        let config = ExportConfig {
            dump_tokens: true,
            ..ExportConfig::default()
        };

        let results = ExportWalker::new(config).process(&unit);
        assert_eq!(results[0].tokens.as_deref(), Some("int get ( void ) "));

        let plain = ExportWalker::default().process(&unit);
        assert_eq!(plain[0].tokens, None);
        assert_eq!(plain[0].crc, results[0].crc);
    }

    #[test]
    fn test_custom_prefixes() {
        let unit = unit_with(&["get"], &["__export_get", "__ksymtab_other"]);
        let config = ExportConfig {
            marker_prefix: "__export_".into(),
            crc_prefix: "__kcrctab_".into(),
            ..ExportConfig::default()
        };

        let results = ExportWalker::new(config).process(&unit);
        assert_eq!(names(&results), vec!["get"]);
        assert!(results[0].to_string().starts_with("__kcrctab_get = "));
    }

    #[test]
    fn test_process_all_keeps_unit_order() {
        let first = unit_with(&["b"], &["__ksymtab_b"]);
        let second = unit_with(&["a"], &["__ksymtab_a"]);
        let results = ExportWalker::default().process_all([&first, &second]);
        assert_eq!(names(&results), vec!["b", "a"]);
    }

    #[test]
    fn test_repeatable_and_name_sensitive() {
        let unit = unit_with(&["f", "g"], &["__ksymtab_f", "__ksymtab_g"]);
        let results = ExportWalker::default().process(&unit);
        // Function names are part of the signature.
        assert_ne!(results[0].crc, results[1].crc);

        let again = ExportWalker::default().process(&unit);
        assert_eq!(results, again);
    }

    #[test]
    fn test_anonymous_symbol_does_not_stop_walk() {
        let mut unit = unit_with(&["f"], &["__ksymtab_f"]);
        let anon = unit.graph.add(TypeNode::anonymous(TypeKind::Unsupported));
        unit.symbols.insert(0, anon);

        assert_eq!(names(&ExportWalker::default().process(&unit)), vec!["f"]);
    }
}
