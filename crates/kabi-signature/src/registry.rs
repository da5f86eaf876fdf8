//! Per-symbol record of aggregates already expanded.

use std::collections::HashSet;

use kabi_core::SymbolKind;

/// The set of `(name, kind)` pairs expanded during one top-level symbol.
///
/// A second occurrence of a registered pair is printed by name only, which
/// is what stops recursive and mutually recursive aggregates. The registry
/// must be cleared between exported symbols; entries left over from a
/// previous symbol would truncate unrelated aggregates.
#[derive(Debug, Clone, Default)]
pub struct SeenSymbolRegistry {
    seen: HashSet<(String, SymbolKind)>,
}

impl SeenSymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pair. Returns `false` if it was already present.
    pub fn insert(&mut self, name: &str, kind: SymbolKind) -> bool {
        if self.contains(name, kind) {
            return false;
        }
        self.seen.insert((name.to_string(), kind))
    }

    pub fn contains(&self, name: &str, kind: SymbolKind) -> bool {
        self.seen.contains(&(name.to_string(), kind))
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_once() {
        let mut registry = SeenSymbolRegistry::new();
        assert!(registry.insert("list_head", SymbolKind::Struct));
        assert!(!registry.insert("list_head", SymbolKind::Struct));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_kind_is_part_of_key() {
        let mut registry = SeenSymbolRegistry::new();
        registry.insert("state", SymbolKind::Struct);

        assert!(registry.contains("state", SymbolKind::Struct));
        assert!(!registry.contains("state", SymbolKind::Enum));
        assert!(registry.insert("state", SymbolKind::Enum));
    }

    #[test]
    fn test_clear() {
        let mut registry = SeenSymbolRegistry::new();
        registry.insert("page", SymbolKind::Struct);
        registry.clear();

        assert!(registry.is_empty());
        assert!(!registry.contains("page", SymbolKind::Struct));
    }
}
