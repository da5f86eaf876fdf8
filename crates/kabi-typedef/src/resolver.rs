//! Typedef chain resolution.
//!
//! A typedef expands to an ordered list of fragments, some of which name
//! further typedefs. Resolution flattens the chain into the text fragments
//! that go into the canonical token stream, one token per fragment.

use crate::traits::{AliasDef, AliasFragment, TypedefSource};

/// Flattens typedef chains from a [`TypedefSource`].
pub struct TypedefResolver<'a, S: TypedefSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: TypedefSource + ?Sized> TypedefResolver<'a, S> {
    /// Create a resolver over `source`.
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Resolve `alias_name` to its text fragments in chain order.
    ///
    /// A reference back to any alias already being expanded (itself, or an
    /// outer alias on the current path) is emitted as its name instead of
    /// being expanded again. So is a reference to an alias with no
    /// definition. An undefined `alias_name` resolves to itself.
    pub fn resolve(&self, alias_name: &str) -> Vec<String> {
        let mut out = Vec::new();
        match self.source.alias(alias_name) {
            Some(def) => {
                let mut path = Vec::new();
                self.expand(def, &mut path, &mut out);
            }
            None => out.push(alias_name.to_string()),
        }
        out
    }

    fn expand(&self, def: &'a AliasDef, path: &mut Vec<&'a str>, out: &mut Vec<String>) {
        tracing::debug!(typedef = %def.name, depth = path.len(), "expanding typedef");
        path.push(&def.name);

        for fragment in &def.fragments {
            match fragment {
                AliasFragment::Terminal(text) => out.push(text.clone()),
                AliasFragment::AliasOf(name) if path.contains(&name.as_str()) => {
                    tracing::trace!(typedef = %name, "typedef refers back to itself");
                    out.push(name.clone());
                }
                AliasFragment::AliasOf(name) => match self.source.alias(name) {
                    Some(next) => self.expand(next, path, out),
                    None => out.push(name.clone()),
                },
            }
        }

        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TypedefTable;
    use proptest::prelude::*;

    fn alias_of(name: &str) -> AliasFragment {
        AliasFragment::AliasOf(name.to_string())
    }

    fn terminal(text: &str) -> AliasFragment {
        AliasFragment::Terminal(text.to_string())
    }

    #[test]
    fn test_terminal_definition() {
        let mut table = TypedefTable::new();
        table.define_terminal("u32", &["unsigned int"]).unwrap();

        let resolver = TypedefResolver::new(&table);
        assert_eq!(resolver.resolve("u32"), vec!["unsigned int"]);
    }

    #[test]
    fn test_chain_in_order() {
        // typedef unsigned int __u32; typedef __u32 u32; typedef const u32 cu32;
        let mut table = TypedefTable::new();
        table.define_terminal("__u32", &["unsigned int"]).unwrap();
        table.define(AliasDef::new("u32", vec![alias_of("__u32")])).unwrap();
        table
            .define(AliasDef::new("cu32", vec![terminal("const"), alias_of("u32")]))
            .unwrap();

        let resolver = TypedefResolver::new(&table);
        assert_eq!(resolver.resolve("cu32"), vec!["const", "unsigned int"]);
    }

    #[test]
    fn test_self_reference_is_terminal() {
        // typedef struct page page;
        let mut table = TypedefTable::new();
        table
            .define(AliasDef::new("page", vec![terminal("struct"), alias_of("page")]))
            .unwrap();

        let resolver = TypedefResolver::new(&table);
        assert_eq!(resolver.resolve("page"), vec!["struct", "page"]);
    }

    #[test]
    fn test_longer_cycle_is_cut() {
        let mut table = TypedefTable::new();
        table.define(AliasDef::new("a", vec![alias_of("b")])).unwrap();
        table
            .define(AliasDef::new("b", vec![terminal("x"), alias_of("a")]))
            .unwrap();

        let resolver = TypedefResolver::new(&table);
        assert_eq!(resolver.resolve("a"), vec!["x", "a"]);
        assert_eq!(resolver.resolve("b"), vec!["x", "b"]);
    }

    #[test]
    fn test_repeated_sibling_is_expanded_each_time() {
        let mut table = TypedefTable::new();
        table.define_terminal("w", &["short"]).unwrap();
        table
            .define(AliasDef::new("pair", vec![alias_of("w"), alias_of("w")]))
            .unwrap();

        let resolver = TypedefResolver::new(&table);
        assert_eq!(resolver.resolve("pair"), vec!["short", "short"]);
    }

    #[test]
    fn test_undefined_names() {
        let mut table = TypedefTable::new();
        table.define(AliasDef::new("t", vec![alias_of("missing")])).unwrap();

        let resolver = TypedefResolver::new(&table);
        assert_eq!(resolver.resolve("t"), vec!["missing"]);
        assert_eq!(resolver.resolve("nope"), vec!["nope"]);
    }

    fn alias_table() -> impl Strategy<Value = TypedefTable> {
        let names = ["t0", "t1", "t2", "t3", "t4"];
        let fragment = prop_oneof![
            "[a-z]{1,6}".prop_map(AliasFragment::Terminal),
            (0usize..5).prop_map(move |i| AliasFragment::AliasOf(names[i].to_string())),
        ];
        prop::collection::vec(prop::collection::vec(fragment, 1..4), 5).prop_map(move |defs| {
            let mut table = TypedefTable::new();
            for (name, fragments) in names.iter().zip(defs) {
                table
                    .define(AliasDef::new(*name, fragments))
                    .expect("names are distinct");
            }
            table
        })
    }

    proptest! {
        #[test]
        fn test_resolution_terminates(table in alias_table()) {
            let resolver = TypedefResolver::new(&table);
            for name in ["t0", "t1", "t2", "t3", "t4"] {
                let out = resolver.resolve(name);
                prop_assert!(!out.is_empty());
                // Each fragment appears at most once per path, 5 deep, 3 wide.
                prop_assert!(out.len() <= 3usize.pow(5));
            }
        }

        #[test]
        fn test_resolution_is_deterministic(table in alias_table()) {
            let resolver = TypedefResolver::new(&table);
            prop_assert_eq!(resolver.resolve("t0"), resolver.resolve("t0"));
        }
    }
}
