//! Type-keyword lookup.
//!
//! The keyword of a node is what a C declaration would spell in front of the
//! declarator: `struct`, `union`, `enum`, or the base type name. It is found
//! by descending through binding, array, pointer, function (return type) and
//! bitfield wrappers.

use crate::graph::{NodeId, TypeGraph, TypeKind};

/// Keyword for aggregate and enum types.
pub const STRUCT: &str = "struct";
pub const UNION: &str = "union";
pub const ENUM: &str = "enum";

/// Find the keyword naming the type at `id`.
///
/// Returns `None` for unsupported variants, dangling references, or a chain
/// of wrappers that loops without reaching a keyed type.
pub fn type_keyword(graph: &TypeGraph, id: NodeId) -> Option<&str> {
    let mut current = id;
    // A wrapper chain longer than the graph must revisit a node.
    for _ in 0..=graph.len() {
        match graph.kind(current)? {
            TypeKind::Struct { .. } => return Some(STRUCT),
            TypeKind::Union { .. } => return Some(UNION),
            TypeKind::Enum { .. } => return Some(ENUM),
            TypeKind::BaseType { name } => return Some(name.as_str()),
            TypeKind::TypedefAlias { name, .. } => return Some(name.as_str()),
            TypeKind::Unsupported => return None,
            TypeKind::Node { base }
            | TypeKind::Array { base, .. }
            | TypeKind::Pointer { base }
            | TypeKind::Bitfield { base, .. } => current = *base,
            TypeKind::Function { ret, .. } => current = *ret,
        }
    }
    None
}
