//! The resolved type graph handed over by a C front-end.
//!
//! Nodes live in an arena ([`TypeGraph`]) and refer to each other by
//! [`NodeId`]. Defining occurrences are owned by the arena; every reference
//! (a member's type, a pointer's pointee, a recursive back edge) is just an
//! id, so self-referential aggregates need no shared ownership.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node inside a [`TypeGraph`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create from a raw index.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw index.
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Variant-specific payload of a type node.
///
/// This is a closed set: the serializer matches it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypeKind {
    /// A named binding (variable, member, parameter, function symbol).
    Node { base: NodeId },

    Pointer { base: NodeId },

    /// `size` is the evaluated element count; `None` or zero is unsized.
    Array {
        base: NodeId,
        #[serde(default)]
        size: Option<u64>,
    },

    Function {
        ret: NodeId,
        #[serde(default)]
        params: Vec<NodeId>,
    },

    /// No members means opaque or forward declared.
    Struct {
        #[serde(default)]
        members: Vec<NodeId>,
    },

    Union {
        #[serde(default)]
        members: Vec<NodeId>,
    },

    /// Enumerator names in declaration order. Values are not tracked.
    Enum {
        #[serde(default)]
        enumerators: Vec<String>,
    },

    Bitfield { base: NodeId, width: u32 },

    /// A spelled base type such as `int` or `unsigned long`.
    BaseType { name: String },

    /// A typedef name the front-end left unexpanded.
    TypedefAlias {
        name: String,
        #[serde(default)]
        base: Option<NodeId>,
    },

    /// A variant tag this version does not understand.
    #[serde(other)]
    Unsupported,
}

impl TypeKind {
    /// The node this one wraps, following the same edge the keyword lookup
    /// follows (a function's return type counts as its base).
    pub fn base(&self) -> Option<NodeId> {
        match self {
            TypeKind::Node { base }
            | TypeKind::Pointer { base }
            | TypeKind::Array { base, .. }
            | TypeKind::Bitfield { base, .. } => Some(*base),
            TypeKind::Function { ret, .. } => Some(*ret),
            TypeKind::TypedefAlias { base, .. } => *base,
            TypeKind::Struct { .. }
            | TypeKind::Union { .. }
            | TypeKind::Enum { .. }
            | TypeKind::BaseType { .. }
            | TypeKind::Unsupported => None,
        }
    }

    /// Every node id this variant refers to.
    pub fn references(&self) -> Vec<NodeId> {
        match self {
            TypeKind::Function { ret, params } => {
                let mut refs = Vec::with_capacity(params.len() + 1);
                refs.push(*ret);
                refs.extend_from_slice(params);
                refs
            }
            TypeKind::Struct { members } | TypeKind::Union { members } => members.clone(),
            other => other.base().into_iter().collect(),
        }
    }

    /// The cycle-guard kind, for variants that are looked up by name.
    pub fn symbol_kind(&self) -> Option<SymbolKind> {
        match self {
            TypeKind::Struct { .. } => Some(SymbolKind::Struct),
            TypeKind::Union { .. } => Some(SymbolKind::Union),
            TypeKind::Enum { .. } => Some(SymbolKind::Enum),
            TypeKind::Bitfield { .. } => Some(SymbolKind::Bitfield),
            TypeKind::BaseType { .. } => Some(SymbolKind::BaseType),
            _ => None,
        }
    }

    /// Short variant name, for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TypeKind::Node { .. } => "node",
            TypeKind::Pointer { .. } => "pointer",
            TypeKind::Array { .. } => "array",
            TypeKind::Function { .. } => "function",
            TypeKind::Struct { .. } => "struct",
            TypeKind::Union { .. } => "union",
            TypeKind::Enum { .. } => "enum",
            TypeKind::Bitfield { .. } => "bitfield",
            TypeKind::BaseType { .. } => "base type",
            TypeKind::TypedefAlias { .. } => "typedef",
            TypeKind::Unsupported => "unsupported",
        }
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, TypeKind::Pointer { .. })
    }

    pub fn is_function(&self) -> bool {
        matches!(self, TypeKind::Function { .. })
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, TypeKind::Struct { .. } | TypeKind::Union { .. })
    }
}

/// Kind component of a cycle-guard entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SymbolKind {
    Struct,
    Union,
    Enum,
    Bitfield,
    BaseType,
}

/// One node of the type graph: an optional identifier plus its variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ident: Option<String>,
    pub kind: TypeKind,
}

impl TypeNode {
    /// A node carrying an identifier.
    pub fn named(ident: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            ident: Some(ident.into()),
            kind,
        }
    }

    /// A node without an identifier.
    pub fn anonymous(kind: TypeKind) -> Self {
        Self { ident: None, kind }
    }

    /// The identifier, if any.
    pub fn ident(&self) -> Option<&str> {
        self.ident.as_deref()
    }
}

/// Arena owning every node of one compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeGraph {
    nodes: Vec<TypeNode>,
}

impl TypeGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its id.
    pub fn add(&mut self, node: TypeNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Reserve an id now and fill the node in later.
    ///
    /// Needed to build recursive aggregates, whose members point back at the
    /// aggregate itself. The placeholder is [`TypeKind::Unsupported`].
    pub fn reserve(&mut self) -> NodeId {
        self.add(TypeNode::anonymous(TypeKind::Unsupported))
    }

    /// Replace the node at `id`. Returns the previous node, or `None` if
    /// `id` is out of range (in which case nothing changes).
    pub fn set(&mut self, id: NodeId, node: TypeNode) -> Option<TypeNode> {
        self.nodes
            .get_mut(id.index())
            .map(|slot| std::mem::replace(slot, node))
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&TypeNode> {
        self.nodes.get(id.index())
    }

    /// Look up a node's variant.
    pub fn kind(&self, id: NodeId) -> Option<&TypeKind> {
        self.get(id).map(|node| &node.kind)
    }

    /// Look up a node's identifier.
    pub fn ident(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(TypeNode::ident)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// True if `id` is a pointer whose pointee is a function.
    pub fn is_function_pointer(&self, id: NodeId) -> bool {
        match self.kind(id) {
            Some(TypeKind::Pointer { base }) => self.kind(*base).is_some_and(TypeKind::is_function),
            _ => false,
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over `(id, node)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TypeNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }
}
