//! Canonical token stream for one exported symbol.
//!
//! The serializer walks a symbol's type graph and feeds a space-separated
//! token stream into a [`ChecksumAccumulator`]. The stream reads like a
//! normalized C declaration: `int add ( int , int )` for
//! `int add(int x, int y)`, `struct list { struct list * next ; }` for a
//! self-referential struct.
//!
//! Three pieces of context travel down the recursion:
//!
//! - a propagated name, so a binding's identifier lands inside a
//!   function-pointer or array declarator (`void ( * fn ) ( int )`);
//! - the innermost enclosing struct or union, which scopes typedef lookups;
//! - whether we are inside a parameter list, where names are dropped.
//!
//! The graph is never mutated.

use kabi_core::{type_keyword, Checksum, ChecksumAccumulator, NodeId, TypeGraph, TypeKind, TypeNode};
use kabi_typedef::{TypedefResolver, TypedefSource};

use crate::registry::SeenSymbolRegistry;

/// Per-call context.
#[derive(Debug, Clone, Copy)]
struct Frame<'g> {
    /// Identifier propagated from the enclosing binding.
    name: Option<&'g str>,
    /// Innermost enclosing struct or union.
    scope: Option<NodeId>,
    is_param: bool,
}

impl<'g> Frame<'g> {
    fn top(is_param: bool) -> Self {
        Self {
            name: None,
            scope: None,
            is_param,
        }
    }

    /// Same context, no propagated name.
    fn inner(self) -> Self {
        Self { name: None, ..self }
    }

    /// Outside parameter context (return types, pointees).
    fn plain(self) -> Self {
        Self {
            name: None,
            is_param: false,
            ..self
        }
    }

    fn param(self) -> Self {
        Self {
            name: None,
            is_param: true,
            ..self
        }
    }

    fn named(self, name: Option<&'g str>) -> Self {
        Self { name, ..self }
    }

    fn member_of(self, aggregate: NodeId) -> Self {
        Self {
            name: None,
            scope: Some(aggregate),
            ..self
        }
    }
}

/// Serializes type-graph nodes into a checksum accumulator.
pub struct TypeSignatureSerializer<'a, S: TypedefSource + ?Sized> {
    graph: &'a TypeGraph,
    typedefs: &'a S,
    acc: ChecksumAccumulator,
    seen: SeenSymbolRegistry,
    depth: usize,
}

impl<'a, S: TypedefSource + ?Sized> TypeSignatureSerializer<'a, S> {
    /// Create a serializer over one compilation unit.
    pub fn new(graph: &'a TypeGraph, typedefs: &'a S) -> Self {
        Self {
            graph,
            typedefs,
            acc: ChecksumAccumulator::new(),
            seen: SeenSymbolRegistry::new(),
            depth: 0,
        }
    }

    /// Also record the token stream of each symbol.
    pub fn with_transcript(mut self) -> Self {
        self.acc = ChecksumAccumulator::with_transcript();
        self
    }

    /// Compute the checksum of one top-level symbol.
    ///
    /// The accumulator and the cycle-guard registry start fresh and the
    /// registry is cleared again afterwards, so no state leaks into the next
    /// symbol.
    pub fn checksum_symbol(&mut self, symbol: NodeId) -> Checksum {
        self.acc.reset();
        self.seen.clear();
        self.depth = 0;

        self.serialize(symbol, false);
        let checksum = self.acc.finalize();

        self.seen.clear();
        tracing::debug!(
            symbol = self.graph.ident(symbol).unwrap_or("?"),
            crc = %checksum,
            "symbol checksum"
        );
        checksum
    }

    /// Feed the tokens for `id` into the accumulator.
    ///
    /// Does not reset anything; [`checksum_symbol`](Self::checksum_symbol)
    /// is the per-symbol entry point.
    pub fn serialize(&mut self, id: NodeId, is_param: bool) {
        self.visit(id, Frame::top(is_param));
    }

    /// Token stream of the last symbol, when recording is enabled.
    pub fn transcript(&self) -> Option<&str> {
        self.acc.transcript()
    }

    pub fn registry(&self) -> &SeenSymbolRegistry {
        &self.seen
    }

    fn emit(&mut self, token: &str) {
        self.acc.emit_token(token);
    }

    fn emit_opt(&mut self, token: Option<&str>) {
        if let Some(token) = token {
            self.acc.emit_token(token);
        }
    }

    fn visit(&mut self, id: NodeId, frame: Frame<'a>) {
        let graph = self.graph;
        let Some(node) = graph.get(id) else {
            tracing::warn!(node = %id, "dangling type reference");
            return;
        };
        // On a validated graph the path between two aggregate expansions
        // never repeats a node.
        let limit = graph.len().saturating_mul(self.seen.len() + 1);
        if self.depth > limit {
            tracing::warn!(node = %id, "type recursion not stopped by any named aggregate");
            return;
        }

        self.depth += 1;
        match &node.kind {
            TypeKind::Node { base } => self.visit_binding(node, *base, frame),
            TypeKind::Pointer { base } => self.visit_pointer(id, node, *base, frame),
            TypeKind::Array { base, size } => self.visit_array(id, node, *base, *size, frame),
            TypeKind::Function { ret, params } => {
                self.visit_function(frame.name.or(node.ident()), *ret, params, frame)
            }
            TypeKind::Struct { .. }
            | TypeKind::Union { .. }
            | TypeKind::Enum { .. }
            | TypeKind::Bitfield { .. }
            | TypeKind::BaseType { .. } => self.visit_keyed(id, node, frame),
            TypeKind::TypedefAlias { name, .. } => self.emit(name),
            TypeKind::Unsupported => {
                tracing::trace!(node = %id, "skipping unsupported type node");
            }
        }
        self.depth -= 1;
    }

    /// A named binding: variable, member, parameter or function symbol.
    fn visit_binding(&mut self, node: &'a TypeNode, base: NodeId, frame: Frame<'a>) {
        let graph = self.graph;
        let typedefs = self.typedefs;
        let ident = node.ident();

        if let Some(ident) = ident {
            if let Some(alias) = typedefs.governing_alias(frame.scope, ident) {
                tracing::debug!(ident, alias, "declared through typedef");
                for fragment in TypedefResolver::new(typedefs).resolve(alias) {
                    self.emit(&fragment);
                }
                if graph.kind(base).is_some_and(TypeKind::is_pointer) {
                    self.emit("*");
                }
                self.emit(ident);
                return;
            }
        }

        match graph.kind(base) {
            Some(TypeKind::Pointer { .. }) if graph.is_function_pointer(base) => {
                self.visit(base, frame.named(ident))
            }
            Some(TypeKind::Array { .. }) | Some(TypeKind::Function { .. }) => {
                self.visit(base, frame.named(ident))
            }
            _ => {
                self.visit(base, frame.inner());
                if !frame.is_param {
                    self.emit_opt(ident);
                }
            }
        }
    }

    fn visit_pointer(&mut self, id: NodeId, node: &'a TypeNode, base: NodeId, frame: Frame<'a>) {
        let graph = self.graph;
        match graph.kind(base) {
            Some(TypeKind::Function { ret, params }) => {
                self.visit(*ret, frame.plain());
                self.emit("(");
                self.emit("*");
                self.emit_opt(frame.name.or(node.ident()));
                self.emit(")");
                self.emit("(");
                self.visit_params(params, frame);
                self.emit(")");
                return;
            }
            Some(
                TypeKind::Pointer { .. }
                | TypeKind::Struct { .. }
                | TypeKind::Union { .. }
                | TypeKind::Enum { .. },
            ) => self.visit(base, frame.plain()),
            _ => self.emit_opt(type_keyword(graph, id)),
        }
        self.emit("*");
    }

    fn visit_array(
        &mut self,
        id: NodeId,
        node: &'a TypeNode,
        base: NodeId,
        size: Option<u64>,
        frame: Frame<'a>,
    ) {
        let graph = self.graph;
        let name = frame.name.or(node.ident());

        match graph.kind(base) {
            Some(TypeKind::Pointer { .. }) => self.visit(base, frame.named(name)),
            Some(TypeKind::Array { .. }) => self.visit(base, frame.inner()),
            Some(TypeKind::Struct { .. } | TypeKind::Union { .. } | TypeKind::Enum { .. }) => {
                self.visit(base, frame.plain())
            }
            _ => self.emit_opt(type_keyword(graph, id)),
        }

        self.emit_opt(name);
        self.emit("[");
        if let Some(count) = size.filter(|&n| n != 0) {
            self.emit(&count.to_string());
        }
        self.emit("]");
    }

    fn visit_function(
        &mut self,
        name: Option<&'a str>,
        ret: NodeId,
        params: &'a [NodeId],
        frame: Frame<'a>,
    ) {
        self.visit(ret, frame.plain());
        self.emit_opt(name);
        self.emit("(");
        self.visit_params(params, frame);
        self.emit(")");
    }

    fn visit_params(&mut self, params: &'a [NodeId], frame: Frame<'a>) {
        if params.is_empty() {
            self.emit("void");
            return;
        }
        for (i, &param) in params.iter().enumerate() {
            if i > 0 {
                self.emit(",");
            }
            self.visit(param, frame.param());
        }
    }

    /// Struct, union, enum, bitfield and base type: the variants looked up
    /// by name in the cycle guard.
    fn visit_keyed(&mut self, id: NodeId, node: &'a TypeNode, frame: Frame<'a>) {
        let graph = self.graph;
        let keyword = type_keyword(graph, id);
        let ident = node.ident();

        if let (Some(name), Some(kind)) = (ident, node.kind.symbol_kind()) {
            // Registered before any member is visited.
            if !self.seen.insert(name, kind) {
                tracing::trace!(name, ?kind, "already expanded");
                // Name kept in parameter context too.
                self.emit_opt(keyword);
                self.emit(name);
                return;
            }
        }

        self.emit_opt(keyword);
        match &node.kind {
            TypeKind::Struct { members } | TypeKind::Union { members } => {
                self.emit_opt(ident);
                self.emit("{");
                for &member in members {
                    self.visit(member, frame.member_of(id));
                    self.emit(";");
                }
                if members.is_empty() {
                    self.emit("UNKNOWN");
                }
                self.emit("}");
            }
            TypeKind::Enum { enumerators } => {
                self.emit_opt(ident);
                self.emit("{");
                for enumerator in enumerators {
                    self.emit(enumerator);
                    self.emit(",");
                }
                self.emit("}");
            }
            TypeKind::Bitfield { width, .. } => {
                self.emit_opt(ident);
                self.emit(":");
                self.emit(&width.to_string());
            }
            TypeKind::BaseType { .. } => {
                if !frame.is_param {
                    self.emit_opt(ident);
                }
            }
            _ => {}
        }
    }
}
