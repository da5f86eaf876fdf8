//! Graph validation: structural checks run before any symbol is serialized.
//!
//! The serializer itself never fails. Anything that would make it misbehave
//! (a dangling id, a recursion the cycle guard cannot stop) is rejected here.

use crate::error::{GraphError, Result};
use crate::graph::{NodeId, TypeGraph, TypeKind, TypeNode};

/// Validate a graph and its list of top-level symbols.
///
/// This performs:
/// - Reference check (every id points inside the graph)
/// - Top-level symbol check (present and named)
/// - Enumerator check (no empty names)
/// - Cycle check (every cycle passes through a named struct or union)
pub fn validate_graph(graph: &TypeGraph, symbols: &[NodeId]) -> Result<()> {
    // 1. References
    for (id, node) in graph.iter() {
        for target in node.kind.references() {
            if !graph.contains(target) {
                return Err(GraphError::DanglingReference { node: id, target });
            }
        }
    }

    // 2. Top-level symbols
    for &symbol in symbols {
        match graph.get(symbol) {
            None => return Err(GraphError::MissingSymbol(symbol)),
            Some(node) if node.ident().is_none() => {
                return Err(GraphError::MissingIdentifier(symbol))
            }
            Some(_) => {}
        }
    }

    // 3. Enumerators
    for (id, node) in graph.iter() {
        if let TypeKind::Enum { enumerators } = &node.kind {
            if enumerators.iter().any(String::is_empty) {
                return Err(GraphError::EmptyEnumerator(id));
            }
        }
    }

    // 4. Cycles
    check_cycles(graph)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

/// Depth-first walk state for one node.
struct Step {
    id: NodeId,
    edges: Vec<NodeId>,
    next: usize,
}

impl Step {
    fn enter(graph: &TypeGraph, id: NodeId) -> Self {
        let edges = graph.get(id).map(followed_edges).unwrap_or_default();
        Self { id, edges, next: 0 }
    }
}

fn check_cycles(graph: &TypeGraph) -> Result<()> {
    let mut marks = vec![Mark::Unvisited; graph.len()];
    let mut stack = Vec::new();

    for (root, _) in graph.iter() {
        if marks[root.index()] != Mark::Unvisited {
            continue;
        }
        marks[root.index()] = Mark::Active;
        stack.push(Step::enter(graph, root));

        while let Some(top) = stack.last_mut() {
            let Some(&target) = top.edges.get(top.next) else {
                marks[top.id.index()] = Mark::Done;
                stack.pop();
                continue;
            };
            top.next += 1;

            match marks[target.index()] {
                Mark::Done => {}
                Mark::Active => return Err(GraphError::UnguardedCycle(target)),
                Mark::Unvisited => {
                    marks[target.index()] = Mark::Active;
                    stack.push(Step::enter(graph, target));
                }
            }
        }
    }
    Ok(())
}

/// Edges the serializer walks without passing the cycle guard.
///
/// A named struct or union stops recursion on its second visit, so its
/// members are not followed. Bitfields and typedef aliases only contribute
/// a keyword.
fn followed_edges(node: &TypeNode) -> Vec<NodeId> {
    match &node.kind {
        kind if kind.is_aggregate() && node.ident.is_some() => Vec::new(),
        TypeKind::Bitfield { .. } | TypeKind::TypedefAlias { .. } => Vec::new(),
        kind => kind.references(),
    }
}
