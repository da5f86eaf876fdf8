//! TypedefSource trait: where the serializer learns about typedefs.
//!
//! The C front-end decides which declarations were spelled through a typedef
//! and what each typedef expands to. This trait is the boundary; the
//! in-memory [`TypedefTable`](crate::TypedefTable) is the implementation the
//! rest of the workspace uses.

use kabi_core::NodeId;
use serde::{Deserialize, Serialize};

/// One piece of a typedef's definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasFragment {
    /// Literal text, emitted as one token.
    Terminal(String),
    /// A reference to another typedef, expanded in place.
    AliasOf(String),
}

impl AliasFragment {
    /// The fragment's raw text (the alias name for `AliasOf`).
    pub fn text(&self) -> &str {
        match self {
            AliasFragment::Terminal(text) | AliasFragment::AliasOf(text) => text,
        }
    }
}

/// A typedef definition: its name and the ordered fragments it expands to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasDef {
    pub name: String,
    pub fragments: Vec<AliasFragment>,
}

impl AliasDef {
    /// Create a definition.
    pub fn new(name: impl Into<String>, fragments: Vec<AliasFragment>) -> Self {
        Self {
            name: name.into(),
            fragments,
        }
    }
}

/// Read access to typedef definitions and typedef-governed identifiers.
pub trait TypedefSource {
    /// The definition of `name`, if it is a known typedef.
    fn alias(&self, name: &str) -> Option<&AliasDef>;

    /// The typedef governing `ident` inside `scope`.
    ///
    /// `scope` is the enclosing struct or union (`None` at top level). The
    /// same member name can be typedef-declared in one aggregate and not in
    /// another, so the lookup is keyed on both.
    fn governing_alias(&self, scope: Option<NodeId>, ident: &str) -> Option<&str>;
}
