use thiserror::Error;

use crate::ast::NodeKind;

/// Internal-consistency failure of a locate query.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FindError {
    #[error("syntax tree nests deeper than the limit of {limit}")]
    TooDeep { limit: usize },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UnrollError {
    /// A chain link is neither an identifier nor a selector.
    #[error("{kind} is not part of a selector chain")]
    NotSelectorChain { kind: NodeKind },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("could not find node at offset {offset}")]
    NoNode { offset: usize },

    #[error("no identifier found at offset {offset} ({kind})")]
    NotIdent { offset: usize, kind: NodeKind },

    #[error("could not resolve identifier `{name}` at offset {offset}")]
    Unresolved { name: String, offset: usize },

    #[error(transparent)]
    Find(#[from] FindError),

    #[error(transparent)]
    Unroll(#[from] UnrollError),
}
