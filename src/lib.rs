//! Position-indexed Go syntax tree locator.
//!
//! - `ast` holds the arena-allocated node taxonomy; an external parser builds
//!   trees through its allocation API.
//! - `span` derives the source extent of every node kind.
//! - `find` locates the innermost node at a byte offset.
//! - `chain` flattens selector chains, and `definition` feeds the located
//!   identifier to a caller-supplied resolver.

pub mod ast;
pub mod chain;
pub mod definition;
pub mod error;
pub mod find;
pub mod pos;
pub mod span;
pub mod walk;

// Re-exports for convenience
pub use ast::{AstArena, Node, NodeKind, Package, SourceFile};
pub use chain::{Chain, unroll};
pub use definition::{Definition, Lookup, Resolver, find_definition, find_definition_with};
pub use error::{DefinitionError, FindError, UnrollError};
pub use find::{DEFAULT_MAX_DEPTH, Finder, find_in_package, find_node, innermost_ident};
pub use pos::{FileSet, Pos, Position, Span};
pub use span::Spanned;
