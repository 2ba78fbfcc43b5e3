//! Go-to-definition: locate, unroll, then hand the identifier to a resolver.

use tracing::debug;

use crate::ast::{AstArena, Expr, IdentId, Node, SourceFile};
use crate::chain::{Chain, unroll};
use crate::error::DefinitionError;
use crate::find::Finder;
use crate::pos::Pos;
use crate::span::Spanned;

/// Declaration site of a resolved identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub pos: Pos,
    /// Static type, as the resolver renders it.
    pub type_desc: String,
}

/// Name and type resolution, supplied by the caller.
pub trait Resolver {
    fn resolve(&self, a: &AstArena, ident: IdentId) -> Option<Definition>;
}

impl<R: Resolver + ?Sized> Resolver for &R {
    fn resolve(&self, a: &AstArena, ident: IdentId) -> Option<Definition> {
        (**self).resolve(a, ident)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    /// Every identifier of the matched expression; one entry unless it was a selector.
    pub chain: Chain,
    /// The entry of `chain` under the cursor, which was resolved.
    pub ident: IdentId,
    pub definition: Definition,
}

/// [`find_definition_with`] using the default [`Finder`].
pub fn find_definition<R: Resolver + ?Sized>(
    a: &AstArena,
    file: &SourceFile,
    offset: usize,
    resolver: &R,
) -> Result<Lookup, DefinitionError> {
    find_definition_with(&Finder::default(), a, file, offset, resolver)
}

pub fn find_definition_with<R: Resolver + ?Sized>(
    finder: &Finder,
    a: &AstArena,
    file: &SourceFile,
    offset: usize,
    resolver: &R,
) -> Result<Lookup, DefinitionError> {
    let node = finder
        .find_in_file(a, file, offset)?
        .ok_or(DefinitionError::NoNode { offset })?;

    let chain = match node {
        Node::Expr(id) if matches!(a[id], Expr::Selector { .. }) => unroll(a, id)?,
        _ => match node.as_ident(a) {
            Some(ident) => Chain::from_slice(&[ident]),
            None => {
                return Err(DefinitionError::NotIdent {
                    offset,
                    kind: node.kind(a),
                });
            }
        },
    };

    // The component under the cursor; on a `.` the name after it.
    let target = file.pos_at(offset);
    let under_cursor = chain.iter().copied().find(|&id| target < id.end(a));
    let Some(ident) = under_cursor.or_else(|| chain.last().copied()) else {
        return Err(DefinitionError::NoNode { offset });
    };

    let Some(definition) = resolver.resolve(a, ident) else {
        let name = a.name(ident).to_owned();
        debug!(%name, offset, "identifier unresolved");
        return Err(DefinitionError::Unresolved { name, offset });
    };

    debug!(name = a.name(ident), def = definition.pos.raw(), "resolved identifier");
    Ok(Lookup {
        chain,
        ident,
        definition,
    })
}
