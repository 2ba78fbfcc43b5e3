use smallvec::SmallVec;

use crate::ast::{AstArena, Expr, ExprId, IdentId};
use crate::error::UnrollError;

/// Identifier components of a selector chain, outermost operand first.
pub type Chain = SmallVec<[IdentId; 4]>;

/// Flattens `a.b.c` into `[a, b, c]`. A lone identifier yields itself.
///
/// Fails on the first link that is neither an identifier nor a selector,
/// e.g. the call in `f().x`.
pub fn unroll(a: &AstArena, expr: ExprId) -> Result<Chain, UnrollError> {
    let mut chain = Chain::new();
    let mut cur = expr;
    loop {
        match a[cur] {
            Expr::Ident(id) => {
                chain.push(id);
                break;
            }
            Expr::Selector { x, sel } => {
                chain.push(sel);
                cur = x;
            }
            ref other => {
                return Err(UnrollError::NotSelectorChain { kind: other.kind() });
            }
        }
    }
    chain.reverse();
    Ok(chain)
}
