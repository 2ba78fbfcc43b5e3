//! Depth-first traversal over the arena.
//!
//! [`Walk`] visits a node's children in source order; [`Visitor`] hooks fire
//! for every id encountered. The default hook implementations recurse, so an
//! override that wants to keep descending calls `walk` itself.

use crate::ast::*;
use crate::pos::Pos;

pub trait Walk<'ast> {
    fn walk<V: Visitor<'ast> + ?Sized>(&self, a: &'ast AstArena, v: &mut V);
}

pub trait Visitor<'ast> {
    #[inline(always)]
    fn visit_file(&mut self, a: &'ast AstArena, f: &'ast SourceFile) {
        f.walk(a, self);
    }

    /// Identifiers are leaves.
    #[inline(always)]
    fn visit_ident(&mut self, _a: &'ast AstArena, _id: IdentId) {}

    #[inline(always)]
    fn visit_expr(&mut self, a: &'ast AstArena, id: ExprId) {
        a.exprs[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_stmt(&mut self, a: &'ast AstArena, id: StmtId) {
        a.stmts[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_block(&mut self, a: &'ast AstArena, id: BlockId) {
        a.blocks[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_decl(&mut self, a: &'ast AstArena, id: DeclId) {
        a.decls[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_spec(&mut self, a: &'ast AstArena, id: SpecId) {
        a.specs[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_field(&mut self, a: &'ast AstArena, id: FieldId) {
        a.fields[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_field_list(&mut self, a: &'ast AstArena, id: FieldListId) {
        a.field_lists[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_comment(&mut self, a: &'ast AstArena, id: CommentId) {
        a.comments[id].walk(a, self);
    }

    #[inline(always)]
    fn visit_comment_group(&mut self, a: &'ast AstArena, id: CommentGroupId) {
        a.comment_groups[id].walk(a, self);
    }
}

macro_rules! impl_walk_for_ids {
    ($($id:ty => $visit:ident),* $(,)?) => {
        $(
            impl<'ast> Walk<'ast> for $id {
                #[inline(always)]
                fn walk<V: Visitor<'ast> + ?Sized>(&self, a: &'ast AstArena, v: &mut V) {
                    v.$visit(a, *self);
                }
            }
        )*
    };
}

impl_walk_for_ids! {
    IdentId => visit_ident,
    ExprId => visit_expr,
    StmtId => visit_stmt,
    BlockId => visit_block,
    DeclId => visit_decl,
    SpecId => visit_spec,
    FieldId => visit_field,
    FieldListId => visit_field_list,
    CommentId => visit_comment,
    CommentGroupId => visit_comment_group,
}

impl<'ast, T> Walk<'ast> for ListRef<T>
where
    ExtraData: ListStore<T>,
    T: Walk<'ast> + 'ast,
{
    #[inline(always)]
    fn walk<V: Visitor<'ast> + ?Sized>(&self, a: &'ast AstArena, v: &mut V) {
        for item in a.slice(*self) {
            item.walk(a, v);
        }
    }
}

impl<'ast, T: Walk<'ast>> Walk<'ast> for Option<T> {
    #[inline(always)]
    fn walk<V: Visitor<'ast> + ?Sized>(&self, a: &'ast AstArena, v: &mut V) {
        if let Some(x) = self {
            x.walk(a, v);
        }
    }
}

// Leaf payloads
macro_rules! impl_walk_noop {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'ast> Walk<'ast> for $ty {
                #[inline(always)]
                fn walk<V: Visitor<'ast> + ?Sized>(&self, _: &'ast AstArena, _: &mut V) {}
            }
        )*
    };
}

impl_walk_noop! {
    Pos,
    Symbol,
    bool,
    LitKind,
    UnaryOp,
    BinaryOp,
    ChanDir,
    IncDecOp,
    AssignOp,
    BranchTok,
    GenDeclKind,
}
