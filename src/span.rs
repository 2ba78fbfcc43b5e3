//! Span derivation for every node kind.
//!
//! Only token positions are stored in the tree. Composite spans are derived
//! here from those tokens and from the spans of children. Bracketed nodes
//! end one past their own closing delimiter, whatever they contain.
//!
//! Each node names either its own boundary position or the one child that
//! shares that boundary (`Edge`). Boundaries are found by following those
//! steps in a loop, so arbitrarily deep left or right spines cost no stack.

use core::ops::Index;

use crate::ast::*;
use crate::pos::{Pos, Span};

use Edge::{At, Via};

/// Source extent of a node: `pos` is its first byte, `end` one past its last.
pub trait Spanned {
    fn pos(&self, a: &AstArena) -> Pos;

    fn end(&self, a: &AstArena) -> Pos;

    #[inline]
    fn span(&self, a: &AstArena) -> Span {
        Span::new(self.pos(a), self.end(a))
    }
}

impl<T> Spanned for Id<T>
where
    AstArena: Index<Id<T>, Output = T>,
    T: Spanned,
{
    #[inline]
    fn pos(&self, a: &AstArena) -> Pos {
        a[*self].pos(a)
    }

    #[inline]
    fn end(&self, a: &AstArena) -> Pos {
        a[*self].end(a)
    }
}

/// One step toward a boundary of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Edge {
    /// The boundary is this position.
    At(Pos),
    /// The boundary is the same boundary of this child.
    Via(Node),
}

/// Single-step boundaries: `head` leads to `pos`, `tail` to `end`.
pub(crate) trait Edges {
    fn head(&self, a: &AstArena) -> Edge;

    fn tail(&self, a: &AstArena) -> Edge;
}

#[derive(Clone, Copy)]
enum Side {
    Head,
    Tail,
}

/// Follows `edge` until it lands on a position. `None` once more than
/// `limit` children had to be crossed.
fn follow(a: &AstArena, mut edge: Edge, side: Side, limit: usize) -> Option<Pos> {
    let mut steps = 0usize;
    loop {
        match edge {
            Edge::At(pos) => return Some(pos),
            Edge::Via(node) => {
                if steps == limit {
                    return None;
                }
                steps += 1;
                edge = match side {
                    Side::Head => node.head(a),
                    Side::Tail => node.tail(a),
                };
            }
        }
    }
}

/// Span of `node`, or `None` if either boundary lies more than `limit`
/// levels below it.
pub(crate) fn span_within<T: Edges + ?Sized>(node: &T, a: &AstArena, limit: usize) -> Option<Span> {
    let pos = follow(a, node.head(a), Side::Head, limit)?;
    let end = follow(a, node.tail(a), Side::Tail, limit)?;
    Some(Span::new(pos, end))
}

macro_rules! impl_spanned_by_edges {
    ($($ty:ty),* $(,)?) => {$(
        impl Spanned for $ty {
            #[inline]
            fn pos(&self, a: &AstArena) -> Pos {
                follow(a, self.head(a), Side::Head, usize::MAX).unwrap_or(Pos::NONE)
            }

            #[inline]
            fn end(&self, a: &AstArena) -> Pos {
                follow(a, self.tail(a), Side::Tail, usize::MAX).unwrap_or(Pos::NONE)
            }
        }
    )*};
}

impl_spanned_by_edges!(
    Ident,
    BasicLit,
    FuncType,
    Expr,
    Block,
    Stmt,
    ImportSpec,
    ValueSpec,
    TypeSpec,
    Spec,
    GenDecl,
    FuncDecl,
    Decl,
    Field,
    FieldList,
    Comment,
    CommentGroup,
    SourceFile,
    Node,
);

fn first<T: Copy>(a: &AstArena, list: ListRef<T>) -> Option<T>
where
    ExtraData: ListStore<T>,
{
    a.slice(list).first().copied()
}

fn last<T: Copy>(a: &AstArena, list: ListRef<T>) -> Option<T>
where
    ExtraData: ListStore<T>,
{
    a.slice(list).last().copied()
}

impl Edges for Ident {
    #[inline]
    fn head(&self, _: &AstArena) -> Edge {
        At(self.pos)
    }

    #[inline]
    fn tail(&self, a: &AstArena) -> Edge {
        At(self.pos + a.resolve(self.name).len())
    }
}

impl Edges for BasicLit {
    #[inline]
    fn head(&self, _: &AstArena) -> Edge {
        At(self.pos)
    }

    #[inline]
    fn tail(&self, a: &AstArena) -> Edge {
        At(self.pos + a.resolve(self.value).len())
    }
}

impl Edges for FuncType {
    fn head(&self, _: &AstArena) -> Edge {
        match self.func {
            Some(func) => At(func),
            None => Via(Node::FieldList(self.params)),
        }
    }

    fn tail(&self, _: &AstArena) -> Edge {
        Via(Node::FieldList(self.results.unwrap_or(self.params)))
    }
}

impl Edges for Expr {
    fn head(&self, a: &AstArena) -> Edge {
        match *self {
            Expr::Bad { from, .. } => At(from),
            Expr::Ident(id) => Via(Node::Ident(id)),
            Expr::Ellipsis { ellipsis, .. } => At(ellipsis),
            Expr::BasicLit(lit) => At(lit.pos),
            Expr::FuncLit { typ, .. } => typ.head(a),
            Expr::CompositeLit { typ, lbrace, .. } => match typ {
                Some(typ) => Via(Node::Expr(typ)),
                None => At(lbrace),
            },
            Expr::Paren { lparen, .. } => At(lparen),
            Expr::Selector { x, .. }
            | Expr::Index { x, .. }
            | Expr::Slice { x, .. }
            | Expr::TypeAssert { x, .. }
            | Expr::Binary { x, .. } => Via(Node::Expr(x)),
            Expr::Call { fun, .. } => Via(Node::Expr(fun)),
            Expr::Star { star, .. } => At(star),
            Expr::Unary { op_pos, .. } => At(op_pos),
            Expr::KeyValue { key, .. } => Via(Node::Expr(key)),
            Expr::ArrayType { lbrack, .. } => At(lbrack),
            Expr::StructType { struct_pos, .. } => At(struct_pos),
            Expr::FuncType(typ) => typ.head(a),
            Expr::InterfaceType { interface_pos, .. } => At(interface_pos),
            Expr::MapType { map_pos, .. } => At(map_pos),
            Expr::ChanType { begin, .. } => At(begin),
        }
    }

    fn tail(&self, a: &AstArena) -> Edge {
        match *self {
            Expr::Bad { to, .. } => At(to),
            Expr::Ident(id) => Via(Node::Ident(id)),
            Expr::Ellipsis { ellipsis, elt } => match elt {
                Some(elt) => Via(Node::Expr(elt)),
                None => At(ellipsis + 3),
            },
            Expr::BasicLit(lit) => lit.tail(a),
            Expr::FuncLit { body, .. } => Via(Node::Block(body)),
            Expr::CompositeLit { rbrace, .. } => At(rbrace + 1),
            Expr::Paren { rparen, .. } => At(rparen + 1),
            Expr::Selector { sel, .. } => Via(Node::Ident(sel)),
            Expr::Index { rbrack, .. } | Expr::Slice { rbrack, .. } => At(rbrack + 1),
            Expr::TypeAssert { x, typ } => Via(Node::Expr(typ.unwrap_or(x))),
            Expr::Call { rparen, .. } => At(rparen + 1),
            Expr::Star { x, .. } | Expr::Unary { x, .. } => Via(Node::Expr(x)),
            Expr::Binary { y, .. } => Via(Node::Expr(y)),
            Expr::KeyValue { value, .. } => Via(Node::Expr(value)),
            Expr::ArrayType { elt, .. } => Via(Node::Expr(elt)),
            Expr::StructType { fields, .. } => Via(Node::FieldList(fields)),
            Expr::FuncType(typ) => typ.tail(a),
            Expr::InterfaceType { methods, .. } => Via(Node::FieldList(methods)),
            Expr::MapType { value, .. } | Expr::ChanType { value, .. } => Via(Node::Expr(value)),
        }
    }
}

impl Edges for Block {
    #[inline]
    fn head(&self, _: &AstArena) -> Edge {
        At(self.lbrace)
    }

    #[inline]
    fn tail(&self, _: &AstArena) -> Edge {
        At(self.rbrace + 1)
    }
}

impl Edges for Stmt {
    fn head(&self, a: &AstArena) -> Edge {
        match *self {
            Stmt::Bad { from, .. } => At(from),
            Stmt::Decl(decl) => Via(Node::Decl(decl)),
            Stmt::Empty { semicolon } => At(semicolon),
            Stmt::Labeled { label, .. } => Via(Node::Ident(label)),
            Stmt::Expr(x) => Via(Node::Expr(x)),
            Stmt::Send { chan, .. } => Via(Node::Expr(chan)),
            Stmt::IncDec { x, .. } => Via(Node::Expr(x)),
            Stmt::Assign { lhs, tok_pos, .. } => match first(a, lhs) {
                Some(x) => Via(Node::Expr(x)),
                None => At(tok_pos),
            },
            Stmt::Go { go_pos, .. } => At(go_pos),
            Stmt::Defer { defer_pos, .. } => At(defer_pos),
            Stmt::Return { return_pos, .. } => At(return_pos),
            Stmt::Branch { tok_pos, .. } => At(tok_pos),
            Stmt::Block(block) => Via(Node::Block(block)),
            Stmt::If { if_pos, .. } => At(if_pos),
            Stmt::CaseClause { case_pos, .. } | Stmt::CommClause { case_pos, .. } => At(case_pos),
            Stmt::Switch { switch_pos, .. } | Stmt::TypeSwitch { switch_pos, .. } => At(switch_pos),
            Stmt::Select { select_pos, .. } => At(select_pos),
            Stmt::For { for_pos, .. } | Stmt::Range { for_pos, .. } => At(for_pos),
        }
    }

    fn tail(&self, a: &AstArena) -> Edge {
        match *self {
            Stmt::Bad { to, .. } => At(to),
            Stmt::Decl(decl) => Via(Node::Decl(decl)),
            Stmt::Empty { semicolon } => At(semicolon + 1),
            Stmt::Labeled { stmt, .. } => Via(Node::Stmt(stmt)),
            Stmt::Expr(x) => Via(Node::Expr(x)),
            Stmt::Send { value, .. } => Via(Node::Expr(value)),
            // `++` and `--` are both two bytes.
            Stmt::IncDec { tok_pos, .. } => At(tok_pos + 2),
            Stmt::Assign { tok_pos, tok, rhs, .. } => match last(a, rhs) {
                Some(x) => Via(Node::Expr(x)),
                None => At(tok_pos + tok.as_str().len()),
            },
            Stmt::Go { call, .. } | Stmt::Defer { call, .. } => Via(Node::Expr(call)),
            Stmt::Return {
                return_pos,
                results,
            } => match last(a, results) {
                Some(x) => Via(Node::Expr(x)),
                None => At(return_pos + "return".len()),
            },
            Stmt::Branch {
                tok_pos,
                tok,
                label,
            } => match label {
                Some(label) => Via(Node::Ident(label)),
                None => At(tok_pos + tok.as_str().len()),
            },
            Stmt::Block(block) => Via(Node::Block(block)),
            Stmt::If {
                body, else_branch, ..
            } => match else_branch {
                Some(els) => Via(Node::Stmt(els)),
                None => Via(Node::Block(body)),
            },
            Stmt::CaseClause { colon, body, .. } | Stmt::CommClause { colon, body, .. } => {
                match last(a, body) {
                    Some(stmt) => Via(Node::Stmt(stmt)),
                    None => At(colon + 1),
                }
            }
            Stmt::Switch { body, .. }
            | Stmt::TypeSwitch { body, .. }
            | Stmt::Select { body, .. }
            | Stmt::For { body, .. }
            | Stmt::Range { body, .. } => Via(Node::Block(body)),
        }
    }
}

impl Edges for ImportSpec {
    fn head(&self, _: &AstArena) -> Edge {
        match self.name {
            Some(name) => Via(Node::Ident(name)),
            None => Via(Node::Expr(self.path)),
        }
    }

    fn tail(&self, _: &AstArena) -> Edge {
        Via(Node::Expr(self.path))
    }
}

impl Edges for ValueSpec {
    fn head(&self, a: &AstArena) -> Edge {
        match first(a, self.names) {
            Some(name) => Via(Node::Ident(name)),
            None => At(Pos::NONE),
        }
    }

    fn tail(&self, a: &AstArena) -> Edge {
        if let Some(value) = last(a, self.values) {
            return Via(Node::Expr(value));
        }
        if let Some(typ) = self.typ {
            return Via(Node::Expr(typ));
        }
        match last(a, self.names) {
            Some(name) => Via(Node::Ident(name)),
            None => At(Pos::NONE),
        }
    }
}

impl Edges for TypeSpec {
    fn head(&self, _: &AstArena) -> Edge {
        Via(Node::Ident(self.name))
    }

    fn tail(&self, _: &AstArena) -> Edge {
        Via(Node::Expr(self.typ))
    }
}

impl Edges for Spec {
    fn head(&self, a: &AstArena) -> Edge {
        match self {
            Spec::Import(s) => s.head(a),
            Spec::Value(s) => s.head(a),
            Spec::Type(s) => s.head(a),
        }
    }

    fn tail(&self, a: &AstArena) -> Edge {
        match self {
            Spec::Import(s) => s.tail(a),
            Spec::Value(s) => s.tail(a),
            Spec::Type(s) => s.tail(a),
        }
    }
}

impl Edges for GenDecl {
    #[inline]
    fn head(&self, _: &AstArena) -> Edge {
        At(self.tok_pos)
    }

    fn tail(&self, a: &AstArena) -> Edge {
        if let Some(rparen) = self.rparen {
            return At(rparen + 1);
        }
        // An empty unparenthesized declaration still covers its keyword.
        match last(a, self.specs) {
            Some(spec) => Via(Node::Spec(spec)),
            None => At(self.tok_pos + self.tok.keyword().len()),
        }
    }
}

impl Edges for FuncDecl {
    fn head(&self, a: &AstArena) -> Edge {
        self.typ.head(a)
    }

    fn tail(&self, a: &AstArena) -> Edge {
        match self.body {
            Some(body) => Via(Node::Block(body)),
            None => self.typ.tail(a),
        }
    }
}

impl Edges for Decl {
    fn head(&self, a: &AstArena) -> Edge {
        match self {
            Decl::Bad { from, .. } => At(*from),
            Decl::Gen(d) => d.head(a),
            Decl::Func(d) => d.head(a),
        }
    }

    fn tail(&self, a: &AstArena) -> Edge {
        match self {
            Decl::Bad { to, .. } => At(*to),
            Decl::Gen(d) => d.tail(a),
            Decl::Func(d) => d.tail(a),
        }
    }
}

impl Edges for Field {
    fn head(&self, a: &AstArena) -> Edge {
        match first(a, self.names) {
            Some(name) => Via(Node::Ident(name)),
            None => Via(Node::Expr(self.typ)),
        }
    }

    fn tail(&self, _: &AstArena) -> Edge {
        Via(Node::Expr(self.tag.unwrap_or(self.typ)))
    }
}

impl Edges for FieldList {
    fn head(&self, a: &AstArena) -> Edge {
        if let Some(opening) = self.opening {
            return At(opening);
        }
        match first(a, self.fields) {
            Some(field) => Via(Node::Field(field)),
            None => At(Pos::NONE),
        }
    }

    fn tail(&self, a: &AstArena) -> Edge {
        if let Some(closing) = self.closing {
            return At(closing + 1);
        }
        match last(a, self.fields) {
            Some(field) => Via(Node::Field(field)),
            None => At(Pos::NONE),
        }
    }
}

impl Edges for Comment {
    #[inline]
    fn head(&self, _: &AstArena) -> Edge {
        At(self.slash)
    }

    #[inline]
    fn tail(&self, a: &AstArena) -> Edge {
        At(self.slash + a.resolve(self.text).len())
    }
}

impl Edges for CommentGroup {
    fn head(&self, a: &AstArena) -> Edge {
        match first(a, self.list) {
            Some(c) => Via(Node::Comment(c)),
            None => At(Pos::NONE),
        }
    }

    fn tail(&self, a: &AstArena) -> Edge {
        match last(a, self.list) {
            Some(c) => Via(Node::Comment(c)),
            None => At(Pos::NONE),
        }
    }
}

impl Edges for SourceFile {
    #[inline]
    fn head(&self, _: &AstArena) -> Edge {
        At(self.package_pos)
    }

    fn tail(&self, a: &AstArena) -> Edge {
        match last(a, self.decls) {
            Some(decl) => Via(Node::Decl(decl)),
            None => Via(Node::Ident(self.name)),
        }
    }
}

impl Edges for Node {
    fn head(&self, a: &AstArena) -> Edge {
        match *self {
            Node::Ident(id) => a[id].head(a),
            Node::Expr(id) => a[id].head(a),
            Node::Stmt(id) => a[id].head(a),
            Node::Block(id) => a[id].head(a),
            Node::Decl(id) => a[id].head(a),
            Node::Spec(id) => a[id].head(a),
            Node::Field(id) => a[id].head(a),
            Node::FieldList(id) => a[id].head(a),
            Node::Comment(id) => a[id].head(a),
            Node::CommentGroup(id) => a[id].head(a),
        }
    }

    fn tail(&self, a: &AstArena) -> Edge {
        match *self {
            Node::Ident(id) => a[id].tail(a),
            Node::Expr(id) => a[id].tail(a),
            Node::Stmt(id) => a[id].tail(a),
            Node::Block(id) => a[id].tail(a),
            Node::Decl(id) => a[id].tail(a),
            Node::Spec(id) => a[id].tail(a),
            Node::Field(id) => a[id].tail(a),
            Node::FieldList(id) => a[id].tail(a),
            Node::Comment(id) => a[id].tail(a),
            Node::CommentGroup(id) => a[id].tail(a),
        }
    }
}

/// A package spans several files and has no extent of its own.
impl Spanned for Package {
    #[inline]
    fn pos(&self, _: &AstArena) -> Pos {
        Pos::NONE
    }

    #[inline]
    fn end(&self, _: &AstArena) -> Pos {
        Pos::NONE
    }
}
