//! Position search over a file or package.
//!
//! [`Finder`] walks the tree top-down with an explicit work stack. A node
//! whose span does not contain the target is pruned without looking at its
//! children; otherwise its children are tried in source order and the first
//! match wins. Identifiers, basic literals and selectors match as a whole.
//! Spans are derived under the same depth limit as the descent.

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::ast::*;
use crate::error::FindError;
use crate::pos::Pos;
use crate::span::span_within;
use crate::walk::{Visitor, Walk};

/// Nesting limit of [`Finder::default`]. Deeper trees yield [`FindError::TooDeep`].
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Locate query configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finder {
    max_depth: usize,
}

impl Default for Finder {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Finder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn limit(&self) -> usize {
        self.max_depth
    }

    /// Innermost node of `file` containing the zero-based byte `offset`.
    pub fn find_in_file(
        &self,
        a: &AstArena,
        file: &SourceFile,
        offset: usize,
    ) -> Result<Option<Node>, FindError> {
        let target = file.pos_at(offset);
        debug!(offset, target = target.raw(), "locating node");
        let found = self.find_at(a, file, target)?;
        debug!(?found, "locate finished");
        Ok(found)
    }

    /// Innermost node containing the absolute position `target`, searching
    /// the files of `pkg` in filename order.
    pub fn find_in_package(
        &self,
        a: &AstArena,
        pkg: &Package,
        target: Pos,
    ) -> Result<Option<Node>, FindError> {
        for (name, file) in &pkg.files {
            if let Some(node) = self.find_at(a, file, target)? {
                debug!(file = %name, ?node, "located node in package");
                return Ok(Some(node));
            }
        }
        Ok(None)
    }

    /// Identifier of `file` containing `offset`, wherever it appears.
    ///
    /// Unlike [`Finder::find_in_file`] this descends into selectors, so it
    /// yields `y` for an offset inside `x.y`.
    pub fn innermost_ident(
        &self,
        a: &AstArena,
        file: &SourceFile,
        offset: usize,
    ) -> Result<Option<IdentId>, FindError> {
        let target = file.pos_at(offset);
        let found = self.search(a, file, target, |_, node| matches!(node, Node::Ident(_)))?;
        Ok(found.and_then(|node| node.as_ident(a)))
    }

    fn find_at(
        &self,
        a: &AstArena,
        file: &SourceFile,
        target: Pos,
    ) -> Result<Option<Node>, FindError> {
        self.search(a, file, target, matches_whole)
    }

    /// First node containing `target` for which `stop` holds, trying
    /// children in source order.
    fn search(
        &self,
        a: &AstArena,
        file: &SourceFile,
        target: Pos,
        stop: fn(&AstArena, Node) -> bool,
    ) -> Result<Option<Node>, FindError> {
        let file_span = span_within(file, a, self.max_depth).ok_or_else(|| self.too_deep())?;
        if !file_span.contains(target) {
            return Ok(None);
        }

        let mut children = Children::default();
        file.walk(a, &mut children);

        // (node, depth), with the next node to try on top.
        let mut stack: Vec<(Node, usize)> = Vec::with_capacity(64);
        stack.extend(children.take().into_iter().rev().map(|n| (n, 1)));

        while let Some((node, depth)) = stack.pop() {
            let span = span_within(&node, a, self.max_depth).ok_or_else(|| self.too_deep())?;
            if !span.contains(target) {
                continue;
            }
            if stop(a, node) {
                return Ok(Some(node));
            }
            if depth >= self.max_depth {
                return Err(self.too_deep());
            }

            trace!(?node, depth, "descending");
            node.walk_children(a, &mut children);
            stack.extend(children.take().into_iter().rev().map(|n| (n, depth + 1)));
        }
        Ok(None)
    }

    fn too_deep(&self) -> FindError {
        debug!(limit = self.max_depth, "locate exceeded depth limit");
        FindError::TooDeep {
            limit: self.max_depth,
        }
    }
}

/// Nodes returned as-is once they contain the target.
fn matches_whole(a: &AstArena, node: Node) -> bool {
    match node {
        Node::Ident(_) => true,
        Node::Expr(id) => matches!(a[id], Expr::BasicLit(_) | Expr::Selector { .. }),
        _ => false,
    }
}

/// Collects the direct children of one node, in source order.
///
/// Comments are skipped: they carry no identifiers and docs lie outside the
/// span of the node they document.
#[derive(Default)]
struct Children {
    nodes: SmallVec<[Node; 8]>,
}

impl Children {
    fn take(&mut self) -> SmallVec<[Node; 8]> {
        core::mem::take(&mut self.nodes)
    }
}

impl<'ast> Visitor<'ast> for Children {
    fn visit_ident(&mut self, _: &'ast AstArena, id: IdentId) {
        self.nodes.push(Node::Ident(id));
    }

    fn visit_expr(&mut self, _: &'ast AstArena, id: ExprId) {
        self.nodes.push(Node::Expr(id));
    }

    fn visit_stmt(&mut self, _: &'ast AstArena, id: StmtId) {
        self.nodes.push(Node::Stmt(id));
    }

    fn visit_block(&mut self, _: &'ast AstArena, id: BlockId) {
        self.nodes.push(Node::Block(id));
    }

    fn visit_decl(&mut self, _: &'ast AstArena, id: DeclId) {
        self.nodes.push(Node::Decl(id));
    }

    fn visit_spec(&mut self, _: &'ast AstArena, id: SpecId) {
        self.nodes.push(Node::Spec(id));
    }

    fn visit_field(&mut self, _: &'ast AstArena, id: FieldId) {
        self.nodes.push(Node::Field(id));
    }

    fn visit_field_list(&mut self, _: &'ast AstArena, id: FieldListId) {
        self.nodes.push(Node::FieldList(id));
    }

    fn visit_comment(&mut self, _: &'ast AstArena, _: CommentId) {}

    fn visit_comment_group(&mut self, _: &'ast AstArena, _: CommentGroupId) {}
}

impl Node {
    /// Walks the fields of the node itself, so the visitor sees its direct
    /// children rather than the node.
    pub fn walk_children<'ast, V: Visitor<'ast> + ?Sized>(self, a: &'ast AstArena, v: &mut V) {
        match self {
            Node::Ident(_) => {}
            Node::Expr(id) => a.exprs[id].walk(a, v),
            Node::Stmt(id) => a.stmts[id].walk(a, v),
            Node::Block(id) => a.blocks[id].walk(a, v),
            Node::Decl(id) => a.decls[id].walk(a, v),
            Node::Spec(id) => a.specs[id].walk(a, v),
            Node::Field(id) => a.fields[id].walk(a, v),
            Node::FieldList(id) => a.field_lists[id].walk(a, v),
            Node::Comment(id) => a.comments[id].walk(a, v),
            Node::CommentGroup(id) => a.comment_groups[id].walk(a, v),
        }
    }

    /// Direct children in source order, comments excluded.
    pub fn children(self, a: &AstArena) -> SmallVec<[Node; 8]> {
        let mut children = Children::default();
        self.walk_children(a, &mut children);
        children.take()
    }
}

/// Innermost node of `file` at `offset`, with the default [`Finder`].
pub fn find_node(a: &AstArena, file: &SourceFile, offset: usize) -> Result<Option<Node>, FindError> {
    Finder::default().find_in_file(a, file, offset)
}

/// Package-wide search with the default [`Finder`].
pub fn find_in_package(a: &AstArena, pkg: &Package, target: Pos) -> Result<Option<Node>, FindError> {
    Finder::default().find_in_package(a, pkg, target)
}

/// [`Finder::innermost_ident`] with the default [`Finder`].
pub fn innermost_ident(
    a: &AstArena,
    file: &SourceFile,
    offset: usize,
) -> Result<Option<IdentId>, FindError> {
    Finder::default().innermost_ident(a, file, offset)
}
