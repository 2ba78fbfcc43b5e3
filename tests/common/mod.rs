#![allow(dead_code)]

pub mod lexer;

use godef::ast::*;
use godef::pos::{FileSet, Pos};

use lexer::{Tok, tokens};

/// Installs a `tracing` subscriber honouring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Go snippets registered in one file set, with one arena to build their
/// trees in.
///
/// Positions come from the scanned tokens of the current snippet, so
/// hand-built trees carry the spans a parser would give them.
pub struct Fixture {
    pub src: String,
    pub base: Pos,
    pub fset: FileSet,
    pub arena: AstArena,
    toks: Vec<(Tok, std::ops::Range<usize>)>,
}

impl Fixture {
    pub fn new(src: &str) -> Self {
        Self::with_name("test.go", src)
    }

    pub fn with_name(name: &str, src: &str) -> Self {
        let mut fset = FileSet::new();
        let base = fset.add_file(name, src);
        Self {
            src: src.to_owned(),
            base,
            fset,
            arena: AstArena::new(),
            toks: tokens(src),
        }
    }

    /// Registers another file of the same package and makes it current.
    pub fn next_file(&mut self, name: &str, src: &str) {
        self.base = self.fset.add_file(name, src);
        self.src = src.to_owned();
        self.toks = tokens(src);
    }

    /// Byte offset of the `nth` (zero-based) token whose text is `text`.
    pub fn off(&self, text: &str, nth: usize) -> usize {
        self.toks
            .iter()
            .filter(|(_, r)| &self.src[r.clone()] == text)
            .nth(nth)
            .map(|(_, r)| r.start)
            .unwrap_or_else(|| panic!("token {text:?} #{nth} not in fixture"))
    }

    pub fn pos(&self, text: &str, nth: usize) -> Pos {
        self.base + self.off(text, nth)
    }

    /// Offset of the first byte of `needle` in the source, for gaps between tokens.
    pub fn find(&self, needle: &str) -> usize {
        self.src
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} not in fixture"))
    }

    pub fn token_kind(&self, text: &str, nth: usize) -> Tok {
        let off = self.off(text, nth);
        self.toks
            .iter()
            .find(|(_, r)| r.start == off)
            .map(|(t, _)| *t)
            .unwrap_or_else(|| panic!("no token at {off}"))
    }

    // Leaves

    pub fn ident(&mut self, name: &str, nth: usize) -> IdentId {
        let pos = self.pos(name, nth);
        self.arena.ident(name, pos)
    }

    pub fn name(&mut self, name: &str, nth: usize) -> ExprId {
        let pos = self.pos(name, nth);
        self.arena.ident_expr(name, pos)
    }

    pub fn lit(&mut self, kind: LitKind, text: &str, nth: usize) -> ExprId {
        let pos = self.pos(text, nth);
        self.arena.basic_lit(kind, text, pos)
    }

    pub fn exprs(&mut self, items: impl IntoIterator<Item = ExprId>) -> ListRef<ExprId> {
        self.arena.list(items)
    }

    pub fn stmts(&mut self, items: impl IntoIterator<Item = StmtId>) -> ListRef<StmtId> {
        self.arena.list(items)
    }

    pub fn idents(&mut self, items: impl IntoIterator<Item = IdentId>) -> ListRef<IdentId> {
        self.arena.list(items)
    }

    // Composites

    pub fn selector(&mut self, x: ExprId, sel: &str, nth: usize) -> ExprId {
        let sel = self.ident(sel, nth);
        self.arena.alloc_expr(Expr::Selector { x, sel })
    }

    /// `fun(args)` where the call's parentheses are the `nth` `(` and `)`;
    /// only for snippets without nested parentheses.
    pub fn call(&mut self, fun: ExprId, args: &[ExprId], nth_paren: usize) -> ExprId {
        let lparen = self.pos("(", nth_paren);
        let rparen = self.pos(")", nth_paren);
        let args = self.exprs(args.iter().copied());
        self.arena.alloc_expr(Expr::Call {
            fun,
            lparen,
            args,
            ellipsis: None,
            rparen,
        })
    }

    pub fn expr_stmt(&mut self, x: ExprId) -> StmtId {
        self.arena.alloc_stmt(Stmt::Expr(x))
    }

    /// Braces are given separately since blocks nest.
    pub fn block(&mut self, stmts: &[StmtId], nth_lbrace: usize, nth_rbrace: usize) -> BlockId {
        let lbrace = self.pos("{", nth_lbrace);
        let rbrace = self.pos("}", nth_rbrace);
        let stmts = self.stmts(stmts.iter().copied());
        self.arena.alloc_block(Block {
            lbrace,
            stmts,
            rbrace,
        })
    }

    pub fn field(&mut self, names: &[IdentId], typ: ExprId) -> FieldId {
        let names = self.idents(names.iter().copied());
        self.arena.alloc_field(Field {
            doc: None,
            names,
            typ,
            tag: None,
            comment: None,
        })
    }

    /// Parenthesized field list on the `nth` `(`/`)` pair.
    pub fn params(&mut self, fields: &[FieldId], nth_paren: usize) -> FieldListId {
        let opening = Some(self.pos("(", nth_paren));
        let closing = Some(self.pos(")", nth_paren));
        let fields = self.arena.list(fields.iter().copied());
        self.arena.alloc_field_list(FieldList {
            opening,
            fields,
            closing,
        })
    }

    /// `func name(params) results body`, using the `nth` `func` keyword.
    pub fn func_decl(
        &mut self,
        nth_func: usize,
        name: IdentId,
        params: FieldListId,
        results: Option<FieldListId>,
        body: Option<BlockId>,
    ) -> DeclId {
        let func = Some(self.pos("func", nth_func));
        self.arena.alloc_decl(Decl::Func(FuncDecl {
            doc: None,
            recv: None,
            name,
            typ: FuncType {
                func,
                params,
                results,
            },
            body,
        }))
    }

    /// The file root; the package clause must be the first two tokens.
    pub fn file(&mut self, decls: &[DeclId]) -> SourceFile {
        let package_pos = self.pos("package", 0);
        let (_, r) = self.toks[1].clone();
        let pkg_name = self.src[r.clone()].to_owned();
        let name = self.arena.ident(&pkg_name, self.base + r.start);
        let decls = self.arena.list(decls.iter().copied());
        SourceFile {
            base: self.base,
            doc: None,
            package_pos,
            name,
            decls,
            comments: ListRef::EMPTY,
        }
    }
}
