//! # Go syntax tree
//!
//! The closed taxonomy of Go syntax nodes the locator searches.
//!
//! ## Architecture
//!
//! - **Nodes**: every node lives in a typed arena inside [`AstArena`] and is
//!   referred to by a typed [`Id`]. A parent owns each child id exclusively.
//! - **Lists**: child lists are [`ListRef`]s into centralized buffers, so
//!   nodes stay `Copy` and carry no per-node `Vec`.
//! - **Positions**: nodes store only the positions of their own tokens. Every
//!   span is derived on demand (see `crate::span`), never cached.
//! - **Symbols**: identifier names and literal values are interned.
//! - **Optional children** are `Option<_>`: `None` means the child is absent
//!   from the source, not that it is empty.
//!
//! Walk/Visitor infrastructure lives in `crate::walk`; `#[derive(WalkAst)]`
//! generates `impl crate::walk::Walk` visiting fields in declaration order,
//! which is source order for every node here.

use ast_derive::WalkAst;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ops::Index;
use std::collections::{BTreeMap, HashMap};

use crate::pos::Pos;

// =============================================================================
// Core Foundation Types
// =============================================================================

/// Typed index of a node in an [`AstArena`].
///
/// Ids are only handed out by the arena that allocated the node. Using an id
/// with a different arena is a programming error and panics on access.
#[repr(transparent)]
pub struct Id<T> {
    raw: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    #[inline]
    const fn from_raw(raw: u32) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn to_usize(&self) -> usize {
        self.raw as usize
    }

    #[inline]
    pub const fn raw(&self) -> u32 {
        self.raw
    }
}

impl<T> Copy for Id<T> {}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ty = core::any::type_name::<T>();
        let short = ty.rsplit("::").next().unwrap_or(ty);
        write!(f, "{short}#{}", self.raw)
    }
}

/// Typed reference into a centralized list buffer of [`AstArena`].
pub struct ListRef<T> {
    start: u32,
    len: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Copy for ListRef<T> {}

impl<T> Clone for ListRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for ListRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.len == other.len
    }
}

impl<T> Eq for ListRef<T> {}

impl<T> fmt::Debug for ListRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListRef({}..{})", self.start, self.end())
    }
}

impl<T> Default for ListRef<T> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<T> ListRef<T> {
    pub const EMPTY: Self = Self {
        start: 0,
        len: 0,
        _marker: PhantomData,
    };

    #[inline]
    const fn new(start: u32, len: u32) -> Self {
        Self {
            start,
            len,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.len
    }

    #[inline]
    pub const fn end(&self) -> u32 {
        self.start + self.len
    }
}

// =============================================================================
// Symbol Interning
// =============================================================================

/// Interned string (identifier name, literal value or comment text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Symbol(u32);

impl Symbol {
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct Interner {
    map: HashMap<Box<str>, Symbol>,
    vec: Vec<Box<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.map.get(s) {
            return sym;
        }
        let boxed: Box<str> = s.into();
        let sym = Symbol(self.vec.len() as u32);
        self.map.insert(boxed.clone(), sym);
        self.vec.push(boxed);
        sym
    }

    /// # Panics
    /// Panics if `sym` was produced by another interner.
    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.vec[sym.0 as usize]
    }
}

// =============================================================================
// Arena Allocation
// =============================================================================

#[derive(Debug)]
pub struct Arena<T> {
    data: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T> Arena<T> {
    #[inline]
    pub fn alloc(&mut self, node: T) -> Id<T> {
        debug_assert!(self.data.len() < u32::MAX as usize);
        let id = Id::from_raw(self.data.len() as u32);
        self.data.push(node);
        id
    }

    #[inline]
    pub fn get(&self, id: Id<T>) -> Option<&T> {
        self.data.get(id.to_usize())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All allocated ids, in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = Id<T>> + '_ {
        (0..self.data.len() as u32).map(Id::from_raw)
    }
}

impl<T> Index<Id<T>> for Arena<T> {
    type Output = T;

    #[inline]
    fn index(&self, id: Id<T>) -> &T {
        &self.data[id.to_usize()]
    }
}

pub type IdentId = Id<Ident>;
pub type ExprId = Id<Expr>;
pub type StmtId = Id<Stmt>;
pub type BlockId = Id<Block>;
pub type DeclId = Id<Decl>;
pub type SpecId = Id<Spec>;
pub type FieldId = Id<Field>;
pub type FieldListId = Id<FieldList>;
pub type CommentId = Id<Comment>;
pub type CommentGroupId = Id<CommentGroup>;

/// Centralized buffers every [`ListRef`] points into.
#[derive(Debug, Default)]
pub struct ExtraData {
    pub idents: Vec<IdentId>,
    pub exprs: Vec<ExprId>,
    pub stmts: Vec<StmtId>,
    pub decls: Vec<DeclId>,
    pub specs: Vec<SpecId>,
    pub fields: Vec<FieldId>,
    pub comments: Vec<CommentId>,
    pub comment_groups: Vec<CommentGroupId>,
}

/// Buffer selection for a list element type.
pub trait ListStore<T> {
    fn buffer(&self) -> &Vec<T>;
    fn buffer_mut(&mut self) -> &mut Vec<T>;
}

macro_rules! impl_list_store {
    ($($t:ty => $buf:ident),* $(,)?) => {
        $(
            impl ListStore<$t> for ExtraData {
                #[inline(always)]
                fn buffer(&self) -> &Vec<$t> {
                    &self.$buf
                }

                #[inline(always)]
                fn buffer_mut(&mut self) -> &mut Vec<$t> {
                    &mut self.$buf
                }
            }
        )*
    };
}

impl_list_store! {
    IdentId => idents,
    ExprId => exprs,
    StmtId => stmts,
    DeclId => decls,
    SpecId => specs,
    FieldId => fields,
    CommentId => comments,
    CommentGroupId => comment_groups,
}

// =============================================================================
// Main AST Arena
// =============================================================================

/// Owns every node of one package (or one file) and the interned strings.
///
/// Queries only ever borrow the arena immutably.
#[derive(Debug, Default)]
pub struct AstArena {
    pub idents: Arena<Ident>,
    pub exprs: Arena<Expr>,
    pub stmts: Arena<Stmt>,
    pub blocks: Arena<Block>,
    pub decls: Arena<Decl>,
    pub specs: Arena<Spec>,
    pub fields: Arena<Field>,
    pub field_lists: Arena<FieldList>,
    pub comments: Arena<Comment>,
    pub comment_groups: Arena<CommentGroup>,
    pub extras: ExtraData,
    pub interner: Interner,
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn intern(&mut self, s: &str) -> Symbol {
        self.interner.intern(s)
    }

    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym)
    }

    /// Name of an identifier.
    #[inline]
    pub fn name(&self, id: IdentId) -> &str {
        self.resolve(self.idents[id].name)
    }

    /// Copies `items` into the matching buffer and returns a reference to them.
    pub fn list<T>(&mut self, items: impl IntoIterator<Item = T>) -> ListRef<T>
    where
        ExtraData: ListStore<T>,
    {
        let buf = <ExtraData as ListStore<T>>::buffer_mut(&mut self.extras);
        let start = buf.len();
        buf.extend(items);
        let len = buf.len() - start;
        debug_assert!(start + len <= u32::MAX as usize);
        ListRef::new(start as u32, len as u32)
    }

    /// # Panics
    /// Panics if `r` was produced by another arena.
    #[inline]
    pub fn slice<T>(&self, r: ListRef<T>) -> &[T]
    where
        ExtraData: ListStore<T>,
    {
        &<ExtraData as ListStore<T>>::buffer(&self.extras)[r.start as usize..r.end() as usize]
    }

    // Allocation

    pub fn ident(&mut self, name: &str, pos: Pos) -> IdentId {
        let name = self.intern(name);
        self.idents.alloc(Ident { pos, name })
    }

    /// Allocates an identifier and the `Expr::Ident` wrapping it.
    pub fn ident_expr(&mut self, name: &str, pos: Pos) -> ExprId {
        let id = self.ident(name, pos);
        self.exprs.alloc(Expr::Ident(id))
    }

    pub fn basic_lit(&mut self, kind: LitKind, value: &str, pos: Pos) -> ExprId {
        let value = self.intern(value);
        self.exprs.alloc(Expr::BasicLit(BasicLit { pos, kind, value }))
    }

    pub fn alloc_expr(&mut self, e: Expr) -> ExprId {
        self.exprs.alloc(e)
    }

    pub fn alloc_stmt(&mut self, s: Stmt) -> StmtId {
        self.stmts.alloc(s)
    }

    pub fn alloc_block(&mut self, b: Block) -> BlockId {
        self.blocks.alloc(b)
    }

    pub fn alloc_decl(&mut self, d: Decl) -> DeclId {
        self.decls.alloc(d)
    }

    pub fn alloc_spec(&mut self, s: Spec) -> SpecId {
        self.specs.alloc(s)
    }

    pub fn alloc_field(&mut self, f: Field) -> FieldId {
        self.fields.alloc(f)
    }

    pub fn alloc_field_list(&mut self, l: FieldList) -> FieldListId {
        self.field_lists.alloc(l)
    }

    pub fn alloc_comment(&mut self, text: &str, slash: Pos) -> CommentId {
        let text = self.intern(text);
        self.comments.alloc(Comment { slash, text })
    }

    pub fn alloc_comment_group(&mut self, g: CommentGroup) -> CommentGroupId {
        self.comment_groups.alloc(g)
    }
}

macro_rules! impl_arena_index {
    ($($t:ty => $arena:ident),* $(,)?) => {
        $(
            impl Index<Id<$t>> for AstArena {
                type Output = $t;

                #[inline(always)]
                fn index(&self, id: Id<$t>) -> &$t {
                    &self.$arena[id]
                }
            }
        )*
    };
}

impl_arena_index! {
    Ident => idents,
    Expr => exprs,
    Stmt => stmts,
    Block => blocks,
    Decl => decls,
    Spec => specs,
    Field => fields,
    FieldList => field_lists,
    Comment => comments,
    CommentGroup => comment_groups,
}

// =============================================================================
// Identifiers, Comments
// =============================================================================

/// Identifier occurrence. The end is derived from the name's byte length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ident {
    pub pos: Pos,
    pub name: Symbol,
}

impl Ident {
    /// Go's export rule: the first rune is an uppercase letter.
    pub fn is_exported(name: &str) -> bool {
        name.chars().next().is_some_and(char::is_uppercase)
    }
}

/// `//` or `/* */` comment. `text` excludes the trailing newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct Comment {
    pub slash: Pos,
    pub text: Symbol,
}

/// Adjacent comments with no blank line between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct CommentGroup {
    pub list: ListRef<CommentId>,
}

// =============================================================================
// Fields
// =============================================================================

/// Struct field, method, parameter or result declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct Field {
    pub doc: Option<CommentGroupId>,
    /// Empty for anonymous fields and unnamed parameters.
    pub names: ListRef<IdentId>,
    pub typ: ExprId,
    /// Struct tag, a string `BasicLit`.
    pub tag: Option<ExprId>,
    pub comment: Option<CommentGroupId>,
}

/// Parenthesized or braced list of fields.
///
/// The delimiters are absent for an unparenthesized single result (`func() int`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct FieldList {
    pub opening: Option<Pos>,
    pub fields: ListRef<FieldId>,
    pub closing: Option<Pos>,
}

// =============================================================================
// Expressions and Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

/// Literal of basic type; `value` is the literal's source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct BasicLit {
    pub pos: Pos,
    pub kind: LitKind,
    pub value: Symbol,
}

/// `func(params) results`. `func` is absent for interface method signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct FuncType {
    pub func: Option<Pos>,
    pub params: FieldListId,
    pub results: Option<FieldListId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Add,   // +
    Sub,   // -
    Not,   // !
    Xor,   // ^
    Addr,  // &
    Recv,  // <-
    Tilde, // ~
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,    // +
    Sub,    // -
    Mul,    // *
    Div,    // /
    Mod,    // %
    And,    // &
    Or,     // |
    Xor,    // ^
    Shl,    // <<
    Shr,    // >>
    AndNot, // &^
    LAnd,   // &&
    LOr,    // ||
    Eq,     // ==
    Ne,     // !=
    Lt,     // <
    Le,     // <=
    Gt,     // >
    Ge,     // >=
}

/// Channel direction; `Both` for plain `chan T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub enum Expr {
    /// Placeholder for a syntax error.
    Bad { from: Pos, to: Pos },

    Ident(IdentId),

    /// `...T` in a parameter list, or `[...]` as an array length.
    Ellipsis { ellipsis: Pos, elt: Option<ExprId> },

    BasicLit(BasicLit),

    /// `func(x int) int { return x }`
    FuncLit { typ: FuncType, body: BlockId },

    /// `T{a, b}`; the type is absent for elided inner literals.
    CompositeLit {
        typ: Option<ExprId>,
        lbrace: Pos,
        elts: ListRef<ExprId>,
        rbrace: Pos,
    },

    Paren { lparen: Pos, x: ExprId, rparen: Pos },

    /// `x.sel`
    Selector { x: ExprId, sel: IdentId },

    Index {
        x: ExprId,
        lbrack: Pos,
        index: ExprId,
        rbrack: Pos,
    },

    /// `x[low:high]` or `x[low:high:max]`
    Slice {
        x: ExprId,
        lbrack: Pos,
        low: Option<ExprId>,
        high: Option<ExprId>,
        max: Option<ExprId>,
        slice3: bool,
        rbrack: Pos,
    },

    /// `x.(T)`; `typ` is absent for the `x.(type)` of a type switch.
    TypeAssert { x: ExprId, typ: Option<ExprId> },

    Call {
        fun: ExprId,
        lparen: Pos,
        args: ListRef<ExprId>,
        /// `f(xs...)`
        ellipsis: Option<Pos>,
        rparen: Pos,
    },

    /// `*x`, either a dereference or a pointer type.
    Star { star: Pos, x: ExprId },

    Unary { op_pos: Pos, op: UnaryOp, x: ExprId },

    Binary {
        x: ExprId,
        op_pos: Pos,
        op: BinaryOp,
        y: ExprId,
    },

    /// `key: value` inside a composite literal.
    KeyValue { key: ExprId, colon: Pos, value: ExprId },

    /// `[len]elt`; `len` is absent for slice types and an `Ellipsis` for `[...]T`.
    ArrayType {
        lbrack: Pos,
        len: Option<ExprId>,
        elt: ExprId,
    },

    StructType {
        struct_pos: Pos,
        fields: FieldListId,
        incomplete: bool,
    },

    FuncType(FuncType),

    InterfaceType {
        interface_pos: Pos,
        methods: FieldListId,
        incomplete: bool,
    },

    MapType { map_pos: Pos, key: ExprId, value: ExprId },

    /// `begin` is the `chan` keyword or the leading `<-`, whichever comes first.
    ChanType { begin: Pos, dir: ChanDir, value: ExprId },
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncDecOp {
    Inc,
    Dec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,       // =
    Define,       // :=
    AddAssign,    // +=
    SubAssign,    // -=
    MulAssign,    // *=
    DivAssign,    // /=
    ModAssign,    // %=
    AndAssign,    // &=
    OrAssign,     // |=
    XorAssign,    // ^=
    ShlAssign,    // <<=
    ShrAssign,    // >>=
    AndNotAssign, // &^=
}

impl AssignOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Define => ":=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::ModAssign => "%=",
            Self::AndAssign => "&=",
            Self::OrAssign => "|=",
            Self::XorAssign => "^=",
            Self::ShlAssign => "<<=",
            Self::ShrAssign => ">>=",
            Self::AndNotAssign => "&^=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchTok {
    Break,
    Continue,
    Goto,
    Fallthrough,
}

impl BranchTok {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Goto => "goto",
            Self::Fallthrough => "fallthrough",
        }
    }
}

/// Braced statement list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct Block {
    pub lbrace: Pos,
    pub stmts: ListRef<StmtId>,
    pub rbrace: Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub enum Stmt {
    Bad { from: Pos, to: Pos },

    /// Declaration in statement position.
    Decl(DeclId),

    /// Explicit `;`.
    Empty { semicolon: Pos },

    Labeled { label: IdentId, colon: Pos, stmt: StmtId },

    Expr(ExprId),

    /// `ch <- v`
    Send { chan: ExprId, arrow: Pos, value: ExprId },

    IncDec { x: ExprId, tok_pos: Pos, tok: IncDecOp },

    Assign {
        lhs: ListRef<ExprId>,
        tok_pos: Pos,
        tok: AssignOp,
        rhs: ListRef<ExprId>,
    },

    /// `call` is a `Call` expression.
    Go { go_pos: Pos, call: ExprId },

    /// `call` is a `Call` expression.
    Defer { defer_pos: Pos, call: ExprId },

    Return { return_pos: Pos, results: ListRef<ExprId> },

    /// break, continue, goto, fallthrough
    Branch {
        tok_pos: Pos,
        tok: BranchTok,
        label: Option<IdentId>,
    },

    Block(BlockId),

    If {
        if_pos: Pos,
        init: Option<StmtId>,
        cond: ExprId,
        body: BlockId,
        /// `Block` or `If`.
        else_branch: Option<StmtId>,
    },

    /// `case list:` or `default:` (empty list) of a switch body.
    CaseClause {
        case_pos: Pos,
        list: ListRef<ExprId>,
        colon: Pos,
        body: ListRef<StmtId>,
    },

    /// The body block holds `CaseClause`s only.
    Switch {
        switch_pos: Pos,
        init: Option<StmtId>,
        tag: Option<ExprId>,
        body: BlockId,
    },

    TypeSwitch {
        switch_pos: Pos,
        init: Option<StmtId>,
        /// `x := y.(type)` or `y.(type)`
        assign: StmtId,
        body: BlockId,
    },

    /// `case comm:` or `default:` (no comm) of a select body.
    CommClause {
        case_pos: Pos,
        comm: Option<StmtId>,
        colon: Pos,
        body: ListRef<StmtId>,
    },

    /// The body block holds `CommClause`s only.
    Select { select_pos: Pos, body: BlockId },

    For {
        for_pos: Pos,
        init: Option<StmtId>,
        cond: Option<ExprId>,
        post: Option<StmtId>,
        body: BlockId,
    },

    Range {
        for_pos: Pos,
        key: Option<ExprId>,
        value: Option<ExprId>,
        /// Position of `=` or `:=`; absent when there is no key.
        tok_pos: Option<Pos>,
        tok: Option<AssignOp>,
        x: ExprId,
        body: BlockId,
    },
}

// =============================================================================
// Specs and Declarations
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct ImportSpec {
    pub doc: Option<CommentGroupId>,
    /// Local name, `.` or `_`.
    pub name: Option<IdentId>,
    /// Import path, a string `BasicLit`.
    pub path: ExprId,
    pub comment: Option<CommentGroupId>,
}

/// `const` or `var` spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct ValueSpec {
    pub doc: Option<CommentGroupId>,
    pub names: ListRef<IdentId>,
    pub typ: Option<ExprId>,
    pub values: ListRef<ExprId>,
    pub comment: Option<CommentGroupId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct TypeSpec {
    pub doc: Option<CommentGroupId>,
    pub name: IdentId,
    /// `=` of an alias declaration.
    pub assign: Option<Pos>,
    pub typ: ExprId,
    pub comment: Option<CommentGroupId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub enum Spec {
    Import(ImportSpec),
    Value(ValueSpec),
    Type(TypeSpec),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenDeclKind {
    Import,
    Const,
    Type,
    Var,
}

impl GenDeclKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::Const => "const",
            Self::Type => "type",
            Self::Var => "var",
        }
    }
}

/// `import`, `const`, `type` or `var` declaration, optionally parenthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct GenDecl {
    pub doc: Option<CommentGroupId>,
    pub tok_pos: Pos,
    pub tok: GenDeclKind,
    pub lparen: Option<Pos>,
    pub specs: ListRef<SpecId>,
    pub rparen: Option<Pos>,
}

/// Function or method declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct FuncDecl {
    pub doc: Option<CommentGroupId>,
    /// Receiver, present only for methods.
    pub recv: Option<FieldListId>,
    pub name: IdentId,
    /// Carries the `func` keyword position.
    pub typ: FuncType,
    /// Absent for a forward declaration.
    pub body: Option<BlockId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub enum Decl {
    Bad { from: Pos, to: Pos },
    Gen(GenDecl),
    Func(FuncDecl),
}

// =============================================================================
// Roots
// =============================================================================

/// One Go source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WalkAst)]
pub struct SourceFile {
    /// Position of the file's first byte.
    pub base: Pos,
    pub doc: Option<CommentGroupId>,
    pub package_pos: Pos,
    pub name: IdentId,
    pub decls: ListRef<DeclId>,
    /// Every comment group of the file, including the ones attached as docs.
    #[walk(skip)]
    pub comments: ListRef<CommentGroupId>,
}

impl SourceFile {
    /// Position of a zero-based byte offset into this file.
    #[inline]
    pub fn pos_at(&self, offset: usize) -> Pos {
        self.base + offset
    }

    /// Zero-based byte offset of `pos`, if it is not before this file.
    #[inline]
    pub fn offset_of(&self, pos: Pos) -> Option<usize> {
        if !pos.is_valid() || pos < self.base {
            return None;
        }
        Some((pos.raw() - self.base.raw()) as usize)
    }
}

/// Files of one build unit, keyed by filename, sharing one arena.
#[derive(Debug, Clone, Default)]
pub struct Package {
    pub name: String,
    pub files: BTreeMap<String, SourceFile>,
}

// =============================================================================
// Node Handles
// =============================================================================

/// Handle to any arena-allocated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    Ident(IdentId),
    Expr(ExprId),
    Stmt(StmtId),
    Block(BlockId),
    Decl(DeclId),
    Spec(SpecId),
    Field(FieldId),
    FieldList(FieldListId),
    Comment(CommentId),
    CommentGroup(CommentGroupId),
}

/// Concrete node kind, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Ident,
    BadExpr,
    Ellipsis,
    BasicLit,
    FuncLit,
    CompositeLit,
    ParenExpr,
    SelectorExpr,
    IndexExpr,
    SliceExpr,
    TypeAssertExpr,
    CallExpr,
    StarExpr,
    UnaryExpr,
    BinaryExpr,
    KeyValueExpr,
    ArrayType,
    StructType,
    FuncType,
    InterfaceType,
    MapType,
    ChanType,
    BadStmt,
    DeclStmt,
    EmptyStmt,
    LabeledStmt,
    ExprStmt,
    SendStmt,
    IncDecStmt,
    AssignStmt,
    GoStmt,
    DeferStmt,
    ReturnStmt,
    BranchStmt,
    BlockStmt,
    IfStmt,
    CaseClause,
    SwitchStmt,
    TypeSwitchStmt,
    CommClause,
    SelectStmt,
    ForStmt,
    RangeStmt,
    ImportSpec,
    ValueSpec,
    TypeSpec,
    BadDecl,
    GenDecl,
    FuncDecl,
    Field,
    FieldList,
    Comment,
    CommentGroup,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Expr {
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Bad { .. } => NodeKind::BadExpr,
            Self::Ident(_) => NodeKind::Ident,
            Self::Ellipsis { .. } => NodeKind::Ellipsis,
            Self::BasicLit(_) => NodeKind::BasicLit,
            Self::FuncLit { .. } => NodeKind::FuncLit,
            Self::CompositeLit { .. } => NodeKind::CompositeLit,
            Self::Paren { .. } => NodeKind::ParenExpr,
            Self::Selector { .. } => NodeKind::SelectorExpr,
            Self::Index { .. } => NodeKind::IndexExpr,
            Self::Slice { .. } => NodeKind::SliceExpr,
            Self::TypeAssert { .. } => NodeKind::TypeAssertExpr,
            Self::Call { .. } => NodeKind::CallExpr,
            Self::Star { .. } => NodeKind::StarExpr,
            Self::Unary { .. } => NodeKind::UnaryExpr,
            Self::Binary { .. } => NodeKind::BinaryExpr,
            Self::KeyValue { .. } => NodeKind::KeyValueExpr,
            Self::ArrayType { .. } => NodeKind::ArrayType,
            Self::StructType { .. } => NodeKind::StructType,
            Self::FuncType(_) => NodeKind::FuncType,
            Self::InterfaceType { .. } => NodeKind::InterfaceType,
            Self::MapType { .. } => NodeKind::MapType,
            Self::ChanType { .. } => NodeKind::ChanType,
        }
    }
}

impl Stmt {
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Bad { .. } => NodeKind::BadStmt,
            Self::Decl(_) => NodeKind::DeclStmt,
            Self::Empty { .. } => NodeKind::EmptyStmt,
            Self::Labeled { .. } => NodeKind::LabeledStmt,
            Self::Expr(_) => NodeKind::ExprStmt,
            Self::Send { .. } => NodeKind::SendStmt,
            Self::IncDec { .. } => NodeKind::IncDecStmt,
            Self::Assign { .. } => NodeKind::AssignStmt,
            Self::Go { .. } => NodeKind::GoStmt,
            Self::Defer { .. } => NodeKind::DeferStmt,
            Self::Return { .. } => NodeKind::ReturnStmt,
            Self::Branch { .. } => NodeKind::BranchStmt,
            Self::Block(_) => NodeKind::BlockStmt,
            Self::If { .. } => NodeKind::IfStmt,
            Self::CaseClause { .. } => NodeKind::CaseClause,
            Self::Switch { .. } => NodeKind::SwitchStmt,
            Self::TypeSwitch { .. } => NodeKind::TypeSwitchStmt,
            Self::CommClause { .. } => NodeKind::CommClause,
            Self::Select { .. } => NodeKind::SelectStmt,
            Self::For { .. } => NodeKind::ForStmt,
            Self::Range { .. } => NodeKind::RangeStmt,
        }
    }
}

impl Spec {
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Import(_) => NodeKind::ImportSpec,
            Self::Value(_) => NodeKind::ValueSpec,
            Self::Type(_) => NodeKind::TypeSpec,
        }
    }
}

impl Decl {
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Bad { .. } => NodeKind::BadDecl,
            Self::Gen(_) => NodeKind::GenDecl,
            Self::Func(_) => NodeKind::FuncDecl,
        }
    }
}

impl Node {
    pub fn kind(self, a: &AstArena) -> NodeKind {
        match self {
            Self::Ident(_) => NodeKind::Ident,
            Self::Expr(id) => a[id].kind(),
            Self::Stmt(id) => a[id].kind(),
            Self::Block(_) => NodeKind::BlockStmt,
            Self::Decl(id) => a[id].kind(),
            Self::Spec(id) => a[id].kind(),
            Self::Field(_) => NodeKind::Field,
            Self::FieldList(_) => NodeKind::FieldList,
            Self::Comment(_) => NodeKind::Comment,
            Self::CommentGroup(_) => NodeKind::CommentGroup,
        }
    }

    /// The identifier this node denotes: an `Ident` node or an `Expr::Ident`.
    pub fn as_ident(self, a: &AstArena) -> Option<IdentId> {
        match self {
            Self::Ident(id) => Some(id),
            Self::Expr(id) => match a[id] {
                Expr::Ident(ident) => Some(ident),
                _ => None,
            },
            _ => None,
        }
    }
}
