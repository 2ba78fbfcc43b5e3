use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use godef::ast::*;
use godef::pos::Pos;
use godef::{Finder, find_node, innermost_ident, unroll};
use std::hint::black_box as bb;

// =============================================================================
// Synthetic trees
//
// Positions follow a virtual source text; only token widths matter.
// =============================================================================

struct Gen {
    arena: AstArena,
    cursor: usize,
}

impl Gen {
    fn new() -> Self {
        Self {
            arena: AstArena::new(),
            cursor: 0,
        }
    }

    fn tok(&mut self, width: usize) -> Pos {
        let pos = Pos::FIRST_BASE + self.cursor;
        // One byte of whitespace after every token.
        self.cursor += width + 1;
        pos
    }

    fn name(&mut self, name: &str) -> ExprId {
        let pos = self.tok(name.len());
        self.arena.ident_expr(name, pos)
    }

    fn file(&mut self, decls: Vec<DeclId>, package_pos: Pos, name: IdentId) -> SourceFile {
        let decls = self.arena.list(decls);
        SourceFile {
            base: Pos::FIRST_BASE,
            doc: None,
            package_pos,
            name,
            decls,
            comments: ListRef::EMPTY,
        }
    }

    /// `func fN() { xK.yK(zK) ... }`
    fn func(&mut self, n: usize, calls: usize) -> DeclId {
        let func = Some(self.tok(4));
        let fname = format!("f{n}");
        let name_pos = self.tok(fname.len());
        let name = self.arena.ident(&fname, name_pos);
        let opening = Some(self.tok(1));
        let closing = Some(self.tok(1));
        let params = self.arena.alloc_field_list(FieldList {
            opening,
            fields: ListRef::EMPTY,
            closing,
        });
        let lbrace = self.tok(1);
        let mut stmts = Vec::with_capacity(calls);
        for k in 0..calls {
            let x = self.name(&format!("x{k}"));
            self.tok(1);
            let sel_name = format!("y{k}");
            let sel_pos = self.tok(sel_name.len());
            let sel = self.arena.ident(&sel_name, sel_pos);
            let fun = self.arena.alloc_expr(Expr::Selector { x, sel });
            let lparen = self.tok(1);
            let z = self.name(&format!("z{k}"));
            let rparen = self.tok(1);
            let args = self.arena.list([z]);
            let call = self.arena.alloc_expr(Expr::Call {
                fun,
                lparen,
                args,
                ellipsis: None,
                rparen,
            });
            stmts.push(self.arena.alloc_stmt(Stmt::Expr(call)));
        }
        let rbrace = self.tok(1);
        let stmts = self.arena.list(stmts);
        let body = self.arena.alloc_block(Block {
            lbrace,
            stmts,
            rbrace,
        });
        self.arena.alloc_decl(Decl::Func(FuncDecl {
            doc: None,
            recv: None,
            name,
            typ: FuncType {
                func,
                params,
                results: None,
            },
            body: Some(body),
        }))
    }
}

/// `funcs` functions of `calls` call statements each. Returns the offset of
/// the last argument.
fn wide_file(funcs: usize, calls: usize) -> (AstArena, SourceFile, usize) {
    let mut g = Gen::new();
    let package_pos = g.tok(7);
    let name_pos = g.tok(1);
    let name = g.arena.ident("p", name_pos);
    let decls = (0..funcs).map(|n| g.func(n, calls)).collect();
    let file = g.file(decls, package_pos, name);
    // `z{calls-1})` then `}` close the last function.
    let last_z = g.cursor - 2 * 2 - format!("z{}", calls - 1).len() - 1;
    (g.arena, file, last_z)
}

/// `var v = ((((...(x)...))))` nested `depth` times. Returns the offset of `x`.
fn deep_file(depth: usize) -> (AstArena, SourceFile, usize) {
    let mut g = Gen::new();
    let package_pos = g.tok(7);
    let name_pos = g.tok(1);
    let name = g.arena.ident("p", name_pos);
    let tok_pos = g.tok(3);
    let v_pos = g.tok(1);
    let v = g.arena.ident("v", v_pos);
    g.tok(1);

    let lparens: Vec<Pos> = (0..depth).map(|_| g.tok(1)).collect();
    let x_off = g.cursor;
    let mut x = g.name("x");
    for lparen in lparens.into_iter().rev() {
        let rparen = g.tok(1);
        x = g.arena.alloc_expr(Expr::Paren { lparen, x, rparen });
    }

    let names = g.arena.list([v]);
    let values = g.arena.list([x]);
    let spec = g.arena.alloc_spec(Spec::Value(ValueSpec {
        doc: None,
        names,
        typ: None,
        values,
        comment: None,
    }));
    let specs = g.arena.list([spec]);
    let decl = g.arena.alloc_decl(Decl::Gen(GenDecl {
        doc: None,
        tok_pos,
        tok: GenDeclKind::Var,
        lparen: None,
        specs,
        rparen: None,
    }));
    let file = g.file(vec![decl], package_pos, name);
    (g.arena, file, x_off)
}

// =============================================================================
// Benchmark 1: Locate
// =============================================================================

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");

    for funcs in [10usize, 100, 1_000] {
        let (arena, file, last_z) = wide_file(funcs, 16);
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("wide_last_arg", funcs), &funcs, |b, _| {
            b.iter(|| bb(find_node(&arena, &file, bb(last_z))));
        });
        group.bench_with_input(BenchmarkId::new("wide_ident_visitor", funcs), &funcs, |b, _| {
            b.iter(|| bb(innermost_ident(&arena, &file, bb(last_z))));
        });
    }

    for depth in [16usize, 256, 4_096] {
        let (arena, file, x_off) = deep_file(depth);
        let finder = Finder::new().max_depth(depth + 16);
        group.bench_with_input(BenchmarkId::new("deep_parens", depth), &depth, |b, _| {
            b.iter(|| bb(finder.find_in_file(&arena, &file, bb(x_off))));
        });
    }

    group.finish();
}

// =============================================================================
// Benchmark 2: Selector chains
// =============================================================================

fn bench_unroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("unroll");

    for links in [2usize, 4, 16] {
        let mut g = Gen::new();
        let mut x = g.name("a0");
        for i in 1..links {
            g.tok(1);
            let name = format!("a{i}");
            let pos = g.tok(name.len());
            let sel = g.arena.ident(&name, pos);
            x = g.arena.alloc_expr(Expr::Selector { x, sel });
        }
        group.throughput(Throughput::Elements(links as u64));
        group.bench_with_input(BenchmarkId::new("chain", links), &links, |b, _| {
            b.iter(|| bb(unroll(&g.arena, bb(x))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_locate, bench_unroll);
criterion_main!(benches);
