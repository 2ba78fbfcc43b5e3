//! Source positions.
//!
//! A [`Pos`] is an offset into one position space shared by every file of a
//! package. Each file owns a disjoint range of that space starting at its
//! *base*; `Pos::NONE` (zero) is never inside any file, so it can serve as
//! the "absent" sentinel.

use core::fmt;
use core::ops::Add;

/// Compact position in the shared position space.
///
/// Stored as `u32`, which limits a package to 4GiB of source.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Pos(u32);

impl Pos {
    /// The invalid position. Comparisons against it are meaningless.
    pub const NONE: Pos = Pos(0);

    /// Base of the first file added to a [`FileSet`].
    pub const FIRST_BASE: Pos = Pos(1);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Advances past a token of `width` bytes.
    ///
    /// The sentinel stays the sentinel; overflow saturates.
    #[inline]
    pub const fn advance(self, width: usize) -> Self {
        if !self.is_valid() {
            return Self::NONE;
        }
        let w = if width > u32::MAX as usize {
            u32::MAX
        } else {
            width as u32
        };
        Self(self.0.saturating_add(w))
    }
}

impl Add<usize> for Pos {
    type Output = Pos;

    #[inline]
    fn add(self, width: usize) -> Pos {
        self.advance(width)
    }
}

impl fmt::Debug for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "Pos({})", self.0)
        } else {
            f.write_str("Pos(NONE)")
        }
    }
}

/// Half-open interval `[pos, end)` occupied by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub pos: Pos,
    pub end: Pos,
}

impl Span {
    #[inline]
    pub const fn new(pos: Pos, end: Pos) -> Self {
        Self { pos, end }
    }

    /// Both bounds are real positions.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.pos.is_valid() && self.end.is_valid()
    }

    /// Returns the length of the span, zero if either bound is invalid.
    #[inline]
    pub const fn len(&self) -> u32 {
        if !self.is_valid() {
            return 0;
        }
        self.end.0.saturating_sub(self.pos.0)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Containment test used for pruning. Never true for an invalid bound,
    /// an invalid target, or an empty span.
    #[inline]
    pub const fn contains(&self, target: Pos) -> bool {
        self.is_valid() && target.is_valid() && self.pos.0 <= target.0 && target.0 < self.end.0
    }

    /// `other` lies within `self` (non-strict).
    #[inline]
    pub const fn encloses(&self, other: Span) -> bool {
        self.is_valid() && other.is_valid() && self.pos.0 <= other.pos.0 && other.end.0 <= self.end.0
    }
}

/// Human-readable location of a [`Pos`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub filename: String,
    /// Zero-based byte offset into the file.
    pub offset: usize,
    /// One-based line.
    pub line: usize,
    /// One-based byte column.
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// One file registered in a [`FileSet`].
#[derive(Debug, Clone)]
pub struct FileInfo {
    name: String,
    base: Pos,
    size: usize,
    /// Offsets of the first byte of every line; always starts with 0.
    lines: Vec<usize>,
}

impl FileInfo {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> Pos {
        self.base
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Position of the zero-based `offset`; the end-of-file offset is allowed.
    pub fn pos(&self, offset: usize) -> Option<Pos> {
        (offset <= self.size).then(|| self.base + offset)
    }

    /// The file covers `[base, base + size]`; the inclusive end admits the EOF position.
    pub fn contains(&self, pos: Pos) -> bool {
        pos.is_valid() && self.base <= pos && pos.raw() as usize <= self.base.raw() as usize + self.size
    }

    pub fn position(&self, pos: Pos) -> Option<Position> {
        if !self.contains(pos) {
            return None;
        }
        let offset = (pos.raw() - self.base.raw()) as usize;
        // `lines[0] == 0`, so the partition point is at least 1.
        let line = self.lines.partition_point(|&start| start <= offset);
        let column = offset - self.lines[line - 1] + 1;
        Some(Position {
            filename: self.name.clone(),
            offset,
            line,
            column,
        })
    }
}

/// Assigns disjoint position ranges to files and maps positions back to
/// file/line/column.
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    files: Vec<FileInfo>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next free base: one past the end of the last file, so that the EOF
    /// position of one file never aliases the first byte of the next.
    pub fn next_base(&self) -> Pos {
        match self.files.last() {
            Some(f) => f.base + (f.size + 1),
            None => Pos::FIRST_BASE,
        }
    }

    /// Registers `src` under `name` and returns the file's base position.
    pub fn add_file(&mut self, name: impl Into<String>, src: &str) -> Pos {
        let base = self.next_base();
        let mut lines = Vec::with_capacity(src.len() / 32 + 1);
        lines.push(0);
        lines.extend(memchr::memchr_iter(b'\n', src.as_bytes()).map(|nl| nl + 1));
        self.files.push(FileInfo {
            name: name.into(),
            base,
            size: src.len(),
            lines,
        });
        base
    }

    pub fn files(&self) -> &[FileInfo] {
        &self.files
    }

    /// File whose range contains `pos`.
    pub fn file_for(&self, pos: Pos) -> Option<&FileInfo> {
        if !pos.is_valid() {
            return None;
        }
        // Bases increase monotonically.
        let idx = self.files.partition_point(|f| f.base <= pos);
        let file = self.files.get(idx.checked_sub(1)?)?;
        file.contains(pos).then_some(file)
    }

    pub fn position(&self, pos: Pos) -> Option<Position> {
        self.file_for(pos)?.position(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_survives_arithmetic() {
        assert_eq!(Pos::NONE + 3, Pos::NONE);
        assert_eq!(Pos::from_raw(10) + 3, Pos::from_raw(13));
        assert!(!Pos::default().is_valid());
    }

    #[test]
    fn span_contains_is_half_open() {
        let s = Span::new(Pos::from_raw(5), Pos::from_raw(8));
        assert!(!s.contains(Pos::from_raw(4)));
        assert!(s.contains(Pos::from_raw(5)));
        assert!(s.contains(Pos::from_raw(7)));
        assert!(!s.contains(Pos::from_raw(8)));
    }

    #[test]
    fn empty_and_invalid_spans_contain_nothing() {
        let p = Pos::from_raw(5);
        assert!(!Span::new(p, p).contains(p));
        assert!(!Span::new(Pos::NONE, Pos::from_raw(9)).contains(p));
        assert!(!Span::new(p, Pos::NONE).contains(p));
        assert!(!Span::new(Pos::from_raw(1), Pos::from_raw(9)).contains(Pos::NONE));
    }

    #[test]
    fn file_set_bases_do_not_overlap() {
        let mut fset = FileSet::new();
        let a = fset.add_file("a.go", "package a\n");
        let b = fset.add_file("b.go", "package b\n");
        assert_eq!(a, Pos::FIRST_BASE);
        assert_eq!(b, Pos::from_raw(1 + 10 + 1));
        assert_eq!(fset.file_for(a + 10).map(FileInfo::name), Some("a.go"));
        assert_eq!(fset.file_for(b).map(FileInfo::name), Some("b.go"));
        assert!(fset.file_for(Pos::NONE).is_none());
    }

    #[test]
    fn line_and_column() {
        let mut fset = FileSet::new();
        let base = fset.add_file("m.go", "package m\n\nfunc f() {}\n");
        let p = fset.position(base + 16).unwrap();
        assert_eq!((p.line, p.column, p.offset), (3, 6, 16));
        assert_eq!(p.to_string(), "m.go:3:6");

        let first = fset.position(base).unwrap();
        assert_eq!((first.line, first.column), (1, 1));
    }
}
