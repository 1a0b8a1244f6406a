//! Syntax kinds for the fragment language.
//!
//! `SyntaxKind` serves dual roles: token kinds (from lexer) and node kinds (from parser).
//! Logos derives token recognition; node kinds and the synthetic layout tokens
//! (`Indent`, `Dedent`, `BadIndent`) lack token/regex attributes.
//! `FLang` implements Rowan's `Language` trait for tree construction.

use logos::Logos;
use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token(".")]
    Dot,

    #[token("for")]
    KwFor,

    #[token("in")]
    KwIn,

    /// Defined after keywords so they take precedence.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Id,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r#""(?:[^"\\\n]|\\.)*""#)]
    #[regex(r"'(?:[^'\\\n]|\\.)*'")]
    Str,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    #[regex(r"#[^\n]*", allow_greedy = true)]
    Comment,

    /// Zero-width token: the following line is indented deeper than the block.
    Indent,
    /// Zero-width token: a block ends.
    Dedent,
    /// Leading whitespace that matches no enclosing indentation level.
    BadIndent,
    /// Coalesced unrecognized characters
    Garbage,
    Error,

    // --- Node kinds (non-terminals) ---
    Root,
    ForStmt,
    ExprStmt,
    Body,
    Name,
    Attribute,
    Call,
    ArgList,
    Tuple,
    Paren,
    Literal,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | Comment)
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage | BadIndent)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FLang {}

impl Language for FLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<FLang>;
pub type SyntaxToken = rowan::SyntaxToken<FLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 64-bit bitset of `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 64.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 64 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..64u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                // SAFETY: bounds checked against `__LAST` above
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// FIRST set of expr.
    pub const EXPR_FIRST: TokenSet = TokenSet::new(&[Id, Int, Str, ParenOpen]);

    /// FIRST set of a loop target.
    pub const TARGET_FIRST: TokenSet = TokenSet::new(&[Id, ParenOpen]);

    /// FIRST set of a statement.
    pub const STMT_FIRST: TokenSet = EXPR_FIRST.union(TokenSet::new(&[KwFor]));

    /// Synchronization points inside a `for` header.
    pub const FOR_HEADER_RECOVERY: TokenSet = TokenSet::new(&[KwIn, Colon, Indent, Dedent]);
}
