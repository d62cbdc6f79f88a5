//! Token kinds for the filter language.
//!
//! Logos is derived directly on [`TokenKind`]. Keywords are declared with
//! `#[token]`, which outranks the `Identifier` regex when both match the same
//! text: `AND` is a keyword, `ANDY` is an identifier (longest match wins).
//!
//! Whitespace is skipped by the lexer and never becomes a token.

use logos::Logos;

/// All kinds of tokens produced by the lexer.
///
/// `#[repr(u16)]` keeps discriminants small enough for [`TokenSet`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[logos(skip r"[ \t\r\n]+")]
#[repr(u16)]
pub enum TokenKind {
    #[token("AND")]
    And = 0,

    #[token("OR")]
    Or,

    #[token("NOT")]
    Not,

    #[token("=")]
    Eq,

    #[token("!=")]
    NotEq,

    #[token(">")]
    Gt,

    #[token("<")]
    Lt,

    #[token(">=")]
    GtEq,

    #[token("<=")]
    LtEq,

    #[token("IN")]
    In,

    /// Unsigned decimal: `5`, `5.`, `2.75`
    #[regex(r"[0-9]+(\.[0-9]*)?")]
    NumberLit,

    /// Single or double quoted, no escapes. Quotes are part of the token text.
    #[regex(r"'[^']*'")]
    #[regex(r#""[^"]*""#)]
    StringLit,

    #[token("TRUE")]
    #[token("FALSE")]
    BoolLit,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(",")]
    Comma,

    /// Upper-case field name. Catalog membership is checked by the translator.
    #[regex(r"[A-Z][A-Z_]*")]
    Identifier,
}

use TokenKind::*;

/// A set of `TokenKind`s implemented as a 64-bit bitset.
///
/// Used by the parser for O(1) FIRST-set membership tests.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 64.
    #[inline]
    pub const fn new(kinds: &[TokenKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 64, "TokenKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
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
        for kind in ALL_KINDS {
            if self.contains(kind) {
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

const ALL_KINDS: [TokenKind; 19] = [
    And, Or, Not, Eq, NotEq, Gt, Lt, GtEq, LtEq, In, NumberLit, StringLit, BoolLit, ParenOpen,
    ParenClose, BraceOpen, BraceClose, Comma, Identifier,
];

/// Pre-defined token sets used by the grammar.
pub mod token_sets {
    use super::*;

    /// Tokens that can start a condition.
    pub const CONDITION_FIRST: TokenSet = TokenSet::new(&[Not, ParenOpen, Identifier]);

    /// `AND` / `OR`, folded left to right with equal precedence.
    pub const LOGICAL_OPS: TokenSet = TokenSet::new(&[And, Or]);

    pub const COMPARATORS: TokenSet = TokenSet::new(&[Eq, NotEq, Gt, Lt, GtEq, LtEq, In]);

    /// Literals allowed inside a set.
    pub const SCALARS: TokenSet = TokenSet::new(&[NumberLit, StringLit, BoolLit]);

    /// Tokens that can start a comparison value.
    pub const VALUE_FIRST: TokenSet = SCALARS.union(TokenSet::new(&[BraceOpen]));
}

#[cfg(test)]
mod tests {
    use super::token_sets::*;
    use super::*;

    #[test]
    fn token_set_contains() {
        let set = TokenSet::new(&[ParenOpen, ParenClose, Comma]);
        assert!(set.contains(ParenOpen));
        assert!(set.contains(ParenClose));
        assert!(set.contains(Comma));
        assert!(!set.contains(BraceOpen));
        assert!(!TokenSet::EMPTY.contains(And));
    }

    #[test]
    fn token_set_union() {
        assert!(VALUE_FIRST.contains(BraceOpen));
        assert!(VALUE_FIRST.contains(StringLit));
        assert!(!SCALARS.contains(BraceOpen));
    }

    #[test]
    fn comparators_include_in() {
        for kind in [Eq, NotEq, Gt, Lt, GtEq, LtEq, In] {
            assert!(COMPARATORS.contains(kind), "{kind:?}");
        }
        assert!(!COMPARATORS.contains(And));
    }

    #[test]
    fn token_set_debug() {
        assert_eq!(format!("{:?}", LOGICAL_OPS), "{And, Or}");
    }

    #[test]
    fn kind_count_under_64() {
        assert!((Identifier as u16) < 64);
        assert_eq!(ALL_KINDS.len(), Identifier as usize + 1);
    }
}
