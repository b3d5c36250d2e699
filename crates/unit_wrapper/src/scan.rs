// crates/unit_wrapper/src/scan.rs

//! Lexical scan that collects the identifiers a JavaScript / TSX body refers to.
//!
//! This is not a parser. It only knows enough to stay out of comments and
//! string literals, to look inside `${…}` template interpolations, and to tell
//! `obj.name` (a property) from `...name` (a spread of a variable).
//! A quote opens a string only where an expression can begin (after `=`,
//! `(`, an operator or a keyword such as `return`). Elsewhere, as in the JSX
//! text `Driver's notes`, it is plain text. Single- and double-quoted strings
//! also end at a newline.

use std::collections::BTreeSet;

/// Words after which a quote starts a string literal.
const EXPRESSION_KEYWORDS: &[&str] = &[
    "await", "case", "delete", "do", "else", "from", "import", "in", "instanceof", "new", "of",
    "return", "throw", "typeof", "void", "yield",
];

/// Returns every identifier referenced as a value in `src`.
pub fn referenced_identifiers(src: &str) -> BTreeSet<String> {
    let mut scanner = Scanner {
        src,
        bytes: src.as_bytes(),
        pos: 0,
        out: BTreeSet::new(),
    };
    scanner.code(false);
    scanner.out
}

struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    out: BTreeSet<String>,
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

impl<'a> Scanner<'a> {
    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// Scans code until the end of input, or until the `}` that closes the
    /// current template interpolation.
    fn code(&mut self, in_interpolation: bool) {
        let mut depth = 0usize;
        while let Some(b) = self.peek(0) {
            match b {
                b'/' if self.peek(1) == Some(b'/') => self.skip_line_comment(),
                b'/' if self.peek(1) == Some(b'*') => self.skip_block_comment(),
                b'\'' | b'"' if self.quote_opens_string() => self.skip_quoted(b),
                b'`' => self.template(),
                b'{' => {
                    depth += 1;
                    self.pos += 1;
                }
                b'}' => {
                    self.pos += 1;
                    if in_interpolation && depth == 0 {
                        return;
                    }
                    depth = depth.saturating_sub(1);
                }
                b if b.is_ascii_digit() => self.skip_word(),
                b if is_ident_start(b) => self.identifier(),
                _ => self.pos += 1,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(b) = self.peek(0) {
            if b == b'\n' {
                break;
            }
            self.pos += 1;
        }
    }

    fn skip_block_comment(&mut self) {
        self.pos += 2;
        match self.src[self.pos..].find("*/") {
            Some(idx) => self.pos += idx + 2,
            None => self.pos = self.bytes.len(),
        }
    }

    /// Looks at the last token before the quote under the cursor.
    fn quote_opens_string(&self) -> bool {
        let before = self.src[..self.pos].trim_end();
        let Some(last) = before.bytes().last() else {
            return true;
        };
        match last {
            b'=' | b'(' | b',' | b':' | b'[' | b'{' | b'?' | b'+' | b'-' | b'*' | b'/' | b'%'
            | b'!' | b'&' | b'|' | b'^' | b'~' | b';' | b'<' => true,
            b'>' => before.ends_with("=>"),
            b if is_ident_continue(b) => {
                let word_start = before
                    .bytes()
                    .rposition(|b| !is_ident_continue(b))
                    .map_or(0, |i| i + 1);
                EXPRESSION_KEYWORDS.contains(&&before[word_start..])
            }
            _ => false,
        }
    }

    fn skip_quoted(&mut self, quote: u8) {
        self.pos += 1;
        while let Some(b) = self.peek(0) {
            match b {
                b'\\' => self.pos += 2,
                b'\n' => return,
                b if b == quote => {
                    self.pos += 1;
                    return;
                }
                _ => self.pos += 1,
            }
        }
    }

    fn template(&mut self) {
        self.pos += 1;
        while let Some(b) = self.peek(0) {
            match b {
                b'\\' => self.pos += 2,
                b'`' => {
                    self.pos += 1;
                    return;
                }
                b'$' if self.peek(1) == Some(b'{') => {
                    self.pos += 2;
                    self.code(true);
                }
                _ => self.pos += 1,
            }
        }
    }

    fn skip_word(&mut self) {
        while self.peek(0).is_some_and(is_ident_continue) {
            self.pos += 1;
        }
    }

    fn identifier(&mut self) {
        let start = self.pos;
        self.skip_word();
        if !self.is_property(start) {
            self.out.insert(self.src[start..self.pos].to_string());
        }
    }

    /// `a.b` and `a?.b` name a property; `...b` spreads a variable.
    fn is_property(&self, start: usize) -> bool {
        let before = &self.bytes[..start];
        let trimmed_len = before
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map(|i| i + 1)
            .unwrap_or(0);
        let before = &before[..trimmed_len];
        before.ends_with(b".") && !before.ends_with(b"...")
    }
}
