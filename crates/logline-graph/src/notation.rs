//! Compact text notation for commit graphs.
//!
//! A graph is written as a list of entries `node(child, child.dot, ...)`, e.g.
//!
//! ```text
//! 0(4, 1)
//! 1(2) 2(3) 3(7)
//! 4(5); 5(6); 6(7.dot)
//! 7()
//! ```
//!
//! Entries are separated by whitespace, newlines or `;`, and `#` starts a comment that runs to
//! the end of the line. A child without suffix is a normal edge; `.dot` marks a dotted one.
//! Nodes referenced only as children are created implicitly.
//!
//! Node indices must be smaller than the length of the text, which keeps the graph size linear
//! in the input size.

use crate::{CommitGraph, EdgeKind, NodeIndex};

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected character {found:?} at offset {offset}, expected {expected}")]
    Unexpected {
        offset: usize,
        found: char,
        expected: &'static str,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("invalid node index {text:?} at offset {offset}")]
    InvalidIndex { offset: usize, text: String },

    #[error("node index {index} at offset {offset} is too large for a {limit}-byte input")]
    IndexTooLarge {
        offset: usize,
        index: NodeIndex,
        limit: usize,
    },

    #[error("unknown edge suffix {suffix:?} at offset {offset}")]
    UnknownSuffix { offset: usize, suffix: String },
}

pub fn parse(text: &str) -> Result<CommitGraph> {
    let mut p = Parser::new(text);
    let mut g = CommitGraph::new();
    loop {
        p.skip_trivia();
        if p.is_eof() {
            break;
        }
        let node = p.parse_index()?;
        g.ensure_node(node);
        p.expect_char('(', "'('")?;
        p.skip_trivia();
        if !p.consume_char(')') {
            loop {
                let (child, kind) = p.parse_child()?;
                g.set_edge_with_kind(node, child, kind);
                p.skip_trivia();
                if p.consume_char(',') {
                    continue;
                }
                p.expect_char(')', "',' or ')'")?;
                break;
            }
        }
    }
    Ok(g)
}

/// Writes `g` back in notation form, one entry per node in index order.
///
/// Children are listed in ascending index order, so the output does not depend on the order in
/// which edges were inserted.
pub fn format(g: &CommitGraph) -> String {
    let mut out = String::new();
    for v in g.nodes() {
        if v > 0 {
            out.push(' ');
        }
        let mut children: Vec<(NodeIndex, EdgeKind)> =
            g.down_edges(v).iter().map(|e| (e.target, e.kind)).collect();
        children.sort_unstable();

        out.push_str(&v.to_string());
        out.push('(');
        for (i, (child, kind)) in children.into_iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&child.to_string());
            if kind.is_dotted() {
                out.push_str(".dot");
            }
        }
        out.push(')');
    }
    out
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_ws(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_whitespace()) {
            self.bump();
        }
    }

    /// Whitespace, entry separators and comments.
    fn skip_trivia(&mut self) {
        loop {
            self.skip_ws();
            match self.peek_char() {
                Some(';') => {
                    self.bump();
                }
                Some('#') => {
                    while self.peek_char().is_some_and(|c| c != '\n') {
                        self.bump();
                    }
                }
                _ => return,
            }
        }
    }

    fn consume_char(&mut self, ch: char) -> bool {
        self.skip_ws();
        if self.peek_char() == Some(ch) {
            self.bump();
            return true;
        }
        false
    }

    fn expect_char(&mut self, ch: char, expected: &'static str) -> Result<()> {
        if self.consume_char(ch) {
            return Ok(());
        }
        Err(self.unexpected(expected))
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.peek_char() {
            Some(found) => ParseError::Unexpected {
                offset: self.pos,
                found,
                expected,
            },
            None => ParseError::UnexpectedEof { expected },
        }
    }

    fn parse_index(&mut self) -> Result<NodeIndex> {
        self.skip_ws();
        let start = self.pos;
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        if self.pos == start {
            return Err(self.unexpected("a node index"));
        }
        let text = &self.input[start..self.pos];
        let index: NodeIndex = text.parse().map_err(|_| ParseError::InvalidIndex {
            offset: start,
            text: text.to_string(),
        })?;
        if index >= self.input.len() {
            return Err(ParseError::IndexTooLarge {
                offset: start,
                index,
                limit: self.input.len(),
            });
        }
        Ok(index)
    }

    fn parse_child(&mut self) -> Result<(NodeIndex, EdgeKind)> {
        let child = self.parse_index()?;
        if self.peek_char() != Some('.') {
            return Ok((child, EdgeKind::Normal));
        }
        self.bump();
        let start = self.pos;
        while self.peek_char().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.bump();
        }
        match &self.input[start..self.pos] {
            "dot" => Ok((child, EdgeKind::Dotted)),
            suffix => Err(ParseError::UnknownSuffix {
                offset: start,
                suffix: suffix.to_string(),
            }),
        }
    }
}
