//! Key cursor
//!
//! A key being inserted is walked front to back. The cursor separates the
//! bytes already consumed on the way down (the path key) from the bytes still
//! to be placed, and compares the latter against node edge labels.

/// How the unconsumed part of a key relates to an edge label
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    /// The remaining key and the edge label are identical
    Equal,
    /// The remaining key is a strict prefix of the edge label
    KeyExhausted,
    /// The edge label is a strict prefix of the remaining key
    EdgeExhausted,
    /// Neither is a prefix of the other
    Diverge,
}

/// Result of comparing the remaining key against an edge label
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Comparison {
    pub relation: Relation,
    /// Number of leading bytes the two have in common
    pub matched: usize,
}

/// A byte-string key with a forward-only read position
#[derive(Clone, Debug)]
pub struct KeyCursor<'a> {
    key: &'a [u8],
    pos: usize,
}

impl<'a> KeyCursor<'a> {
    pub fn new(key: &'a [u8]) -> Self {
        KeyCursor { key, pos: 0 }
    }

    /// The whole key
    pub fn key(&self) -> &'a [u8] {
        self.key
    }

    /// Bytes consumed so far
    pub fn key_so_far(&self) -> &'a [u8] {
        &self.key[..self.pos]
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> &'a [u8] {
        &self.key[self.pos..]
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.key.len()
    }

    /// Current byte without consuming it
    pub fn peek(&self) -> Option<u8> {
        self.key.get(self.pos).copied()
    }

    /// Move forward by `count` bytes.
    ///
    /// # Panics
    ///
    /// Panics if that would move past the end of the key.
    pub fn advance(&mut self, count: usize) {
        assert!(
            self.pos + count <= self.key.len(),
            "cannot advance {} bytes at position {} of a {}-byte key",
            count,
            self.pos,
            self.key.len()
        );
        self.pos += count;
    }

    /// Compare the remaining key against `edge`
    pub fn compare(&self, edge: &[u8]) -> Comparison {
        let remaining = self.remaining();
        let matched = common_prefix_len(remaining, edge);

        let relation = if matched == remaining.len() && matched == edge.len() {
            Relation::Equal
        } else if matched == remaining.len() {
            Relation::KeyExhausted
        } else if matched == edge.len() {
            Relation::EdgeExhausted
        } else {
            Relation::Diverge
        };

        Comparison { relation, matched }
    }
}

impl Iterator for KeyCursor<'_> {
    type Item = u8;

    /// Consume and return the current byte
    fn next(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.key.len() - self.pos;
        (left, Some(left))
    }
}

/// Find the length of the common prefix between two byte slices
pub(crate) fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}
