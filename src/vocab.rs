//! Fixed-alphabet tokenizer.
//!
//! Each symbol of the alphabet maps to its position, so token ids are always
//! `0..vocab.len()`. Text is processed per `char`, never per byte.

use std::collections::HashMap;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocab {
    symbols: Vec<char>,
    ids: HashMap<char, usize>,
}

impl Vocab {
    /// Build a vocabulary from a non-empty sequence of unique symbols.
    pub fn new<I: IntoIterator<Item = char>>(symbols: I) -> Result<Self> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Err(Error::InvalidConfig(
                "vocab needs at least one symbol".to_owned(),
            ));
        }

        let mut ids = HashMap::with_capacity(symbols.len());
        for (i, &c) in symbols.iter().enumerate() {
            if let Some(prev) = ids.insert(c, i) {
                return Err(Error::InvalidConfig(format!(
                    "duplicate symbol {c:?} at positions {prev} and {i}"
                )));
            }
        }

        Ok(Self { symbols, ids })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[inline]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    #[inline]
    pub fn token_of(&self, c: char) -> Option<usize> {
        self.ids.get(&c).copied()
    }

    #[inline]
    pub fn symbol_of(&self, token: usize) -> Option<char> {
        self.symbols.get(token).copied()
    }

    /// Map every character of `text` to its token id.
    pub fn encode(&self, text: &str) -> Result<Vec<usize>> {
        if text.is_empty() {
            return Err(Error::InvalidToken("cannot encode empty text".to_owned()));
        }

        text.chars()
            .enumerate()
            .map(|(pos, c)| {
                self.token_of(c).ok_or_else(|| {
                    Error::InvalidToken(format!(
                        "symbol {c:?} at position {pos} is not in the vocab"
                    ))
                })
            })
            .collect()
    }

    /// Map token ids back to text.
    pub fn decode(&self, tokens: &[usize]) -> Result<String> {
        if tokens.is_empty() {
            return Err(Error::InvalidToken("cannot decode zero tokens".to_owned()));
        }

        tokens
            .iter()
            .enumerate()
            .map(|(pos, &t)| {
                self.symbol_of(t).ok_or_else(|| {
                    Error::InvalidToken(format!(
                        "token {t} at position {pos} is out of range for vocab of size {}",
                        self.len()
                    ))
                })
            })
            .collect()
    }
}
