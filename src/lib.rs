//! Earley recognition and parse-tree extraction for context-free
//! grammars.
//!
//! The pipeline is strictly linear: a sentence and a grammar flow into
//! the tokenizer, the tokens flow into the recognizer to build a chart,
//! the chart is re-indexed by origin, and the extractor walks it top-down
//! into a single derivation tree. No stage holds state across calls, and
//! the grammar is read-only for the duration of a parse.
//!
//! The grammars in scope are the ones table parsers choke on: left
//! recursive, full of unit productions, or ambiguous. When several
//! derivations exist the extractor reports the ambiguity through
//! `tracing` and commits to the earliest one in grammar order, so a parse
//! is a pure function of its sentence and grammar.

pub mod earley;
pub mod extract;
pub mod grammar;
pub mod tokenizer;
pub mod tree;
pub mod value;

mod builder;
mod display;

pub use grammar::{Elem, Grammar, Pattern, Rule, Symbol, Valuator};
pub use tokenizer::tokenize;
pub use tree::{Child, Tree};
pub use value::Val;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("rule for `{lhs}` has an empty right-hand side")]
    EmptyRhs { lhs: String },

    #[error("rule text `{0}` is missing the `->` separator")]
    MissingArrow(String),

    #[error("rule text `{line}` has an empty {side} side")]
    EmptySide { side: &'static str, line: String },

    #[error("pattern terminal /{pattern}/ does not compile: {source}")]
    BadPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("two distinct symbols share the name `{0}`")]
    DuplicateSymbolName(String),

    #[error("no parse: input rejected at token \"{token}\" (position {at})")]
    NoParse { at: usize, token: String },

    #[error("no parse: no complete derivation over the empty input")]
    NoParseEmpty,

    #[error("chart state {state} grew to {count} items (limit {limit})")]
    ChartOverflow { state: usize, count: usize, limit: usize },

    #[error("valuator for `{rule}` was given {got} values, expected {expected}")]
    Arity { rule: String, expected: usize, got: usize },
}

/// Tokenize, recognize, re-index, extract. The returned tree borrows the
/// grammar's rules and owns its leaf tokens.
pub fn parse<'g>(sentence: &str, grammar: &'g Grammar) -> Result<Tree<'g>, Error> {
    parse_with(sentence, grammar, tokenizer::tokenize)
}

/// [`parse`] with the tokenizer swapped out. The recognizer's only
/// contract with a tokenizer is that it yields strings.
pub fn parse_with<'g>(
    sentence: &str,
    grammar: &'g Grammar,
    tokenizer: impl FnOnce(&str, &Grammar) -> Vec<String>,
) -> Result<Tree<'g>, Error> {
    let tokens = tokenizer(sentence, grammar);
    let chart = earley::recognize(&tokens, grammar, None)?;
    extract::extract(&chart.into_spans(), &tokens)
}

#[cfg(test)]
mod tests;
