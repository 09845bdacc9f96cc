//! The textual rule surface: `"LHS -> S1 S2 ... Sk"`.
//!
//! The line splits on the first `->`. Right-hand-side words are classified
//! by shape: `/body/flags` is a pattern terminal, `'body'` and `"body"` are
//! literal terminals, and anything else names a symbol in the grammar's
//! current table, created fresh on a miss and reused for later occurrences
//! in the same line.

use linear_map::LinearMap;

use crate::grammar::{Elem, Grammar, Pattern, Rule, Symbol};
use crate::Error;

pub(crate) fn rule_from_text(grammar: &Grammar, line: &str) -> Result<Rule, Error> {
    let (lhs, rhs) = line
        .split_once("->")
        .ok_or_else(|| Error::MissingArrow(line.to_string()))?;
    let lhs = lhs.trim();
    let rhs = rhs.trim();
    if lhs.is_empty() {
        return Err(Error::EmptySide { side: "left", line: line.to_string() });
    }
    if rhs.is_empty() {
        return Err(Error::EmptySide { side: "right", line: line.to_string() });
    }

    let mut table = grammar.symbols()?;
    let lhs = intern(&mut table, lhs);
    let mut elems = Vec::new();
    for word in rhs.split_whitespace() {
        elems.push(classify(&mut table, word)?);
    }
    Rule::new(lhs, elems)
}

fn classify(table: &mut LinearMap<String, Symbol>, word: &str) -> Result<Elem, Error> {
    if let Some((body, flags)) = pattern_form(word) {
        return Ok(Elem::Pat(Pattern::new(body, flags)?));
    }
    if let Some(body) = quoted_form(word) {
        return Ok(Elem::Lit(body.to_string()));
    }
    Ok(Elem::Sym(intern(table, word)))
}

/// `/body/flags`, with the flags drawn from the host-regex set `gimy`.
/// Anything else (say a stray `/x/q`) falls through to the symbol case.
fn pattern_form(word: &str) -> Option<(&str, &str)> {
    let rest = word.strip_prefix('/')?;
    let cut = rest.rfind('/')?;
    let (body, flags) = (&rest[..cut], &rest[cut + 1..]);
    flags
        .chars()
        .all(|c| matches!(c, 'g' | 'i' | 'm' | 'y'))
        .then_some((body, flags))
}

/// `'body'` or `"body"`.
fn quoted_form(word: &str) -> Option<&str> {
    for quote in ['\'', '"'] {
        if let Some(body) = word.strip_prefix(quote).and_then(|w| w.strip_suffix(quote)) {
            return Some(body);
        }
    }
    None
}

fn intern(table: &mut LinearMap<String, Symbol>, name: &str) -> Symbol {
    if let Some(sym) = table.get(name) {
        return sym.clone();
    }
    let sym = Symbol::named(name);
    table.insert(name.to_string(), sym.clone());
    sym
}
