//! Depth-first tree extraction from the origin-indexed chart.
//!
//! The walk is top down: to realize a symbol at position `p`, try every
//! span starting at `p` that derives it, recurse past each candidate's
//! end, and keep the first arrangement that accounts for every token the
//! parent claims. Ambiguity (several arrangements fitting) is reported
//! once and resolved in favor of the earliest candidate, so extraction is
//! deterministic.

use crate::earley::{Completed, Spans};
use crate::grammar::Elem;
use crate::tree::{Child, Tree};
use crate::Error;

/// Pick the root derivation and expand it. The root is the span starting
/// at 0 that reaches furthest; anything short of the last token is a
/// rejection at the first token the longest prefix could not absorb.
pub fn extract<'g>(spans: &Spans<'g>, tokens: &[String]) -> Result<Tree<'g>, Error> {
    let n = tokens.len();

    let mut root: Option<Completed<'g>> = None;
    for cand in spans.starting_at(0) {
        if root.map_or(true, |r| cand.end > r.end) {
            root = Some(*cand);
        }
    }
    let root = root.ok_or_else(|| no_parse(tokens, 0))?;
    if root.end != n {
        return Err(no_parse(tokens, root.end));
    }

    let children = expand(spans, tokens, root, 0).ok_or_else(|| no_parse(tokens, 0))?;
    Ok(Tree { rule: root.rule, children })
}

fn no_parse(tokens: &[String], at: usize) -> Error {
    match tokens.get(at) {
        Some(token) => Error::NoParse { at, token: token.clone() },
        None => Error::NoParseEmpty,
    }
}

/// The children of `item`, matching its right-hand side against the
/// tokens from `start` up to `item.end`. `None` means "this derivation
/// does not fit here"; the caller moves on to its next candidate.
fn expand<'g>(
    spans: &Spans<'g>,
    tokens: &[String],
    item: Completed<'g>,
    start: usize,
) -> Option<Vec<Child<'g>>> {
    helper(spans, tokens, item, start, 0)
}

fn helper<'g>(
    spans: &Spans<'g>,
    tokens: &[String],
    item: Completed<'g>,
    start: usize,
    depth: usize,
) -> Option<Vec<Child<'g>>> {
    let rhs = item.rule.rhs();

    // Every element accounted for; the match only stands if it landed
    // exactly on the item's end.
    if depth == rhs.len() {
        return (start == item.end).then(Vec::new);
    }

    match &rhs[depth] {
        // A terminal consumes the very next token, or the whole
        // arrangement fails.
        elem @ (Elem::Lit(_) | Elem::Pat(_)) => {
            let token = tokens.get(start)?;
            if !elem.matches(token) {
                return None;
            }
            let mut children = helper(spans, tokens, item, start + 1, depth + 1)?;
            children.insert(0, Child::Leaf(token.clone()));
            Some(children)
        }

        // A symbol is realized by some span starting here that derives
        // it. Collect every candidate that works out, then commit to the
        // first.
        Elem::Sym(sym) => {
            let mut successes: Vec<Vec<Child<'g>>> = Vec::new();
            for cand in spans.starting_at(start) {
                if cand.rule.lhs() != sym {
                    continue;
                }
                let Some(mut rest) = helper(spans, tokens, item, cand.end, depth + 1) else {
                    continue;
                };
                let Some(grand) = expand(spans, tokens, *cand, start) else {
                    continue;
                };
                rest.insert(0, Child::Node(Tree { rule: cand.rule, children: grand }));
                successes.push(rest);
            }
            if successes.len() > 1 && successes.iter().any(|s| s != &successes[0]) {
                tracing::warn!(
                    symbol = %sym,
                    position = start,
                    derivations = successes.len(),
                    "ambiguous parse, keeping the first derivation"
                );
            }
            successes.into_iter().next()
        }
    }
}
