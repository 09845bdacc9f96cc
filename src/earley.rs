//! Chart construction and re-indexing.
//!
//! Recognition gradually builds, left to right, a set of Earley items for
//! each position of the input. An item `(r, d, o)` records that the first
//! `d` elements of `r`'s right-hand side have matched starting at state
//! `o`. The sets memoize: repeated predictions and completions collapse
//! into the per-state duplicate check instead of being re-derived.
//!
//! After recognition the chart indexes items by where they finished. Tree
//! extraction wants the opposite question answered, "which derivations
//! begin here, and where do they end?", so [`Chart::into_spans`] inverts
//! the indexing as a second pass.

use std::collections::HashSet;

use crate::grammar::{Elem, Grammar, Rule};
use crate::Error;

/// A dotted rule with its origin state.
#[derive(Copy, Clone, PartialEq)]
pub struct Item<'g> {
    pub rule: &'g Rule,
    pub dot: usize,
    pub origin: usize,
}

impl<'g> Item<'g> {
    fn start(rule: &'g Rule, origin: usize) -> Item<'g> {
        Item { rule, dot: 0, origin }
    }

    fn advanced(&self) -> Item<'g> {
        Item { rule: self.rule, dot: self.dot + 1, origin: self.origin }
    }

    pub fn next_elem(&self) -> Option<&'g Elem> {
        self.rule.rhs().get(self.dot)
    }

    pub fn is_complete(&self) -> bool {
        self.dot == self.rule.rhs().len()
    }

    /// Duplicate identity: rule identity plus dot plus origin.
    fn key(&self) -> (u64, usize, usize) {
        (self.rule.id(), self.dot, self.origin)
    }
}

impl std::fmt::Debug for Item<'_> {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(w, "({} ->", self.rule.lhs())?;
        for (i, elem) in self.rule.rhs().iter().enumerate() {
            if i == self.dot {
                write!(w, " .")?;
            }
            write!(w, " {}", elem)?;
        }
        if self.is_complete() {
            write!(w, " .")?;
        }
        write!(w, ", {})", self.origin)
    }
}

struct State<'g> {
    items: Vec<Item<'g>>,
    seen: HashSet<(u64, usize, usize)>,
}

impl<'g> State<'g> {
    fn new() -> State<'g> {
        State { items: Vec::new(), seen: HashSet::new() }
    }

    /// Append unless an identical `(rule, dot, origin)` is already here.
    /// Predictions into state `i` always carry `dot == 0` and
    /// `origin == i`, so for them this collapses to a check on rule
    /// identity alone; that is what keeps self-left-recursive productions
    /// from expanding forever.
    fn insert(&mut self, item: Item<'g>) {
        if self.seen.insert(item.key()) {
            self.items.push(item);
        }
    }
}

/// The recognizer's output: one item set per input position, `n + 1` in
/// all for `n` tokens.
pub struct Chart<'g> {
    states: Vec<State<'g>>,
}

impl<'g> Chart<'g> {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn items(&self, state: usize) -> &[Item<'g>] {
        &self.states[state].items
    }

    /// Drop incomplete items, then flip the indexing: an item that
    /// completed in state `i` with origin `o` becomes a span at `o`
    /// ending at `i`.
    pub fn into_spans(self) -> Spans<'g> {
        let mut states: Vec<Vec<Completed<'g>>> =
            (0..self.states.len()).map(|_| Vec::new()).collect();
        for (i, state) in self.states.iter().enumerate() {
            for item in &state.items {
                if item.is_complete() {
                    states[item.origin].push(Completed { rule: item.rule, end: i });
                }
            }
        }
        Spans { states }
    }
}

impl std::fmt::Debug for Chart<'_> {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut list = w.debug_list();
        for state in &self.states {
            list.entry(&state.items);
        }
        list.finish()
    }
}

/// Build the chart for `tokens`. Recognition itself cannot reject: junk
/// input just yields a chart the extractor will refuse. The optional
/// `max_per_state` bound turns a pathologically exploding grammar into an
/// error instead of unbounded growth.
pub fn recognize<'g>(
    tokens: &[String],
    grammar: &'g Grammar,
    max_per_state: Option<usize>,
) -> Result<Chart<'g>, Error> {
    let n = tokens.len();
    let mut states: Vec<State<'g>> = (0..=n).map(|_| State::new()).collect();

    //  r in G
    // ------------------ Init
    //  (r, 0, 0) in S[0]
    for rule in grammar.rules() {
        states[0].insert(Item::start(rule, 0));
    }

    for i in 0..=n {
        // Items appended to S[i] during the walk are visited before the
        // walk moves on to S[i+1]: the bound is re-read every pass.
        let mut j = 0;
        while j < states[i].items.len() {
            let item = states[i].items[j];
            match item.next_elem() {
                //  (r, d, o) in S[i]   r.rhs[d] is a symbol   r' in G
                // --------------------------------------------------- Predict
                //  (r', 0, i) in S[i]
                //
                // The whole grammar is predicted, not just the rules for
                // the symbol at the dot; the duplicate check keeps the
                // state finite, and items that go nowhere are invisible to
                // the extractor.
                Some(Elem::Sym(_)) => {
                    for rule in grammar.rules() {
                        states[i].insert(Item::start(rule, i));
                    }
                }

                //  (r, d, o) in S[i]   r.rhs[d] matches t[i]
                // ------------------------------------------- Scan
                //  (r, d+1, o) in S[i+1]
                Some(term) => {
                    if i < n && term.matches(&tokens[i]) {
                        let next = item.advanced();
                        states[i + 1].insert(next);
                    }
                }

                //  (r, |r.rhs|, o) in S[i]   r.lhs = A
                //  (r', d, o') in S[o]   r'.rhs[d] = A
                // ------------------------------------- Complete
                //  (r', d+1, o') in S[i]
                None => {
                    let lhs = item.rule.lhs();
                    // o < i whenever an item completes (every rhs is
                    // non-empty, so every derivation consumes input), which
                    // keeps the snapshot of S[o] cheap and exact.
                    let waiting: Vec<Item<'g>> = states[item.origin]
                        .items
                        .iter()
                        .filter(|w| w.next_elem().and_then(Elem::as_sym) == Some(lhs))
                        .copied()
                        .collect();
                    for w in waiting {
                        states[i].insert(w.advanced());
                    }
                }
            }
            j += 1;

            if let Some(limit) = max_per_state {
                if states[i].items.len() > limit {
                    return Err(Error::ChartOverflow {
                        state: i,
                        count: states[i].items.len(),
                        limit,
                    });
                }
            }
        }
    }

    tracing::debug!(
        states = states.len(),
        items = states.iter().map(|s| s.items.len()).sum::<usize>(),
        "chart built"
    );

    Ok(Chart { states })
}

/// A completed derivation re-indexed by where it starts.
#[derive(Copy, Clone, PartialEq)]
pub struct Completed<'g> {
    pub rule: &'g Rule,
    pub end: usize,
}

impl std::fmt::Debug for Completed<'_> {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(w, "({} ..{})", self.rule, self.end)
    }
}

/// The origin-indexed chart: `starting_at(p)` lists the complete
/// derivations that begin at token position `p`, each carrying its end
/// state. This is the shape a top-down left-to-right walk wants.
pub struct Spans<'g> {
    states: Vec<Vec<Completed<'g>>>,
}

impl<'g> Spans<'g> {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn starting_at(&self, start: usize) -> &[Completed<'g>] {
        &self.states[start]
    }
}

impl std::fmt::Debug for Spans<'_> {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut list = w.debug_list();
        for state in &self.states {
            list.entry(state);
        }
        list.finish()
    }
}
