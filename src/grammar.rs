// A grammar is an ordered sequence of productions `A -> e1 ... ek`, where
// each e_i is either a non-terminal symbol or a terminal (a literal string,
// or a pattern tested against a whole token). Rule order is observable:
// state 0 of the chart is seeded in grammar order, and the extractor
// prefers earlier rules when more than one derivation fits.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use linear_map::LinearMap;
use regex::Regex;

use crate::builder;
use crate::value::Val;
use crate::Error;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn fresh_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// A non-terminal. Identity is the allocation-time id, never the name: two
/// symbols that happen to share a name are still different symbols, and the
/// name exists only for display.
#[derive(Clone)]
pub struct Symbol {
    id: u64,
    name: Option<String>,
}

impl Symbol {
    pub fn named(name: impl Into<String>) -> Symbol {
        Symbol { id: fresh_id(), name: Some(name.into()) }
    }

    pub fn anon() -> Symbol {
        Symbol { id: fresh_id(), name: None }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl PartialEq for Symbol { fn eq(&self, other: &Symbol) -> bool { self.id == other.id } }
impl Eq for Symbol {}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) { self.id.hash(state) }
}

impl From<&str> for Symbol { fn from(name: &str) -> Symbol { Symbol::named(name) } }

impl std::fmt::Debug for Symbol {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(w, "Symbol({}#{})", name, self.id),
            None => write!(w, "Symbol(#{})", self.id),
        }
    }
}

/// A pattern terminal. Matching is a full-match test: the regex must cover
/// the entire token, so `/\d+/` accepts `"23"` and rejects `"23x"`.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    flags: String,
    re: Regex,
}

impl Pattern {
    /// Compile `source` with host-style flags drawn from `gimy`. The `g`
    /// and `y` flags steer a cursor this engine does not have, so only `i`
    /// and `m` carry over, as inline flags.
    pub fn new(source: &str, flags: &str) -> Result<Pattern, Error> {
        let re = Regex::new(&format!("^{}$", fragment(source, flags))).map_err(|e| {
            Error::BadPattern { pattern: source.to_string(), source: e }
        })?;
        Ok(Pattern { source: source.to_string(), flags: flags.to_string(), re })
    }

    pub fn matches(&self, token: &str) -> bool {
        self.re.is_match(token)
    }

    /// The unanchored form, for embedding in a larger expression.
    pub(crate) fn fragment(&self) -> String {
        fragment(&self.source, &self.flags)
    }

    pub fn source(&self) -> &str { &self.source }
    pub fn flags(&self) -> &str { &self.flags }
}

fn fragment(source: &str, flags: &str) -> String {
    let inline: String = flags.chars().filter(|c| matches!(c, 'i' | 'm')).collect();
    format!("(?{}:{})", inline, source)
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Pattern) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}
impl Eq for Pattern {}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(w, "/{}/{}", self.source, self.flags)
    }
}

/// One right-hand-side position: a non-terminal to expand, or a terminal
/// to match against a single token.
#[derive(Clone, PartialEq, Debug)]
pub enum Elem {
    Sym(Symbol),
    Lit(String),
    Pat(Pattern),
}

impl Elem {
    /// The terminal predicate shared by the scanner and the extractor.
    /// A symbol never matches a token.
    pub fn matches(&self, token: &str) -> bool {
        match self {
            Elem::Sym(_) => false,
            Elem::Lit(s) => s == token,
            Elem::Pat(p) => p.matches(token),
        }
    }

    pub fn as_sym(&self) -> Option<&Symbol> {
        if let Elem::Sym(s) = self { Some(s) } else { None }
    }
}

impl From<Symbol> for Elem { fn from(s: Symbol) -> Elem { Elem::Sym(s) } }
impl From<Pattern> for Elem { fn from(p: Pattern) -> Elem { Elem::Pat(p) } }
impl From<&str> for Elem { fn from(s: &str) -> Elem { Elem::Lit(s.to_string()) } }

/// Caller-owned callback folded over a node's child values after parsing.
/// The parser itself never invokes one.
pub type Valuator = Arc<dyn Fn(&[Val]) -> Val + Send + Sync>;

pub struct Rule {
    id: u64,
    lhs: Symbol,
    rhs: Vec<Elem>,
    valuator: Option<Valuator>,
}

impl Rule {
    /// A production must consume at least one element; a rule that
    /// produces nothing is rejected here rather than looping the
    /// recognizer later.
    pub fn new(lhs: Symbol, rhs: Vec<Elem>) -> Result<Rule, Error> {
        Rule::build(lhs, rhs, None)
    }

    pub fn with_valuator(
        lhs: Symbol,
        rhs: Vec<Elem>,
        valuator: impl Fn(&[Val]) -> Val + Send + Sync + 'static,
    ) -> Result<Rule, Error> {
        Rule::build(lhs, rhs, Some(Arc::new(valuator)))
    }

    fn build(lhs: Symbol, rhs: Vec<Elem>, valuator: Option<Valuator>) -> Result<Rule, Error> {
        if rhs.is_empty() {
            return Err(Error::EmptyRhs { lhs: lhs.to_string() });
        }
        Ok(Rule { id: fresh_id(), lhs, rhs, valuator })
    }

    pub fn lhs(&self) -> &Symbol { &self.lhs }

    pub fn rhs(&self) -> &[Elem] { &self.rhs }

    pub(crate) fn id(&self) -> u64 { self.id }

    /// Fold `values` through the attached valuator. `values` must line up
    /// one-to-one with the right-hand side, exactly as the children of a
    /// tree node built from this rule do.
    pub fn evaluate(&self, values: &[Val]) -> Result<Val, Error> {
        if values.len() != self.rhs.len() {
            return Err(Error::Arity {
                rule: self.to_string(),
                expected: self.rhs.len(),
                got: values.len(),
            });
        }
        Ok(match &self.valuator {
            Some(f) => f(values),
            None => Val::Unit,
        })
    }

    /// The lhs, then every symbol-valued rhs element, left to right.
    pub(crate) fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        std::iter::once(&self.lhs).chain(self.rhs.iter().filter_map(Elem::as_sym))
    }
}

impl PartialEq for Rule { fn eq(&self, other: &Rule) -> bool { self.id == other.id } }
impl Eq for Rule {}

impl std::fmt::Debug for Rule {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(w, "Rule({})", self)
    }
}

#[derive(Default)]
pub struct Grammar {
    rules: Vec<Rule>,
}

impl Grammar {
    pub fn empty() -> Grammar {
        Grammar { rules: Vec::new() }
    }

    pub fn from_rules(rules: Vec<Rule>) -> Grammar {
        Grammar { rules }
    }

    pub fn add(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Add a rule written in the textual `"LHS -> S1 S2 ... Sk"` surface.
    pub fn add_text(&mut self, line: &str) -> Result<(), Error> {
        let rule = builder::rule_from_text(self, line)?;
        self.add(rule);
        Ok(())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Name-to-symbol index over every rule's lhs and symbol-valued rhs
    /// elements, in first-appearance order. Unnamed symbols are not
    /// indexable. Two distinct identities sharing a name would let the
    /// textual surface silently alias them, so that case is an error.
    pub fn symbols(&self) -> Result<LinearMap<String, Symbol>, Error> {
        let mut map = LinearMap::new();
        for rule in &self.rules {
            for sym in rule.symbols() {
                let Some(name) = sym.name() else { continue };
                match map.get(name) {
                    None => { map.insert(name.to_string(), sym.clone()); }
                    Some(prev) if prev == sym => {}
                    Some(_) => return Err(Error::DuplicateSymbolName(name.to_string())),
                }
            }
        }
        Ok(map)
    }
}

impl FromIterator<Rule> for Grammar {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Grammar {
        Grammar { rules: iter.into_iter().collect() }
    }
}
