//! The default tokenizer: split a sentence on the terminals of its own
//! grammar.
//!
//! Every literal and pattern terminal appearing in any rule contributes
//! one alternative to a delimiter expression; the sentence is split on
//! that delimiter with the delimiters kept, every piece is trimmed, and
//! empty pieces are dropped. Overlapping terminals resolve by the regex
//! engine's leftmost-match rule, which is as much policy as the target
//! grammars need.

use regex::Regex;

use crate::grammar::{Elem, Grammar};

pub fn tokenize(sentence: &str, grammar: &Grammar) -> Vec<String> {
    match delimiter(grammar) {
        Some(re) => split_keeping(sentence, &re),
        // No terminals anywhere, so nothing to split on beyond whitespace.
        None => sentence.split_whitespace().map(str::to_string).collect(),
    }
}

/// One alternation over every terminal of the grammar, in grammar order,
/// duplicates dropped. Every alternative already compiled on its own when
/// its rule was built, so the joined form compiles as well.
fn delimiter(grammar: &Grammar) -> Option<Regex> {
    let mut alts: Vec<String> = Vec::new();
    for rule in grammar.rules() {
        for elem in rule.rhs() {
            let alt = match elem {
                Elem::Sym(_) => continue,
                Elem::Lit(s) if s.is_empty() => continue,
                Elem::Lit(s) => regex::escape(s),
                Elem::Pat(p) => p.fragment(),
            };
            if !alts.contains(&alt) {
                alts.push(alt);
            }
        }
    }
    if alts.is_empty() {
        return None;
    }
    Regex::new(&format!("(?:{})", alts.join("|"))).ok()
}

fn split_keeping(sentence: &str, re: &Regex) -> Vec<String> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in re.find_iter(sentence) {
        push_trimmed(&mut out, &sentence[last..m.start()]);
        push_trimmed(&mut out, m.as_str());
        last = m.end();
    }
    push_trimmed(&mut out, &sentence[last..]);
    out
}

fn push_trimmed(out: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece.to_string());
    }
}
