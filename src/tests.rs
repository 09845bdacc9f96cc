use crate::*;

macro_rules! assert_matches {
    ($e:expr, $p:pat) => {
        let v = $e;
        if let $p = v { } else {
            panic!("assert fail {:?} does not match pattern {}", v, stringify!($p));
        }
    }
}

mod grammar;

/// The calculator grammar, sans valuators:
///
///   sum    -> sum '+' prod   | prod
///   prod   -> prod '*' factor | factor
///   factor -> '(' sum ')' | /\d+/
pub(crate) fn arith() -> Grammar {
    let mut g = Grammar::empty();
    g.add_text("sum -> sum '+' prod").unwrap();
    g.add_text("sum -> prod").unwrap();
    g.add_text("prod -> prod '*' factor").unwrap();
    g.add_text("prod -> factor").unwrap();
    g.add_text("factor -> '(' sum ')'").unwrap();
    g.add_text(r"factor -> /\d+/").unwrap();
    g
}

/// A deliberately self-entangled grammar: left recursive in two rules,
/// with a bare-number base case.
pub(crate) fn knotted() -> Grammar {
    let mut g = Grammar::empty();
    g.add_text("factor -> factor factor").unwrap();
    g.add_text(r#"factor -> factor "+""#).unwrap();
    g.add_text(r"factor -> /\d+/").unwrap();
    g
}

/// Toy English, word literals all the way down.
pub(crate) fn english() -> Grammar {
    let mut g = Grammar::empty();
    g.add_text("s -> np vp").unwrap();
    g.add_text("np -> 'the' n").unwrap();
    g.add_text("np -> n").unwrap();
    g.add_text("vp -> v np").unwrap();
    g.add_text("n -> 'dog'").unwrap();
    g.add_text("n -> 'cat'").unwrap();
    g.add_text("v -> 'sees'").unwrap();
    g
}
