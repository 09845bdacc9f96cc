use crate::*;

use super::arith;

#[test]
fn empty_rhs_is_rejected() {
    let a = Symbol::named("a");
    assert_matches!(Rule::new(a, vec![]), Err(Error::EmptyRhs { .. }));
}

#[test]
fn rhs_order_is_preserved() {
    let a = Symbol::named("a");
    let b = Symbol::named("b");
    let rule = Rule::new(a, vec![b.clone().into(), "+".into(), b.into()]).unwrap();
    assert_eq!(rule.rhs().len(), 3);
    assert_matches!(&rule.rhs()[0], Elem::Sym(_));
    assert_matches!(&rule.rhs()[1], Elem::Lit(_));
    assert_matches!(&rule.rhs()[2], Elem::Sym(_));
}

#[test]
fn symbols_share_names_but_not_identity() {
    let a1 = Symbol::named("a");
    let a2 = Symbol::named("a");
    assert_ne!(a1, a2);
    assert_eq!(a1, a1.clone());
    assert_eq!(a1.name(), Some("a"));
    assert_eq!(Symbol::anon().name(), None);
}

#[test]
fn symbol_table_in_first_appearance_order() {
    let g = arith();
    let table = g.symbols().unwrap();
    let names: Vec<&str> = table.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["sum", "prod", "factor"]);
}

#[test]
fn symbol_table_rejects_aliased_names() {
    let mut g = Grammar::empty();
    g.add(Rule::new(Symbol::named("x"), vec!["a".into()]).unwrap());
    g.add(Rule::new(Symbol::named("x"), vec!["b".into()]).unwrap());
    assert_matches!(g.symbols(), Err(Error::DuplicateSymbolName(_)));
}

#[test]
fn one_symbol_used_twice_is_fine() {
    let x = Symbol::named("x");
    let mut g = Grammar::empty();
    g.add(Rule::new(x.clone(), vec!["a".into()]).unwrap());
    g.add(Rule::new(x.clone(), vec![x.clone().into(), "b".into()]).unwrap());
    let table = g.symbols().unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.get("x"), Some(&x));
}

#[test]
fn text_rules_reuse_symbols_by_name() {
    let mut g = Grammar::empty();
    g.add_text("a -> b b").unwrap();
    g.add_text("b -> 'x'").unwrap();
    let rules = g.rules();
    // Both b occurrences in the first rule, and the lhs of the second,
    // are one identity.
    let b_first = rules[0].rhs()[0].as_sym().unwrap();
    let b_second = rules[0].rhs()[1].as_sym().unwrap();
    assert_eq!(b_first, b_second);
    assert_eq!(b_first, rules[1].lhs());
}

#[test]
fn text_rule_word_shapes() {
    let mut g = Grammar::empty();
    g.add_text(r#"r -> /\d+/i 'lit' "also" plain"#).unwrap();
    let rhs = g.rules()[0].rhs();
    match &rhs[0] {
        Elem::Pat(p) => {
            assert_eq!(p.source(), r"\d+");
            assert_eq!(p.flags(), "i");
        }
        other => panic!("expected a pattern, got {:?}", other),
    }
    assert_eq!(rhs[1], Elem::Lit("lit".to_string()));
    assert_eq!(rhs[2], Elem::Lit("also".to_string()));
    assert_matches!(&rhs[3], Elem::Sym(_));
}

#[test]
fn text_rule_separator_errors() {
    let mut g = Grammar::empty();
    assert_matches!(g.add_text("no separator here"), Err(Error::MissingArrow(_)));
    assert_matches!(g.add_text("-> x"), Err(Error::EmptySide { side: "left", .. }));
    assert_matches!(g.add_text("x ->  "), Err(Error::EmptySide { side: "right", .. }));
    assert!(g.rules().is_empty());
}

#[test]
fn bad_pattern_reports_the_source() {
    let mut g = Grammar::empty();
    assert_matches!(g.add_text(r"r -> /(/"), Err(Error::BadPattern { .. }));
}

#[test]
fn pattern_flag_gate() {
    // `q` is not a host-regex flag, so the word is a symbol name, not a
    // pattern.
    let mut g = Grammar::empty();
    g.add_text("r -> /x/q").unwrap();
    assert_matches!(&g.rules()[0].rhs()[0], Elem::Sym(_));
}

#[test]
fn pattern_is_a_full_match() {
    let p = Pattern::new(r"\d+", "").unwrap();
    assert!(p.matches("23"));
    assert!(!p.matches("23x"));
    assert!(!p.matches(""));

    let ci = Pattern::new("abc", "i").unwrap();
    assert!(ci.matches("ABC"));
    assert!(!ci.matches("ABCD"));
}

#[test]
fn evaluate_without_valuator_is_unit() {
    let rule = Rule::new(Symbol::named("a"), vec!["x".into()]).unwrap();
    assert_eq!(rule.evaluate(&[Val::from("x")]).unwrap(), Val::Unit);
}

#[test]
fn evaluate_checks_arity() {
    let rule = Rule::with_valuator(Symbol::named("a"), vec!["x".into()], |_| Val::Unit).unwrap();
    assert_matches!(rule.evaluate(&[]), Err(Error::Arity { expected: 1, got: 0, .. }));
}

#[test]
fn evaluate_forwards_positionally() {
    let rule = Rule::with_valuator(
        Symbol::named("pair"),
        vec!["a".into(), "b".into()],
        |v| v[1].clone(),
    )
    .unwrap();
    let out = rule.evaluate(&[Val::from("first"), Val::from("second")]).unwrap();
    assert_eq!(out, Val::from("second"));
}

#[test]
fn rules_render_like_their_source_text() {
    let g = arith();
    assert_eq!(g.rules()[0].to_string(), "sum -> sum '+' prod");
    assert_eq!(g.rules()[5].to_string(), r"factor -> /\d+/");
}
