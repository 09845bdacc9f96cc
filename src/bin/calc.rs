//! Integer calculator REPL over the Earley pipeline: read a line, parse
//! it with the arithmetic grammar, print the derivation tree, then fold
//! the valuators over it and print the value. Exits on end of input.

use std::io::{BufRead, Write};

use chartreuse::{parse, Elem, Grammar, Pattern, Rule, Symbol, Val};

fn int(v: &Val) -> i64 {
    v.as_int().expect("arithmetic subtrees evaluate to integers")
}

//   sum    -> sum '+' prod   | prod
//   prod   -> prod '*' factor | factor
//   factor -> '(' sum ')' | /\d+/
fn grammar() -> Grammar {
    fn rule(
        lhs: &Symbol,
        rhs: Vec<Elem>,
        valuator: impl Fn(&[Val]) -> Val + Send + Sync + 'static,
    ) -> Rule {
        Rule::with_valuator(lhs.clone(), rhs, valuator).expect("calculator rules are non-empty")
    }

    let sum = Symbol::named("sum");
    let prod = Symbol::named("prod");
    let factor = Symbol::named("factor");
    let number = Pattern::new(r"\d+", "").expect("the number pattern compiles");

    let mut g = Grammar::empty();
    g.add(rule(
        &sum,
        vec![sum.clone().into(), "+".into(), prod.clone().into()],
        |v| Val::Int(int(&v[0]) + int(&v[2])),
    ));
    g.add(rule(&sum, vec![prod.clone().into()], |v| v[0].clone()));
    g.add(rule(
        &prod,
        vec![prod.clone().into(), "*".into(), factor.clone().into()],
        |v| Val::Int(int(&v[0]) * int(&v[2])),
    ));
    g.add(rule(&prod, vec![factor.clone().into()], |v| v[0].clone()));
    g.add(rule(
        &factor,
        vec!["(".into(), sum.clone().into(), ")".into()],
        |v| v[1].clone(),
    ));
    g.add(rule(&factor, vec![number.into()], |v| {
        Val::Int(v[0].as_str().and_then(|s| s.parse().ok()).unwrap_or(0))
    }));
    g
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let g = grammar();
    let stdin = std::io::stdin();
    let mut out = std::io::stdout();

    loop {
        write!(out, "> ").and_then(|()| out.flush()).expect("stdout is writable");
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // end of input
            Ok(_) => {}
            Err(e) => {
                eprintln!("read error: {}", e);
                break;
            }
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse(line, &g) {
            Ok(tree) => {
                print!("{}", tree);
                match tree.evaluate() {
                    Ok(val) => println!("= {}", val),
                    Err(e) => eprintln!("evaluation failed: {}", e),
                }
            }
            Err(e) => eprintln!("{}", e),
        }
    }
}
