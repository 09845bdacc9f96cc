use crate::grammar::{Elem, Grammar, Pattern, Rule, Symbol};
use crate::tree::{Child, Tree};
use crate::value::Val;

impl std::fmt::Display for Symbol {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(w, "{}", name),
            None => write!(w, "_"),
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(w, "/{}/{}", self.source(), self.flags())
    }
}

impl std::fmt::Display for Elem {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Elem::Sym(s) => write!(w, "{}", s),
            Elem::Lit(s) => write!(w, "'{}'", s),
            Elem::Pat(p) => write!(w, "{}", p),
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(w, "{} ->", self.lhs())?;
        for elem in self.rhs() {
            write!(w, " {}", elem)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Grammar {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        for rule in self.rules() {
            writeln!(w, "{}", rule)?;
        }
        Ok(())
    }
}

/// Indented rendering, one line per node or leaf; what the calculator
/// prints back at you.
impl std::fmt::Display for Tree<'_> {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        fmt_at(self, w, 0)
    }
}

fn fmt_at(tree: &Tree<'_>, w: &mut std::fmt::Formatter, depth: usize) -> std::fmt::Result {
    indent(w, depth)?;
    writeln!(w, "{}", tree.rule)?;
    for child in &tree.children {
        match child {
            Child::Node(sub) => fmt_at(sub, w, depth + 1)?,
            Child::Leaf(token) => {
                indent(w, depth + 1)?;
                writeln!(w, "\"{}\"", token)?;
            }
        }
    }
    Ok(())
}

fn indent(w: &mut std::fmt::Formatter, depth: usize) -> std::fmt::Result {
    for _ in 0..depth {
        write!(w, "  ")?;
    }
    Ok(())
}

impl std::fmt::Display for Val {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Unit => write!(w, "()"),
            Val::Bool(b) => write!(w, "{:?}", b),
            Val::Int(n) => write!(w, "{}", n),
            Val::Str(s) => write!(w, "\"{}\"", s),
        }
    }
}
