use crate::grammar::Rule;
use crate::value::Val;
use crate::Error;

/// One derivation node: the production used, and one child per
/// right-hand-side position. A symbol position holds a subtree; a
/// terminal position holds the token it matched.
#[derive(Clone, PartialEq, Debug)]
pub struct Tree<'g> {
    pub rule: &'g Rule,
    pub children: Vec<Child<'g>>,
}

#[derive(Clone, PartialEq, Debug)]
pub enum Child<'g> {
    Node(Tree<'g>),
    Leaf(String),
}

impl<'g> Tree<'g> {
    /// The matched tokens, left to right.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'t>(&'t self, out: &mut Vec<&'t str>) {
        for child in &self.children {
            match child {
                Child::Leaf(token) => out.push(token),
                Child::Node(tree) => tree.collect_leaves(out),
            }
        }
    }

    /// Bottom-up fold through the rules' valuators: a leaf becomes its
    /// token as a string value, a node becomes whatever its rule's
    /// valuator makes of the child values. The parser never triggers
    /// this; callers do, after the tree is theirs.
    pub fn evaluate(&self) -> Result<Val, Error> {
        let mut values = Vec::with_capacity(self.children.len());
        for child in &self.children {
            values.push(match child {
                Child::Leaf(token) => Val::Str(token.clone()),
                Child::Node(tree) => tree.evaluate()?,
            });
        }
        self.rule.evaluate(&values)
    }
}
