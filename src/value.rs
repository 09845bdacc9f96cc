//! The value model valuators fold over. The parser proper never touches
//! these; they exist so a caller can turn a derivation tree into numbers
//! (the calculator does) or whatever else its grammar's valuators
//! compute.

use derive_more::From;

#[derive(Clone, PartialEq, Eq, Debug, From)]
pub enum Val {
    /// What a rule without a valuator evaluates to.
    Unit,
    Bool(bool),
    Int(i64),
    Str(String),
}

impl From<&str> for Val { fn from(s: &str) -> Val { Val::Str(s.to_string()) } }

impl Val {
    pub fn as_int(&self) -> Option<i64> {
        if let Val::Int(n) = self { Some(*n) } else { None }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Val::Str(s) = self { Some(s) } else { None }
    }
}
