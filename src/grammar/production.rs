use crate::grammar::terminal::Terminal;
use crate::grammar::variable::Variable;
use smallvec::SmallVec;
use std::fmt;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Symbol {
    T(Terminal),
    V(Variable),
}

/// One alternative of a variable: the head and an ordered body. An empty
/// body is the epsilon production.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Production {
    pub head: Variable,                // The head of the production (e.g., 'S')
    pub body: SmallVec<[Symbol; 4]>,   // The body of the production (e.g., "aS")
}

impl Production {
    /// Create a new Production
    pub fn new(head: Variable, body: SmallVec<[Symbol; 4]>) -> Self {
        Production { head, body }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> ", self.head)?;
        if self.body.is_empty() {
            return write!(f, "ε");
        }
        for symbol in &self.body {
            match symbol {
                Symbol::T(t) => write!(f, "{}", t)?,
                Symbol::V(v) => write!(f, "{}", v)?,
            }
        }
        Ok(())
    }
}
