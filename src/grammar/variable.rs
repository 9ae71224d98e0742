use std::fmt;

/// A single-character non-terminal symbol (e.g. 'S', 'A').
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Variable {
    pub name: char,
}

impl Variable {
    /// Create a new Variable
    pub fn new(name: char) -> Self {
        Variable { name }
    }

    /// Get the character of the variable
    pub fn get_name(&self) -> char {
        self.name
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
