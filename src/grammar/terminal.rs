use hashbrown::HashSet;
use std::fmt;

/// A single-character terminal symbol drawn from the declared alphabet.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Terminal {
    pub name: char,
}

/// The reserved spellings of the empty production body in rule text.
pub const EPSILON_SYMBOLS: [&str; 5] = ["epsilon", "ε", "ϵ", "Є", "$"];

lazy_static! {
    static ref EPSILON_TOKENS: HashSet<&'static str> = HashSet::from_iter(EPSILON_SYMBOLS);
}

/// Whether a rule-text token denotes the empty body.
pub fn is_epsilon_token(token: &str) -> bool {
    EPSILON_TOKENS.contains(token)
}

impl Terminal {
    /// Create a new Terminal
    pub fn new(name: char) -> Self {
        Terminal { name }
    }

    /// Get the character of the terminal
    pub fn get_name(&self) -> char {
        self.name
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
