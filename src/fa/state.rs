#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct State {
    pub name: String, // The name of the state (e.g., "S", "A", "final")
}

impl State {
    /// Create a new State
    pub fn new(name: &str) -> Self {
        State {
            name: name.to_string(),
        }
    }

    /// Create a new State from a String
    pub fn from_string(name: String) -> Self {
        State { name }
    }

    /// Get the name of the state
    pub fn get_name(&self) -> &str {
        &self.name
    }
}
