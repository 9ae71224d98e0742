use crate::error::Error;

/// The outcome of a membership query. An out-of-alphabet input symbol is a
/// distinct verdict, never conflated with `Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Accepted,
    Rejected,
    MalformedInput { symbol: char, position: usize },
}

impl Membership {
    /// Converts the verdict into a result for callers that treat malformed
    /// input as an error rather than a third outcome.
    pub fn into_result(self) -> Result<bool, Error> {
        match self {
            Membership::Accepted => Ok(true),
            Membership::Rejected => Ok(false),
            Membership::MalformedInput { symbol, position } => {
                Err(Error::MalformedInput { symbol, position })
            }
        }
    }
}

pub trait Language {
    /// Decides membership of `word` in the language of this automaton.
    fn membership(&self, word: &str) -> Membership;

    /// Checks whether the automaton accepts the given word.
    fn accepts(&self, word: &str) -> bool {
        self.membership(word) == Membership::Accepted
    }
}
