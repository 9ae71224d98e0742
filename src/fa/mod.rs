pub mod dfa;
pub mod epsilon_nfa;
pub mod nfa;
pub mod state;
