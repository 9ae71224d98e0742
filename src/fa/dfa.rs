use crate::fa::state::State;
use crate::language::{Language, Membership};
use hashbrown::{HashMap, HashSet};
use once_cell::sync::OnceCell;

/// A deterministic finite automaton. When produced by subset construction
/// the transition function is total over the alphabet (undefined moves go
/// to the dead state), which makes membership a plain linear walk.
#[derive(Debug, Clone)]
pub struct DFA {
    pub state_index_map: HashMap<State, usize>, // Map of state names to state indices
    pub alphabet_index_map: HashMap<char, usize>, // Map of input symbols to indices

    pub states: Vec<State>,  // List of states
    pub alphabet: Vec<char>, // Input symbols (alphabet)

    pub transitions: Vec<HashMap<usize, usize>>, // state -> symbol -> next state
    pub start_state: usize,                      // Start state
    pub accept_states: HashSet<usize>,           // Accept states

    edges: OnceCell<Vec<(State, char, State)>>, // Sorted edge list for rendering
}

impl DFA {
    /// Creates a new DFA
    pub fn new(
        state_index_map: HashMap<State, usize>,
        alphabet_index_map: HashMap<char, usize>,
        states: Vec<State>,
        alphabet: Vec<char>,
        transitions: Vec<HashMap<usize, usize>>,
        start_state: usize,
        accept_states: HashSet<usize>,
    ) -> Self {
        DFA {
            state_index_map,
            alphabet_index_map,
            states,
            alphabet,
            transitions,
            start_state,
            accept_states,
            edges: OnceCell::new(),
        }
    }

    pub fn get_start_state(&self) -> &State {
        &self.states[self.start_state]
    }

    pub fn get_accept_states(&self) -> HashSet<State> {
        HashSet::from_iter(self.accept_states.iter().map(|&s| &self.states[s]).cloned())
    }

    /// The labeled transition graph as an ordered `(source, symbol, target)`
    /// edge list, for consumption by any graph-layout tool. Ordered by
    /// source state index, then symbol, so unchanged input produces an
    /// identical list. Computed once.
    pub fn edges(&self) -> &[(State, char, State)] {
        self.edges.get_or_init(|| {
            let mut edges = Vec::new();
            for (from_index, transitions_map) in self.transitions.iter().enumerate() {
                let mut by_symbol: Vec<(char, usize)> = transitions_map
                    .iter()
                    .map(|(&symbol_index, &to_index)| (self.alphabet[symbol_index], to_index))
                    .collect();
                by_symbol.sort_unstable();
                for (symbol, to_index) in by_symbol {
                    edges.push((
                        self.states[from_index].clone(),
                        symbol,
                        self.states[to_index].clone(),
                    ));
                }
            }
            edges
        })
    }

    /// Renders the DFA as a Graphviz digraph. Deterministic for unchanged
    /// input: nodes are emitted by index, edges in `edges()` order.
    pub fn to_graphviz(&self) -> String {
        let mut output = String::from("digraph finite_state_machine {\n");
        output.push_str("\tfontname=\"Helvetica,Arial,sans-serif\"\n");
        output.push_str("\tnode [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        output.push_str("\tedge [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        output.push_str("\trankdir=LR;\n");
        // Accept states
        output.push_str("\tnode [shape = doublecircle]; ");
        let mut accept_indices: Vec<usize> = self.accept_states.iter().cloned().collect();
        accept_indices.sort_unstable();
        for state in accept_indices {
            output.push_str(&format!("{} ", state));
        }
        output.push_str(";\n");
        // Normal states
        output.push_str("\tnode [shape = circle];\n");
        for (index, state) in self.states.iter().enumerate() {
            output.push_str(&format!("\t{} [label = \"{}\"];\n", index, state.get_name()));
        }
        // Transitions
        for (from_index, transitions_map) in self.transitions.iter().enumerate() {
            let mut by_symbol: Vec<(char, usize)> = transitions_map
                .iter()
                .map(|(&symbol_index, &to_index)| (self.alphabet[symbol_index], to_index))
                .collect();
            by_symbol.sort_unstable();
            for (symbol, to_index) in by_symbol {
                output.push_str(&format!(
                    "\t{} -> {} [label = \"{}\"];\n",
                    from_index, to_index, symbol
                ));
            }
        }
        // Start state
        output.push_str("\tnull [label= \"\", shape=none,height=.0,width=.0]\n");
        output.push_str(&format!("\tnull -> {};\n", self.start_state));
        output.push_str("}\n");
        output
    }
}

impl Language for DFA {
    /// Walks the transition function one symbol at a time. Every input
    /// symbol is checked against the alphabet even after the walk dies, so
    /// malformed input is never reported as a plain rejection.
    fn membership(&self, word: &str) -> Membership {
        let mut current = Some(self.start_state);
        for (position, symbol) in word.chars().enumerate() {
            match self.alphabet_index_map.get(&symbol) {
                Some(&symbol_index) => {
                    current = current
                        .and_then(|state| self.transitions[state].get(&symbol_index).cloned());
                }
                None => {
                    return Membership::MalformedInput { symbol, position };
                }
            }
        }
        match current {
            Some(state) if self.accept_states.contains(&state) => Membership::Accepted,
            _ => Membership::Rejected,
        }
    }
}
