use crate::fa::nfa::NFA;
use crate::fa::state::State;
use crate::language::{Language, Membership};
use hashbrown::{HashMap, HashSet};

/// A nondeterministic finite automaton with silent (epsilon) transitions.
/// This is what the grammar compiler produces: silent hops stand in for the
/// "no further input" moves into variable states and the synthetic final
/// state.
#[derive(Debug, Clone)]
pub struct ENFA {
    pub state_index_map: HashMap<State, usize>, // Map of state names to state indices
    pub alphabet_index_map: HashMap<char, usize>, // Map of input symbols to indices

    pub states: Vec<State>,  // List of states
    pub alphabet: Vec<char>, // Input symbols (alphabet)

    pub transitions: Vec<HashMap<usize, HashSet<usize>>>, // state -> symbol -> set of next states
    pub epsilon_transitions: Vec<HashSet<usize>>,         // state -> set of silently reachable states
    pub start_state: usize,                               // Start state
    pub accept_states: HashSet<usize>,                    // Accept states
}

impl ENFA {
    /// Creates an ENFA with no states. A start state must be set before the
    /// automaton is simulated.
    pub fn new() -> Self {
        ENFA {
            state_index_map: HashMap::new(),
            alphabet_index_map: HashMap::new(),
            states: vec![],
            alphabet: vec![],
            transitions: vec![],
            epsilon_transitions: vec![],
            start_state: 0,
            accept_states: HashSet::new(),
        }
    }

    /// Interns a state, growing the transition tables alongside.
    fn intern_state(&mut self, state: &State) -> usize {
        match self.state_index_map.get(state) {
            Some(&index) => index,
            None => {
                let index = self.states.len();
                self.state_index_map.insert(state.clone(), index);
                self.states.push(state.clone());
                self.transitions.push(HashMap::new());
                self.epsilon_transitions.push(HashSet::new());
                index
            }
        }
    }

    /// Interns an alphabet symbol.
    fn intern_symbol(&mut self, symbol: char) -> usize {
        match self.alphabet_index_map.get(&symbol) {
            Some(&index) => index,
            None => {
                let index = self.alphabet.len();
                self.alphabet_index_map.insert(symbol, index);
                self.alphabet.push(symbol);
                index
            }
        }
    }

    /// Registers a state, fixing its index by registration order.
    pub fn add_state(&mut self, state: State) {
        self.intern_state(&state);
    }

    /// Registers an alphabet symbol without adding any transition on it. The
    /// determinized automaton is total over every registered symbol, used or
    /// not.
    pub fn add_alphabet_symbol(&mut self, symbol: char) {
        self.intern_symbol(symbol);
    }

    /// Sets the start state
    pub fn set_start_state(&mut self, start_state: State) {
        let start_index = self.intern_state(&start_state);
        self.start_state = start_index;
    }

    /// Adds a new accept state
    pub fn add_accept_state(&mut self, accept_state: State) {
        let accept_index = self.intern_state(&accept_state);
        self.accept_states.insert(accept_index);
    }

    /// Adds a transition from state `from` to state `to` on input `symbol`
    pub fn add_transition(&mut self, from: &State, symbol: char, to: &State) {
        let from_index = self.intern_state(from);
        let to_index = self.intern_state(to);
        let symbol_index = self.intern_symbol(symbol);

        self.transitions[from_index]
            .entry(symbol_index)
            .or_insert_with(HashSet::new)
            .insert(to_index);
    }

    /// Adds a silent transition from state `from` to state `to`
    pub fn add_epsilon_transition(&mut self, from: &State, to: &State) {
        let from_index = self.intern_state(from);
        let to_index = self.intern_state(to);

        self.epsilon_transitions[from_index].insert(to_index);
    }

    /// Epsilon-closure: all states reachable from the given set using only
    /// silent transitions.
    fn _epsilon_closure(&self, states: HashSet<usize>) -> HashSet<usize> {
        let mut closure = states.clone();
        let mut stack: Vec<usize> = Vec::from_iter(states);

        while let Some(state) = stack.pop() {
            for &next_state in &self.epsilon_transitions[state] {
                if closure.insert(next_state) {
                    stack.push(next_state);
                }
            }
        }

        closure
    }

    /// Computes the epsilon-closure of a set of states
    pub fn epsilon_closure(&self, states: &HashSet<State>) -> HashSet<State> {
        self._epsilon_closure(states.iter().map(|s| self.state_index_map[s]).collect())
            .iter()
            .map(|&s| self.states[s].clone())
            .collect()
    }

    /// Computes the next states based on the current states and input symbol
    fn _next_states(&self, states: &HashSet<usize>, symbol: usize) -> HashSet<usize> {
        let mut next_states = HashSet::new();

        for state in states {
            if let Some(next_states_set) = self.transitions[*state].get(&symbol) {
                next_states.extend(next_states_set);
            }
        }

        next_states
    }

    /// Computes an equivalent NFA without silent transitions: each state
    /// inherits the symbol transitions and the acceptance of every state in
    /// its epsilon-closure.
    pub fn remove_epsilon_transitions(&self) -> NFA {
        let start_states = self._epsilon_closure(HashSet::from([self.start_state]));
        let mut final_states = self.accept_states.clone();

        let mut new_transitions = vec![HashMap::new(); self.states.len()];
        for state in 0..self.states.len() {
            let closure = self._epsilon_closure(HashSet::from([state]));
            for closure_state in closure {
                for (sym, next_states) in self.transitions[closure_state].iter() {
                    new_transitions[state]
                        .entry(*sym)
                        .or_insert_with(HashSet::new)
                        .extend(next_states);
                }
                // If the closure reaches an accept state, the state itself accepts
                if self.accept_states.contains(&closure_state) {
                    final_states.insert(state);
                }
            }
        }

        NFA::new(
            self.state_index_map.clone(),
            self.alphabet_index_map.clone(),
            self.states.clone(),
            self.alphabet.clone(),
            new_transitions,
            start_states,
            final_states,
        )
    }
}

impl Language for ENFA {
    /// Set-of-states simulation: start with the closure of the start state,
    /// advance the whole set on each input symbol, re-close, and accept iff
    /// the final set intersects the accept states.
    fn membership(&self, word: &str) -> Membership {
        let mut current_states = self._epsilon_closure(HashSet::from([self.start_state]));
        for (position, symbol) in word.chars().enumerate() {
            match self.alphabet_index_map.get(&symbol) {
                Some(&symbol_index) => {
                    current_states = self._next_states(&current_states, symbol_index);
                    current_states = self._epsilon_closure(current_states);
                }
                None => {
                    return Membership::MalformedInput { symbol, position };
                }
            }
        }
        if current_states
            .iter()
            .any(|state| self.accept_states.contains(state))
        {
            Membership::Accepted
        } else {
            Membership::Rejected
        }
    }
}
