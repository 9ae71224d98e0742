use crate::error::Error;
use crate::fa::dfa::DFA;
use crate::fa::state::State;
use crate::language::{Language, Membership};
use hashbrown::{HashMap, HashSet};
use std::collections::{BTreeSet, VecDeque};

/// An epsilon-free nondeterministic finite automaton. Obtained from the
/// compiler's `ENFA` by closure elimination; the start-state *set* carries
/// what used to be the closure of the single start state.
#[derive(Debug, Clone)]
pub struct NFA {
    pub state_index_map: HashMap<State, usize>, // Map of state names to state indices
    pub alphabet_index_map: HashMap<char, usize>, // Map of input symbols to indices

    pub states: Vec<State>,  // List of states
    pub alphabet: Vec<char>, // Input symbols (alphabet)

    pub transitions: Vec<HashMap<usize, HashSet<usize>>>, // state -> symbol -> set of next states
    pub start_states: HashSet<usize>,                     // Start states
    pub accept_states: HashSet<usize>,                    // Accept states
}

impl NFA {
    /// Creates a new NFA
    pub fn new(
        state_index_map: HashMap<State, usize>,
        alphabet_index_map: HashMap<char, usize>,
        states: Vec<State>,
        alphabet: Vec<char>,
        transitions: Vec<HashMap<usize, HashSet<usize>>>,
        start_states: HashSet<usize>,
        accept_states: HashSet<usize>,
    ) -> Self {
        NFA {
            state_index_map,
            alphabet_index_map,
            states,
            alphabet,
            transitions,
            start_states,
            accept_states,
        }
    }

    fn _next_states(&self, states: &HashSet<usize>, symbol: usize) -> HashSet<usize> {
        let mut next_states = HashSet::new();

        for state in states {
            if let Some(next_states_set) = self.transitions[*state].get(&symbol) {
                next_states.extend(next_states_set);
            }
        }

        next_states
    }

    fn _next_subset(&self, states: &BTreeSet<usize>, symbol: usize) -> BTreeSet<usize> {
        let mut next_states = BTreeSet::new();

        for state in states {
            if let Some(next_states_set) = self.transitions[*state].get(&symbol) {
                next_states.extend(next_states_set);
            }
        }

        next_states
    }

    /// The DFA label of a subset: the sorted textual join of the member
    /// state names, so recompiling unchanged input yields identical labels.
    /// The empty subset is the dead state.
    fn subset_label(&self, subset: &BTreeSet<usize>) -> State {
        if subset.is_empty() {
            return State::new("∅");
        }
        let mut names: Vec<&str> = subset.iter().map(|&s| self.states[s].get_name()).collect();
        names.sort_unstable();
        State::from_string(format!("{{{}}}", names.join(",")))
    }

    /// The default bound on subset-construction states.
    pub fn default_state_limit(&self) -> usize {
        std::cmp::max(64, self.alphabet.len() * self.states.len())
    }

    /// Subset construction with the default state bound.
    pub fn to_deterministic(&self) -> Result<DFA, Error> {
        self.to_deterministic_bounded(self.default_state_limit())
    }

    /// Subset construction: discovers reachable subsets breadth-first,
    /// deduplicated by set equality (`BTreeSet` keys). The result is total
    /// over the alphabet; the empty subset collapses to one dead state that
    /// self-loops on every symbol and never accepts. Discovering more than
    /// `state_limit` subsets fails closed with `ResourceLimitExceeded`.
    pub fn to_deterministic_bounded(&self, state_limit: usize) -> Result<DFA, Error> {
        let mut subsets: Vec<BTreeSet<usize>> = Vec::new();
        let mut subset_ids: HashMap<BTreeSet<usize>, usize> = HashMap::new();
        let mut dfa_transitions: Vec<HashMap<usize, usize>> = Vec::new();
        let mut dfa_accept_states: HashSet<usize> = HashSet::new();

        let start_subset: BTreeSet<usize> = self.start_states.iter().cloned().collect();
        subset_ids.insert(start_subset.clone(), 0);
        subsets.push(start_subset);
        dfa_transitions.push(HashMap::new());

        let mut queue: VecDeque<usize> = VecDeque::from([0]);
        while let Some(current) = queue.pop_front() {
            let current_subset = subsets[current].clone();

            if current_subset
                .iter()
                .any(|state| self.accept_states.contains(state))
            {
                dfa_accept_states.insert(current);
            }

            for symbol in 0..self.alphabet.len() {
                let next_subset = self._next_subset(&current_subset, symbol);
                let next_id = match subset_ids.get(&next_subset) {
                    Some(&id) => id,
                    None => {
                        let id = subsets.len();
                        if id >= state_limit {
                            return Err(Error::ResourceLimitExceeded { limit: state_limit });
                        }
                        subset_ids.insert(next_subset.clone(), id);
                        subsets.push(next_subset);
                        dfa_transitions.push(HashMap::new());
                        queue.push_back(id);
                        id
                    }
                };
                dfa_transitions[current].insert(symbol, next_id);
            }
        }

        let dfa_states: Vec<State> = subsets.iter().map(|s| self.subset_label(s)).collect();
        let dfa_state_index_map: HashMap<State, usize> = dfa_states
            .iter()
            .enumerate()
            .map(|(i, state)| (state.clone(), i))
            .collect();

        Ok(DFA::new(
            dfa_state_index_map,
            self.alphabet_index_map.clone(),
            dfa_states,
            self.alphabet.clone(),
            dfa_transitions,
            0,
            dfa_accept_states,
        ))
    }
}

impl Language for NFA {
    /// Set-of-states simulation without closures (the NFA has none).
    fn membership(&self, word: &str) -> Membership {
        let mut current_states = self.start_states.clone();
        for (position, symbol) in word.chars().enumerate() {
            match self.alphabet_index_map.get(&symbol) {
                Some(&symbol_index) => {
                    current_states = self._next_states(&current_states, symbol_index);
                }
                None => {
                    return Membership::MalformedInput { symbol, position };
                }
            }
        }
        if self.accept_states.is_disjoint(&current_states) {
            Membership::Rejected
        } else {
            Membership::Accepted
        }
    }
}
