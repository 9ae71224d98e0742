use crate::error::Error;
use crate::fa::dfa::DFA;
use crate::fa::epsilon_nfa::ENFA;
use crate::fa::state::State;
use crate::grammar::production::{Production, Symbol};
use crate::grammar::terminal::Terminal;
use crate::grammar::variable::Variable;
use crate::language::{Language, Membership};
use hashbrown::HashSet;
use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolIndex {
    Terminal(usize),
    Variable(usize),
}

/// One production body, as indices into the grammar's symbol tables.
pub type Body = SmallVec<[SymbolIndex; 4]>;

/// A validated right-linear grammar. Immutable once built: any edit to the
/// source text goes through the parser again and produces a fresh value.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub variables: Vec<Variable>, // Declared non-terminals
    pub terminals: Vec<Terminal>, // Declared alphabet

    variable_index_map: FxHashMap<char, usize>, // Maps variable characters to indices
    terminal_index_map: FxHashMap<char, usize>, // Maps terminal characters to indices

    pub axiom: usize,                  // Start variable
    pub productions: Vec<Vec<Body>>,   // Alternatives per variable, in source order

    nullable: OnceCell<HashSet<usize>>, // Variables that derive the empty string
}

/// Name of the synthetic accepting state. Multi-character, so it cannot
/// collide with a single-character variable state.
const FINAL_STATE: &str = "final";

impl Grammar {
    /// Creates a grammar from already-validated parts. The parser is the
    /// usual entry point; callers constructing a grammar directly must keep
    /// the axiom and every production symbol within the declared tables.
    pub fn new(
        variables: Vec<Variable>,
        terminals: Vec<Terminal>,
        axiom: usize,
        productions: Vec<Vec<Body>>,
    ) -> Self {
        let variable_index_map =
            FxHashMap::from_iter(variables.iter().enumerate().map(|(i, v)| (v.get_name(), i)));
        let terminal_index_map =
            FxHashMap::from_iter(terminals.iter().enumerate().map(|(i, t)| (t.get_name(), i)));
        Grammar {
            variables,
            terminals,
            variable_index_map,
            terminal_index_map,
            axiom,
            productions,
            nullable: OnceCell::new(),
        }
    }

    /// Returns the index of a declared variable
    pub fn variable_index(&self, name: char) -> Option<usize> {
        self.variable_index_map.get(&name).cloned()
    }

    /// Returns the index of a declared terminal
    pub fn terminal_index(&self, name: char) -> Option<usize> {
        self.terminal_index_map.get(&name).cloned()
    }

    /// Returns the axiom (start variable) of the grammar
    pub fn get_axiom(&self) -> Variable {
        self.variables[self.axiom]
    }

    fn body_to_production(&self, head: usize, body: &Body) -> Production {
        Production::new(
            self.variables[head],
            body.iter()
                .map(|symbol_index| match symbol_index {
                    SymbolIndex::Terminal(index) => Symbol::T(self.terminals[*index]),
                    SymbolIndex::Variable(index) => Symbol::V(self.variables[*index]),
                })
                .collect(),
        )
    }

    /// Returns the production rules for a given variable, in source order
    pub fn get_productions_of(&self, variable: &Variable) -> Vec<Production> {
        match self.variable_index(variable.get_name()) {
            Some(index) => self.productions[index]
                .iter()
                .map(|body| self.body_to_production(index, body))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Returns all production rules of the grammar, in source order
    pub fn get_productions(&self) -> Vec<Production> {
        let mut all_productions = Vec::new();
        for (head, bodies) in self.productions.iter().enumerate() {
            for body in bodies {
                all_productions.push(self.body_to_production(head, body));
            }
        }
        all_productions
    }

    /// The variables that derive the empty string, directly through an
    /// epsilon production or through a chain of unit productions ending in
    /// one. Computed once by fixpoint.
    pub fn nullable_variables(&self) -> &HashSet<usize> {
        self.nullable.get_or_init(|| {
            let mut nullable: HashSet<usize> = HashSet::new();
            let mut changed = true;
            while changed {
                changed = false;
                for (head, bodies) in self.productions.iter().enumerate() {
                    if nullable.contains(&head) {
                        continue;
                    }
                    for body in bodies {
                        let derives_empty = match body.as_slice() {
                            [] => true,
                            [SymbolIndex::Variable(tail)] => nullable.contains(tail),
                            _ => false,
                        };
                        if derives_empty {
                            nullable.insert(head);
                            changed = true;
                            break;
                        }
                    }
                }
            }
            nullable
        })
    }

    /// Whether the empty string belongs to the language of the grammar
    pub fn derives_empty(&self) -> bool {
        self.nullable_variables().contains(&self.axiom)
    }

    /// Splits a body into its leading terminal run and optional trailing
    /// variable, or fails if the body is not right-linear.
    fn right_linear_split(
        &self,
        head: usize,
        body: &Body,
    ) -> Result<(Vec<usize>, Option<usize>), Error> {
        let mut terminals = Vec::new();
        let mut tail = None;
        for (position, symbol) in body.iter().enumerate() {
            match symbol {
                SymbolIndex::Terminal(index) => {
                    if tail.is_some() {
                        // A symbol after the trailing variable breaks the shape
                        return Err(Error::Structural {
                            production: self.body_to_production(head, body).to_string(),
                        });
                    }
                    terminals.push(*index);
                }
                SymbolIndex::Variable(index) => {
                    if position != body.len() - 1 {
                        return Err(Error::Structural {
                            production: self.body_to_production(head, body).to_string(),
                        });
                    }
                    tail = Some(*index);
                }
            }
        }
        Ok((terminals, tail))
    }

    fn variable_state(&self, index: usize) -> State {
        State::from_string(self.variables[index].get_name().to_string())
    }

    /// Compiles the grammar into an ENFA over the declared alphabet: one
    /// state per variable plus the synthetic accepting state. Each body
    /// becomes a chain of fresh states consuming its terminal run; the final
    /// hop enters the trailing variable's state silently, or the accepting
    /// state for purely-terminal and empty bodies. Fails with a structural
    /// error before any construction if some body is not right-linear.
    pub fn to_epsilon_automaton(&self) -> Result<ENFA, Error> {
        // Validate every body first so no partial automaton can escape
        let mut split_productions: Vec<Vec<(Vec<usize>, Option<usize>)>> =
            Vec::with_capacity(self.productions.len());
        for (head, bodies) in self.productions.iter().enumerate() {
            let mut splits = Vec::with_capacity(bodies.len());
            for body in bodies {
                splits.push(self.right_linear_split(head, body)?);
            }
            split_productions.push(splits);
        }

        let mut enfa = ENFA::new();
        // Variable states first, in declaration order, then the final state
        for index in 0..self.variables.len() {
            enfa.add_state(self.variable_state(index));
        }
        let final_state = State::new(FINAL_STATE);
        enfa.set_start_state(self.variable_state(self.axiom));
        enfa.add_accept_state(final_state.clone());
        for terminal in &self.terminals {
            enfa.add_alphabet_symbol(terminal.get_name());
        }

        let mut fresh = 0;
        for (head, splits) in split_productions.iter().enumerate() {
            let head_state = self.variable_state(head);
            for (terminals, tail) in splits {
                if terminals.is_empty() {
                    // Epsilon production or unit production: one silent hop
                    let target = match tail {
                        Some(variable) => self.variable_state(*variable),
                        None => final_state.clone(),
                    };
                    enfa.add_epsilon_transition(&head_state, &target);
                    continue;
                }
                let mut current = head_state.clone();
                for (position, terminal) in terminals.iter().enumerate() {
                    let last = position == terminals.len() - 1;
                    let next = if last && tail.is_none() {
                        final_state.clone()
                    } else {
                        fresh += 1;
                        State::from_string(format!("t{}", fresh))
                    };
                    enfa.add_transition(&current, self.terminals[*terminal].get_name(), &next);
                    current = next;
                }
                if let Some(variable) = tail {
                    enfa.add_epsilon_transition(&current, &self.variable_state(*variable));
                }
            }
        }

        Ok(enfa)
    }

    /// The full pipeline: compile, eliminate silent transitions, determinize
    /// with the default state bound.
    pub fn to_dfa(&self) -> Result<DFA, Error> {
        self.to_epsilon_automaton()?
            .remove_epsilon_transitions()
            .to_deterministic()
    }

    /// Decides membership of a word directly from the grammar by running the
    /// full compilation pipeline.
    pub fn membership(&self, word: &str) -> Result<Membership, Error> {
        Ok(self.to_dfa()?.membership(word))
    }
}
