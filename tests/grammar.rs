use regram::error::Error;
use regram::fa::state::State;
use regram::grammar::grammar::Grammar;
use regram::grammar::parser::parse_grammar;
use regram::language::Language;

fn fixture() -> Grammar {
    parse_grammar("S,A", "a,b", "S", "S -> aS | bA\nA -> bS | ε")
        .expect("fixture grammar should parse")
}

#[test]
fn test_compile_creates_variable_and_final_states() {
    let enfa = fixture().to_epsilon_automaton().expect("fixture compiles");

    assert!(
        enfa.state_index_map.contains_key(&State::new("S")),
        "One state per variable: S"
    );
    assert!(
        enfa.state_index_map.contains_key(&State::new("A")),
        "One state per variable: A"
    );
    assert!(
        enfa.state_index_map.contains_key(&State::new("final")),
        "The synthetic accepting state exists"
    );
    assert_eq!(
        enfa.states[enfa.start_state],
        State::new("S"),
        "The axiom's state is the start state"
    );
    assert_eq!(
        enfa.alphabet,
        vec!['a', 'b'],
        "The automaton alphabet is the declared alphabet, in order"
    );
}

#[test]
fn test_compiled_enfa_accepts_the_language() {
    let enfa = fixture().to_epsilon_automaton().expect("fixture compiles");

    assert!(enfa.accepts("ab"), "S => aS => abA => ab");
    assert!(enfa.accepts("b"), "S => bA => b");
    assert!(enfa.accepts("abbab"), "S => aS => abA => abbS => abbaS => abbabA");
    assert!(!enfa.accepts(""), "S has no epsilon production");
    assert!(!enfa.accepts("a"), "Every word of this language ends in b");
}

#[test]
fn test_structural_error_on_embedded_variable() {
    // Terminal after the trailing variable: aSb is not right-linear
    let grammar = parse_grammar("S", "a,b", "S", "S -> aSb").expect("parses fine");
    match grammar.to_epsilon_automaton() {
        Err(Error::Structural { production }) => {
            assert_eq!(production, "S -> aSb", "The offending production is named")
        }
        other => panic!("Expected a structural error, got {:?}", other),
    }
}

#[test]
fn test_structural_error_on_two_variables() {
    let grammar = parse_grammar("S,A", "a", "S", "S -> AA").expect("parses fine");
    assert!(
        matches!(grammar.to_epsilon_automaton(), Err(Error::Structural { .. })),
        "Two variables in one body are outside the right-linear shape"
    );
}

#[test]
fn test_structural_error_precedes_construction() {
    // The second production is malformed; compilation must fail as a whole
    let grammar = parse_grammar("S,A", "a,b", "S", "S -> aA\nA -> aAb").expect("parses fine");
    assert!(grammar.to_epsilon_automaton().is_err());
    assert!(grammar.to_dfa().is_err(), "No partial automaton is produced");
}

#[test]
fn test_variable_without_productions_is_a_dead_end() {
    let grammar = parse_grammar("S,A", "a", "S", "S -> aA").expect("parses fine");
    let dfa = grammar.to_dfa().expect("compiles");
    assert!(
        !dfa.accepts("a"),
        "A has no productions, so nothing is derivable through it"
    );
    assert!(!dfa.accepts(""), "S has no epsilon production");
}

#[test]
fn test_nullable_chain() {
    // The axiom derives the empty string through a chain of unit productions
    let grammar = parse_grammar("S,A,B", "a", "S", "S -> A | aS\nA -> B\nB -> ε")
        .expect("parses fine");
    assert!(grammar.derives_empty(), "S => A => B => ε");
    let dfa = grammar.to_dfa().expect("compiles");
    assert!(dfa.accepts(""), "The empty string is in the language");
    assert!(dfa.accepts("aa"), "S => aS => aaS => aaA => aaB => aa");
}

#[test]
fn test_fixture_does_not_derive_empty() {
    assert!(!fixture().derives_empty(), "Neither S nor its chain is nullable");
}

#[test]
fn test_shared_prefix_compiles_to_nondeterminism() {
    let grammar =
        parse_grammar("S,A,B", "a,b,c", "S", "S -> aA | aB\nA -> b\nB -> c").expect("parses fine");
    let nfa = grammar
        .to_epsilon_automaton()
        .expect("compiles")
        .remove_epsilon_transitions();

    let s_index = nfa.state_index_map[&State::new("S")];
    let a_symbol = nfa.alphabet_index_map[&'a'];
    let targets = &nfa.transitions[s_index][&a_symbol];
    assert_eq!(
        targets.len(),
        2,
        "Both alternatives of S start with 'a' and must stay distinct in the NFA"
    );
}
