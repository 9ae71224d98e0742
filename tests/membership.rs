use regram::error::Error;
use regram::grammar::grammar::Grammar;
use regram::grammar::parser::parse_grammar;
use regram::language::{Language, Membership};

fn fixture() -> Grammar {
    parse_grammar("S,A", "a,b", "S", "S -> aS | bA\nA -> bS | ε")
        .expect("fixture grammar should parse")
}

#[test]
fn test_fixture_verdicts() {
    let grammar = fixture();

    // Words of this language are a*b(ba*b)*: every derivation exits through
    // A's epsilon production right after a 'b'.
    assert_eq!(grammar.membership("b").unwrap(), Membership::Accepted);
    assert_eq!(grammar.membership("ab").unwrap(), Membership::Accepted);
    assert_eq!(grammar.membership("aab").unwrap(), Membership::Accepted);
    assert_eq!(grammar.membership("abbab").unwrap(), Membership::Accepted);

    assert_eq!(
        grammar.membership("").unwrap(),
        Membership::Rejected,
        "S has no epsilon production"
    );
    assert_eq!(grammar.membership("abbaabba").unwrap(), Membership::Rejected);
    // The legacy checker claimed this word was in the language; the automaton
    // semantics is authoritative and rejects it (after 'ab' the only live
    // continuation reads 'b').
    assert_eq!(grammar.membership("ababab").unwrap(), Membership::Rejected);
}

#[test]
fn test_nfa_and_dfa_agree() {
    let grammars = [
        fixture(),
        parse_grammar("S,A,B", "a,b", "S", "S -> aA | aB\nA -> b\nB -> bS | ε")
            .expect("parses fine"),
        parse_grammar("S,A", "a,b", "S", "S -> A | aS\nA -> ε").expect("parses fine"),
    ];
    let words = [
        "", "a", "b", "ab", "ba", "aab", "abb", "abab", "ababab", "abbab", "bbbb", "aaaa",
    ];

    for grammar in &grammars {
        let enfa = grammar.to_epsilon_automaton().expect("compiles");
        let nfa = enfa.remove_epsilon_transitions();
        let dfa = nfa.to_deterministic().expect("determinizes");
        for word in &words {
            let expected = dfa.membership(word);
            assert_eq!(
                nfa.membership(word),
                expected,
                "NFA and DFA must agree on '{}'",
                word
            );
            assert_eq!(
                enfa.membership(word),
                expected,
                "ENFA and DFA must agree on '{}'",
                word
            );
        }
    }
}

#[test]
fn test_empty_string_iff_axiom_nullable() {
    let nullable = parse_grammar("S,A", "a", "S", "S -> A | aS\nA -> ε").expect("parses fine");
    assert!(nullable.derives_empty());
    assert_eq!(nullable.membership("").unwrap(), Membership::Accepted);

    let not_nullable = fixture();
    assert!(!not_nullable.derives_empty());
    assert_eq!(not_nullable.membership("").unwrap(), Membership::Rejected);
}

#[test]
fn test_out_of_alphabet_symbol_is_malformed_input() {
    let grammar = fixture();
    assert_eq!(
        grammar.membership("axb").unwrap(),
        Membership::MalformedInput {
            symbol: 'x',
            position: 1
        }
    );
    // Even when the walk is already dead, malformed input is reported
    assert_eq!(
        grammar.membership("bax").unwrap(),
        Membership::MalformedInput {
            symbol: 'x',
            position: 2
        }
    );
}

#[test]
fn test_malformed_input_on_every_automaton_kind() {
    let grammar = fixture();
    let enfa = grammar.to_epsilon_automaton().expect("compiles");
    let nfa = enfa.remove_epsilon_transitions();
    let dfa = nfa.to_deterministic().expect("determinizes");

    let expected = Membership::MalformedInput {
        symbol: 'z',
        position: 0,
    };
    assert_eq!(enfa.membership("z"), expected);
    assert_eq!(nfa.membership("z"), expected);
    assert_eq!(dfa.membership("z"), expected);
}

#[test]
fn test_shared_prefix_scenario() {
    let grammar =
        parse_grammar("S,A,B", "a,b,c", "S", "S -> aA | aB\nA -> b\nB -> c").expect("parses fine");

    assert_eq!(grammar.membership("ab").unwrap(), Membership::Accepted);
    assert_eq!(grammar.membership("ac").unwrap(), Membership::Accepted);
    assert_eq!(
        grammar.membership("ad").unwrap(),
        Membership::MalformedInput {
            symbol: 'd',
            position: 1
        }
    );
}

#[test]
fn test_verdict_into_result() {
    assert_eq!(Membership::Accepted.into_result(), Ok(true));
    assert_eq!(Membership::Rejected.into_result(), Ok(false));
    assert_eq!(
        Membership::MalformedInput {
            symbol: 'x',
            position: 3
        }
        .into_result(),
        Err(Error::MalformedInput {
            symbol: 'x',
            position: 3
        })
    );
}

#[test]
fn test_accepts_is_accepted_only() {
    let dfa = fixture().to_dfa().expect("compiles");
    assert!(dfa.accepts("ab"));
    assert!(!dfa.accepts(""));
    assert!(!dfa.accepts("axb"), "Malformed input is not acceptance");
}
