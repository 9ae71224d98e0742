use crate::error::Error;
use crate::grammar::grammar::{Body, Grammar, SymbolIndex};
use crate::grammar::terminal::{is_epsilon_token, Terminal};
use crate::grammar::variable::Variable;
use hashbrown::HashSet;
use smallvec::SmallVec;

/// Parses a comma-separated list of single-character symbols.
fn parse_symbol_list(text: &str, what: &str) -> Result<Vec<char>, Error> {
    let mut symbols = Vec::new();
    let mut seen: HashSet<char> = HashSet::new();
    for item in text.split(',') {
        let item = item.trim();
        let mut chars = item.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => {
                if !seen.insert(symbol) {
                    return Err(Error::Declaration {
                        line: None,
                        message: format!("duplicate {} '{}'", what, symbol),
                    });
                }
                symbols.push(symbol);
            }
            _ => {
                return Err(Error::Declaration {
                    line: None,
                    message: format!("{} list item '{}' is not a single symbol", what, item),
                });
            }
        }
    }
    Ok(symbols)
}

/// Parses the four declaration strings of a grammar into a validated
/// `Grammar`. Pure: no state is touched, and the first error wins — no
/// partially filled grammar is ever returned.
///
/// `rules` is newline-separated, one left-hand side per non-blank line:
/// `S -> aS | bA`. An alternative equal to a reserved epsilon token denotes
/// the empty body; otherwise every character of the alternative is one
/// symbol. Repeated left-hand sides accumulate their alternatives in source
/// order.
pub fn parse_grammar(
    variables: &str,
    terminals: &str,
    axiom: &str,
    rules: &str,
) -> Result<Grammar, Error> {
    let variable_chars = parse_symbol_list(variables, "variable")?;
    let terminal_chars = parse_symbol_list(terminals, "terminal")?;
    for symbol in &terminal_chars {
        if variable_chars.contains(symbol) {
            return Err(Error::Declaration {
                line: None,
                message: format!("'{}' is declared both as a variable and a terminal", symbol),
            });
        }
    }

    let grammar_variables: Vec<Variable> = variable_chars.iter().map(|&c| Variable::new(c)).collect();
    let grammar_terminals: Vec<Terminal> = terminal_chars.iter().map(|&c| Terminal::new(c)).collect();

    let axiom = axiom.trim();
    let mut axiom_chars = axiom.chars();
    let axiom_index = match (axiom_chars.next(), axiom_chars.next()) {
        (Some(symbol), None) => match variable_chars.iter().position(|&v| v == symbol) {
            Some(index) => index,
            None => {
                return Err(Error::Declaration {
                    line: None,
                    message: format!("axiom '{}' is not a declared variable", symbol),
                });
            }
        },
        _ => {
            return Err(Error::Declaration {
                line: None,
                message: format!("axiom '{}' is not a single symbol", axiom),
            });
        }
    };

    let mut productions: Vec<Vec<Body>> = vec![Vec::new(); grammar_variables.len()];
    for (index, raw_line) in rules.lines().enumerate() {
        let line = index + 1;
        let text = raw_line.trim();
        if text.is_empty() {
            continue;
        }

        let (lhs, rhs) = match text.split_once("->") {
            Some(parts) => parts,
            None => {
                return Err(Error::Parse {
                    line,
                    message: "missing '->' separator".to_string(),
                });
            }
        };

        let lhs = lhs.trim();
        let mut lhs_chars = lhs.chars();
        let head = match (lhs_chars.next(), lhs_chars.next()) {
            (Some(symbol), None) => match variable_chars.iter().position(|&v| v == symbol) {
                Some(head) => head,
                None => {
                    return Err(Error::Declaration {
                        line: Some(line),
                        message: format!("left-hand side '{}' is not a declared variable", symbol),
                    });
                }
            },
            _ => {
                return Err(Error::Parse {
                    line,
                    message: format!("left-hand side '{}' must be a single variable", lhs),
                });
            }
        };

        for alternative in rhs.split('|') {
            let alternative = alternative.trim();
            if alternative.is_empty() {
                return Err(Error::Parse {
                    line,
                    message: "empty alternative (use an epsilon token for the empty body)"
                        .to_string(),
                });
            }
            if is_epsilon_token(alternative) {
                productions[head].push(SmallVec::new());
                continue;
            }
            let mut body: Body = SmallVec::new();
            for symbol in alternative.chars() {
                if let Some(index) = variable_chars.iter().position(|&v| v == symbol) {
                    body.push(SymbolIndex::Variable(index));
                } else if let Some(index) = terminal_chars.iter().position(|&t| t == symbol) {
                    body.push(SymbolIndex::Terminal(index));
                } else {
                    return Err(Error::Declaration {
                        line: Some(line),
                        message: format!(
                            "symbol '{}' is neither a declared variable nor a terminal",
                            symbol
                        ),
                    });
                }
            }
            productions[head].push(body);
        }
    }

    Ok(Grammar::new(
        grammar_variables,
        grammar_terminals,
        axiom_index,
        productions,
    ))
}
