use std::error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed rule text (e.g. a line without a `->` separator).
    Parse { line: usize, message: String },
    /// A symbol is used but not declared, or the declarations themselves
    /// are inconsistent. `line` is `None` for declaration-list errors.
    Declaration { line: Option<usize>, message: String },
    /// A production body is not right-linear and cannot be compiled.
    Structural { production: String },
    /// The input of a membership query contains a symbol outside the alphabet.
    MalformedInput { symbol: char, position: usize },
    /// Subset construction exceeded the configured state bound.
    ResourceLimitExceeded { limit: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse { line, message } => {
                write!(f, "Parse error on line {}: {}", line, message)
            }
            Error::Declaration {
                line: Some(line),
                message,
            } => write!(f, "Declaration error on line {}: {}", line, message),
            Error::Declaration {
                line: None,
                message,
            } => write!(f, "Declaration error: {}", message),
            Error::Structural { production } => {
                write!(f, "Production '{}' is not right-linear", production)
            }
            Error::MalformedInput { symbol, position } => write!(
                f,
                "Input symbol '{}' at position {} is not in the alphabet",
                symbol, position
            ),
            Error::ResourceLimitExceeded { limit } => {
                write!(f, "Determinization exceeded the bound of {} states", limit)
            }
        }
    }
}

impl error::Error for Error {}
