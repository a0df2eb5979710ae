use std::error;
use std::fmt;
use std::result;

/// A broken red-black tree invariant, as reported by `Tree::validate`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Violation {
    /// The root is red.
    RedRoot,
    /// A red node has a red child.
    RedRedLink,
    /// Two paths from the same node reach nil leaves through different numbers of black nodes.
    BlackHeightMismatch,
    /// A key is out of order with respect to the comparator.
    OrderViolation,
    /// A child does not point back at its parent.
    BrokenParentLink,
    /// A subtree size counter does not match the number of nodes below it.
    SizeMismatch,
    /// The tree length does not match the number of reachable nodes.
    LengthMismatch,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Violation::RedRoot => "root is red",
            Violation::RedRedLink => "red node has a red child",
            Violation::BlackHeightMismatch => "black height is not uniform",
            Violation::OrderViolation => "keys are out of order",
            Violation::BrokenParentLink => "child does not link back to its parent",
            Violation::SizeMismatch => "subtree size counter is stale",
            Violation::LengthMismatch => "length does not match reachable nodes",
        };
        f.write_str(message)
    }
}

#[derive(Debug)]
pub enum Error {
    SerdeError(bincode::Error),
    InvariantViolation(Violation),
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Error {
        Error::SerdeError(err)
    }
}

impl From<Violation> for Error {
    fn from(violation: Violation) -> Error {
        Error::InvariantViolation(violation)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::SerdeError(error) => Some(error),
            Error::InvariantViolation(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SerdeError(error) => write!(f, "{}", error),
            Error::InvariantViolation(violation) => write!(f, "invariant violation: {}", violation),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
