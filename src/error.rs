//! Error types for truth table construction
//!
//! Two tiers: [`TableError`] aborts a whole evaluation, while [`EvalError`]
//! only ever marks a single cell.

use std::error::Error;
use std::fmt;

/// Errors that abort building a truth table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
	/// The input was empty or contained only whitespace
	EmptyExpression,
	/// The input contained no `A`-`Z` variable
	NoVariables,
	/// The input has more distinct variables than the configured ceiling
	TooManyVariables {
		/// Number of distinct variables found in the input
		found: usize,
		/// Configured ceiling
		limit: usize,
	},
}

impl fmt::Display for TableError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TableError::EmptyExpression => write!(f, "Please enter an expression"),
			TableError::NoVariables => write!(f, "No variables found (use A-Z)"),
			TableError::TooManyVariables { found, limit } => write!(
				f,
				"Too many variables: {} found, at most {} allowed",
				found, limit
			),
		}
	}
}

impl Error for TableError {}

/// Rewriting of `→`/`↔` got stuck
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
	/// The glyph is still present but no operand pattern matches around it
	UnmatchedOperator { glyph: char, fragment: String },
}

impl fmt::Display for NormalizeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NormalizeError::UnmatchedOperator { glyph, fragment } => write!(
				f,
				"Cannot rewrite {:?}: no variable or flat group on both sides in {:?}",
				glyph, fragment
			),
		}
	}
}

impl Error for NormalizeError {}

/// Syntax errors in the primitive boolean language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
	UnexpectedToken { token: String, position: usize },
	UnexpectedEnd,
	TrailingInput { position: usize },
	/// Parentheses nested deeper than [`MAX_NESTING`](crate::prop_tree::MAX_NESTING)
	TooDeep { position: usize },
}

impl fmt::Display for ParseError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ParseError::UnexpectedToken { token, position } => {
				write!(f, "Unexpected token {:?} at position {}", token, position)
			}
			ParseError::UnexpectedEnd => write!(f, "Unexpected end of expression"),
			ParseError::TrailingInput { position } => {
				write!(f, "Unexpected input after expression at position {}", position)
			}
			ParseError::TooDeep { position } => {
				write!(f, "Parentheses nested too deeply at position {}", position)
			}
		}
	}
}

impl Error for ParseError {}

/// Failure to evaluate one subexpression under one assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
	Normalize(NormalizeError),
	Parse(ParseError),
	/// Something other than a known single-letter variable was found where a
	/// boolean literal must be substituted
	UnknownIdentifier(String),
}

impl fmt::Display for EvalError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EvalError::Normalize(e) => write!(f, "{}", e),
			EvalError::Parse(e) => write!(f, "{}", e),
			EvalError::UnknownIdentifier(ident) => write!(f, "Unknown identifier {:?}", ident),
		}
	}
}

impl Error for EvalError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			EvalError::Normalize(e) => Some(e),
			EvalError::Parse(e) => Some(e),
			EvalError::UnknownIdentifier(_) => None,
		}
	}
}

impl From<NormalizeError> for EvalError {
	fn from(err: NormalizeError) -> Self {
		EvalError::Normalize(err)
	}
}

impl From<ParseError> for EvalError {
	fn from(err: ParseError) -> Self {
		EvalError::Parse(err)
	}
}
