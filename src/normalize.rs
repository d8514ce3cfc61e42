//! Rewriting of glyph expressions into the primitive boolean language
//!
//! `→` and `↔` are rewritten textually, one left-most match at a time, then the
//! remaining glyphs are substituted one for one:
//!
//! | glyph | primitive |
//! |-------|-----------|
//! | `¬`   | `!`       |
//! | `∧`   | `&&`      |
//! | `∨`   | `\|\|`    |
//! | `⊕`   | `!=`      |
//!
//! An operand of `→`/`↔` must be a single variable or a parenthesized group
//! without nested parentheses. Anything else (`¬A ↔ B`, `A → ((B))`) is left
//! unmatched and reported as [`NormalizeError::UnmatchedOperator`].

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::error::NormalizeError;

const OPERAND_PATTERN: &str = r"(\([^()]+\)|[A-Z])";

lazy_static! {
	static ref IMPLICATION_PATTERN: Regex =
		Regex::new(&format!(r"{}\s*→\s*{}", OPERAND_PATTERN, OPERAND_PATTERN)).unwrap();
	static ref BICONDITIONAL_PATTERN: Regex =
		Regex::new(&format!(r"{}\s*↔\s*{}", OPERAND_PATTERN, OPERAND_PATTERN)).unwrap();
}

/// Rewrite every occurrence of `glyph` using `pattern`.
///
/// Each successful replacement removes exactly one `glyph`, so the loop runs at
/// most once per occurrence.
fn rewrite_all(
	mut expr: String,
	glyph: char,
	pattern: &Regex,
	replacement: &str,
) -> Result<String, NormalizeError> {
	while expr.contains(glyph) {
		if !pattern.is_match(&expr) {
			return Err(NormalizeError::UnmatchedOperator {
				glyph,
				fragment: expr,
			});
		}
		let rewritten = pattern.replace(&expr, replacement).into_owned();
		trace!("rewrite {:?}: {:?} => {:?}", glyph, expr, rewritten);
		expr = rewritten;
	}
	Ok(expr)
}

/// Translate a glyph expression (or a fragment of one) into the primitive
/// boolean language understood by [`PropTree`](crate::prop_tree::PropTree).
///
/// Variables are left in place. Already normalized text comes back unchanged.
pub fn normalize(fragment: &str) -> Result<String, NormalizeError> {
	let expr = rewrite_all(
		fragment.to_string(),
		'→',
		&IMPLICATION_PATTERN,
		"((!${1}) || ${2})",
	)?;
	let expr = rewrite_all(expr, '↔', &BICONDITIONAL_PATTERN, "(${1} == ${2})")?;
	Ok(expr
		.replace('¬', "!")
		.replace('∧', "&&")
		.replace('∨', "||")
		.replace('⊕', "!="))
}

#[cfg(test)]
mod test {
	use super::*;

	use test_log::test;

	#[test]
	fn test_primitive_glyphs() {
		assert_eq!(normalize("¬A ∧ B").unwrap(), "!A && B");
		assert_eq!(normalize("A ∨ B").unwrap(), "A || B");
		assert_eq!(normalize("A ⊕ B").unwrap(), "A != B");
	}

	#[test]
	fn test_implication() {
		assert_eq!(normalize("A → B").unwrap(), "((!A) || B)");
		assert_eq!(normalize("(A ∧ B)→C").unwrap(), "((!(A && B)) || C)");
	}

	#[test]
	fn test_nested_implication() {
		// The outer arrow is matched first, the inner one on the next pass.
		assert_eq!(
			normalize("(A → B) → C").unwrap(),
			"((!(((!A) || B))) || C)"
		);
	}

	#[test]
	fn test_biconditional() {
		assert_eq!(normalize("A ↔ B").unwrap(), "(A == B)");
		assert_eq!(normalize("(A ∨ B) ↔ C").unwrap(), "((A || B) == C)");
	}

	#[test]
	fn test_unmatched_operand() {
		let err = normalize("¬A ↔ ¬B").unwrap_err();
		assert!(matches!(
			err,
			NormalizeError::UnmatchedOperator { glyph: '↔', .. }
		));
		assert!(normalize("A →").is_err());
		assert!(normalize("((A)) → B").is_err());
		// A rewritten implication is a nested group, which `↔` cannot take.
		assert!(normalize("(A → B) ↔ C").is_err());
	}

	#[test]
	fn test_idempotent() {
		for input in &["A → B", "(A ↔ B) ∧ ¬C", "A ⊕ (B ∨ C)", "A"] {
			let once = normalize(input).unwrap();
			assert_eq!(normalize(&once).unwrap(), once);
		}
	}
}
