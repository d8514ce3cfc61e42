use crate::config::Options;
use crate::error::{EvalError, NormalizeError, TableError};
use crate::normalize::normalize;
use crate::prop_tree::{substitute, PropTree};
use crate::subexpr::extract;
use log::{debug, trace};
use std::collections::BTreeSet;
use std::fmt;

/// Marker rendered in place of a cell that failed to evaluate.
pub const ERROR_MARKER: &str = "E";

/// Distinct `A`-`Z` letters of `expr`, alphabetically.
pub fn collect_variables(expr: &str) -> Vec<char> {
	expr.chars()
		.filter(|ch| ch.is_ascii_uppercase())
		.collect::<BTreeSet<char>>()
		.into_iter()
		.collect()
}

/// One boolean valuation of a set of variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
	variables: Vec<char>,
	values: Vec<bool>,
}

impl Assignment {
	/// Row `index` of the canonical order: the bits of `index`, most
	/// significant first, go to `variables` left to right.
	pub fn from_index(variables: &[char], index: usize) -> Assignment {
		let n = variables.len();
		Assignment {
			variables: variables.to_vec(),
			values: (0..n).map(|j| index & (1 << (n - 1 - j)) != 0).collect(),
		}
	}

	pub fn get(&self, variable: char) -> Option<bool> {
		self.variables
			.iter()
			.position(|&v| v == variable)
			.map(|i| self.values[i])
	}

	pub fn values(&self) -> &[bool] {
		&self.values
	}
}

/// All `2^n` assignments of `variables` in canonical row order.
pub fn assignments(variables: &[char]) -> impl Iterator<Item = Assignment> + '_ {
	(0..1usize << variables.len()).map(move |index| Assignment::from_index(variables, index))
}

fn evaluate_normalized(normalized: &str, assignment: &Assignment) -> Result<bool, EvalError> {
	let substituted = substitute(normalized, assignment)?;
	let tree = PropTree::from_string(&substituted)?;
	trace!("{} => {}", substituted, tree);
	Ok(tree.evaluate())
}

/// Evaluate one glyph (sub)expression under `assignment`.
pub fn evaluate_subexpression(sub: &str, assignment: &Assignment) -> Result<bool, EvalError> {
	evaluate_normalized(&normalize(sub)?, assignment)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
	Value(bool),
	Error(EvalError),
}

impl Cell {
	pub fn value(&self) -> Option<bool> {
		match self {
			Cell::Value(value) => Some(*value),
			Cell::Error(_) => None,
		}
	}

	pub fn is_error(&self) -> bool {
		matches!(self, Cell::Error(_))
	}
}

impl From<Result<bool, EvalError>> for Cell {
	fn from(result: Result<bool, EvalError>) -> Cell {
		match result {
			Ok(value) => Cell::Value(value),
			Err(err) => Cell::Error(err),
		}
	}
}

impl fmt::Display for Cell {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Cell::Value(true) => write!(f, "1"),
			Cell::Value(false) => write!(f, "0"),
			Cell::Error(_) => write!(f, "{}", ERROR_MARKER),
		}
	}
}

/// Variable bits followed by one cell per column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
	cells: Vec<Cell>,
}

impl Row {
	pub fn cells(&self) -> &[Cell] {
		&self.cells
	}
}

#[derive(Clone, Debug)]
pub struct TruthTable {
	expression: String,
	variables: Vec<char>,
	columns: Vec<String>,
	rows: Vec<Row>,
}

impl TruthTable {
	/// Build the full table for `raw`.
	///
	/// Fails as a whole only for empty input, input without variables, or more
	/// variables than `options` allows. A subexpression that cannot be
	/// evaluated yields [`Cell::Error`] cells instead.
	pub fn build(raw: &str, options: &Options) -> Result<TruthTable, TableError> {
		let expression = raw.trim();
		if expression.is_empty() {
			return Err(TableError::EmptyExpression);
		}

		let variables = collect_variables(expression);
		if variables.is_empty() {
			return Err(TableError::NoVariables);
		}
		if variables.len() > options.max_variables {
			return Err(TableError::TooManyVariables {
				found: variables.len(),
				limit: options.max_variables,
			});
		}

		let mut columns = extract(expression);
		if !columns.iter().any(|column| column == expression) && expression.chars().count() > 1 {
			columns.push(expression.to_string());
		}
		debug!(
			"table for {:?}: variables = {:?}, columns = {:?}",
			expression, variables, columns
		);

		// rewriting does not depend on the row
		let normalized: Vec<Result<String, NormalizeError>> =
			columns.iter().map(|column| normalize(column)).collect();

		let rows = assignments(&variables)
			.map(|assignment| {
				let mut cells: Vec<Cell> =
					assignment.values().iter().map(|&v| Cell::Value(v)).collect();
				for (column, normalized) in columns.iter().zip(&normalized) {
					let result = match normalized {
						Ok(normalized) => evaluate_normalized(normalized, &assignment),
						Err(err) => Err(err.clone().into()),
					};
					if let Err(err) = &result {
						debug!("{:?} under {:?}: {}", column, assignment.values(), err);
					}
					cells.push(result.into());
				}
				Row { cells }
			})
			.collect();

		Ok(TruthTable {
			expression: expression.to_string(),
			variables,
			columns,
			rows,
		})
	}

	pub fn expression(&self) -> &str {
		&self.expression
	}

	pub fn variables(&self) -> &[char] {
		&self.variables
	}

	pub fn columns(&self) -> &[String] {
		&self.columns
	}

	pub fn rows(&self) -> &[Row] {
		&self.rows
	}

	/// Column headers: the variables, then the subexpressions.
	pub fn headers(&self) -> Vec<String> {
		self.variables
			.iter()
			.map(|v| v.to_string())
			.chain(self.columns.iter().cloned())
			.collect()
	}
}

impl fmt::Display for TruthTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let variables: Vec<String> = self.variables.iter().map(|v| v.to_string()).collect();
		writeln!(f, "Expression: {}", self.expression)?;
		writeln!(f, "Variables: {}", variables.join(", "))?;

		let headers = self.headers();
		let widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
		let line = |cells: Vec<String>| {
			cells
				.iter()
				.zip(&widths)
				.map(|(cell, &width)| format!("{:^width$}", cell, width = width))
				.collect::<Vec<_>>()
				.join(" | ")
		};
		writeln!(f, "{}", line(headers.clone()))?;
		for row in &self.rows {
			writeln!(f, "{}", line(row.cells.iter().map(|c| c.to_string()).collect()))?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	use test_log::test;

	fn build(raw: &str) -> TruthTable {
		TruthTable::build(raw, &Options::default()).unwrap()
	}

	// rendered value of the last column, row by row
	fn result_column(table: &TruthTable) -> Vec<String> {
		table
			.rows()
			.iter()
			.map(|row| row.cells().last().unwrap().to_string())
			.collect()
	}

	fn column(table: &TruthTable, name: &str) -> Vec<String> {
		let offset = table.variables().len()
			+ table.columns().iter().position(|c| c == name).unwrap();
		table
			.rows()
			.iter()
			.map(|row| row.cells()[offset].to_string())
			.collect()
	}

	#[test]
	fn test_collect_variables() {
		assert_eq!(collect_variables("(C ∧ A) ∨ ¬C ∨ B"), vec!['A', 'B', 'C']);
		assert!(collect_variables("1 ∧ 0").is_empty());
	}

	#[test]
	fn test_canonical_order() {
		let variables = ['A', 'B', 'C'];
		let rows: Vec<Vec<bool>> = assignments(&variables)
			.map(|a| a.values().to_vec())
			.collect();
		assert_eq!(rows.len(), 8);
		assert_eq!(rows[0], vec![false, false, false]);
		assert_eq!(rows[1], vec![false, false, true]);
		assert_eq!(rows[5], vec![true, false, true]);
		assert_eq!(rows[7], vec![true, true, true]);
		let assignment = Assignment::from_index(&variables, 6);
		assert_eq!(assignment.get('A'), Some(true));
		assert_eq!(assignment.get('C'), Some(false));
		assert_eq!(assignment.get('D'), None);
	}

	#[test]
	fn test_shape() {
		let table = build("(A ∧ B) ∨ C");
		assert_eq!(table.rows().len(), 8);
		for row in table.rows() {
			assert_eq!(row.cells().len(), 3 + table.columns().len());
		}
		let row = &table.rows()[5];
		let bits: Vec<String> = row.cells()[..3].iter().map(|c| c.to_string()).collect();
		assert_eq!(bits, vec!["1", "0", "1"]);
	}

	#[test]
	fn test_columns_ordered() {
		let table = build("(A ∧ B) ∨ C");
		let columns = table.columns();
		let group = columns.iter().position(|c| c == "(A ∧ B)").unwrap();
		let whole = columns.iter().position(|c| c == "(A ∧ B) ∨ C").unwrap();
		assert!(group < whole);
		assert_eq!(whole, columns.len() - 1);
		for single in &["A", "B", "C"] {
			assert!(!columns.iter().any(|c| c == single));
		}
		assert_eq!(result_column(&table), vec!["0", "1", "0", "1", "0", "1", "1", "1"]);
	}

	#[test]
	fn test_negation() {
		assert_eq!(result_column(&build("¬A")), vec!["1", "0"]);
	}

	#[test]
	fn test_conjunction() {
		assert_eq!(result_column(&build("A ∧ B")), vec!["0", "0", "0", "1"]);
	}

	#[test]
	fn test_disjunction() {
		assert_eq!(result_column(&build("A ∨ B")), vec!["0", "1", "1", "1"]);
	}

	#[test]
	fn test_implication() {
		assert_eq!(result_column(&build("A → B")), vec!["1", "1", "0", "1"]);
	}

	#[test]
	fn test_biconditional() {
		assert_eq!(result_column(&build("A ↔ B")), vec!["1", "0", "0", "1"]);
	}

	#[test]
	fn test_xor() {
		assert_eq!(result_column(&build("A ⊕ B")), vec!["0", "1", "1", "0"]);
	}

	#[test]
	fn test_single_variable() {
		let table = build("A");
		assert!(table.columns().is_empty());
		assert_eq!(table.rows().len(), 2);
		assert_eq!(table.rows()[1].cells(), &[Cell::Value(true)]);
		assert_eq!(table.rows()[0].cells()[0].value(), Some(false));
	}

	#[test]
	fn test_evaluate_subexpression() {
		let assignment = Assignment::from_index(&['A', 'B'], 2);
		assert_eq!(evaluate_subexpression("A → B", &assignment), Ok(false));
		assert_eq!(evaluate_subexpression("(A ⊕ B) ∧ ¬B", &assignment), Ok(true));
		assert!(evaluate_subexpression("A ∧ C", &assignment).is_err());
	}

	#[test]
	fn test_error_cells_are_local() {
		let table = build("(A ∧ B) ∨ C");
		assert_eq!(
			table.columns(),
			&[")∨ C", "A ∧ B", "(A ∧ B)", "(A ∧ B) ∨ C"]
		);
		assert_eq!(column(&table, ")∨ C"), vec!["E"; 8]);
		assert_eq!(
			column(&table, "A ∧ B"),
			vec!["0", "0", "0", "0", "0", "0", "1", "1"]
		);
		assert_eq!(result_column(&table), vec!["0", "1", "0", "1", "0", "1", "1", "1"]);

		// `↔` cannot take a negated operand
		let table = build("A ↔ ¬B");
		assert_eq!(table.columns(), &["↔¬B", "A ↔¬", "A ↔ ¬B"]);
		for row in table.rows() {
			assert!(row.cells()[2..].iter().all(Cell::is_error));
		}
	}

	#[test]
	fn test_long_negation_chain() {
		let table = build(&("¬".repeat(100_000) + "A"));
		assert_eq!(table.rows().len(), 2);
		assert_eq!(result_column(&table), vec!["0", "1"]);
	}

	#[test]
	fn test_unbalanced_parenthesis() {
		let table = build("(A ∧ B");
		assert_eq!(column(&table, "A ∧ B"), vec!["0", "0", "0", "1"]);
		assert_eq!(result_column(&table), vec!["E"; 4]);
	}

	#[test]
	fn test_whole_errors() {
		let options = Options::default();
		assert_eq!(
			TruthTable::build("", &options).unwrap_err(),
			TableError::EmptyExpression
		);
		assert_eq!(
			TruthTable::build("  \t ", &options).unwrap_err(),
			TableError::EmptyExpression
		);
		assert_eq!(
			TruthTable::build("1 ∧ 0", &options).unwrap_err(),
			TableError::NoVariables
		);
	}

	#[test]
	fn test_variable_ceiling() {
		let options = Options::default().with_max_variables(2);
		assert_eq!(
			TruthTable::build("A ∧ B ∧ C", &options).unwrap_err(),
			TableError::TooManyVariables { found: 3, limit: 2 }
		);
		assert!(TruthTable::build("A ∧ B", &options).is_ok());
	}

	#[test]
	fn test_input_is_trimmed() {
		let table = build("  A ∧ B \n");
		assert_eq!(table.expression(), "A ∧ B");
		assert_eq!(table.columns(), &["A ∧ B"]);
	}

	#[test]
	fn test_display() {
		let rendered = build("A ∧ B").to_string();
		let lines: Vec<&str> = rendered.lines().collect();
		assert_eq!(lines[0], "Expression: A ∧ B");
		assert_eq!(lines[1], "Variables: A, B");
		assert_eq!(lines[2], "A | B | A ∧ B");
		assert_eq!(lines[3], "0 | 0 |   0  ");
		assert_eq!(lines.len(), 7);
	}
}
