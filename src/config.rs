/// Default ceiling on distinct variables, i.e. at most 4096 rows.
pub const DEFAULT_MAX_VARIABLES: usize = 12;

/// Knobs for [`TruthTable::build`](crate::truth_table::TruthTable::build).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
	/// Inputs with more distinct variables than this are refused, since the
	/// table grows as `2^n`.
	pub max_variables: usize,
}

impl Options {
	pub fn with_max_variables(mut self, max_variables: usize) -> Options {
		self.max_variables = max_variables;
		self
	}
}

impl Default for Options {
	fn default() -> Options {
		Options {
			max_variables: DEFAULT_MAX_VARIABLES,
		}
	}
}
