//! Truth tables for propositional logic expressions written with the glyphs
//! `¬ ∧ ∨ → ↔ ⊕` over the variables `A`-`Z`.
//!
//! ```
//! use proptable::config::Options;
//! use proptable::truth_table::TruthTable;
//!
//! let table = TruthTable::build("(A ∧ B) ∨ C", &Options::default()).unwrap();
//! assert_eq!(table.variables(), &['A', 'B', 'C']);
//! assert_eq!(table.rows().len(), 8);
//! assert_eq!(table.columns().last().unwrap(), "(A ∧ B) ∨ C");
//! ```

pub mod config;
pub mod error;
pub mod normalize;
pub mod prop_tree;
pub mod subexpr;
pub mod truth_table;
