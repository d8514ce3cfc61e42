//! Discovery of the subexpressions that get their own truth table column
//!
//! Columns come from three sources: balanced parenthesized groups, the whole
//! expression (when it has an operator), and `neighbour glyph neighbour`
//! triples found by splitting on glyphs and parentheses. A triple is formed for
//! every glyph with a token on both sides, whatever those tokens are, so
//! `(A ∧ B) ∨ C` also yields `)∨ C`; such columns simply fail to evaluate.
//! The result is deduplicated and ordered by length, ties broken by the
//! left-most occurrence in the input.

use log::debug;

/// The logic operator glyphs, in no particular order.
pub const OPERATOR_GLYPHS: [char; 6] = ['¬', '∧', '∨', '→', '↔', '⊕'];

pub fn is_operator_glyph(c: char) -> bool {
	OPERATOR_GLYPHS.contains(&c)
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Piece {
	Operand,
	Glyph(char),
	Parenthesis,
}

// byte span into the scanned expression
#[derive(Clone, Copy, Debug)]
struct Token {
	piece: Piece,
	start: usize,
	end: usize,
}

fn push_operand(expr: &str, tokens: &mut Vec<Token>, start: Option<usize>, end: usize) {
	if let Some(start) = start {
		if !expr[start..end].trim().is_empty() {
			tokens.push(Token {
				piece: Piece::Operand,
				start,
				end,
			});
		}
	}
}

/// Split on glyphs and parentheses, dropping whitespace-only operands.
fn tokenize(expr: &str) -> Vec<Token> {
	let mut tokens = Vec::new();
	let mut operand_start: Option<usize> = None;
	for (i, ch) in expr.char_indices() {
		let piece = match ch {
			'(' | ')' => Piece::Parenthesis,
			ch if is_operator_glyph(ch) => Piece::Glyph(ch),
			_ => {
				if operand_start.is_none() {
					operand_start = Some(i);
				}
				continue;
			}
		};
		push_operand(expr, &mut tokens, operand_start.take(), i);
		tokens.push(Token {
			piece,
			start: i,
			end: i + ch.len_utf8(),
		});
	}
	push_operand(expr, &mut tokens, operand_start, expr.len());
	tokens
}

/// Candidate columns with the byte offset of their left-most occurrence.
struct Candidates {
	entries: Vec<(usize, String)>,
}

impl Candidates {
	fn add(&mut self, start: usize, text: String) {
		match self.entries.iter_mut().find(|(_, seen)| *seen == text) {
			Some(entry) => entry.0 = entry.0.min(start),
			None => self.entries.push((start, text)),
		}
	}

	fn into_sorted(self) -> Vec<String> {
		let mut entries: Vec<(usize, String)> = self
			.entries
			.into_iter()
			.filter(|(_, text)| !is_single_variable(text) && text.trim().chars().count() > 1)
			.collect();
		entries.sort_by_key(|(start, text)| (text.chars().count(), *start));
		entries.into_iter().map(|(_, text)| text).collect()
	}
}

fn is_single_variable(text: &str) -> bool {
	let mut chars = text.chars();
	matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_uppercase())
}

/// Find the subexpressions of `expr` worth a column of their own.
///
/// Never fails: unmatched `)` are skipped, unmatched `(` never close and so
/// contribute no group, and empty input gives no columns.
pub fn extract(expr: &str) -> Vec<String> {
	let mut candidates = Candidates {
		entries: Vec::new(),
	};

	let mut open: Vec<usize> = Vec::new();
	for (i, ch) in expr.char_indices() {
		match ch {
			'(' => open.push(i),
			')' => {
				if let Some(start) = open.pop() {
					let group = &expr[start..=i];
					if group.chars().count() > 2 {
						candidates.add(start, group.to_string());
					}
				}
			}
			_ => {}
		}
	}

	if expr.chars().any(is_operator_glyph) {
		candidates.add(0, expr.to_string());
	}

	// whitespace-only pieces are gone, so a triple need not be contiguous in `expr`
	let tokens = tokenize(expr);
	for (i, token) in tokens.iter().enumerate() {
		if let Piece::Glyph(_) = token.piece {
			let (prev, next) = match (i.checked_sub(1), tokens.get(i + 1)) {
				(Some(j), Some(next)) => (&tokens[j], next),
				_ => continue,
			};
			let triple = [prev, token, next]
				.iter()
				.map(|t| &expr[t.start..t.end])
				.collect::<String>();
			if triple.chars().count() >= 3 {
				candidates.add(prev.start, triple);
			}
		}
	}

	let columns = candidates.into_sorted();
	debug!("extract({:?}) => {:?}", expr, columns);
	columns
}
