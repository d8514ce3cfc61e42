use crate::error::{EvalError, ParseError};
use crate::truth_table::Assignment;
use plex::lexer;
use std::fmt;

/// Deepest parenthesis nesting [`PropTree::from_string`] accepts.
pub const MAX_NESTING: usize = 256;

/// Tree over the primitive boolean language produced by
/// [`normalize`](crate::normalize::normalize) once every variable has been
/// replaced by a literal.
///
/// Grammar, loosest binding first, all binary operators left-associative:
///
/// ```text
/// equality    := disjunction (("==" | "!=") disjunction)*
/// disjunction := conjunction ("||" conjunction)*
/// conjunction := unary ("&&" unary)*
/// unary       := "!" unary | primary
/// primary     := "true" | "false" | "(" equality ")"
/// ```
///
/// Identifiers are not part of the grammar, so nothing but literal logic can
/// ever be evaluated.
#[derive(Clone, Debug)]
pub struct PropTree {
	// children always precede their parent, the root is last
	nodes: Vec<LexicalUnit>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LexicalUnit {
	Constant(bool),
	Not(usize),
	And(usize, usize),
	Or(usize, usize),
	Equal(usize, usize),
	NotEqual(usize, usize),
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
	Whitespace,
	Literal(bool),
	Ident(String),
	LeftParenthesis,
	RightParenthesis,
	Not,
	And,
	Or,
	Equal,
	NotEqual,
	Unexpected(String),
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Token::Whitespace => write!(f, " "),
			Token::Literal(value) => write!(f, "{}", value),
			Token::Ident(string) | Token::Unexpected(string) => write!(f, "{}", string),
			Token::LeftParenthesis => write!(f, "("),
			Token::RightParenthesis => write!(f, ")"),
			Token::Not => write!(f, "!"),
			Token::And => write!(f, "&&"),
			Token::Or => write!(f, "||"),
			Token::Equal => write!(f, "=="),
			Token::NotEqual => write!(f, "!="),
		}
	}
}

lexer! {
	fn next_token(text: 'a) -> Token;

	r#"[ \t\r\n]+"# => Token::Whitespace,
	r#"true"# => Token::Literal(true),
	r#"false"# => Token::Literal(false),
	r#"[A-Za-z_][A-Za-z0-9_]*"# => Token::Ident(text.to_owned()),
	r#"\("# => Token::LeftParenthesis,
	r#"\)"# => Token::RightParenthesis,
	r#"!="# => Token::NotEqual,
	r#"=="# => Token::Equal,
	r#"!"# => Token::Not,
	r#"\&\&"# => Token::And,
	r#"\|\|"# => Token::Or,
	r#"."# => Token::Unexpected(text.to_owned()),
}

// tokens paired with their byte offset
fn tokenize(string: &str) -> Vec<(Token, usize)> {
	let mut tokens = Vec::new();
	let mut remaining = string;
	while let Some((token, new_remaining)) = next_token(remaining) {
		tokens.push((token, string.len() - remaining.len()));
		remaining = new_remaining;
	}
	if !remaining.is_empty() {
		tokens.push((
			Token::Unexpected(remaining.to_owned()),
			string.len() - remaining.len(),
		));
	}
	tokens
}

/// Replace every variable of `normalized` by the literal it takes under
/// `assignment`.
///
/// Only single uppercase letters bound by `assignment` are replaced; any other
/// identifier is refused rather than passed through.
pub fn substitute(normalized: &str, assignment: &Assignment) -> Result<String, EvalError> {
	let mut result = String::with_capacity(normalized.len());
	for (token, _) in tokenize(normalized) {
		let token = match token {
			Token::Ident(name) => {
				let mut chars = name.chars();
				let value = match (chars.next(), chars.next()) {
					(Some(ch), None) => assignment.get(ch),
					_ => None,
				};
				match value {
					Some(value) => Token::Literal(value),
					None => return Err(EvalError::UnknownIdentifier(name)),
				}
			}
			token => token,
		};
		result += &token.to_string();
	}
	Ok(result)
}

struct Parser {
	tokens: Vec<(Token, usize)>,
	cursor: usize,
	depth: usize,
	tree: PropTree,
}

impl Parser {
	fn peek(&self) -> Option<&Token> {
		self.tokens.get(self.cursor).map(|(token, _)| token)
	}

	fn unexpected(&self) -> ParseError {
		match self.tokens.get(self.cursor) {
			Some((token, position)) => ParseError::UnexpectedToken {
				token: token.to_string(),
				position: *position,
			},
			None => ParseError::UnexpectedEnd,
		}
	}

	fn parse_equality(&mut self) -> Result<usize, ParseError> {
		let mut left = self.parse_disjunction()?;
		loop {
			let equal = match self.peek() {
				Some(Token::Equal) => true,
				Some(Token::NotEqual) => false,
				_ => return Ok(left),
			};
			self.cursor += 1;
			let right = self.parse_disjunction()?;
			left = self.tree.push_node(if equal {
				LexicalUnit::Equal(left, right)
			} else {
				LexicalUnit::NotEqual(left, right)
			});
		}
	}

	fn parse_disjunction(&mut self) -> Result<usize, ParseError> {
		let mut left = self.parse_conjunction()?;
		while let Some(Token::Or) = self.peek() {
			self.cursor += 1;
			let right = self.parse_conjunction()?;
			left = self.tree.push_node(LexicalUnit::Or(left, right));
		}
		Ok(left)
	}

	fn parse_conjunction(&mut self) -> Result<usize, ParseError> {
		let mut left = self.parse_unary()?;
		while let Some(Token::And) = self.peek() {
			self.cursor += 1;
			let right = self.parse_unary()?;
			left = self.tree.push_node(LexicalUnit::And(left, right));
		}
		Ok(left)
	}

	fn parse_unary(&mut self) -> Result<usize, ParseError> {
		let mut negations = 0;
		while let Some(Token::Not) = self.peek() {
			self.cursor += 1;
			negations += 1;
		}
		let mut operand = self.parse_primary()?;
		for _ in 0..negations {
			operand = self.tree.push_node(LexicalUnit::Not(operand));
		}
		Ok(operand)
	}

	fn parse_primary(&mut self) -> Result<usize, ParseError> {
		match self.peek() {
			Some(Token::Literal(value)) => {
				let value = *value;
				self.cursor += 1;
				Ok(self.tree.push_node(LexicalUnit::Constant(value)))
			}
			Some(Token::LeftParenthesis) => {
				if self.depth == MAX_NESTING {
					return Err(ParseError::TooDeep {
						position: self.tokens[self.cursor].1,
					});
				}
				self.depth += 1;
				self.cursor += 1;
				let inner = self.parse_equality()?;
				self.depth -= 1;
				match self.peek() {
					Some(Token::RightParenthesis) => {
						self.cursor += 1;
						Ok(inner)
					}
					_ => Err(self.unexpected()),
				}
			}
			_ => Err(self.unexpected()),
		}
	}
}

impl PropTree {
	fn new() -> PropTree {
		PropTree { nodes: Vec::new() }
	}

	fn push_node(&mut self, l_unit: LexicalUnit) -> usize {
		let id = self.nodes.len();
		self.nodes.push(l_unit);
		id
	}

	/// Parse a fully substituted primitive expression.
	pub fn from_string(string: &str) -> Result<PropTree, ParseError> {
		let tokens = tokenize(string)
			.into_iter()
			.filter(|(token, _)| *token != Token::Whitespace)
			.collect();
		let mut parser = Parser {
			tokens,
			cursor: 0,
			depth: 0,
			tree: PropTree::new(),
		};
		parser.parse_equality()?;
		if let Some((_, position)) = parser.tokens.get(parser.cursor) {
			return Err(ParseError::TrailingInput {
				position: *position,
			});
		}
		Ok(parser.tree)
	}

	pub fn evaluate(&self) -> bool {
		let mut values: Vec<bool> = Vec::with_capacity(self.nodes.len());
		for node in &self.nodes {
			let value = match *node {
				LexicalUnit::Constant(value) => value,
				LexicalUnit::Not(a) => !values[a],
				LexicalUnit::And(a, b) => values[a] && values[b],
				LexicalUnit::Or(a, b) => values[a] || values[b],
				LexicalUnit::Equal(a, b) => values[a] == values[b],
				LexicalUnit::NotEqual(a, b) => values[a] != values[b],
			};
			values.push(value);
		}
		values.last().copied().unwrap_or(false)
	}
}

// prefix notation: "&(1 !0)"
impl fmt::Display for PropTree {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut strings: Vec<String> = Vec::with_capacity(self.nodes.len());
		for node in &self.nodes {
			let string = match *node {
				LexicalUnit::Constant(true) => "1".to_string(),
				LexicalUnit::Constant(false) => "0".to_string(),
				LexicalUnit::Not(a) => "!".to_string() + &std::mem::take(&mut strings[a]),
				LexicalUnit::And(a, b) => binary_string("&", &mut strings, a, b),
				LexicalUnit::Or(a, b) => binary_string("|", &mut strings, a, b),
				LexicalUnit::Equal(a, b) => binary_string("=", &mut strings, a, b),
				LexicalUnit::NotEqual(a, b) => binary_string("^", &mut strings, a, b),
			};
			strings.push(string);
		}
		write!(f, "{}", strings.last().map(String::as_str).unwrap_or(""))
	}
}

// every node has exactly one parent, so its string can be moved out
fn binary_string(op: &str, strings: &mut [String], a: usize, b: usize) -> String {
	let a = std::mem::take(&mut strings[a]);
	let b = std::mem::take(&mut strings[b]);
	format!("{}({} {})", op, a, b)
}
