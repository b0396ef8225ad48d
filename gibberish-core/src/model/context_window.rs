use std::collections::VecDeque;

use super::Token;

/// Fixed-capacity ordered window over the most recently seen tokens.
///
/// # Invariants
/// - `len() <= capacity()`, except for a window built by `seeded` with more
///   tokens than its capacity; each `push` then evicts one token and the
///   window never grows
/// - Tokens are kept oldest first
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextWindow {
	capacity: usize,
	tokens: VecDeque<Token>,
}

impl ContextWindow {
	/// Creates an empty window holding at most `capacity` tokens.
	pub fn new(capacity: usize) -> Self {
		Self { capacity, tokens: VecDeque::with_capacity(capacity) }
	}

	/// Creates a window holding every token of `tokens`, even beyond
	/// `capacity`. Nothing is dropped until the first `push`.
	pub fn seeded<I, T>(capacity: usize, tokens: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<Token>,
	{
		Self { capacity, tokens: tokens.into_iter().map(Into::into).collect() }
	}

	/// Appends `token`, evicting and returning the oldest token if the
	/// window would exceed its capacity.
	pub fn push(&mut self, token: Token) -> Option<Token> {
		if self.capacity == 0 && self.tokens.is_empty() {
			return Some(token);
		}
		self.tokens.push_back(token);
		if self.tokens.len() > self.capacity {
			self.tokens.pop_front()
		} else {
			None
		}
	}

	/// Removes and returns the oldest token.
	pub fn pop_oldest(&mut self) -> Option<Token> {
		self.tokens.pop_front()
	}

	/// Current window contents, oldest first.
	pub fn contents(&mut self) -> &[Token] {
		self.tokens.make_contiguous()
	}

	/// Copies the current contents into an owned context key.
	pub fn to_context(&self) -> Vec<Token> {
		self.tokens.iter().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	pub fn is_full(&self) -> bool {
		self.tokens.len() >= self.capacity
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}
}
