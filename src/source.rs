use core::fmt;

/// A source-relative byte range. Spans are carried on every syntax node and
/// used only to attribute diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
	pub start: usize,
	pub end: usize,
}

impl Span {
	pub fn new(start: usize, end: usize) -> Self {
		Span { start, end }
	}
}

impl fmt::Display for Span {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "0x{:x}..0x{:x}", self.start, self.end)
	}
}

/// A syntax node: a payload plus the span it was parsed from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Spanned<T> {
	pub it: T,
	pub at: Span,
}

impl<T> Spanned<T> {
	pub fn new(it: T, at: Span) -> Self {
		Spanned { it, at }
	}
}
