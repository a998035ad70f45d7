use crate::source::Span;
use alloc::string::String;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// A validation diagnostic: one message pinned to a source span. Validation
/// aborts at the first violation, so at most one of these is ever produced
/// per module.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{at}: {message}")]
pub struct Error {
	pub at: Span,
	pub message: String,
}

pub(crate) fn error<T>(at: Span, message: impl Into<String>) -> Result<T> {
	Err(Error { at, message: message.into() })
}

pub(crate) fn require(b: bool, at: Span, message: impl Into<String>) -> Result<()> {
	if b {
		Ok(())
	} else {
		error(at, message)
	}
}
