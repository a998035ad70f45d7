//! Static validation for a WebAssembly-family bytecode with typed function
//! references. The crate takes a parsed module and either accepts it or
//! produces a single span-annotated diagnostic.
#![no_std]

#[macro_use]
extern crate alloc;
#[macro_use]
extern crate log;

mod error;
mod source;

pub mod free;
pub mod subtype;
pub mod syntax;

mod valid;

pub use error::{Error, Result};
pub use source::{Span, Spanned};
pub use valid::module_validate;
