//! Statement parser
//!
//! A Pratt parser that recognises type annotations and grouped columns and
//! passes every other token through untouched.

mod error;
mod parser;
mod pratt;

pub use error::{ParseError, ParseErrors};
pub use parser::Parser;
pub use pratt::{HIGHEST, LOWEST, precedence};
