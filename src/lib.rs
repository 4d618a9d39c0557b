// lib.rs

//! Parser for environment assignment lines such as the body of a
//! Dockerfile `ENV` instruction. Both `KEY value` and
//! `KEY1=VAL1 KEY2=VAL2 ...` are accepted. Variable references are kept as
//! written; expanding them is up to the caller.

mod assign;
mod directives;
mod env;
mod error;
mod parser;

pub use assign::{assignments, parse_assignments, parse_raw, parse_raw_with_directives, unquote_value, ValueMode};
pub use directives::{Directives, DEFAULT_ESCAPE_TOKEN};
pub use env::{parse, parse_multi, parse_multi_with_directives, parse_with_directives, Env, Merge};
pub use error::ParseError;
pub use parser::{split_words, QuoteType};
