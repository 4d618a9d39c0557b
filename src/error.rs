// error.rs

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Legacy `KEY value` form without a separator.
    #[error("must have two arguments")]
    MustHaveTwoArguments,
    /// A word without `=` in the `KEY=value` form.
    #[error("error parse word {word:?}: syntax error - can't find =. Must be of the form: name=value")]
    MissingEqualsSign { word: String },
}
