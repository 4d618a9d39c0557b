// directives.rs

pub const DEFAULT_ESCAPE_TOKEN: char = '\\';

/// Parser state shared by the tokenizer and the assignment parser for the
/// duration of a single parse call.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Directives {
    pub escape_token: char,
}

impl Default for Directives {
    fn default() -> Self {
        Self { escape_token: DEFAULT_ESCAPE_TOKEN }
    }
}

impl Directives {
    pub fn new(escape_token: char) -> Self {
        Self { escape_token }
    }

    /// Reads a `# escape=<char>` parser directive. Anything else, including
    /// a directive whose value is not exactly one character, yields `None`.
    pub fn from_directive_line(line: &str) -> Option<Self> {
        let body = line.trim_start().strip_prefix('#')?;
        let (name, value) = body.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("escape") {
            return None;
        }
        let mut chars = value.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(token), None) => Some(Self::new(token)),
            _ => None,
        }
    }
}
