// assign.rs

use crate::directives::Directives;
use crate::error::ParseError;
use crate::parser::{split_words, QuoteType};

/// What happens to a value between the tokenizer and the sink.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ValueMode {
    /// Strip one pair of surrounding double quotes, then one pair of single
    /// quotes, then turn every escaped space into a plain space.
    #[default]
    Unquote,
    /// Pass on exactly what follows the first `=` of the tokenizer word,
    /// escape tokens and quotes included.
    Verbatim,
}

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0b' | '\x0c' | '\r')
}

fn strip_pair(value: &str, quote: QuoteType) -> &str {
    let q = quote.as_char();
    value.strip_prefix(q).and_then(|v| v.strip_suffix(q)).unwrap_or(value)
}

pub fn unquote_value(value: &str, directives: &Directives) -> String {
    let value = strip_pair(value, QuoteType::Double);
    let value = strip_pair(value, QuoteType::Single);
    let escaped_space: String = [directives.escape_token, ' '].iter().collect();
    value.replace(&escaped_space, " ")
}

/// Splits the untokenized line on its first run of horizontal whitespace.
fn split_legacy(line: &str) -> Option<(&str, &str)> {
    let start = line.find(is_separator)?;
    Some((&line[..start], line[start..].trim_start_matches(is_separator)))
}

/// Parses `KEY value` or `KEY1=VAL1 KEY2=VAL2 ...` into ordered pairs.
///
/// The form is picked by the first word: without `=` the line is in the
/// legacy form and holds exactly one pair. Variable references are left
/// untouched. Any error rejects the whole line.
pub fn assignments(line: &str, directives: &Directives, mode: ValueMode) -> Result<Vec<(String, String)>, ParseError> {
    let finish = |value: &str| match mode {
        ValueMode::Unquote => unquote_value(value, directives),
        ValueMode::Verbatim => value.to_string(),
    };

    if line.is_empty() {
        return Ok(Vec::new());
    }
    let words = split_words(line, directives);
    let Some(first) = words.first() else {
        return Ok(Vec::new());
    };

    if !first.contains('=') {
        log::debug!("legacy form: {:?}", line);
        let (key, value) = split_legacy(line).ok_or(ParseError::MustHaveTwoArguments)?;
        return Ok(vec![(key.to_string(), finish(value))]);
    }

    words
        .into_iter()
        .map(|word| match word.find('=') {
            Some(idx) => Ok((word[..idx].to_string(), finish(&word[idx + 1..]))),
            None => {
                log::debug!("no '=' in word {:?}", word);
                Err(ParseError::MissingEqualsSign { word })
            }
        })
        .collect()
}

/// Hands every pair to `sink` in discovery order. On error the sink is not
/// called at all.
pub fn parse_assignments<F>(line: &str, directives: &Directives, mode: ValueMode, mut sink: F) -> Result<(), ParseError>
where
    F: FnMut(&str, &str),
{
    for (key, value) in assignments(line, directives, mode)? {
        sink(&key, &value);
    }
    Ok(())
}

pub fn parse_raw_with_directives<F>(line: &str, directives: &Directives, sink: F) -> Result<(), ParseError>
where
    F: FnMut(&str, &str),
{
    parse_assignments(line, directives, ValueMode::Unquote, sink)
}

pub fn parse_raw<F>(line: &str, sink: F) -> Result<(), ParseError>
where
    F: FnMut(&str, &str),
{
    parse_raw_with_directives(line, &Directives::default(), sink)
}
