// parser.rs

use crate::directives::Directives;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QuoteType { Single, Double }

impl QuoteType {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '\'' => Some(QuoteType::Single),
            '"' => Some(QuoteType::Double),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            QuoteType::Single => '\'',
            QuoteType::Double => '"',
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum State { Seeking, Word, Quote(QuoteType) }

/// Splits a line into words. Quoted spans stay part of their word together
/// with the quote characters; stripping them is left to the caller.
///
/// Outside quotes the escape token is kept along with the character it
/// escapes. Inside double quotes the same holds, while single quotes escape
/// nothing. An escape token at the very end of the line is dropped and an
/// unterminated quote simply runs to the end of the line.
pub fn split_words(line: &str, directives: &Directives) -> Vec<String> {
    let escape = directives.escape_token;
    let mut words = Vec::new();
    let mut cur = String::new();
    let mut chars = line.chars();
    let mut state = State::Seeking;
    // an explicitly quoted word may be emitted even when it is empty
    let mut blank_ok = false;
    while let Some(ch) = chars.next() {
        if state == State::Seeking {
            if ch.is_whitespace() {
                continue;
            }
            state = State::Word;
        }
        match state {
            State::Seeking | State::Word => match ch {
                c if c.is_whitespace() => {
                    if blank_ok || !cur.is_empty() {
                        log::trace!("word {:?}", cur);
                        words.push(std::mem::take(&mut cur));
                    }
                    blank_ok = false;
                    state = State::Seeking;
                }
                c if c == escape => {
                    if let Some(next) = chars.next() {
                        cur.push(c);
                        cur.push(next);
                    }
                }
                c => {
                    if let Some(quote) = QuoteType::from_char(c) {
                        state = State::Quote(quote);
                        blank_ok = true;
                    }
                    cur.push(c);
                }
            },
            State::Quote(quote) => match ch {
                c if c == quote.as_char() => {
                    cur.push(c);
                    state = State::Word;
                }
                c if c == escape && quote != QuoteType::Single => match chars.next() {
                    Some(next) => {
                        cur.push(c);
                        cur.push(next);
                    }
                    None => state = State::Word,
                },
                c => cur.push(c),
            },
        }
    }
    if blank_ok || !cur.is_empty() {
        log::trace!("word {:?}", cur);
        words.push(cur);
    }
    words
}
