// env.rs

//! Ordered key to value(s) map filled by the assignment parser.
//!
//! The two merge policies also differ in what they store. A replacing map
//! keeps unquoted values, so `myDog=Rex\ The\ Dog` gives `Rex The Dog`. An
//! appending map keeps the tokenizer value verbatim and the same line gives
//! `Rex\ The\ Dog`. Only the replacing map round-trips through `Display`.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::assign::{parse_assignments, ValueMode};
use crate::directives::Directives;
use crate::error::ParseError;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Merge {
    /// `insert` overwrites, one value per key.
    #[default]
    Replace,
    /// `insert` appends to the values already stored under the key.
    Append,
}

impl Merge {
    fn value_mode(self) -> ValueMode {
        match self {
            Merge::Replace => ValueMode::Unquote,
            Merge::Append => ValueMode::Verbatim,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Env {
    merge: Merge,
    entries: IndexMap<String, Vec<String>>,
}

impl Env {
    pub fn new(merge: Merge) -> Self {
        Self { merge, entries: IndexMap::new() }
    }
    pub fn replacing() -> Self {
        Self::new(Merge::Replace)
    }
    pub fn appending() -> Self {
        Self::new(Merge::Append)
    }
    pub fn merge(&self) -> Merge {
        self.merge
    }

    /// Sets the key to value, replacing any existing values.
    pub fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), vec![value.to_string()]);
    }

    /// Appends the value to any existing values of the key.
    pub fn add(&mut self, key: &str, value: &str) {
        self.entries.entry(key.to_string()).or_default().push(value.to_string());
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        match self.merge {
            Merge::Replace => self.set(key, value),
            Merge::Append => self.add(key, value),
        }
    }

    pub fn del(&mut self, key: &str) -> Option<Vec<String>> {
        self.entries.shift_remove(key)
    }

    /// First value stored for the key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(|values| values.first()).map(String::as_str)
    }

    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Parses one line into this map according to its merge policy. A
    /// rejected line leaves the map untouched.
    pub fn parse_line(&mut self, line: &str, directives: &Directives) -> Result<(), ParseError> {
        let mode = self.merge.value_mode();
        parse_assignments(line, directives, mode, |key, value| self.insert(key, value))
    }
}

/// Wraps a value in double quotes, escaping only `"` and `\` so that every
/// other character, combining marks included, is written as is.
fn quote_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if matches!(ch, '"' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .entries
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| format!("{}={}", key, quote_value(value))))
            .join(" ");
        f.write_str(&rendered)
    }
}

impl FromStr for Env {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

pub fn parse_with_directives(line: &str, directives: &Directives) -> Result<Env, ParseError> {
    let mut env = Env::replacing();
    env.parse_line(line, directives)?;
    Ok(env)
}

/// Parses a line into a replacing map with unquoted values.
pub fn parse(line: &str) -> Result<Env, ParseError> {
    parse_with_directives(line, &Directives::default())
}

pub fn parse_multi_with_directives(line: &str, directives: &Directives) -> Result<Env, ParseError> {
    let mut env = Env::appending();
    env.parse_line(line, directives)?;
    Ok(env)
}

/// Parses a line into an appending map with verbatim values.
pub fn parse_multi(line: &str) -> Result<Env, ParseError> {
    parse_multi_with_directives(line, &Directives::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_and_add_appends() {
        let mut env = Env::replacing();
        env.set("a", "1");
        env.set("a", "2");
        assert_eq!(env.get_all("a"), ["2"]);

        env.add("a", "3");
        assert_eq!(env.get_all("a"), ["2", "3"]);
        assert_eq!(env.get("a"), Some("2"));
    }

    #[test]
    fn insert_follows_policy() {
        let mut replacing = Env::replacing();
        let mut appending = Env::appending();
        for env in [&mut replacing, &mut appending] {
            env.insert("k", "x");
            env.insert("k", "y");
        }
        assert_eq!(replacing.get_all("k"), ["y"]);
        assert_eq!(appending.get_all("k"), ["x", "y"]);
    }

    #[test]
    fn del_keeps_remaining_order() {
        let mut env = Env::replacing();
        env.set("a", "1");
        env.set("b", "2");
        env.set("c", "3");
        assert_eq!(env.del("b"), Some(vec!["2".to_string()]));
        assert_eq!(env.del("b"), None);
        assert_eq!(env.keys().collect::<Vec<_>>(), vec!["a", "c"]);
        assert!(env.get_all("b").is_empty());
    }

    #[test]
    fn keys_keep_first_seen_order() {
        let env = parse("b=1 a=2 b=3").unwrap();
        assert_eq!(env.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(env.get("b"), Some("3"));
    }

    #[test]
    fn renders_quoted_pairs() {
        let env = parse(r#"foo="bar" mycat="a b ""#).unwrap();
        assert_eq!(env.to_string(), r#"foo="bar" mycat="a b ""#);
        assert_eq!(Env::replacing().to_string(), "");
    }

    #[test]
    fn rendering_round_trips() {
        let env = parse(r"foo=bar myDog=Rex\ The\ Dog path=/usr/lib:/opt").unwrap();
        let again: Env = env.to_string().parse().unwrap();
        assert_eq!(again, env);
    }

    #[test]
    fn non_ascii_values_round_trip() {
        let mut env = Env::replacing();
        env.set("NAME", "cafe\u{301}");
        env.set("NBSP", "a\u{a0}b");
        env.set("CJK", "日本 語");
        assert_eq!(env.to_string(), "NAME=\"cafe\u{301}\" NBSP=\"a\u{a0}b\" CJK=\"日本 語\"");
        assert_eq!(parse(&env.to_string()), Ok(env));
    }

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        assert_eq!(quote_value(r#"a"b\c"#), r#""a\"b\\c""#);
    }

    #[test]
    fn multi_keeps_every_value_verbatim() {
        let env = parse_multi(r#"k=1 myDog=Rex\ The\ Dog k="2""#).unwrap();
        assert_eq!(env.merge(), Merge::Append);
        assert_eq!(env.get_all("k"), ["1", r#""2""#]);
        assert_eq!(env.get("myDog"), Some(r"Rex\ The\ Dog"));
    }

    #[test]
    fn rejected_line_leaves_map_untouched() {
        let mut env = parse("a=1").unwrap();
        let before = env.clone();
        assert!(env.parse_line("b=2 c", &Directives::default()).is_err());
        assert_eq!(env, before);
    }

    #[test]
    fn lines_accumulate() {
        let d = Directives::default();
        let mut env = Env::replacing();
        env.parse_line("A=1 B=2", &d).unwrap();
        env.parse_line("A 3", &d).unwrap();
        assert_eq!(env.to_string(), r#"A="3" B="2""#);
    }
}
