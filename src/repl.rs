// repl.rs

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use envparse::{Directives, Env, Merge, ParseError};
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};

use crate::util::writeln_ignore_broken_pipe;

pub struct Session {
    directives: Directives,
    merge: Merge,
    rejected: usize,
}

impl Session {
    pub fn new(directives: Directives, merge: Merge) -> Self {
        Self { directives, merge, rejected: 0 }
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Parses one input line. Blank lines and `#` comments yield `None`; a
    /// `# escape=<char>` comment switches the escape token for later lines.
    pub fn eval(&mut self, line: &str) -> Option<Result<Env, ParseError>> {
        if line.trim().is_empty() {
            return None;
        }
        if line.trim_start().starts_with('#') {
            if let Some(directives) = Directives::from_directive_line(line) {
                log::debug!("escape token set to {:?}", directives.escape_token);
                self.directives = directives;
            }
            return None;
        }
        let mut env = Env::new(self.merge);
        Some(env.parse_line(line, &self.directives).map(|()| env))
    }

    pub fn feed(&mut self, line: &str) -> io::Result<()> {
        match self.eval(line) {
            Some(Ok(env)) => writeln_ignore_broken_pipe(io::stdout(), env),
            Some(Err(err)) => {
                self.rejected += 1;
                eprintln!("{}: {}", line, err);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

pub fn run_reader<R: BufRead>(session: &mut Session, reader: R) -> Result<()> {
    for line in reader.lines() {
        let line = line.context("failed to read input")?;
        session.feed(&line)?;
    }
    Ok(())
}

pub fn start_repl(session: &mut Session) -> Result<()> {
    let config = Config::builder().auto_add_history(false).build();
    let mut rl = DefaultEditor::with_config(config).context("failed to create line editor")?;
    loop {
        match rl.readline("env> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                session.feed(&line)?;
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("failed to read line"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(Directives::default(), Merge::Replace)
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let mut s = session();
        assert!(s.eval("").is_none());
        assert!(s.eval("  \t").is_none());
        assert!(s.eval("# just a note").is_none());
    }

    #[test]
    fn escape_directive_applies_to_later_lines() {
        let mut s = session();
        assert!(s.eval("# escape=`").is_none());
        let env = s.eval("a=b` c").unwrap().unwrap();
        assert_eq!(env.get("a"), Some("b c"));
    }

    #[test]
    fn counts_rejected_lines() {
        let mut s = session();
        s.feed("A=1 B").unwrap();
        s.feed("A").unwrap();
        s.feed("A=1").unwrap();
        assert_eq!(s.rejected(), 2);
    }

    #[test]
    fn reads_lines_from_a_reader() {
        let mut s = Session::new(Directives::default(), Merge::Append);
        run_reader(&mut s, "A=1\n\nB\n# escape=`\nC=2\n".as_bytes()).unwrap();
        assert_eq!(s.rejected(), 1);
        assert_eq!(s.directives, Directives::new('`'));
    }
}
