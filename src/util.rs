// util.rs

use std::fmt::Display;
use std::io::{self, Write};

pub fn writeln_ignore_broken_pipe<W: Write, D: Display>(mut w: W, line: D) -> io::Result<()> {
    match writeln!(w, "{}", line).and_then(|()| w.flush()) {
        Err(ref e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
