// logger.rs

use log::{Level, Metadata, Record};

pub struct StderrLogger;

fn format_record(msg: &Record) -> String {
    format!("[{}] {}", msg.level(), msg.args())
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Trace
    }

    fn log(&self, msg: &Record) {
        if self.enabled(msg.metadata()) {
            eprintln!("{}", format_record(msg));
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_level_and_message() {
        let line = format_record(
            &Record::builder()
                .level(Level::Debug)
                .target("envparse::assign")
                .args(format_args!("legacy form: {:?}", "A 1"))
                .build(),
        );
        assert_eq!(line, r#"[DEBUG] legacy form: "A 1""#);
    }
}
