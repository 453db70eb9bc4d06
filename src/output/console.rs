//! Terminal output sink

use std::io::{self, Write};

use colored::Colorize;

use super::{Notice, OutputSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Writes log lines to a standard stream and notifications to stderr
#[derive(Debug)]
pub struct ConsoleSink {
    stream: Stream,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self {
            stream: Stream::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
        }
    }
}

impl OutputSink for ConsoleSink {
    fn append_line(&self, line: &str) {
        match self.stream {
            Stream::Stdout => println!("{}", line),
            Stream::Stderr => eprintln!("{}", line),
        }
    }

    fn reveal(&self) {
        // flush errors are ignored
        let _ = match self.stream {
            Stream::Stdout => io::stdout().flush(),
            Stream::Stderr => io::stderr().flush(),
        };
    }

    fn notify(&self, notice: Notice, message: &str) {
        match notice {
            Notice::Info => eprintln!("{} {}", "✓".green(), message),
            Notice::Error => eprintln!("{} {}", "✗".red(), message.red()),
        }
    }
}
