//! In-memory output sink for tests

use std::sync::Mutex;

use super::{Notice, OutputSink};

/// Records everything written to it
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
    notices: Mutex<Vec<(Notice, String)>>,
    reveals: Mutex<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<(Notice, String)> {
        self.notices.lock().unwrap().clone()
    }

    pub fn reveal_count(&self) -> usize {
        *self.reveals.lock().unwrap()
    }
}

impl OutputSink for MemorySink {
    fn append_line(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }

    fn reveal(&self) {
        *self.reveals.lock().unwrap() += 1;
    }

    fn notify(&self, notice: Notice, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push((notice, message.to_string()));
    }
}
