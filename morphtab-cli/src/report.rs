//! Operator-facing diagnostics

use morphtab_parser::diagnostics::{Diagnostic, Reporter};

/// Prints every dropped line to stdout and keeps count, so `--strict` can fail the run.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    count: usize,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.count += 1;
        println!("{}", diagnostic);
    }
}
