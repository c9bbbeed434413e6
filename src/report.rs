//! Finding accumulator shared by every check.
//!
//! Errors block correctness and drive the exit code; warnings are suspicious
//! but plausible; infos are confirmations shown only in verbose mode. Each
//! check appends to a `Report` it was handed (or returns its own, merged by
//! the driver) — no process-global state.

use log::debug;

/// Categorized findings from one or more checks.
#[derive(Debug, Default)]
pub struct Report {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        debug!("error: {}", msg);
        self.errors.push(msg);
    }

    pub fn warning(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        debug!("warning: {}", msg);
        self.warnings.push(msg);
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.infos.push(msg.into());
    }

    /// Fold another report's findings into this one.
    pub fn merge(&mut self, other: Report) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.infos.extend(other.infos);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Process exit code: 1 on any error, 0 otherwise. Warnings never affect
    /// the exit code.
    pub fn exit_code(&self) -> i32 {
        if self.has_errors() {
            1
        } else {
            0
        }
    }

    /// Print the report to stdout, sectioned by severity. Infos only appear
    /// in verbose mode.
    pub fn print(&self, verbose: bool) {
        if self.errors.is_empty() && self.warnings.is_empty() {
            println!("All validations passed!");
        } else {
            if !self.errors.is_empty() {
                println!("ERRORS ({}):", self.errors.len());
                for e in &self.errors {
                    println!("  - {}", e);
                }
                println!();
            }
            if !self.warnings.is_empty() {
                println!("WARNINGS ({}):", self.warnings.len());
                for w in &self.warnings {
                    println!("  - {}", w);
                }
                println!();
            }
        }

        if verbose && !self.infos.is_empty() {
            println!("INFO ({}):", self.infos.len());
            for i in &self.infos {
                println!("  - {}", i);
            }
        }
    }
}
