//! Terminal restore guard.

use std::io;

use tracing::error;

/// Runs a restore action exactly once: explicitly via [`finish`], or on
/// drop if setup bails out early with `?`.
///
/// [`finish`]: TerminalRestore::finish
pub struct TerminalRestore<F: FnMut() -> io::Result<()>> {
    restore: Option<F>,
}

impl<F: FnMut() -> io::Result<()>> TerminalRestore<F> {
    /// Arms the guard with `restore`.
    pub fn new(restore: F) -> Self {
        Self {
            restore: Some(restore),
        }
    }

    /// Runs the restore action now and reports its error.
    pub fn finish(mut self) -> io::Result<()> {
        match self.restore.take() {
            Some(mut restore) => restore(),
            None => Ok(()),
        }
    }
}

impl<F: FnMut() -> io::Result<()>> Drop for TerminalRestore<F> {
    fn drop(&mut self) {
        if let Some(mut restore) = self.restore.take() {
            if let Err(e) = restore() {
                error!(error = %e, "Failed to restore terminal");
            }
        }
    }
}
