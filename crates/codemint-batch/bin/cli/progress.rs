use codemint_core::Progress;
use std::cell::Cell;
use std::io::Write;

/// Redraws a single stderr status line whenever the whole percentage moves.
#[derive(Debug, Default)]
pub struct TerminalProgress {
    last_percent: Cell<Option<u8>>,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ends the status line so later output starts on a fresh line.
    pub fn finish(&self) {
        if self.last_percent.take().is_some() {
            eprintln!();
        }
    }
}

impl Progress for TerminalProgress {
    fn report(&self, fraction: f64, message: &str) {
        let percent = (fraction.clamp(0.0, 1.0) * 100.0) as u8;
        if self.last_percent.get() == Some(percent) {
            return;
        }
        self.last_percent.set(Some(percent));

        let mut stderr = std::io::stderr().lock();
        // Progress is best-effort; a closed stderr must not stop the work.
        let _ = write!(stderr, "\r\x1b[2K[{:>3}%] {}", percent, message);
        let _ = stderr.flush();
    }
}
