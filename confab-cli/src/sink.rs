//! Terminal rendering sink for streaming replies.

use colored::Colorize;
use confab_streaming::StreamSink;
use std::io::Write;

/// Renders a streaming reply to a terminal.
///
/// The consumer pushes the full accumulated text on every update; a
/// terminal is append-only, so the sink tracks how many bytes it has
/// already written and emits only the new tail. The accumulating buffer
/// only ever grows by appends, which keeps the byte offset valid.
#[derive(Debug)]
pub struct TermSink<W: Write> {
    out: W,
    printed: usize,
    in_progress: bool,
}

impl<W: Write> TermSink<W> {
    /// Create a sink writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            printed: 0,
            in_progress: false,
        }
    }

    fn begin(&mut self) {
        if !self.in_progress {
            self.in_progress = true;
            let _ = write!(self.out, "{} ", "assistant>".green().bold());
            let _ = self.out.flush();
        }
    }
}

impl TermSink<std::io::Stdout> {
    /// Sink writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> StreamSink for TermSink<W> {
    fn on_start(&mut self) {
        self.begin();
    }

    fn on_update(&mut self, text: &str) {
        self.begin();
        let _ = write!(self.out, "{}", &text[self.printed..]);
        let _ = self.out.flush();
        self.printed = text.len();
    }

    fn on_complete(&mut self, text: &str) {
        self.begin();
        let _ = writeln!(self.out, "{}", &text[self.printed..]);
        let _ = self.out.flush();
        self.printed = text.len();
        self.in_progress = false;
    }

    fn on_error(&mut self, _message: &str) {
        // Break the partial line; the controller reports the failure itself.
        if self.in_progress {
            let _ = writeln!(self.out);
            let _ = self.out.flush();
            self.in_progress = false;
        }
    }
}
