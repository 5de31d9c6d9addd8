use std::{
    io::Write,
    sync::{Arc, PoisonError, RwLock},
};

use tracing::warn;

use crate::services::mpris::ControlPanel;

/// Template shared between the panel and the input loop
pub type SharedTemplate = Arc<RwLock<String>>;

/// Line-oriented [`ControlPanel`] writing to any output stream
///
/// Log lines are written verbatim, button label changes as `[>]` or `[||]`, and the
/// candidate list as `players: a, b`.
pub struct TerminalPanel<W: Write + Send> {
    out: W,
    template: SharedTemplate,
}

impl<W: Write + Send> TerminalPanel<W> {
    /// Create a panel writing to `out` and reading its template from `template`
    pub fn new(out: W, template: SharedTemplate) -> Self {
        Self { out, template }
    }

    /// Consume the panel and return its output stream
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            warn!("Cannot write panel output: {e}");
        }
    }
}

impl<W: Write + Send> ControlPanel for TerminalPanel<W> {
    fn set_play_button_label(&mut self, label: &str) {
        self.write_line(&format!("[{label}]"));
    }

    fn append_log_line(&mut self, line: &str) {
        self.write_line(line);
    }

    fn set_candidate_list(&mut self, names: &[String]) {
        self.write_line(&format!("players: {}", names.join(", ")));
    }

    fn format_template(&self) -> String {
        self.template
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
