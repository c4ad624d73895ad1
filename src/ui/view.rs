//! Display-page collaborators: where the engine writes what it computed.

use crate::models::tier::Tier;
use crate::utils::colors::{GREY, RESET, color_for_optional_field, colorize_tier};
use crate::utils::formatting::pad_right;
use std::io::{self, Write};

pub trait CountdownView {
    /// Clock text plus the tier style it is shown with.
    fn render_timer(&mut self, text: &str, tier: Tier);

    fn render_status(&mut self, status: &str);

    fn render_due_date(&mut self, text: &str);
}

/// Single, redrawn terminal line:
/// `⏳ 00:59:59 │ In Progress │ Due: October 19, 2026 at 03:00 PM`
pub struct TerminalView<W: Write> {
    out: W,
    timer: Option<(String, Tier)>,
    status: String,
    due: String,
    mode: RenderMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Redraw one line in place.
    Redraw,
    /// Print one line per update.
    Lines,
    /// Print nothing until [`TerminalView::finish`].
    Deferred,
}

impl TerminalView<io::Stdout> {
    pub fn stdout(mode: RenderMode) -> Self {
        Self::new(io::stdout(), mode)
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, mode: RenderMode) -> Self {
        Self {
            out,
            timer: None,
            status: String::new(),
            due: String::new(),
            mode,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn line(&self) -> String {
        let timer = match &self.timer {
            Some((text, tier)) => colorize_tier(text, *tier),
            None => format!("{GREY}--:--:--{RESET}"),
        };
        format!(
            "⏳ {} │ {} │ Due: {}{}{}",
            timer,
            pad_right(&self.status, 11),
            color_for_optional_field(&self.due),
            self.due,
            RESET
        )
    }

    fn redraw(&mut self) {
        let line = self.line();
        // best effort
        let _ = match self.mode {
            RenderMode::Redraw => write!(self.out, "\r\x1b[2K{}", line),
            RenderMode::Lines => writeln!(self.out, "{}", line),
            RenderMode::Deferred => return,
        };
        let _ = self.out.flush();
    }

    /// Leave the last state on screen.
    pub fn finish(&mut self) {
        let _ = match self.mode {
            RenderMode::Redraw => writeln!(self.out),
            RenderMode::Lines => Ok(()),
            RenderMode::Deferred => writeln!(self.out, "{}", self.line()),
        };
        let _ = self.out.flush();
    }
}

impl<W: Write> CountdownView for TerminalView<W> {
    fn render_timer(&mut self, text: &str, tier: Tier) {
        self.timer = Some((text.to_string(), tier));
        self.redraw();
    }

    fn render_status(&mut self, status: &str) {
        if self.status != status {
            self.status = status.to_string();
            self.redraw();
        }
    }

    fn render_due_date(&mut self, text: &str) {
        if self.due != text {
            self.due = text.to_string();
            self.redraw();
        }
    }
}
