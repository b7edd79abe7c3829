//! Console output: per-site progress lines and the end-of-run summary.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use siteimport_core::{ImportObserver, Outcome, RunSummary};

use crate::cli::{ColorMode, OutputFormat};

const DIVIDER_WIDTH: usize = 50;

/// Determine whether color output should be enabled for the progress stream.
///
/// `stream_is_terminal` describes the stream progress is written to: stdout
/// for text output, stderr for JSON output.
pub fn should_color(mode: ColorMode, stream_is_terminal: bool) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => stream_is_terminal && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// The stream progress lines go to, and whether it is a terminal.
pub fn progress_sink(format: OutputFormat) -> (Box<dyn Write + Send>, bool) {
    match format {
        OutputFormat::Text => (Box::new(io::stdout()), io::stdout().is_terminal()),
        OutputFormat::Json => (Box::new(io::stderr()), io::stderr().is_terminal()),
    }
}

// ── Progress ─────────────────────────────────────────────────────────

/// Writes `[i/N] Adding site: name... ✓` lines as the run advances.
///
/// The name is written before the request goes out and the glyph once it
/// resolves, so a slow request shows which site it is waiting on.
pub struct ConsoleProgress<W: Write> {
    out: W,
    color: bool,
    quiet: bool,
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W, color: bool, quiet: bool) -> Self {
        Self { out, color, quiet }
    }

    /// Print a free-standing status line (loading messages, etc.).
    pub fn line(&mut self, text: &str) {
        if self.quiet {
            return;
        }
        let _ = writeln!(self.out, "{text}");
    }

    fn mark(&self, outcome: &Outcome) -> String {
        match (outcome, self.color) {
            (Outcome::Created(_), true) => "✓".green().to_string(),
            (Outcome::Created(_), false) => "✓".to_owned(),
            (Outcome::Failed(message), true) => format!("{} - {message}", "✗".red()),
            (Outcome::Failed(message), false) => format!("✗ - {message}"),
        }
    }
}

impl<W: Write + Send> ImportObserver for ConsoleProgress<W> {
    fn submitting(&mut self, position: usize, total: usize, name: &str) {
        if self.quiet {
            return;
        }
        let _ = write!(self.out, "[{position}/{total}] Adding site: {name}... ");
        let _ = self.out.flush();
    }

    fn finished(&mut self, _position: usize, _total: usize, _name: &str, outcome: &Outcome) {
        if self.quiet {
            return;
        }
        let mark = self.mark(outcome);
        let _ = writeln!(self.out, "{mark}");
    }
}

// ── Summary ──────────────────────────────────────────────────────────

/// Render the text summary: divider, totals, then failures in submission order.
pub fn render_summary(summary: &RunSummary, color: bool) -> String {
    let mut lines = vec![
        String::new(),
        "=".repeat(DIVIDER_WIDTH),
        format!(
            "Import complete: {}/{} sites added successfully",
            summary.succeeded(),
            summary.attempted()
        ),
    ];

    if !summary.is_clean() {
        lines.push(String::new());
        let header = format!("Failed sites ({}):", summary.failed());
        lines.push(if color {
            header.red().to_string()
        } else {
            header
        });
        lines.extend(
            summary
                .failures()
                .iter()
                .map(|f| format!("  - {}: {}", f.name, f.message)),
        );
    }

    lines.join("\n")
}

/// Pretty-printed JSON summary.
pub fn render_summary_json(summary: &RunSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}

/// Print the rendered output to stdout.
pub fn print_output(output: &str) {
    if output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}
