//! Output formatting module for sapdm
//!
//! Human-readable messages go to stderr so that stdout only ever carries the
//! rendered manifest or a machine-readable report.

use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

/// Output formatter for different output modes
pub struct OutputFormatter {
    /// Use colored output
    use_color: bool,
    /// JSON output mode
    json_mode: bool,
    /// Verbosity level
    verbosity: u8,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(use_color: bool, json_mode: bool, verbosity: u8) -> Self {
        // Respect NO_COLOR environment variable
        let use_color = use_color && std::env::var("NO_COLOR").is_err();

        Self {
            use_color,
            json_mode,
            verbosity,
        }
    }

    pub fn set_json_mode(&mut self, json_mode: bool) {
        self.json_mode = json_mode;
    }

    /// Print a banner/header
    pub fn banner(&self, title: &str) {
        if self.json_mode {
            return;
        }

        let line = "=".repeat(title.len() + 4);
        if self.use_color {
            eprintln!("\n{}", line.bright_blue());
            eprintln!("{}", format!("  {}  ", title).bright_blue().bold());
            eprintln!("{}\n", line.bright_blue());
        } else {
            eprintln!("\n{}", line);
            eprintln!("  {}  ", title);
            eprintln!("{}\n", line);
        }
    }

    /// Print a section header
    pub fn section(&self, title: &str) {
        if self.json_mode {
            return;
        }

        if self.use_color {
            eprintln!("\n{}", title.cyan().bold());
            eprintln!("{}", "-".repeat(title.len()).cyan());
        } else {
            eprintln!("\n{}", title);
            eprintln!("{}", "-".repeat(title.len()));
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.json_mode {
            self.event("error", message);
            return;
        }

        if self.use_color {
            eprintln!("{} {}", "ERROR:".red().bold(), message);
        } else {
            eprintln!("ERROR: {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.json_mode {
            self.event("warning", message);
            return;
        }

        if self.use_color {
            eprintln!("{} {}", "WARNING:".yellow().bold(), message);
        } else {
            eprintln!("WARNING: {}", message);
        }
    }

    /// Print a hint message
    pub fn hint(&self, message: &str) {
        if self.json_mode {
            self.event("hint", message);
            return;
        }

        if self.use_color {
            eprintln!("{} {}", "HINT:".cyan().bold(), message);
        } else {
            eprintln!("HINT: {}", message);
        }
    }

    /// Print a success line (always shown in human mode)
    pub fn success(&self, message: &str) {
        if self.json_mode {
            return;
        }

        if self.use_color {
            eprintln!("{} {}", "OK:".green().bold(), message);
        } else {
            eprintln!("OK: {}", message);
        }
    }

    /// Print an info message (respects verbosity)
    pub fn info(&self, message: &str) {
        if self.verbosity < 1 || self.json_mode {
            return;
        }

        if self.use_color {
            eprintln!("{} {}", "INFO:".blue(), message);
        } else {
            eprintln!("INFO: {}", message);
        }
    }

    /// Print a debug message (requires higher verbosity)
    pub fn debug(&self, message: &str) {
        if self.verbosity < 2 || self.json_mode {
            return;
        }

        if self.use_color {
            eprintln!("{} {}", "DEBUG:".magenta(), message);
        } else {
            eprintln!("DEBUG: {}", message);
        }
    }

    /// Print a list of items
    pub fn list(&self, title: &str, items: &[String]) {
        if self.json_mode {
            return;
        }

        if self.use_color {
            eprintln!("\n{}:", title.bright_white().bold());
        } else {
            eprintln!("\n{}:", title);
        }

        for item in items {
            if self.use_color {
                eprintln!("  {} {}", "-".bright_black(), item);
            } else {
                eprintln!("  - {}", item);
            }
        }
    }

    /// Render a table to stdout
    pub fn table(&self, headers: &[&str], rows: &[Vec<String>]) {
        print!("{}", render_table(headers, rows, self.use_color));
    }

    /// Write a JSON document to stdout
    pub fn json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Flush stdout
    pub fn flush(&self) {
        let _ = io::stdout().flush();
    }

    fn event(&self, kind: &str, message: &str) {
        let event = serde_json::json!({
            "type": kind,
            "message": message
        });
        eprintln!("{}", event);
    }
}

/// Format rows under aligned headers
fn render_table(headers: &[&str], rows: &[Vec<String>], use_color: bool) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let mut out = String::new();

    let header_line = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect::<Vec<_>>()
        .join(" | ");
    if use_color {
        out.push_str(&header_line.bright_white().bold().to_string());
    } else {
        out.push_str(&header_line);
    }
    out.push('\n');

    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    if use_color {
        out.push_str(&sep.join("-+-").bright_black().to_string());
    } else {
        out.push_str(&sep.join("-+-"));
    }
    out.push('\n');

    for row in rows {
        let line = row
            .iter()
            .enumerate()
            .filter(|(i, _)| *i < widths.len())
            .map(|(i, cell)| format!("{:width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" | ");
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}
