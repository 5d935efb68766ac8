//! Terminal output: styled status lines, or nothing but JSON with `--json`.

use std::fmt::Display;
use std::time::Duration;

use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn stdout(&self, mark: StyledObject<&str>, msg: impl Display) {
        if !self.json {
            println!("{} {}", mark, msg);
        }
    }

    fn stderr(&self, mark: StyledObject<&str>, msg: impl Display) {
        if !self.json {
            eprintln!("{} {}", mark, msg);
        }
    }

    pub fn info(&self, msg: &str) {
        self.stdout(style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        self.stdout(style("✓").green(), msg);
    }

    pub fn warn(&self, msg: &str) {
        self.stderr(style("⚠").yellow(), msg);
    }

    /// Errors are still reported in JSON mode, as `{"error": ...}`.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            self.stderr(style("✗").red(), style(msg).red());
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.stderr(style("→").dim(), style(msg).dim());
        }
    }

    pub fn header(&self, title: &str) {
        if !self.json {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        self.stdout(style("  •").dim(), item);
    }

    /// Multi-line text as is, newline-terminated.
    pub fn text(&self, body: &str) {
        if self.json {
            return;
        }
        if body.ends_with('\n') {
            print!("{}", body);
        } else {
            println!("{}", body);
        }
    }

    /// Pretty JSON to stdout, regardless of mode.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) {
        if let Ok(rendered) = serde_json::to_string_pretty(value) {
            println!("{}", rendered);
        }
    }

    /// Spinner for a lookup in flight; hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner().with_message(msg.to_string());
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(template);
        }
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}

/// `before → after`, green when growing, yellow when shrinking.
pub fn quantity_change(before: u32, after: u32) -> String {
    let arrow = format!("{} → {}", before, after);
    match after.cmp(&before) {
        std::cmp::Ordering::Greater => style(arrow).green().to_string(),
        std::cmp::Ordering::Less => style(arrow).yellow().to_string(),
        std::cmp::Ordering::Equal => style(arrow).dim().to_string(),
    }
}
