use colored::Colorize;
use console::{Style, Term};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

/// Widest message box, whatever the terminal size
const MAX_BOX_WIDTH: usize = 100;

/// Used when stdout is not a terminal
const FALLBACK_WIDTH: usize = 80;

/// Display utilities for the CLI interface
pub struct DisplayHelper {
    pub use_color: bool,
    pub terminal: Term,
}

impl DisplayHelper {
    /// Create a new DisplayHelper
    pub fn new(use_color: bool) -> Self {
        Self {
            use_color,
            terminal: Term::stdout(),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.use_color {
            println!("{} {}", "✓".green().bold(), message);
        } else {
            println!("[SUCCESS] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "✗".red().bold(), message);
        } else {
            eprintln!("[ERROR] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.use_color {
            println!("{} {}", "⚠".yellow().bold(), message);
        } else {
            println!("[WARNING] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.use_color {
            println!("{} {}", "::".blue().bold(), message);
        } else {
            println!("[INFO] {}", message);
        }
    }

    /// Print a secondary line under the previous message
    pub fn detail(&self, message: &str) {
        if self.use_color {
            println!("  {} {}", "->".dimmed(), message);
        } else {
            println!("  -> {}", message);
        }
    }

    /// Print a section header
    pub fn section_header(&self, title: &str) {
        if self.use_color {
            println!("{}", title.green().bold());
        } else {
            println!("=== {} ===", title);
        }
        println!("{}", "-".repeat(title.chars().count().max(16)));
    }

    /// Print captured command output, one indented line per output line
    pub fn command_output(&self, output: &str) {
        for line in output.lines() {
            if self.use_color {
                println!("    {}", line.dimmed());
            } else {
                println!("    {}", line);
            }
        }
    }

    /// Format a file path with appropriate styling
    pub fn format_path(&self, path: &str) -> String {
        if self.use_color {
            path.cyan().to_string()
        } else {
            format!("'{}'", path)
        }
    }

    /// Format a URL with appropriate styling
    pub fn format_url(&self, url: &str) -> String {
        if self.use_color {
            url.blue().underline().to_string()
        } else {
            url.to_string()
        }
    }

    /// Format a command with appropriate styling
    pub fn format_command(&self, command: &str) -> String {
        if self.use_color {
            command.magenta().bold().to_string()
        } else {
            format!("`{}`", command)
        }
    }

    /// Terminal width capped for message boxes
    pub fn box_width(&self) -> usize {
        let width = self
            .terminal
            .size_checked()
            .map(|(_, cols)| cols as usize)
            .unwrap_or(FALLBACK_WIDTH);
        width.clamp(20, MAX_BOX_WIDTH)
    }

    /// Print a titled box: subject line highlighted, body word-wrapped
    pub fn message_box(&self, title: &str, subject: &str, body: &str) {
        let width = self.box_width();
        let banner = format!("{:^width$}", format!(" {} ", title), width = width);
        let rule = "-".repeat(width);

        println!();
        if self.use_color {
            println!("{}", Style::new().white().on_blue().bold().apply_to(banner));
        } else {
            println!("{}", banner);
        }
        println!("{}", rule);
        if self.use_color {
            println!("{}", wrap_text(subject, width).yellow().bold());
        } else {
            println!("{}", wrap_text(subject, width));
        }
        if !body.is_empty() {
            println!();
            println!("{}", wrap_text(body, width));
        }
        println!("{}", rule);
        println!();
    }

    /// Create a spinner for indeterminate operations
    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = if self.use_color {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
        };

        if self.use_color {
            if let Ok(style) = ProgressStyle::default_spinner()
                .tick_strings(&["⠁", "⠂", "⠄", "⡀", "⢀", "⠠", "⠐", "⠈", ""])
                .template("{spinner:.green} {msg}")
            {
                pb.set_style(style);
            }
            pb.set_message(message.to_string());
            pb.enable_steady_tick(Duration::from_millis(120));
        }

        pb
    }

    /// Prompt for confirmation; anything but y/yes is a no
    pub fn confirm(&self, message: &str) -> io::Result<bool> {
        if self.use_color {
            print!("{} {} ", "?".yellow().bold(), message);
        } else {
            print!("{} ", message);
        }
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let answer = input.trim().to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}

/// Wrap every line of `text` to `width` columns, splitting words longer than a line
pub fn wrap_text(text: &str, width: usize) -> String {
    text.split('\n')
        .map(|line| wrap_line(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_line(line: &str, width: usize) -> String {
    if width == 0 || line.chars().count() <= width {
        return line.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in line.split(' ') {
        let mut word = word.to_string();
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(width).collect();
            word = word.chars().skip(width).collect();
            lines.push(head);
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// Helper functions for common display patterns
pub mod helpers {
    use super::*;

    /// Create a display helper with color detection
    pub fn auto_display(no_color: bool) -> DisplayHelper {
        let use_color = !no_color
            && Term::stdout().is_term()
            && std::env::var_os("NO_COLOR").is_none();
        if !use_color {
            colored::control::set_override(false);
        }
        DisplayHelper::new(use_color)
    }
}
