//! Terminal styles.

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use colored::{ColoredString, Colorize};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Help styles for clap.
pub fn styles() -> Styles {
    Styles::styled()
        .header(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Blue))),
        )
        .usage(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Blue))),
        )
        .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Magenta))))
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .invalid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .valid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
}

/// `error` or `error[kind]` label.
pub fn error_label(kind: Option<&str>) -> ColoredString {
    match kind {
        Some(kind) => format!("error[{}]", kind).bright_red().bold(),
        None => "error".bright_red().bold(),
    }
}

/// `warning` label.
pub fn warning_label() -> ColoredString {
    "warning".bright_yellow().bold()
}

/// `hint` label.
pub fn hint_label() -> ColoredString {
    "hint".bright_blue().bold()
}
