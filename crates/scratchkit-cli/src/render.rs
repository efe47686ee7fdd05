use std::io::IsTerminal;
use std::time::Duration;

use anstyle::{AnsiColor, Effects, Style};
use indicatif::{HumanCount, HumanDuration};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputStyle {
    Plain,
    Rich,
}

pub fn current_output_style() -> OutputStyle {
    if std::io::stdout().is_terminal() {
        OutputStyle::Rich
    } else {
        OutputStyle::Plain
    }
}

#[derive(Copy, Clone, Debug)]
pub struct TerminalRenderer {
    style: OutputStyle,
}

impl TerminalRenderer {
    pub fn from_style(style: OutputStyle) -> Self {
        Self { style }
    }

    pub fn current() -> Self {
        Self::from_style(current_output_style())
    }

    pub fn style(self) -> OutputStyle {
        self.style
    }

    pub fn print_status(self, status: &str, message: &str) {
        let line = render_status_line(self.style, status, message);
        let rendered = match self.style {
            OutputStyle::Plain => line,
            OutputStyle::Rich => colorize(status_style(status), &line),
        };
        println!("{rendered}");
    }

    pub fn print_section(self, title: &str) {
        if let Some(line) = render_section_header(self.style, title) {
            println!();
            println!("{}", colorize(section_style(), &line));
        }
    }

    pub fn print_install_progress(
        self,
        package: &str,
        installed: usize,
        total: usize,
        elapsed: Duration,
    ) {
        if let Some(line) =
            render_install_progress_line(self.style, package, installed, total, elapsed)
        {
            println!("{line}");
        }
    }

    /// Prints the outermost error message as a status line and every
    /// underlying cause on stderr.
    pub fn print_failure(self, err: &anyhow::Error) {
        self.print_status("err", &err.to_string());
        for cause in err.chain().skip(1) {
            eprintln!("{cause}");
        }
    }
}

pub fn render_status_line(style: OutputStyle, status: &str, message: &str) -> String {
    match style {
        OutputStyle::Plain => message.to_string(),
        OutputStyle::Rich => format!("{} {message}", status_badge(status)),
    }
}

fn status_badge(status: &str) -> &'static str {
    match status {
        "ok" => "[OK]",
        "warn" => "[WARN]",
        "err" => "[ERR]",
        _ => "[..]",
    }
}

fn status_style(status: &str) -> Style {
    let color = match status {
        "ok" => AnsiColor::Green,
        "warn" => AnsiColor::Yellow,
        "err" => AnsiColor::Red,
        _ => AnsiColor::BrightBlack,
    };
    Style::new().fg_color(Some(color.into()))
}

fn section_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightBlue.into()))
        .effects(Effects::BOLD)
}

fn counter_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightCyan.into()))
        .effects(Effects::BOLD)
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}

pub fn render_section_header(style: OutputStyle, title: &str) -> Option<String> {
    match style {
        OutputStyle::Plain => None,
        OutputStyle::Rich => Some(format!("== {title} ==")),
    }
}

/// `[3/6] Affiliations installed (elapsed 2 minutes)`, shown in rich mode
/// only; plain output already carries the "Installing ..." lines.
pub fn render_install_progress_line(
    style: OutputStyle,
    package: &str,
    installed: usize,
    total: usize,
    elapsed: Duration,
) -> Option<String> {
    if style == OutputStyle::Plain {
        return None;
    }

    let counter = format!(
        "[{}/{}]",
        HumanCount(installed as u64),
        HumanCount(total as u64)
    );
    Some(format!(
        "{} {package} installed (elapsed {})",
        colorize(counter_style(), &counter),
        HumanDuration(elapsed)
    ))
}
