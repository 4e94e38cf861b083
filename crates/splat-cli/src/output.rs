//! Run messages on stdout.

use std::io::{self, IsTerminal};

use console::{Term, style};

use crate::{cli::GlobalArgs, config::AppConfig};

/// How a line is marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Done,
    Note,
    Warn,
}

/// Writes run messages to stdout. Quiet mode drops everything; errors are
/// rendered separately on stderr.
///
/// Shared by value with the console reporter.
#[derive(Debug, Clone)]
pub struct Console {
    term: Term,
    quiet: bool,
    color: bool,
}

impl Console {
    pub fn new(quiet: bool, color: bool) -> Self {
        Self {
            term: Term::stdout(),
            quiet,
            color,
        }
    }

    /// Colour only on a terminal, and only when neither `--no-color` nor
    /// `output.no_color` turned it off.
    pub fn from_args(args: &GlobalArgs, config: &AppConfig) -> Self {
        let color = !args.no_color && !config.output.no_color && io::stdout().is_terminal();
        Self::new(args.quiet, color)
    }

    pub fn say(&self, tone: Tone, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&self.paint(tone, msg))
    }

    fn paint(&self, tone: Tone, msg: &str) -> String {
        let mark = match tone {
            Tone::Plain => return msg.to_owned(),
            Tone::Done => style("\u{2713}").green(),
            Tone::Note => style("\u{2139}").blue(),
            Tone::Warn => style("!").yellow(),
        };

        if self.color {
            format!("{} {msg}", mark.bold().force_styling(true))
        } else {
            format!("{} {msg}", mark.force_styling(false))
        }
    }
}
