//! Terminal implementations of the core `Prompt` port.

use std::io::{self, BufRead, IsTerminal, Write};

use splat_core::{application::ApplicationError, application::ports::Prompt, error::SplatResult};

/// Asks on the terminal.
///
/// With the `interactive` feature and a terminal on stdin this is a
/// `dialoguer` confirm; otherwise a `[y/N]` line is read from stdin, so the
/// answer can be piped in.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Prompt for TerminalPrompt {
    fn confirm(&self, message: &str, default: bool) -> SplatResult<bool> {
        #[cfg(feature = "interactive")]
        if io::stdin().is_terminal() {
            return dialoguer::Confirm::new()
                .with_prompt(message)
                .default(default)
                .interact()
                .map_err(|e| prompt_failed(e.to_string()));
        }

        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let mut stderr = io::stderr();
        write!(stderr, "{message} {hint} ")
            .and_then(|()| stderr.flush())
            .map_err(|e| prompt_failed(e.to_string()))?;

        let answer = read_answer(io::stdin().lock(), default)?;
        if !io::stdin().is_terminal() {
            // Echo so piped sessions read like interactive ones.
            let _ = writeln!(stderr, "{}", if answer { "yes" } else { "no" });
        }
        Ok(answer)
    }
}

/// Answers every question with "yes". Backs `--yes`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm(&self, message: &str, _default: bool) -> SplatResult<bool> {
        tracing::debug!(question = message, "Assuming yes");
        Ok(true)
    }
}

/// Parse one answer line. Blank lines and end of input give `default`.
pub(crate) fn read_answer(mut input: impl BufRead, default: bool) -> SplatResult<bool> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| prompt_failed(e.to_string()))?;
    if read == 0 {
        return Ok(default);
    }

    match line.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        other => {
            tracing::warn!(answer = other, "Unrecognised answer, using the default");
            Ok(default)
        }
    }
}

fn prompt_failed(reason: String) -> splat_core::error::SplatError {
    ApplicationError::PromptFailed { reason }.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_variants_accept() {
        for answer in ["y\n", "Y\n", "yes\n", " YES \n"] {
            assert!(read_answer(answer.as_bytes(), false).unwrap(), "{answer:?}");
        }
    }

    #[test]
    fn no_variants_decline() {
        for answer in ["n\n", "No\n"] {
            assert!(!read_answer(answer.as_bytes(), true).unwrap(), "{answer:?}");
        }
    }

    #[test]
    fn blank_line_uses_default() {
        assert!(!read_answer("\n".as_bytes(), false).unwrap());
        assert!(read_answer("\n".as_bytes(), true).unwrap());
    }

    #[test]
    fn end_of_input_uses_default() {
        assert!(!read_answer(io::empty(), false).unwrap());
    }

    #[test]
    fn gibberish_uses_default() {
        assert!(!read_answer("maybe\n".as_bytes(), false).unwrap());
    }

    #[test]
    fn assume_yes_always_accepts() {
        assert!(AssumeYes.confirm("replace?", false).unwrap());
    }
}
