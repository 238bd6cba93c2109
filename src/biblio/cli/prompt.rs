use biblio::error::BiblioError;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, Write};

/// Why a shell step stopped early.
#[derive(Debug)]
pub enum ShellError {
    /// Ctrl-C or end of input at a prompt
    Interrupted,
    Fatal(BiblioError),
}

impl From<BiblioError> for ShellError {
    fn from(e: BiblioError) -> Self {
        ShellError::Fatal(e)
    }
}

impl From<io::Error> for ShellError {
    fn from(e: io::Error) -> Self {
        ShellError::Fatal(BiblioError::Io(e))
    }
}

pub type ShellResult<T> = std::result::Result<T, ShellError>;

/// Source of user input lines.
pub trait LineSource {
    /// Show `prompt` and read one line. `None` means the user interrupted
    /// (Ctrl-C) or input ended.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Line editor on the controlling terminal.
pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    pub fn new() -> biblio::error::Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| BiblioError::Io(into_io(e)))?;
        Ok(Self { editor })
    }
}

impl LineSource for Terminal {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(e) => Err(into_io(e)),
        }
    }
}

fn into_io(e: ReadlineError) -> io::Error {
    match e {
        ReadlineError::Io(e) => e,
        other => io::Error::other(other),
    }
}

/// How a prompt treats blank input.
#[derive(Debug, Clone, Copy)]
pub enum Ask<'a> {
    /// Re-ask until something is typed.
    Required,
    /// Accept blank input, answering with the given default (may be empty).
    Optional(&'a str),
}

/// Prompt for one value. Answers are trimmed.
pub fn ask<L: LineSource, W: Write>(
    input: &mut L,
    out: &mut W,
    label: &str,
    mode: Ask<'_>,
) -> ShellResult<String> {
    let prompt = match mode {
        Ask::Optional(default) if !default.is_empty() => format!("{} [{}]: ", label, default),
        _ => format!("{}: ", label),
    };

    loop {
        let line = input.read_line(&prompt)?.ok_or(ShellError::Interrupted)?;
        let value = line.trim();
        if !value.is_empty() {
            return Ok(value.to_string());
        }
        match mode {
            Ask::Optional(default) => return Ok(default.to_string()),
            Ask::Required => {
                writeln!(out, "{}", super::print::warning("This field is required."))?;
            }
        }
    }
}
