//! # Interactive Shell
//!
//! One possible UI client for biblio: a numbered menu over [`BiblioApi`].
//! This is the only place that reads user input and writes to the terminal.
//!
//! - [`prompt`]: line input (rustyline in production, scripted in tests)
//!   and the required/optional/default prompting rules
//! - [`print`]: formatting of messages and book records
//! - [`shell`]: the menu loop and one handler per menu entry
//!
//! [`BiblioApi`]: biblio::api::BiblioApi

pub mod print;
pub mod prompt;
pub mod shell;
