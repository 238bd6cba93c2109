use biblio::api::{CmdMessage, MessageLevel};
use biblio::model::Book;
use chrono::{DateTime, SecondsFormat, Utc};
use colored::{ColoredString, Colorize};
use std::io::{self, Write};
use timeago::Formatter;

const SEPARATOR_WIDTH: usize = 60;

pub fn warning(text: &str) -> ColoredString {
    text.yellow()
}

pub fn print_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=== Library (KeyDB/Redis) ===".bold())?;
    writeln!(out, "1) Add a new book")?;
    writeln!(out, "2) Update a book")?;
    writeln!(out, "3) Delete a book")?;
    writeln!(out, "4) List books")?;
    writeln!(out, "5) Search books")?;
    writeln!(out, "6) Exit")
}

pub fn print_heading<W: Write>(out: &mut W, heading: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", heading.bold())
}

pub fn print_messages<W: Write>(out: &mut W, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        match message.level {
            MessageLevel::Info => writeln!(out, "{}", message.content.dimmed())?,
            MessageLevel::Success => writeln!(out, "{}", message.content.green())?,
            MessageLevel::Warning => writeln!(out, "{}", message.content.yellow())?,
            MessageLevel::Error => writeln!(out, "{}", message.content.red())?,
        }
    }
    Ok(())
}

pub fn print_books<W: Write>(out: &mut W, books: &[Book]) -> io::Result<()> {
    for book in books {
        write!(out, "{}", format_book(book))?;
    }
    Ok(())
}

pub fn format_book(book: &Book) -> String {
    let mut block = String::new();
    block.push_str(&"-".repeat(SEPARATOR_WIDTH));
    block.push('\n');
    block.push_str(&format!("ID:       {}\n", book.id));
    block.push_str(&format!("Title:    {}\n", book.title.bold()));
    block.push_str(&format!("Author:   {}\n", book.author));
    block.push_str(&format!("Genre:    {}\n", book.genre));
    block.push_str(&format!("Status:   {}\n", book.status));
    block.push_str(&format!("Created:  {}\n", format_timestamp(book.created_at)));
    block.push_str(&format!(
        "Updated:  {} {}\n",
        format_timestamp(book.updated_at),
        format!("({})", format_time_ago(book.updated_at)).dimmed()
    ));
    block
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
