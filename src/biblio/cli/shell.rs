use super::print::{print_books, print_heading, print_menu, print_messages};
use super::prompt::{ask, Ask, LineSource, ShellError, ShellResult};
use biblio::api::{BiblioApi, CmdMessage, SearchFilter};
use biblio::error::Result;
use biblio::model::{BookFields, Status};
use biblio::store::KeyValueStore;
use colored::Colorize;
use std::io::Write;

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user picked the exit entry.
    Quit,
    /// Ctrl-C or end of input at a prompt.
    Interrupted,
}

pub struct Shell<S: KeyValueStore, L: LineSource, W: Write> {
    api: BiblioApi<S>,
    input: L,
    out: W,
}

impl<S: KeyValueStore, L: LineSource, W: Write> Shell<S, L, W> {
    pub fn new(api: BiblioApi<S>, input: L, out: W) -> Self {
        Self { api, input, out }
    }

    /// Run the menu loop until the user exits or interrupts.
    ///
    /// Store and I/O failures end the session with an error.
    pub fn run(&mut self) -> Result<SessionEnd> {
        loop {
            print_menu(&mut self.out)?;
            let Some(choice) = self.input.read_line("Select an option (1-6): ")? else {
                return Ok(SessionEnd::Interrupted);
            };

            let step = match choice.trim() {
                "1" => self.add(),
                "2" => self.update(),
                "3" => self.delete(),
                "4" => self.list(),
                "5" => self.search(),
                "6" => {
                    writeln!(self.out, "Goodbye!")?;
                    return Ok(SessionEnd::Quit);
                }
                _ => self.invalid_choice(),
            };

            match step {
                Ok(()) => {}
                Err(ShellError::Interrupted) => return Ok(SessionEnd::Interrupted),
                Err(ShellError::Fatal(e)) => {
                    tracing::error!(error = %e, "session aborted");
                    return Err(e);
                }
            }
        }
    }

    fn ask(&mut self, label: &str, mode: Ask<'_>) -> ShellResult<String> {
        ask(&mut self.input, &mut self.out, label, mode)
    }

    fn add(&mut self) -> ShellResult<()> {
        print_heading(&mut self.out, "Add a new book")?;
        let title = self.ask("Title", Ask::Required)?;
        let author = self.ask("Author", Ask::Required)?;
        let genre = self.ask("Genre", Ask::Required)?;
        let status = self.ask(
            &format!("Status ({})", status_choices()),
            Ask::Optional(Status::default().as_str()),
        )?;

        let fields = BookFields::new()
            .title(title)
            .author(author)
            .genre(genre)
            .status(status);
        let result = self.api.add_book(fields)?;
        print_messages(&mut self.out, &result.messages)?;
        Ok(())
    }

    fn update(&mut self) -> ShellResult<()> {
        print_heading(&mut self.out, "Update a book")?;
        let id = self.ask("Id of the book to update", Ask::Required)?;
        let Some(current) = self.api.get_book(&id)? else {
            print_messages(
                &mut self.out,
                &[CmdMessage::error("No book found with that id.")],
            )?;
            return Ok(());
        };

        writeln!(self.out, "Leave blank to keep the current value.")?;
        let title = self.ask("New title", Ask::Optional(&current.title))?;
        let author = self.ask("New author", Ask::Optional(&current.author))?;
        let genre = self.ask("New genre", Ask::Optional(&current.genre))?;
        let status = self.ask(
            &format!("New status ({})", status_choices()),
            Ask::Optional(current.status.as_str()),
        )?;

        let changes = BookFields::new()
            .title(title)
            .author(author)
            .genre(genre)
            .status(status);
        let result = self.api.update_book(&id, changes)?;
        print_messages(&mut self.out, &result.messages)?;
        Ok(())
    }

    fn delete(&mut self) -> ShellResult<()> {
        print_heading(&mut self.out, "Delete a book")?;
        let id = self.ask("Id of the book to delete", Ask::Required)?;
        let result = self.api.delete_book(&id)?;
        print_messages(&mut self.out, &result.messages)?;
        Ok(())
    }

    fn list(&mut self) -> ShellResult<()> {
        print_heading(&mut self.out, "Book list")?;
        let result = self.api.list_books()?;
        print_books(&mut self.out, &result.listed_books)?;
        print_messages(&mut self.out, &result.messages)?;
        Ok(())
    }

    fn search(&mut self) -> ShellResult<()> {
        print_heading(&mut self.out, "Search books (leave blank to skip)")?;
        let filter = SearchFilter {
            title: Some(self.ask("Title contains", Ask::Optional(""))?),
            author: Some(self.ask("Author contains", Ask::Optional(""))?),
            genre: Some(self.ask("Genre contains", Ask::Optional(""))?),
        };

        let result = self.api.search_books(&filter)?;
        print_messages(&mut self.out, &result.messages)?;
        print_books(&mut self.out, &result.listed_books)?;
        Ok(())
    }

    fn invalid_choice(&mut self) -> ShellResult<()> {
        writeln!(self.out, "{}", "Invalid option. Try again.".red())?;
        Ok(())
    }
}

fn status_choices() -> String {
    Status::ALL
        .iter()
        .map(Status::as_str)
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::super::prompt::scripted::ScriptedInput;
    use super::*;
    use biblio::store::memory::InMemoryStore;
    use biblio::store::Keyspace;

    type TestShell = Shell<InMemoryStore, ScriptedInput, Vec<u8>>;

    fn shell(lines: &[&str]) -> TestShell {
        shell_with(InMemoryStore::new(), lines)
    }

    fn shell_with(store: InMemoryStore, lines: &[&str]) -> TestShell {
        let api = BiblioApi::new(store, Keyspace::new("libro"));
        Shell::new(api, ScriptedInput::new(lines), Vec::new())
    }

    fn output(shell: &TestShell) -> String {
        String::from_utf8_lossy(&shell.out).into_owned()
    }

    /// Shell with one stored book; returns it with the book's id.
    fn shell_with_dune(lines: &[&str]) -> (TestShell, String) {
        let mut seed = shell(&[]);
        let result = seed
            .api
            .add_book(
                BookFields::new()
                    .title("Dune")
                    .author("Herbert")
                    .genre("scifi")
                    .status("pendiente"),
            )
            .unwrap();
        let id = result.affected_books[0].id.to_string();
        let Shell { api, .. } = seed;
        let lines: Vec<&str> = lines
            .iter()
            .map(|l| if *l == "{id}" { id.as_str() } else { *l })
            .collect();
        let shell = Shell::new(api, ScriptedInput::new(&lines), Vec::new());
        (shell, id)
    }

    #[test]
    fn exit_option_quits() {
        let mut sh = shell(&["6"]);
        assert_eq!(sh.run().unwrap(), SessionEnd::Quit);
        assert!(output(&sh).contains("Goodbye!"));
    }

    #[test]
    fn invalid_choice_reprompts_without_side_effects() {
        let mut sh = shell(&["9", "", "6"]);
        assert_eq!(sh.run().unwrap(), SessionEnd::Quit);
        let text = output(&sh);
        assert_eq!(text.matches("Invalid option. Try again.").count(), 2);
        assert_eq!(text.matches("6) Exit").count(), 3);
        assert!(sh.api.store().is_empty());
    }

    #[test]
    fn end_of_input_at_menu_is_an_interrupt() {
        let mut sh = shell(&[]);
        assert_eq!(sh.run().unwrap(), SessionEnd::Interrupted);
    }

    #[test]
    fn interrupt_mid_prompt_ends_session_without_writing() {
        let mut sh = shell(&["1", "Dune", "Herbert"]);
        assert_eq!(sh.run().unwrap(), SessionEnd::Interrupted);
        assert!(sh.api.store().is_empty());
    }

    #[test]
    fn add_then_list() {
        let mut sh = shell(&["1", "Dune", "", "Herbert", "scifi", "", "4", "6"]);
        assert_eq!(sh.run().unwrap(), SessionEnd::Quit);

        let text = output(&sh);
        assert!(text.contains("This field is required."));
        assert!(text.contains("Book added with id:"));
        assert!(text.contains("Author:   Herbert"));
        assert!(text.contains("Status:   pendiente"));
        assert_eq!(sh.api.store().len(), 1);
    }

    #[test]
    fn add_with_invalid_status_reports_and_writes_nothing() {
        let mut sh = shell(&["1", "Dune", "Herbert", "scifi", "perdido", "6"]);
        sh.run().unwrap();
        assert!(output(&sh).contains("Invalid status"));
        assert!(sh.api.store().is_empty());
    }

    #[test]
    fn update_changes_only_what_was_typed() {
        let (mut sh, id) = shell_with_dune(&["2", "{id}", "", "", "", "Leyendo", "6"]);
        sh.run().unwrap();

        assert!(output(&sh).contains("Book updated."));
        let book = sh.api.get_book(&id).unwrap().unwrap();
        assert_eq!(book.status, Status::Reading);
        assert_eq!(book.title, "Dune");
        assert!(sh
            .input
            .prompts
            .iter()
            .any(|p| p == "New title [Dune]: "));
    }

    #[test]
    fn update_with_no_changes_is_reported() {
        let (mut sh, _) = shell_with_dune(&["2", "{id}", "", "", "", "", "6"]);
        sh.run().unwrap();
        assert!(output(&sh).contains("No changes to apply."));
    }

    #[test]
    fn update_unknown_id_skips_field_prompts() {
        let mut sh = shell(&["2", "nope", "6"]);
        assert_eq!(sh.run().unwrap(), SessionEnd::Quit);
        assert!(output(&sh).contains("No book found with that id."));
        assert!(!output(&sh).contains("Leave blank"));
    }

    #[test]
    fn delete_twice() {
        let (mut sh, _) = shell_with_dune(&["3", "{id}", "3", "{id}", "6"]);
        sh.run().unwrap();
        let text = output(&sh);
        assert!(text.contains("Book deleted."));
        assert!(text.contains("No book found with that id."));
        assert!(sh.api.store().is_empty());
    }

    #[test]
    fn search_by_title() {
        let (mut sh, _) = shell_with_dune(&["5", "dun", "", "", "5", "zz", "", "", "6"]);
        sh.run().unwrap();
        let text = output(&sh);
        assert!(text.contains("Found 1 result(s):"));
        assert!(text.contains("Genre:    scifi"));
        assert!(text.contains("No results found."));
    }

    #[test]
    fn empty_list() {
        let mut sh = shell(&["4", "6"]);
        sh.run().unwrap();
        assert!(output(&sh).contains("(no records)"));
    }

    #[test]
    fn store_failure_ends_session_with_error() {
        let mut store = InMemoryStore::new();
        store.set_simulate_error(true);
        let mut sh = shell_with(store, &["4", "6"]);
        assert!(sh.run().is_err());
    }
}
