use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::commands::{default_registry, CommandRegistry};
use crate::error::ShellError;
use crate::flags::Flags;
use crate::highlight::SyntaxHighlighter;
use crate::session::Session;
use crate::tokenize::tokenize;

/// Reserved control word. Checked before registry lookup, so it shadows any
/// registration under the same name.
pub const EXIT_WORD: &str = "exit";

/// What the loop should do after a line has been handled.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

pub struct Shell {
    editor: DefaultEditor,
    registry: CommandRegistry,
    session: Session,
    highlighter: SyntaxHighlighter,
    quiet: bool,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let editor = DefaultEditor::new()?;
        let session = Session::new()?;

        // An interrupt outside a readline must not kill the session.
        ctrlc::set_handler(|| {
            println!("\nUse 'exit' to leave the shell");
        })?;

        Ok(Shell {
            editor,
            registry: default_registry(),
            session,
            highlighter: SyntaxHighlighter::new(),
            quiet: flags.is_set("quiet"),
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        if !self.quiet {
            println!("Welcome to krill, a lightweight shell emulator.");
            println!("Type 'help' for a list of commands or 'exit' to quit.");
            println!("---------------------------------------------------");
        }

        loop {
            let prompt = format!("{} > ", self.session.working_dir().display());
            let read = self.editor.readline(&prompt);
            if let Ok(line) = &read {
                if !line.trim().is_empty() {
                    if let Err(e) = self.editor.add_history_entry(line.trim()) {
                        if !self.quiet {
                            eprintln!("Warning: Couldn't add to history: {}", e);
                        }
                    }
                }
            }

            let outcome = handle_readline(
                read,
                &self.registry,
                &mut self.session,
                &self.highlighter,
                self.quiet,
            );
            if outcome == Outcome::Exit {
                break;
            }
        }
        Ok(())
    }
}

/// Turns one readline result into a loop outcome. End-of-input terminates
/// without the user-quit farewell; an interrupt or a read error keeps the
/// loop alive.
pub fn handle_readline(
    read: Result<String, ReadlineError>,
    registry: &CommandRegistry,
    session: &mut Session,
    highlighter: &SyntaxHighlighter,
    quiet: bool,
) -> Outcome {
    match read {
        Ok(line) => dispatch(&line, registry, session, highlighter),
        Err(ReadlineError::Interrupted) => {
            if !quiet {
                println!("CTRL-C");
            }
            Outcome::Continue
        }
        Err(ReadlineError::Eof) => Outcome::Exit,
        Err(e) => {
            eprintln!("Error: {}", e);
            Outcome::Continue
        }
    }
}

/// Handles one input line: trim, record, tokenize, look up and invoke.
///
/// This is the failure-isolation boundary: a handler `Err` is converted to a
/// diagnostic line here and the session keeps running. Empty lines are
/// dropped before history; the exit word never reaches the registry.
pub fn dispatch(
    line: &str,
    registry: &CommandRegistry,
    session: &mut Session,
    highlighter: &SyntaxHighlighter,
) -> Outcome {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Outcome::Continue;
    }
    session.record(trimmed);

    let tokens = tokenize(trimmed);
    let name = &tokens[0];

    if name == EXIT_WORD {
        println!("Exiting krill...");
        return Outcome::Exit;
    }

    match registry.lookup(name) {
        Some(command) => {
            log::debug!("dispatching '{}' with {} argument(s)", name, tokens.len() - 1);
            if let Err(e) = command.execute(&tokens, session) {
                log::warn!("command '{}' failed: {}", name, e);
                println!(
                    "{}",
                    highlighter.highlight_error(&format!("Error executing command: {}", e))
                );
            }
        }
        None => {
            println!("krill: command not found: {}", name);
            println!(
                "{}",
                highlighter.highlight_hint("Type 'help' for a list of commands.")
            );
        }
    }
    Outcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Command, CommandError};
    use std::fs;
    use tempfile::tempdir;

    struct FailingCommand;

    impl Command for FailingCommand {
        fn execute(&self, _args: &[String], _session: &mut Session) -> Result<(), CommandError> {
            Err(CommandError::Execution("synthetic failure".to_string()))
        }
    }

    fn fixture() -> (CommandRegistry, SyntaxHighlighter) {
        (default_registry(), SyntaxHighlighter::new())
    }

    fn session_in(dir: &tempfile::TempDir) -> Session {
        let root = dir.path().canonicalize().expect("tempdir canonicalizes");
        Session::with_working_dir(root)
    }

    #[test]
    fn test_whitespace_only_lines_leave_no_trace() {
        let (registry, highlighter) = fixture();
        let dir = tempdir().expect("tempdir");
        let mut session = session_in(&dir);
        let before = session.working_dir().to_path_buf();

        assert_eq!(dispatch("", &registry, &mut session, &highlighter), Outcome::Continue);
        assert_eq!(dispatch("   \t ", &registry, &mut session, &highlighter), Outcome::Continue);
        assert!(session.history().is_empty());

        dispatch("pwd", &registry, &mut session, &highlighter);
        assert_eq!(session.history(), &["pwd"]);
        assert_eq!(session.working_dir(), before);
    }

    #[test]
    fn test_history_records_trimmed_lines_in_order() {
        let (registry, highlighter) = fixture();
        let dir = tempdir().expect("tempdir");
        let mut session = session_in(&dir);

        dispatch("  pwd  ", &registry, &mut session, &highlighter);
        dispatch("unknown_cmd", &registry, &mut session, &highlighter);
        dispatch("echo a   b", &registry, &mut session, &highlighter);
        assert_eq!(session.history(), &["pwd", "unknown_cmd", "echo a   b"]);
    }

    #[test]
    fn test_unknown_command_is_recorded_but_not_executed() {
        let (registry, highlighter) = fixture();
        let dir = tempdir().expect("tempdir");
        let mut session = session_in(&dir);

        let outcome = dispatch("unknown_cmd", &registry, &mut session, &highlighter);
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(session.history(), &["unknown_cmd"]);
    }

    #[test]
    fn test_exit_word_ends_loop_before_lookup() {
        let (registry, highlighter) = fixture();
        let dir = tempdir().expect("tempdir");
        let mut session = session_in(&dir);

        assert_eq!(dispatch("exit", &registry, &mut session, &highlighter), Outcome::Exit);
        // The line still counts as input.
        assert_eq!(session.history(), &["exit"]);
    }

    #[test]
    fn test_end_of_input_exits_without_farewell() {
        let (registry, highlighter) = fixture();
        let dir = tempdir().expect("tempdir");
        let mut session = session_in(&dir);

        let outcome = handle_readline(
            Err(ReadlineError::Eof),
            &registry,
            &mut session,
            &highlighter,
            false,
        );
        assert_eq!(outcome, Outcome::Exit);
        // Unlike the typed exit word, end-of-input never reaches dispatch,
        // so nothing is recorded.
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_interrupt_keeps_the_loop_alive() {
        let (registry, highlighter) = fixture();
        let dir = tempdir().expect("tempdir");
        let mut session = session_in(&dir);

        let outcome = handle_readline(
            Err(ReadlineError::Interrupted),
            &registry,
            &mut session,
            &highlighter,
            true,
        );
        assert_eq!(outcome, Outcome::Continue);
        assert!(session.history().is_empty());

        let outcome = handle_readline(
            Ok("pwd".to_string()),
            &registry,
            &mut session,
            &highlighter,
            true,
        );
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(session.history(), &["pwd"]);
    }

    #[test]
    fn test_exit_shadows_same_named_registration() {
        let (mut registry, highlighter) = fixture();
        registry.register("exit", Box::new(FailingCommand));
        let dir = tempdir().expect("tempdir");
        let mut session = session_in(&dir);

        // The failing handler never runs; the control word wins.
        assert_eq!(dispatch("exit", &registry, &mut session, &highlighter), Outcome::Exit);
    }

    #[test]
    fn test_failing_handler_does_not_stop_the_loop() {
        let (mut registry, highlighter) = fixture();
        registry.register("boom", Box::new(FailingCommand));
        let dir = tempdir().expect("tempdir");
        let mut session = session_in(&dir);

        assert_eq!(dispatch("boom", &registry, &mut session, &highlighter), Outcome::Continue);

        // The next line dispatches normally.
        dispatch("mkdir after", &registry, &mut session, &highlighter);
        assert!(session.working_dir().join("after").is_dir());
        assert_eq!(session.history(), &["boom", "mkdir after"]);
    }

    #[test]
    fn test_working_directory_confinement_after_cd() {
        let (registry, highlighter) = fixture();
        let dir = tempdir().expect("tempdir");
        let mut session = session_in(&dir);
        let root = session.working_dir().to_path_buf();

        dispatch("mkdir sub", &registry, &mut session, &highlighter);
        dispatch("cd sub", &registry, &mut session, &highlighter);
        assert_eq!(session.working_dir(), root.join("sub"));

        dispatch("touch inner.txt", &registry, &mut session, &highlighter);
        assert!(root.join("sub/inner.txt").is_file());
        assert!(!root.join("inner.txt").exists());
    }

    #[test]
    fn test_touch_echo_redirect_cat_scenario() {
        let (registry, highlighter) = fixture();
        let dir = tempdir().expect("tempdir");
        let mut session = session_in(&dir);

        dispatch("touch a.txt", &registry, &mut session, &highlighter);
        dispatch("echo hi > a.txt", &registry, &mut session, &highlighter);
        let body = fs::read_to_string(session.working_dir().join("a.txt")).expect("file written");
        assert_eq!(body, "hi\n");

        assert_eq!(dispatch("cat a.txt", &registry, &mut session, &highlighter), Outcome::Continue);
    }

    #[test]
    fn test_echo_without_redirect_keeps_filesystem_untouched() {
        let (registry, highlighter) = fixture();
        let dir = tempdir().expect("tempdir");
        let mut session = session_in(&dir);

        dispatch("echo hello world", &registry, &mut session, &highlighter);
        let entries = fs::read_dir(session.working_dir()).expect("readable dir").count();
        assert_eq!(entries, 0);
    }
}
