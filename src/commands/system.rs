use std::env;
use std::io::{self, Write};

use chrono::Local;

use super::{Command, CommandError};
use crate::session::Session;

/// `history` - list the session history with one-based indices.
pub struct HistoryCommand;

impl Command for HistoryCommand {
    fn execute(&self, _args: &[String], session: &mut Session) -> Result<(), CommandError> {
        if session.history().is_empty() {
            println!("No command history.");
            return Ok(());
        }

        for (index, line) in session.history().iter().enumerate() {
            println!("{:5}  {}", index + 1, line);
        }
        Ok(())
    }
}

/// `whoami` - print the current user name.
pub struct WhoamiCommand;

impl Command for WhoamiCommand {
    fn execute(&self, _args: &[String], _session: &mut Session) -> Result<(), CommandError> {
        match env::var("USER").or_else(|_| env::var("USERNAME")) {
            Ok(user) => println!("{}", user),
            Err(_) => println!("Unknown user"),
        }
        Ok(())
    }
}

/// `date` - print the current local date and time.
pub struct DateCommand;

impl Command for DateCommand {
    fn execute(&self, _args: &[String], _session: &mut Session) -> Result<(), CommandError> {
        println!("{}", Local::now().to_rfc2822());
        Ok(())
    }
}

/// `clear` - clear the terminal with ANSI escape codes.
pub struct ClearCommand;

impl Command for ClearCommand {
    fn execute(&self, _args: &[String], _session: &mut Session) -> Result<(), CommandError> {
        print!("\x1b[H\x1b[2J");
        io::stdout().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_history_prints_all_recorded_lines() {
        let mut session = Session::with_working_dir(PathBuf::from("/"));
        session.record("pwd");
        session.record("unknown_cmd");

        HistoryCommand
            .execute(&["history".to_string()], &mut session)
            .expect("history runs");
        // The handler must not mutate what it lists.
        assert_eq!(session.history(), &["pwd", "unknown_cmd"]);
    }

    #[test]
    fn test_whoami_and_date_never_fail() {
        let mut session = Session::with_working_dir(PathBuf::from("/"));
        WhoamiCommand
            .execute(&["whoami".to_string()], &mut session)
            .expect("whoami runs");
        DateCommand
            .execute(&["date".to_string()], &mut session)
            .expect("date runs");
    }
}
