use std::fs;

use super::{Command, CommandError};
use crate::path::PathExpander;
use crate::session::Session;

/// `ls` - list the entries of the working directory.
pub struct LsCommand;

impl Command for LsCommand {
    fn execute(&self, _args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let entries = match fs::read_dir(session.working_dir()) {
            Ok(entries) => entries,
            Err(e) => {
                println!("Error listing directory: {}", e);
                return Ok(());
            }
        };

        let mut listing: Vec<(bool, u64, String)> = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            let (is_dir, size) = match entry.metadata() {
                Ok(meta) => (meta.is_dir(), meta.len()),
                Err(_) => (false, 0),
            };
            listing.push((is_dir, size, name));
        }
        listing.sort_by(|a, b| a.2.cmp(&b.2));

        for (is_dir, size, name) in listing {
            let kind = if is_dir { "DIR" } else { "FILE" };
            println!("[{}] {:<8} {}", kind, format!("{}B", size), name);
        }
        Ok(())
    }
}

/// `pwd` - print the absolute working directory.
pub struct PwdCommand;

impl Command for PwdCommand {
    fn execute(&self, _args: &[String], session: &mut Session) -> Result<(), CommandError> {
        println!("{}", session.working_dir().display());
        Ok(())
    }
}

/// `cd` - change the session working directory.
///
/// The only handler allowed to mutate `Session::working_dir`. With no
/// argument it goes home; `..` stops at the filesystem root; a missing target
/// prints a diagnostic and leaves the session untouched.
pub struct CdCommand {
    path_expander: PathExpander,
}

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let target = match args.get(1) {
            None => match self.path_expander.get_home_dir() {
                Ok(home) => home,
                Err(e) => {
                    println!("cd: {}", e);
                    return Ok(());
                }
            },
            Some(raw) if raw == ".." => match session.working_dir().parent() {
                Some(parent) => parent.to_path_buf(),
                None => session.working_dir().to_path_buf(),
            },
            Some(raw) => {
                let expanded = match self.path_expander.expand(raw) {
                    Ok(path) => path,
                    Err(e) => {
                        println!("cd: {}", e);
                        return Ok(());
                    }
                };
                if expanded.is_absolute() {
                    expanded
                } else {
                    session.working_dir().join(expanded)
                }
            }
        };

        if target.is_dir() {
            session.set_working_dir(target);
        } else {
            let shown = args.get(1).map(String::as_str).unwrap_or("~");
            println!("cd: {}: No such directory", shown);
        }
        Ok(())
    }
}

/// `mkdir` - create a single directory.
pub struct MkdirCommand;

impl Command for MkdirCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let name = match args.get(1) {
            Some(name) => name,
            None => {
                println!("usage: mkdir <directory_name>");
                return Ok(());
            }
        };

        let path = session.resolve(name);
        match fs::create_dir(&path) {
            Ok(()) => println!("Directory created: {}", name),
            Err(_) => println!("mkdir: cannot create directory (may already exist)."),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn session_in(dir: &tempfile::TempDir) -> Session {
        let root = dir.path().canonicalize().expect("tempdir canonicalizes");
        Session::with_working_dir(root)
    }

    #[test]
    fn test_mkdir_then_cd() {
        let dir = tempdir().expect("tempdir");
        let mut session = session_in(&dir);
        let root = session.working_dir().to_path_buf();

        MkdirCommand
            .execute(&args(&["mkdir", "sub"]), &mut session)
            .expect("mkdir runs");
        assert!(root.join("sub").is_dir());

        CdCommand::new()
            .execute(&args(&["cd", "sub"]), &mut session)
            .expect("cd runs");
        assert_eq!(session.working_dir(), root.join("sub"));
    }

    #[test]
    fn test_cd_missing_target_leaves_session_unchanged() {
        let dir = tempdir().expect("tempdir");
        let mut session = session_in(&dir);
        let before = session.working_dir().to_path_buf();

        CdCommand::new()
            .execute(&args(&["cd", "nope"]), &mut session)
            .expect("cd reports missing dir without failing");
        assert_eq!(session.working_dir(), before);
    }

    #[test]
    fn test_cd_dotdot_goes_to_parent() {
        let dir = tempdir().expect("tempdir");
        let mut session = session_in(&dir);
        let root = session.working_dir().to_path_buf();

        MkdirCommand
            .execute(&args(&["mkdir", "sub"]), &mut session)
            .expect("mkdir runs");
        CdCommand::new()
            .execute(&args(&["cd", "sub"]), &mut session)
            .expect("cd runs");
        CdCommand::new()
            .execute(&args(&["cd", ".."]), &mut session)
            .expect("cd .. runs");
        assert_eq!(session.working_dir(), root);
    }

    #[test]
    fn test_cd_dotdot_stops_at_root() {
        let mut session = Session::with_working_dir(PathBuf::from("/"));
        CdCommand::new()
            .execute(&args(&["cd", ".."]), &mut session)
            .expect("cd .. at root runs");
        assert_eq!(session.working_dir(), PathBuf::from("/"));
    }

    #[test]
    fn test_mkdir_existing_does_not_fail() {
        let dir = tempdir().expect("tempdir");
        let mut session = session_in(&dir);
        MkdirCommand
            .execute(&args(&["mkdir", "sub"]), &mut session)
            .expect("mkdir runs");
        MkdirCommand
            .execute(&args(&["mkdir", "sub"]), &mut session)
            .expect("duplicate mkdir reports, never errors");
    }
}
