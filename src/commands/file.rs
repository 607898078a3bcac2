use std::fs::{self, File, OpenOptions};

use super::{Command, CommandError};
use crate::session::Session;

/// `touch` - create an empty file, or leave an existing one as is.
pub struct TouchCommand;

impl Command for TouchCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let name = match args.get(1) {
            Some(name) => name,
            None => {
                println!("usage: touch <filename>");
                return Ok(());
            }
        };

        let path = session.resolve(name);
        if path.exists() {
            // Re-opening for append is the closest portable analog of a
            // timestamp refresh.
            let _ = OpenOptions::new().append(true).open(&path);
            return Ok(());
        }

        match File::create(&path) {
            Ok(_) => println!("File created: {}", name),
            Err(e) => println!("Error creating file: {}", e),
        }
        Ok(())
    }
}

/// `rm` - remove a file or an empty directory.
pub struct RmCommand;

impl Command for RmCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let name = match args.get(1) {
            Some(name) => name,
            None => {
                println!("usage: rm <filename>");
                return Ok(());
            }
        };

        let path = session.resolve(name);
        if !path.exists() {
            println!("rm: cannot remove '{}': No such file", name);
            return Ok(());
        }

        let removed = if path.is_dir() {
            fs::remove_dir(&path)
        } else {
            fs::remove_file(&path)
        };
        match removed {
            Ok(()) => println!("Removed {}", name),
            Err(_) => println!("Error: Could not delete {}", name),
        }
        Ok(())
    }
}

/// `cat` - print a file line by line.
pub struct CatCommand;

impl Command for CatCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let name = match args.get(1) {
            Some(name) => name,
            None => {
                println!("usage: cat <filename>");
                return Ok(());
            }
        };

        let path = session.resolve(name);
        if !path.exists() {
            println!("cat: {}: No such file", name);
            return Ok(());
        }

        match fs::read_to_string(&path) {
            Ok(contents) => {
                for line in contents.lines() {
                    println!("{}", line);
                }
            }
            Err(e) => println!("Error reading file: {}", e),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_touch_creates_file_relative_to_session() {
        let dir = tempdir().expect("tempdir");
        let mut session = Session::with_working_dir(dir.path().to_path_buf());

        TouchCommand
            .execute(&args(&["touch", "a.txt"]), &mut session)
            .expect("touch runs");
        assert!(dir.path().join("a.txt").is_file());
    }

    #[test]
    fn test_touch_existing_is_harmless() {
        let dir = tempdir().expect("tempdir");
        let mut session = Session::with_working_dir(dir.path().to_path_buf());
        fs::write(dir.path().join("a.txt"), "body").expect("seed file");

        TouchCommand
            .execute(&args(&["touch", "a.txt"]), &mut session)
            .expect("touch runs");
        let body = fs::read_to_string(dir.path().join("a.txt")).expect("file readable");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_rm_removes_file() {
        let dir = tempdir().expect("tempdir");
        let mut session = Session::with_working_dir(dir.path().to_path_buf());
        fs::write(dir.path().join("gone.txt"), "x").expect("seed file");

        RmCommand
            .execute(&args(&["rm", "gone.txt"]), &mut session)
            .expect("rm runs");
        assert!(!dir.path().join("gone.txt").exists());
    }

    #[test]
    fn test_rm_missing_file_reports_without_error() {
        let dir = tempdir().expect("tempdir");
        let mut session = Session::with_working_dir(dir.path().to_path_buf());

        RmCommand
            .execute(&args(&["rm", "missing"]), &mut session)
            .expect("rm reports missing file, never errors");
    }

    #[test]
    fn test_cat_missing_file_reports_without_error() {
        let dir = tempdir().expect("tempdir");
        let mut session = Session::with_working_dir(dir.path().to_path_buf());

        CatCommand
            .execute(&args(&["cat", "missing"]), &mut session)
            .expect("cat reports missing file, never errors");
    }
}
