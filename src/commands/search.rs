use std::fs;
use std::path::Path;

use super::{Command, CommandError};
use crate::session::Session;

/// `find` - search for file names containing a pattern.
///
/// Forms: `find <pattern>`, `find <pattern> -r`, `find <dir> -name <pattern>`.
pub struct FindCommand;

impl FindCommand {
    fn walk(dir: &Path, pattern: &str, recursive: bool) -> usize {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => return 0,
        };

        let mut count = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if entry.file_name().to_string_lossy().contains(pattern) {
                println!("{}", path.display());
                count += 1;
            }
            if recursive && path.is_dir() {
                count += Self::walk(&path, pattern, recursive);
            }
        }
        count
    }
}

impl Command for FindCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        if args.len() < 2 {
            println!("usage: find <pattern> [-r for recursive]");
            println!("   or: find <directory> -name <pattern>");
            return Ok(());
        }

        let mut recursive = false;
        let mut start_dir = session.working_dir().to_path_buf();
        let pattern;

        if args.len() >= 4 && args[2] == "-name" {
            start_dir = session.resolve(&args[1]);
            pattern = args[3].clone();
            recursive = true;
        } else if args.len() == 3 && args[2] == "-r" {
            pattern = args[1].clone();
            recursive = true;
        } else {
            pattern = args[1].clone();
        }

        if !start_dir.is_dir() {
            println!("find: '{}': No such directory", args[1]);
            return Ok(());
        }

        println!("Searching for: {}", pattern);
        let count = Self::walk(&start_dir, &pattern, recursive);
        println!("\nFound {} match(es)", count);
        Ok(())
    }
}

/// `wc` - count lines, words and characters in a file.
pub struct WcCommand;

impl Command for WcCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        if args.len() < 2 {
            println!("usage: wc <filename>");
            println!("       wc -l <filename>  (lines only)");
            println!("       wc -w <filename>  (words only)");
            return Ok(());
        }

        let (lines_only, words_only, name) = match args[1].as_str() {
            "-l" | "-w" if args.len() < 3 => {
                println!("usage: wc <filename>");
                return Ok(());
            }
            "-l" => (true, false, &args[2]),
            "-w" => (false, true, &args[2]),
            _ => (false, false, &args[1]),
        };

        let path = session.resolve(name);
        if !path.exists() {
            println!("wc: {}: No such file", name);
            return Ok(());
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                println!("Error reading file: {}", e);
                return Ok(());
            }
        };

        let line_count = contents.lines().count();
        let word_count: usize = contents
            .lines()
            .map(|line| line.split_whitespace().count())
            .sum();
        let char_count: usize = contents.lines().map(|line| line.chars().count()).sum();

        if lines_only {
            println!("{:7} {}", line_count, name);
        } else if words_only {
            println!("{:7} {}", word_count, name);
        } else {
            println!("{:7} {:7} {:7} {}", line_count, word_count, char_count, name);
        }
        Ok(())
    }
}

/// `diff` - line-by-line comparison of two files.
pub struct DiffCommand;

impl Command for DiffCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let (first_arg, second_arg) = match (args.get(1), args.get(2)) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                println!("usage: diff <file1> <file2>");
                return Ok(());
            }
        };

        let first_path = session.resolve(first_arg);
        let second_path = session.resolve(second_arg);
        if !first_path.exists() {
            println!("diff: {}: No such file", first_arg);
            return Ok(());
        }
        if !second_path.exists() {
            println!("diff: {}: No such file", second_arg);
            return Ok(());
        }

        let (first, second) = match (
            fs::read_to_string(&first_path),
            fs::read_to_string(&second_path),
        ) {
            (Ok(a), Ok(b)) => (a, b),
            (Err(e), _) | (_, Err(e)) => {
                println!("Error comparing files: {}", e);
                return Ok(());
            }
        };

        let first_lines: Vec<&str> = first.lines().collect();
        let second_lines: Vec<&str> = second.lines().collect();
        let mut identical = true;

        for i in 0..first_lines.len().max(second_lines.len()) {
            match (first_lines.get(i), second_lines.get(i)) {
                (None, Some(line)) => {
                    println!("> {}: {}", i + 1, line);
                    identical = false;
                }
                (Some(line), None) => {
                    println!("< {}: {}", i + 1, line);
                    identical = false;
                }
                (Some(a), Some(b)) if a != b => {
                    println!("< {}: {}", i + 1, a);
                    println!("> {}: {}", i + 1, b);
                    identical = false;
                }
                _ => {}
            }
        }

        if identical {
            println!("Files are identical");
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
    fn test_find_missing_directory_reports_without_error() {
        let dir = tempdir().expect("tempdir");
        let mut session = Session::with_working_dir(dir.path().to_path_buf());

        FindCommand
            .execute(&args(&["find", "nope", "-name", "x"]), &mut session)
            .expect("find reports missing dir, never errors");
    }

    #[test]
    fn test_find_runs_over_nested_tree() {
        let dir = tempdir().expect("tempdir");
        let mut session = Session::with_working_dir(dir.path().to_path_buf());
        fs::create_dir_all(dir.path().join("a/b")).expect("seed tree");
        fs::write(dir.path().join("a/b/match.txt"), "").expect("seed file");

        FindCommand
            .execute(&args(&["find", "match", "-r"]), &mut session)
            .expect("find runs");
    }

    #[test]
    fn test_wc_counts() {
        let dir = tempdir().expect("tempdir");
        let mut session = Session::with_working_dir(dir.path().to_path_buf());
        fs::write(dir.path().join("w.txt"), "one two\nthree\n").expect("seed file");

        WcCommand
            .execute(&args(&["wc", "w.txt"]), &mut session)
            .expect("wc runs");
        WcCommand
            .execute(&args(&["wc", "-l", "w.txt"]), &mut session)
            .expect("wc -l runs");
    }

    #[test]
    fn test_diff_handles_unequal_lengths() {
        let dir = tempdir().expect("tempdir");
        let mut session = Session::with_working_dir(dir.path().to_path_buf());
        fs::write(dir.path().join("a.txt"), "same\nonly-a\n").expect("seed file");
        fs::write(dir.path().join("b.txt"), "same\n").expect("seed file");

        DiffCommand
            .execute(&args(&["diff", "a.txt", "b.txt"]), &mut session)
            .expect("diff runs");
    }
}
