use std::fs;
use std::path::{Path, PathBuf};

use super::{Command, CommandError};
use crate::session::Session;

/// `cp` - copy a file, or a directory tree with `-r`.
pub struct CpCommand;

impl CpCommand {
    fn copy_dir(source: &Path, dest: &Path) -> std::io::Result<()> {
        if !dest.exists() {
            fs::create_dir_all(dest)?;
        }
        for entry in fs::read_dir(source)? {
            let entry = entry?;
            let target = dest.join(entry.file_name());
            if entry.file_type()?.is_dir() {
                Self::copy_dir(&entry.path(), &target)?;
            } else {
                fs::copy(entry.path(), &target)?;
            }
        }
        Ok(())
    }
}

impl Command for CpCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let recursive = args.get(1).map(String::as_str) == Some("-r");
        let (source_arg, dest_arg) = if recursive {
            match (args.get(2), args.get(3)) {
                (Some(s), Some(d)) => (s, d),
                _ => {
                    println!("usage: cp -r <source> <destination>");
                    return Ok(());
                }
            }
        } else {
            match (args.get(1), args.get(2)) {
                (Some(s), Some(d)) => (s, d),
                _ => {
                    println!("usage: cp <source> <destination>");
                    return Ok(());
                }
            }
        };

        let source = session.resolve(source_arg);
        let mut dest = session.resolve(dest_arg);

        if !source.exists() {
            println!("cp: cannot stat '{}': No such file or directory", source_arg);
            return Ok(());
        }

        if source.is_dir() {
            if !recursive {
                println!("cp: {} is a directory (use -r to copy)", source_arg);
                return Ok(());
            }
            match Self::copy_dir(&source, &dest) {
                Ok(()) => println!(
                    "Copied directory '{}' to '{}'",
                    source_arg,
                    display_name(&dest)
                ),
                Err(e) => println!("cp: error copying directory: {}", e),
            }
            return Ok(());
        }

        if dest.is_dir() {
            if let Some(file_name) = source.file_name() {
                dest = dest.join(file_name);
            }
        }
        if dest.exists() {
            println!("Warning: Overwriting {}", display_name(&dest));
        }

        match fs::copy(&source, &dest) {
            Ok(_) => println!("Copied '{}' to '{}'", source_arg, display_name(&dest)),
            Err(e) => println!("cp: error copying file: {}", e),
        }
        Ok(())
    }
}

/// `mv` - move or rename a file or directory.
pub struct MvCommand;

impl Command for MvCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let (source_arg, dest_arg) = match (args.get(1), args.get(2)) {
            (Some(s), Some(d)) => (s, d),
            _ => {
                println!("usage: mv <source> <destination>");
                return Ok(());
            }
        };

        let source = session.resolve(source_arg);
        let mut dest = session.resolve(dest_arg);

        if !source.exists() {
            println!("mv: cannot stat '{}': No such file or directory", source_arg);
            return Ok(());
        }

        if dest.is_dir() {
            if let Some(file_name) = source.file_name() {
                dest = dest.join(file_name);
            }
        }

        if same_file(&source, &dest) {
            println!("mv: '{}' and '{}' are the same file", source_arg, dest_arg);
            return Ok(());
        }
        if dest.exists() {
            println!("Warning: Overwriting {}", display_name(&dest));
        }

        match fs::rename(&source, &dest) {
            Ok(()) => println!("Moved '{}' to '{}'", source_arg, display_name(&dest)),
            Err(e) => println!("mv: error moving file: {}", e),
        }
        Ok(())
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn same_file(source: &Path, dest: &Path) -> bool {
    if !dest.exists() {
        return false;
    }
    match (source.canonicalize(), dest.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => PathBuf::from(source) == PathBuf::from(dest),
    }
}
