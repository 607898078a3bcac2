use std::fs::{self, OpenOptions};
use std::io::Write;

use super::{redirect, Command, CommandError};
use crate::session::Session;

/// `echo` - print its arguments, honoring trailing `>` / `>>` redirection.
pub struct EchoCommand;

impl Command for EchoCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let (words, redirect) = match redirect::split(&args[1..]) {
            Ok(parsed) => parsed,
            Err(diagnostic) => {
                println!("{}", diagnostic);
                return Ok(());
            }
        };
        let text = words.join(" ");

        let redirect = match redirect {
            Some(redirect) => redirect,
            None => {
                println!("{}", text);
                return Ok(());
            }
        };

        let path = session.resolve(&redirect.target);
        let opened = OpenOptions::new()
            .create(true)
            .append(redirect.append)
            .write(true)
            .truncate(!redirect.append)
            .open(&path);
        let mut file = match opened {
            Ok(file) => file,
            Err(e) => {
                println!("Error writing to file: {}", e);
                return Ok(());
            }
        };

        match writeln!(file, "{}", text) {
            Ok(()) => {
                let verb = if redirect.append { "Appended to" } else { "Overwrote" };
                println!("{} {}", verb, redirect.target);
            }
            Err(e) => println!("Error writing to file: {}", e),
        }
        Ok(())
    }
}

/// `grep` - print the lines of a file containing a literal pattern.
pub struct GrepCommand;

impl Command for GrepCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let (pattern, name) = match (args.get(1), args.get(2)) {
            (Some(pattern), Some(name)) => (pattern, name),
            _ => {
                println!("usage: grep <pattern> <filename>");
                return Ok(());
            }
        };

        let path = session.resolve(name);
        if !path.exists() {
            println!("grep: {}: No such file", name);
            return Ok(());
        }

        match fs::read_to_string(&path) {
            Ok(contents) => {
                for line in contents.lines().filter(|line| line.contains(pattern.as_str())) {
                    println!("{}", line);
                }
            }
            Err(e) => println!("Error processing file: {}", e),
        }
        Ok(())
    }
}

/// `help` - list the available commands by category.
pub struct HelpCommand;

impl Command for HelpCommand {
    fn execute(&self, _args: &[String], _session: &mut Session) -> Result<(), CommandError> {
        println!("Available Commands:");
        println!("  ls, pwd, cd, mkdir");
        println!("  touch, rm, cat");
        println!("  echo (supports > and >>), grep");
        println!("  cp (-r), mv");
        println!("  history, whoami, date, clear");
        println!("  find, wc, diff");
        println!("  zip, unzip, gzip, gunzip");
        println!("  ping, wget, curl, ifconfig");
        println!("  ps, exec, env, uname");
        println!("  sort, uniq, checksum, du, head, tail");
        println!("  exit");
        Ok(())
    }
}
