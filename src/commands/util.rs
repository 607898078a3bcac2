use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use md5::Md5;
use sha2::{Digest, Sha256};

use super::{format_bytes, Command, CommandError};
use crate::session::Session;

/// `sort` - print a file's lines sorted; `-r` reverses, `-n` compares
/// numerically with a lexicographic fallback.
pub struct SortCommand;

impl Command for SortCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        if args.len() < 2 {
            println!("usage: sort <filename>");
            println!("   or: sort -r <filename>  (reverse order)");
            println!("   or: sort -n <filename>  (numeric sort)");
            return Ok(());
        }

        let (reverse, numeric, name) = match args[1].as_str() {
            flag @ ("-r" | "-n" | "-rn" | "-nr") => {
                let Some(name) = args.get(2) else {
                    println!("usage: sort <filename>");
                    return Ok(());
                };
                (flag.contains('r'), flag.contains('n'), name)
            }
            _ => (false, false, &args[1]),
        };

        let path = session.resolve(name);
        if !path.exists() {
            println!("sort: {}: No such file", name);
            return Ok(());
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                println!("Error reading file: {}", e);
                return Ok(());
            }
        };

        let mut lines: Vec<&str> = contents.lines().collect();
        if numeric {
            lines.sort_by(|a, b| match (a.parse::<f64>(), b.parse::<f64>()) {
                (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                _ => a.cmp(b),
            });
        } else {
            lines.sort_unstable();
        }
        if reverse {
            lines.reverse();
        }

        for line in lines {
            println!("{}", line);
        }
        Ok(())
    }
}

/// `uniq` - collapse duplicate lines (first occurrence wins); `-c` prefixes
/// each with its count.
pub struct UniqCommand;

impl Command for UniqCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        if args.len() < 2 {
            println!("usage: uniq <filename>");
            println!("   or: uniq -c <filename>  (count duplicates)");
            return Ok(());
        }

        let count = args[1] == "-c";
        let name = if count {
            let Some(name) = args.get(2) else {
                println!("usage: uniq -c <filename>");
                return Ok(());
            };
            name
        } else {
            &args[1]
        };

        let path = session.resolve(name);
        if !path.exists() {
            println!("uniq: {}: No such file", name);
            return Ok(());
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                println!("Error reading file: {}", e);
                return Ok(());
            }
        };

        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for line in contents.lines() {
            if !counts.contains_key(line) {
                order.push(line);
            }
            *counts.entry(line).or_insert(0) += 1;
        }

        for line in order {
            if count {
                println!("{:4} {}", counts.get(line).copied().unwrap_or(0), line);
            } else {
                println!("{}", line);
            }
        }
        Ok(())
    }
}

/// `checksum` - MD5 (default) or SHA-256 digest of a file.
pub struct ChecksumCommand;

impl ChecksumCommand {
    fn digest(path: &Path, sha256: bool) -> Result<String, CommandError> {
        let mut file = File::open(path)?;
        let mut buffer = [0u8; 8192];

        if sha256 {
            let mut hasher = Sha256::new();
            loop {
                let read = file.read(&mut buffer)?;
                if read == 0 {
                    break;
                }
                hasher.update(&buffer[..read]);
            }
            Ok(to_hex(&hasher.finalize()))
        } else {
            let mut hasher = Md5::new();
            loop {
                let read = file.read(&mut buffer)?;
                if read == 0 {
                    break;
                }
                hasher.update(&buffer[..read]);
            }
            Ok(to_hex(&hasher.finalize()))
        }
    }
}

impl Command for ChecksumCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        if args.len() < 2 {
            println!("usage: checksum <filename>");
            println!("   or: checksum -sha256 <filename>");
            println!("   or: checksum -md5 <filename>");
            return Ok(());
        }

        let (sha256, name) = match args[1].as_str() {
            flag @ ("-sha256" | "-md5") => {
                let Some(name) = args.get(2) else {
                    println!("usage: checksum <filename>");
                    return Ok(());
                };
                (flag == "-sha256", name)
            }
            _ => (false, &args[1]),
        };

        let path = session.resolve(name);
        if !path.exists() {
            println!("checksum: {}: No such file", name);
            return Ok(());
        }

        match Self::digest(&path, sha256) {
            Ok(hex) => {
                let label = if sha256 { "SHA-256" } else { "MD5" };
                println!("{} ({}) = {}", label, name, hex);
            }
            Err(e) => println!("Error reading file: {}", e),
        }
        Ok(())
    }
}

/// `du` - total size of a file or directory tree.
pub struct DuCommand;

impl DuCommand {
    fn tree_size(path: &Path) -> u64 {
        if path.is_file() {
            return fs::metadata(path).map(|meta| meta.len()).unwrap_or(0);
        }
        let Ok(entries) = fs::read_dir(path) else {
            return 0;
        };
        entries
            .flatten()
            .map(|entry| Self::tree_size(&entry.path()))
            .sum()
    }
}

impl Command for DuCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let mut human_readable = false;
        let mut target = ".".to_string();

        match (args.get(1), args.get(2)) {
            (Some(first), second) if first == "-h" => {
                human_readable = true;
                if let Some(path) = second {
                    target = path.clone();
                }
            }
            (Some(first), second) => {
                target = first.clone();
                if second.map(String::as_str) == Some("-h") {
                    human_readable = true;
                }
            }
            _ => {}
        }

        let path = session.resolve(&target);
        if !path.exists() {
            println!("du: cannot access '{}': No such file or directory", target);
            return Ok(());
        }

        let size = Self::tree_size(&path);
        if human_readable {
            println!("{}\t{}", format_bytes(size), target);
        } else {
            println!("{}\t{}", size / 1024, target);
        }
        Ok(())
    }
}

/// `head` - first n lines of a file (default 10).
pub struct HeadCommand;

impl Command for HeadCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let (count, name) = match parse_line_count(args) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => {
                println!("usage: head <filename>");
                println!("   or: head -n <count> <filename>");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let path = session.resolve(name);
        if !path.exists() {
            println!("head: {}: No such file", name);
            return Ok(());
        }

        match fs::read_to_string(&path) {
            Ok(contents) => {
                for line in contents.lines().take(count) {
                    println!("{}", line);
                }
            }
            Err(e) => println!("Error reading file: {}", e),
        }
        Ok(())
    }
}

/// `tail` - last n lines of a file (default 10).
pub struct TailCommand;

impl Command for TailCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let (count, name) = match parse_line_count(args) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => {
                println!("usage: tail <filename>");
                println!("   or: tail -n <count> <filename>");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let path = session.resolve(name);
        if !path.exists() {
            println!("tail: {}: No such file", name);
            return Ok(());
        }

        match fs::read_to_string(&path) {
            Ok(contents) => {
                let lines: Vec<&str> = contents.lines().collect();
                let start = lines.len().saturating_sub(count);
                for line in &lines[start..] {
                    println!("{}", line);
                }
            }
            Err(e) => println!("Error reading file: {}", e),
        }
        Ok(())
    }
}

/// Parses `[<file>]` or `[-n <count> <file>]`. `Ok(None)` means the usage
/// line should be printed; a malformed count propagates to the boundary.
fn parse_line_count(args: &[String]) -> Result<Option<(usize, &String)>, CommandError> {
    match args.get(1).map(String::as_str) {
        None => Ok(None),
        Some("-n") => match (args.get(2), args.get(3)) {
            (Some(raw), Some(name)) => {
                let count = raw.parse().map_err(|_| {
                    CommandError::InvalidArguments(format!("bad line count: {}", raw))
                })?;
                Ok(Some((count, name)))
            }
            _ => Ok(None),
        },
        Some(_) => Ok(Some((10, &args[1]))),
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_to_hex_pads_low_bytes() {
        assert_eq!(to_hex(&[0x00, 0x0f, 0xff]), "000fff");
    }

    #[test]
    fn test_checksum_known_digests() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("abc.txt"), "abc").expect("seed file");

        let md5 = ChecksumCommand::digest(&dir.path().join("abc.txt"), false).expect("md5 digest");
        assert_eq!(md5, "900150983cd24fb0d6963f7d28e17f72");

        let sha = ChecksumCommand::digest(&dir.path().join("abc.txt"), true).expect("sha digest");
        assert_eq!(
            sha,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_checksum_missing_file_reports_without_error() {
        let dir = tempdir().expect("tempdir");
        let mut session = Session::with_working_dir(dir.path().to_path_buf());

        ChecksumCommand
            .execute(&args(&["checksum", "missing"]), &mut session)
            .expect("checksum reports missing file, never errors");
    }

    #[test]
    fn test_du_tree_size() {
        let dir = tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("sub")).expect("seed dir");
        fs::write(dir.path().join("a.bin"), vec![0u8; 100]).expect("seed file");
        fs::write(dir.path().join("sub/b.bin"), vec![0u8; 50]).expect("seed file");

        assert_eq!(DuCommand::tree_size(dir.path()), 150);
    }

    #[test]
    fn test_head_tail_line_count_parsing() {
        let head_args = args(&["head", "-n", "3", "f.txt"]);
        let parsed = parse_line_count(&head_args)
            .expect("count parses")
            .expect("args complete");
        assert_eq!(parsed.0, 3);
        assert_eq!(parsed.1, "f.txt");

        assert!(parse_line_count(&args(&["head"])).expect("usage case").is_none());
        assert!(parse_line_count(&args(&["head", "-n", "x", "f.txt"])).is_err());
    }

    #[test]
    fn test_sort_and_uniq_run_over_file() {
        let dir = tempdir().expect("tempdir");
        let mut session = Session::with_working_dir(dir.path().to_path_buf());
        fs::write(dir.path().join("lines.txt"), "b\na\nb\n10\n2\n").expect("seed file");

        SortCommand
            .execute(&args(&["sort", "lines.txt"]), &mut session)
            .expect("sort runs");
        SortCommand
            .execute(&args(&["sort", "-rn", "lines.txt"]), &mut session)
            .expect("sort -rn runs");
        UniqCommand
            .execute(&args(&["uniq", "-c", "lines.txt"]), &mut session)
            .expect("uniq -c runs");
    }
}
