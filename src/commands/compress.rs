use std::fs::{self, File};
use std::io;
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use super::{Command, CommandError};
use crate::session::Session;

/// `zip` - build a zip archive from files, or a directory tree with `-r`.
pub struct ZipCommand;

impl ZipCommand {
    fn create(
        archive_path: &Path,
        inputs: &[String],
        recursive: bool,
        session: &Session,
    ) -> Result<(), CommandError> {
        let mut writer = ZipWriter::new(File::create(archive_path)?);

        for input in inputs {
            let path = session.resolve(input);
            if !path.exists() {
                println!("Warning: {} not found", input);
                continue;
            }
            if path.is_dir() {
                if recursive {
                    let base = path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_else(|| input.clone());
                    Self::add_dir(&path, &base, &mut writer)?;
                }
            } else {
                // Top-level files are stored under their basename, not the
                // path they were named by.
                let entry_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| input.clone());
                Self::add_file(&path, &entry_name, &mut writer)?;
                println!("Added: {}", entry_name);
            }
        }

        writer.finish()?;
        Ok(())
    }

    fn add_file(path: &Path, name: &str, writer: &mut ZipWriter<File>) -> Result<(), CommandError> {
        writer.start_file(name, FileOptions::default())?;
        let mut input = File::open(path)?;
        io::copy(&mut input, writer)?;
        Ok(())
    }

    fn add_dir(dir: &Path, base: &str, writer: &mut ZipWriter<File>) -> Result<(), CommandError> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let entry_name = format!("{}/{}", base, entry.file_name().to_string_lossy());
            if entry.file_type()?.is_dir() {
                Self::add_dir(&entry.path(), &entry_name, writer)?;
            } else {
                Self::add_file(&entry.path(), &entry_name, writer)?;
                println!("Added: {}", entry_name);
            }
        }
        Ok(())
    }
}

impl Command for ZipCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        if args.len() < 3 {
            println!("usage: zip <output.zip> <file1> [file2] ...");
            println!("   or: zip -r <output.zip> <directory>");
            return Ok(());
        }

        let recursive = args[1] == "-r";
        let (name_index, start_index) = if recursive { (2, 3) } else { (1, 2) };
        if args.len() <= start_index {
            println!("usage: zip -r <output.zip> <directory>");
            return Ok(());
        }

        let mut archive_name = args[name_index].clone();
        if !archive_name.ends_with(".zip") {
            archive_name.push_str(".zip");
        }
        let archive_path = session.resolve(&archive_name);

        match Self::create(&archive_path, &args[start_index..], recursive, session) {
            Ok(()) => println!("Created: {}", archive_name),
            Err(e) => println!("Error creating zip: {}", e),
        }
        Ok(())
    }
}

/// `unzip` - extract a zip archive into the working directory or a target.
pub struct UnzipCommand;

impl UnzipCommand {
    fn extract(archive_path: &Path, dest: &Path) -> Result<(), CommandError> {
        let mut archive = ZipArchive::new(File::open(archive_path)?)?;

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            // Refuse entries that would escape the destination.
            let relative = match entry.enclosed_name() {
                Some(relative) => relative.to_owned(),
                None => {
                    println!("Warning: skipping unsafe entry {}", entry.name());
                    continue;
                }
            };
            let out_path = dest.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&out_path)?;
                continue;
            }
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out_file = File::create(&out_path)?;
            io::copy(&mut entry, &mut out_file)?;
            println!("Extracted: {}", entry.name());
        }
        Ok(())
    }
}

impl Command for UnzipCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let name = match args.get(1) {
            Some(name) => name,
            None => {
                println!("usage: unzip <file.zip>");
                println!("   or: unzip <file.zip> <destination>");
                return Ok(());
            }
        };

        let archive_path = session.resolve(name);
        if !archive_path.exists() {
            println!("unzip: {}: No such file", name);
            return Ok(());
        }
        let dest = match args.get(2) {
            Some(dest) => session.resolve(dest),
            None => session.working_dir().to_path_buf(),
        };

        match Self::extract(&archive_path, &dest) {
            Ok(()) => println!("Extraction complete!"),
            Err(e) => println!("Error extracting zip: {}", e),
        }
        Ok(())
    }
}

/// `gzip` - compress a file to `<name>.gz`, keeping the original.
pub struct GzipCommand;

impl Command for GzipCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let name = match args.get(1) {
            Some(name) => name,
            None => {
                println!("usage: gzip <filename>");
                return Ok(());
            }
        };

        let input_path = session.resolve(name);
        if !input_path.exists() {
            println!("gzip: {}: No such file", name);
            return Ok(());
        }
        let output_name = format!("{}.gz", name);
        let output_path = session.resolve(&output_name);

        let compress = || -> Result<(), CommandError> {
            let mut input = File::open(&input_path)?;
            let mut encoder = GzEncoder::new(File::create(&output_path)?, Compression::default());
            io::copy(&mut input, &mut encoder)?;
            encoder.finish()?;
            Ok(())
        };
        match compress() {
            Ok(()) => println!("Compressed: {} -> {}", name, output_name),
            Err(e) => println!("Error compressing file: {}", e),
        }
        Ok(())
    }
}

/// `gunzip` - decompress a `.gz` file next to itself, keeping the original.
pub struct GunzipCommand;

impl Command for GunzipCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let name = match args.get(1) {
            Some(name) => name,
            None => {
                println!("usage: gunzip <filename.gz>");
                return Ok(());
            }
        };

        let input_path = session.resolve(name);
        if !input_path.exists() {
            println!("gunzip: {}: No such file", name);
            return Ok(());
        }
        let output_name = match name.strip_suffix(".gz") {
            Some(stem) => stem.to_string(),
            None => {
                println!("gunzip: {}: unknown suffix", name);
                return Ok(());
            }
        };
        let output_path = session.resolve(&output_name);

        let decompress = || -> Result<(), CommandError> {
            let mut decoder = GzDecoder::new(File::open(&input_path)?);
            let mut output = File::create(&output_path)?;
            io::copy(&mut decoder, &mut output)?;
            Ok(())
        };
        match decompress() {
            Ok(()) => println!("Decompressed: {} -> {}", name, output_name),
            Err(e) => println!("Error decompressing file: {}", e),
        }
        Ok(())
    }
}
