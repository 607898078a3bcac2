use std::collections::BTreeMap;
use std::fmt;

mod advanced;
mod compress;
mod file;
mod nav;
mod network;
mod process;
mod redirect;
mod search;
mod system;
mod text;
mod util;

pub use advanced::{CpCommand, MvCommand};
pub use compress::{GunzipCommand, GzipCommand, UnzipCommand, ZipCommand};
pub use file::{CatCommand, RmCommand, TouchCommand};
pub use nav::{CdCommand, LsCommand, MkdirCommand, PwdCommand};
pub use network::{CurlCommand, IfconfigCommand, PingCommand, WgetCommand};
pub use process::{EnvCommand, ExecCommand, PsCommand, UnameCommand};
pub use redirect::Redirect;
pub use search::{DiffCommand, FindCommand, WcCommand};
pub use system::{ClearCommand, DateCommand, HistoryCommand, WhoamiCommand};
pub use text::{EchoCommand, GrepCommand, HelpCommand};
pub use util::{ChecksumCommand, DuCommand, HeadCommand, SortCommand, TailCommand, UniqCommand};

use crate::session::Session;

#[derive(Debug)]
pub enum CommandError {
    InvalidArguments(String),
    Io(std::io::Error),
    Network(String),
    Archive(String),
    Execution(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::InvalidArguments(msg) => write!(f, "invalid arguments: {}", msg),
            CommandError::Io(err) => write!(f, "IO error: {}", err),
            CommandError::Network(msg) => write!(f, "network error: {}", msg),
            CommandError::Archive(msg) => write!(f, "archive error: {}", msg),
            CommandError::Execution(msg) => write!(f, "execution error: {}", msg),
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::Io(err)
    }
}

impl From<reqwest::Error> for CommandError {
    fn from(err: reqwest::Error) -> Self {
        CommandError::Network(err.to_string())
    }
}

impl From<zip::result::ZipError> for CommandError {
    fn from(err: zip::result::ZipError) -> Self {
        CommandError::Archive(err.to_string())
    }
}

impl std::error::Error for CommandError {}

/// The capability every registered handler implements.
///
/// `args[0]` is the command name as typed. Handlers report expected failures
/// (bad usage, missing files, I/O trouble) by printing a diagnostic and
/// returning `Ok`; an `Err` is reserved for failures the handler could not
/// classify and is caught once at the dispatch boundary.
pub trait Command {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError>;
}

/// Name-to-handler mapping, built once at startup and immutable afterwards.
pub struct CommandRegistry {
    commands: BTreeMap<String, Box<dyn Command>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        CommandRegistry {
            commands: BTreeMap::new(),
        }
    }

    /// Stores a handler under `name`. Re-registering a name replaces the
    /// previous handler; last write wins.
    pub fn register(&mut self, name: &str, command: Box<dyn Command>) {
        self.commands.insert(name.to_string(), command);
    }

    /// Exact-match, case-sensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }
}

/// Builds the registry with the full default command set.
pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // Navigation
    registry.register("ls", Box::new(LsCommand));
    registry.register("pwd", Box::new(PwdCommand));
    registry.register("cd", Box::new(CdCommand::new()));
    registry.register("mkdir", Box::new(MkdirCommand));

    // File manipulation
    registry.register("touch", Box::new(TouchCommand));
    registry.register("rm", Box::new(RmCommand));
    registry.register("cat", Box::new(CatCommand));

    // Text utilities
    registry.register("echo", Box::new(EchoCommand));
    registry.register("grep", Box::new(GrepCommand));
    registry.register("help", Box::new(HelpCommand));

    // Advanced file operations
    registry.register("cp", Box::new(CpCommand));
    registry.register("mv", Box::new(MvCommand));

    // System information
    registry.register("history", Box::new(HistoryCommand));
    registry.register("whoami", Box::new(WhoamiCommand));
    registry.register("date", Box::new(DateCommand));
    registry.register("clear", Box::new(ClearCommand));

    // Search
    registry.register("find", Box::new(FindCommand));
    registry.register("wc", Box::new(WcCommand));
    registry.register("diff", Box::new(DiffCommand));

    // Compression
    registry.register("zip", Box::new(ZipCommand));
    registry.register("unzip", Box::new(UnzipCommand));
    registry.register("gzip", Box::new(GzipCommand));
    registry.register("gunzip", Box::new(GunzipCommand));

    // Network
    registry.register("ping", Box::new(PingCommand));
    registry.register("wget", Box::new(WgetCommand));
    registry.register("curl", Box::new(CurlCommand));
    registry.register("ifconfig", Box::new(IfconfigCommand));

    // Process
    registry.register("ps", Box::new(PsCommand));
    registry.register("exec", Box::new(ExecCommand));
    registry.register("env", Box::new(EnvCommand));
    registry.register("uname", Box::new(UnameCommand));

    // Misc utilities
    registry.register("sort", Box::new(SortCommand));
    registry.register("uniq", Box::new(UniqCommand));
    registry.register("checksum", Box::new(ChecksumCommand));
    registry.register("du", Box::new(DuCommand));
    registry.register("head", Box::new(HeadCommand));
    registry.register("tail", Box::new(TailCommand));

    registry
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    if bytes < 1024 * 1024 {
        return format!("{:.2} KB", bytes as f64 / 1024.0);
    }
    if bytes < 1024 * 1024 * 1024 {
        return format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0));
    }
    format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
}
