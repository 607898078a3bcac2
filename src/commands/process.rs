use std::env;
use std::fs;
use std::process::{self, Command as SystemCommand};
use std::thread;
use std::time::Duration;

use super::{Command, CommandError};
use crate::session::Session;

/// `ps` - information about the shell process itself.
pub struct PsCommand;

impl Command for PsCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        println!("Process Information:");
        println!("====================");
        println!("Process ID: {}", process::id());
        println!("Uptime: {}", format_uptime(session.uptime()));
        println!("Start Time: {}", session.started_at().to_rfc2822());

        // Memory and thread counts come from procfs where available.
        if let Ok(status) = fs::read_to_string("/proc/self/status") {
            for line in status.lines() {
                if line.starts_with("VmRSS:") || line.starts_with("Threads:") {
                    println!("{}", line);
                }
            }
        }

        if args.get(1).map(String::as_str) == Some("-v") {
            if let Ok(parallelism) = thread::available_parallelism() {
                println!("\nAvailable Processors: {}", parallelism);
            }
            if let Ok(status) = fs::read_to_string("/proc/self/status") {
                for line in status.lines() {
                    if line.starts_with("VmPeak:") || line.starts_with("VmHWM:") {
                        println!("{}", line);
                    }
                }
            }
        }
        Ok(())
    }
}

/// `exec` - run a host program and relay its captured output.
///
/// Blocks the loop until the child finishes; the child runs in the session
/// working directory.
pub struct ExecCommand;

impl Command for ExecCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let program = match args.get(1) {
            Some(program) => program,
            None => {
                println!("usage: exec <system-command> [arguments]");
                return Ok(());
            }
        };

        println!("Executing: {}", args[1..].join(" "));
        let output = SystemCommand::new(program)
            .args(&args[2..])
            .current_dir(session.working_dir())
            .output();

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                println!("Error running process: {}", e);
                return Ok(());
            }
        };

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            println!("{}", line);
        }
        for line in String::from_utf8_lossy(&output.stderr).lines() {
            println!("{}", line);
        }
        println!("\nProcess exited with code: {}", output.status.code().unwrap_or(-1));
        Ok(())
    }
}

/// `env` - print one environment variable, or all of them sorted.
pub struct EnvCommand;

impl Command for EnvCommand {
    fn execute(&self, args: &[String], _session: &mut Session) -> Result<(), CommandError> {
        if let Some(name) = args.get(1) {
            match env::var(name) {
                Ok(value) => println!("{}={}", name, value),
                Err(_) => println!("Variable not found: {}", name),
            }
            return Ok(());
        }

        println!("Environment Variables:");
        println!("=====================");
        let mut vars: Vec<(String, String)> = env::vars().collect();
        vars.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, value) in vars {
            println!("{}={}", key, value);
        }
        Ok(())
    }
}

/// `uname` - static facts about the host and the shell build.
pub struct UnameCommand;

impl Command for UnameCommand {
    fn execute(&self, _args: &[String], session: &mut Session) -> Result<(), CommandError> {
        println!("System Information:");
        println!("==================");
        println!("OS Name: {}", env::consts::OS);
        println!("OS Family: {}", env::consts::FAMILY);
        println!("OS Architecture: {}", env::consts::ARCH);
        println!("Shell Version: {}", env!("CARGO_PKG_VERSION"));
        match env::var("USER").or_else(|_| env::var("USERNAME")) {
            Ok(user) => println!("User Name: {}", user),
            Err(_) => println!("User Name: unknown"),
        }
        match dirs::home_dir() {
            Some(home) => println!("User Home: {}", home.display()),
            None => println!("User Home: unknown"),
        }
        println!("Current Directory: {}", session.working_dir().display());

        if let Ok(parallelism) = thread::available_parallelism() {
            println!("\nRuntime Information:");
            println!("Available Processors: {}", parallelism);
        }
        Ok(())
    }
}

fn format_uptime(uptime: Duration) -> String {
    let seconds = uptime.as_secs();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d {}h {}m", days, hours % 24, minutes % 60)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes % 60, seconds % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}
