use krill::error::ShellError;
use krill::flags::Flags;
use krill::shell::Shell;
use std::env;

fn main() -> Result<(), ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("krill {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut builder = env_logger::Builder::from_default_env();
    if flags.is_set("debug") {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    let mut shell = Shell::new(flags)?;
    shell.run()
}
