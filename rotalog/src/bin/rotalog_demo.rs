use anyhow::{Context, Result};
use clap::Parser;
use rotalog::{
    setup_diagnostics, Background, LogSettings, Logger, LoggerConfig, LoggerError, SizeUnit,
    WriteMode,
};
use serde_json::json;

#[derive(Parser, Debug)]
#[command(author, version, about = "Writes one line per level through rotalog", long_about = None)]
struct Args {
    /// Config file (TOML, JSON or YAML). Other flags are ignored when set.
    #[arg(short, long)]
    config: Option<String>,
    #[arg(short, long, default_value = "./data/logs/")]
    dir: String,
    #[arg(long, default_value = "file")]
    debug_mode: WriteMode,
    #[arg(long)]
    millis: bool,
    #[arg(long)]
    show_pid: bool,
    #[arg(long, default_value_t = 10)]
    rotate_size: u64,
    #[arg(long, default_value = "M")]
    rotate_unit: SizeUnit,
    /// Show the logger's own file and rotation events on stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let filter = if args.verbose { "rotalog=debug" } else { "rotalog=warn" };
    setup_diagnostics(filter).context("Failed to install diagnostics subscriber")?;

    let config = match &args.config {
        Some(path) => LoggerConfig::load(path).context("Failed to load logger config")?,
        None => LoggerConfig::new(&args.dir)
            .with_debug_write_mode(args.debug_mode)
            .with_milliseconds(args.millis)
            .with_pid(args.show_pid)
            .with_rotation(args.rotate_size, args.rotate_unit),
    };

    let mut logger = Logger::new(config).context("Failed to open log files")?;

    if let Err(e) = write_samples(&mut logger) {
        eprintln!("{}", e);
    }

    logger.close().context("Failed to close log files")?;
    Ok(())
}

fn write_samples(logger: &mut Logger) -> Result<(), LoggerError> {
    logger.log_with("test data", &LogSettings::new().background(Background::Blue))?;
    logger.success("success")?;
    logger.warn(&serde_json::Value::Null)?;
    logger.info("info")?;
    logger.error(&json!({ "error": true, "message": { "json": "parsed" } }))?;
    logger.debug("Some debug data")?;
    Ok(())
}
