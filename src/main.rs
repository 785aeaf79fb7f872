use clap::Parser;
use pulpit::cli::{self, Args};
use pulpit::core::config;
use pulpit::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to pulpit.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("pulpit.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Ignoring config file: {}", e);
            eprintln!("pulpit: {e} (using defaults)");
            config::PulpitConfig::default()
        }
    };
    let resolved = config::resolve(&file_config, &args.overrides());
    log::info!("Pulpit starting up with config: {:?}", resolved);

    match args.command {
        None => tui::run(resolved),
        Some(command) => match cli::execute(command, &resolved).await {
            Ok(output) => {
                println!("{output}");
                Ok(())
            }
            Err(e) => {
                log::warn!("Command failed: {}", e);
                eprintln!("pulpit: {e}");
                std::process::exit(1);
            }
        },
    }
}
