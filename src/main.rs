use anyhow::Context;
use note::config::{CliOptions, USAGE};
use note::error::{self, ErrorDisplay, ErrorLevel};
use note::frontend::tui;
use note::logging::{self, FileLogger};

fn main() -> anyhow::Result<()> {
    error::setup_panic_handler();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = CliOptions::parse(&args).context("invalid arguments")?;

    if options.show_help {
        println!("{}", USAGE);
        return Ok(());
    }
    if options.show_version {
        println!("note {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = options.load_config().context("failed to load configuration")?;

    let mut logger = FileLogger::new(config.log_level_filter()?);
    if let Some(path) = &config.log_file {
        logger = logger.with_file_output(path);
    }
    logging::init(logger).context("failed to initialize logging")?;
    log::info!("note {} starting", env!("CARGO_PKG_VERSION"));

    if let Err(err) = tui::run(&config, options.initial_file.clone()) {
        let display = ErrorDisplay::new(&err);
        if display.level == ErrorLevel::Fatal {
            log::error!("fatal: {}", err);
        }
        return Err(anyhow::Error::new(err).context(display.message));
    }
    Ok(())
}
