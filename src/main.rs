use std::process::ExitCode;

use tracing::{error, info};

use appreview_notifier::cli::{self, Command, USAGE};
use appreview_notifier::datetime::SystemClock;
use appreview_notifier::{pipeline, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Arguments come first so usage errors never depend on the config file.
    let args = match cli::parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            appreview_notifier::logging::init_console_only("info");
            error!("{e}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let config = match Config::discover() {
        Ok(config) => config,
        Err(e) => {
            appreview_notifier::logging::init_console_only("info");
            error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = appreview_notifier::logging::init(&config.logging) {
        eprintln!("Failed to initialize log file: {e}");
        appreview_notifier::logging::init_console_only(&config.logging.level);
    }

    match pipeline::run(&args, &config, &SystemClock).await {
        Ok(summary) => {
            info!(
                fetched = summary.fetched,
                selected = summary.selected,
                posted = summary.posted,
                failed = summary.failed,
                "run complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) if e.is_usage() => {
            error!("{e}");
            ExitCode::from(2)
        }
        Err(e) => {
            error!("Fail to fetch or notify: {e}");
            ExitCode::FAILURE
        }
    }
}
