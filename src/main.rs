use clap::Parser;
use taskbox::cli::commands::Cli;
use taskbox::io::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let _log_guard = match init_logging(settings.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(path = %settings.path.display(), filter = %settings.filter, "starting");

    if let Err(e) = taskbox::tui::run(settings) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
