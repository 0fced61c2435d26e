use lucky_vault::cli::{CliInterface, parse_cli};
use lucky_vault::tui::TuiInterface;
use lucky_vault::{GameConfig, GameInterface, logging, play};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();
    logging::init();
    let config = GameConfig::from_cli(&cli);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut interface: Box<dyn GameInterface> = if config.use_tui {
        match TuiInterface::new() {
            Ok(tui) => Box::new(tui),
            Err(e) => {
                eprintln!("Failed to start terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        Box::new(CliInterface::new(io::stdin().lock(), io::stdout()))
    };

    let result = play(&config, interface.as_mut(), &mut rng);
    // Leave the alternate screen before printing any error.
    drop(interface);

    match result {
        Ok(summary) => {
            log::info!(
                "Session finished: {:?}, log at {}",
                summary.state,
                summary.log_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            if let Some(source) = std::error::Error::source(&e) {
                eprintln!("  caused by: {source}");
            }
            ExitCode::FAILURE
        }
    }
}
