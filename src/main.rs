use pokeguess::cli::{CliInterface, parse_cli};
use pokeguess::logging::init_logging;
use pokeguess::pokeapi::PokeApiProvider;
use pokeguess::tui::TuiInterface;
use pokeguess::{AppError, SessionController, game_loop};
use std::io;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let cli = parse_cli();
    let log_path = init_logging(cli.log_level_filter())?;
    if let Some(path) = &log_path {
        log::info!("Logging to {}", path.display());
    }

    let session_config = cli.session_config()?;
    let provider = Arc::new(PokeApiProvider::new(cli.provider_config())?);
    let mut controller = SessionController::new(provider, session_config);

    if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&mut controller, &mut interface, cli.mode).await;
    } else {
        let mut interface = TuiInterface::new()?;
        game_loop(&mut controller, &mut interface, cli.mode).await;
        interface.cleanup()?;
    }

    log::info!("Goodbye");
    Ok(())
}
