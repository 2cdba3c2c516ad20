//! `weather <City Name>`: ask the agent and wait for its answer.

use std::process::ExitCode;

use a2a_weather::cli::{self, WeatherCli};

#[tokio::main]
async fn main() -> ExitCode {
    let args: WeatherCli = cli::parse_or_exit();
    cli::init_tracing();
    let cancel = cli::cancel_on_ctrl_c();

    let mut stdout = std::io::stdout();
    match cli::run_weather(&args, &cancel, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "weather failed");
            eprintln!("{}", cli::error_line(&err));
            ExitCode::FAILURE
        }
    }
}
