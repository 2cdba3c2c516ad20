//! `weather-stream <City Name>`: print the agent's answer as it streams in.

use std::process::ExitCode;

use a2a_weather::cli::{self, StreamCli};

#[tokio::main]
async fn main() -> ExitCode {
    let args: StreamCli = cli::parse_or_exit();
    cli::init_tracing();
    let cancel = cli::cancel_on_ctrl_c();

    let mut stdout = std::io::stdout();
    match cli::run_weather_stream(&args, &cancel, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "weather-stream failed");
            eprintln!("{}", cli::error_line(&err));
            ExitCode::FAILURE
        }
    }
}
