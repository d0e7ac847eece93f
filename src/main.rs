use std::process::ExitCode;

use tracing::error;
use worklog::cli::{output::error_banner, run_cli};

#[tokio::main]
async fn main() -> ExitCode {
    match run_cli().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(e) = e.downcast_ref::<clap::Error>() {
                e.exit();
            }
            error!("Error running cli {e:?}");
            eprintln!("{}", error_banner(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}
