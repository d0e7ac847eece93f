pub mod new_log;
pub mod output;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use new_log::{parse_new_log, LogCommand};
use output::{print_dashboard, print_logs, print_recorded};
use tracing::{debug, level_filters::LevelFilter};

use crate::{
    backend::{
        local::{summarize, LocalBackend},
        remote::RemoteBackend,
        Backend, DashboardSnapshot,
    },
    export::{export_logs, read_export},
    remote::rest_client::{RestClient, DEFAULT_API_URL},
    storage::log_store::JsonFileStore,
    utils::{
        clock::{Clock, DefaultClock},
        dir::{create_application_default_path, create_application_path},
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "worklog", version, long_about = None)]
#[command(about = "Keeps track of hours worked per day and category", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "WORKLOG_API_URL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = DEFAULT_API_URL,
        value_name = "URL",
        help = "Use the remote api instead of the local log file. A different api is given as --remote=URL"
    )]
    remote: Option<String>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Log hours worked")]
    Log {
        #[command(flatten)]
        command: LogCommand,
    },
    #[command(about = "List logged work")]
    List {
        #[arg(long, help = "Read logs from an export file instead")]
        from: Option<PathBuf>,
    },
    #[command(about = "Show weekly and category summaries")]
    Dashboard {
        #[arg(long, help = "Read logs from an export file instead")]
        from: Option<PathBuf>,
    },
    #[command(about = "Export all logs into work-logs-<date>.json")]
    Export {
        #[arg(long, default_value = ".", help = "Directory the export is written to")]
        out: PathBuf,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = args
        .dir
        .map_or_else(create_application_default_path, create_application_path)?;

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &app_dir, logging_level, args.log)?;

    let clock = DefaultClock;
    let today = clock.today();
    let backend = create_backend(&app_dir, args.remote, Box::new(clock))?;

    match args.commands {
        Commands::Log { command } => {
            let recorded = backend.record(parse_new_log(command, today)?).await?;
            print_recorded(&recorded);
            Ok(())
        }
        Commands::List { from } => {
            let logs = match from {
                Some(path) => read_export(&path).await?,
                None => backend.logs().await?,
            };
            print_logs(&logs);
            Ok(())
        }
        Commands::Dashboard { from } => {
            let snapshot = load_snapshot(backend.as_ref(), from.as_deref(), today).await?;
            print_dashboard(&snapshot.summary);
            Ok(())
        }
        Commands::Export { out } => {
            let logs = backend.logs().await?;
            let path = export_logs(&logs, &out, today).await?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn create_backend(
    app_dir: &Path,
    remote: Option<String>,
    clock: Box<dyn Clock>,
) -> Result<Box<dyn Backend>> {
    match remote {
        Some(url) => {
            debug!("Using remote api at {url}");
            Ok(Box::new(RemoteBackend::new(RestClient::new(url))))
        }
        None => {
            let store = JsonFileStore::new(app_dir)?;
            debug!("Using local log file {:?}", store.path());
            Ok(Box::new(LocalBackend::new(store, clock)))
        }
    }
}

/// An export file is summarized the same way local logs are.
async fn load_snapshot(
    backend: &dyn Backend,
    export: Option<&Path>,
    today: chrono::NaiveDate,
) -> Result<DashboardSnapshot> {
    match export {
        Some(path) => {
            let logs = read_export(path).await?;
            let summary = summarize(&logs, today);
            Ok(DashboardSnapshot { logs, summary })
        }
        None => backend.snapshot().await,
    }
}
