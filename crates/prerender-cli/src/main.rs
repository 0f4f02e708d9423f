use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use prerender_browser::{ChromiumLauncher, LaunchOptions};
use prerender_core::{RenderService, RunError, WaitUntil};

#[derive(Parser)]
#[command(
    name = "prerender",
    version,
    about = "Print the fully rendered HTML of a web page"
)]
struct Cli {
    /// Target URL, handed to the browser unchanged
    #[arg(allow_hyphen_values = true)]
    url: Option<String>,

    /// Chrome/Chromium binary to launch (defaults to $CHROME_BIN or a well-known install)
    #[arg(long, value_name = "PATH")]
    chrome_bin: Option<PathBuf>,

    /// When navigation counts as finished: load, domcontentloaded, networkidle0, networkidle2
    #[arg(long, value_name = "EVENT", default_value_t = WaitUntil::NetworkAlmostIdle)]
    wait_until: WaitUntil,

    /// Log progress to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match &err {
                RunError::Usage => eprintln!("{err}"),
                RunError::Collaborator(_) | RunError::Output(_) => eprintln!("Error: {err}"),
            }
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), RunError> {
    let Some(url) = cli.url.filter(|url| !url.is_empty()) else {
        return Err(RunError::Usage);
    };

    init_tracing(cli.verbose);

    let launcher = ChromiumLauncher::with_options(LaunchOptions {
        chrome_executable: cli.chrome_bin,
        ..LaunchOptions::default()
    });
    let service = RenderService::new(launcher).with_wait_until(cli.wait_until);

    let html = service.render(&url).await?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{html}")?;
    stdout.flush()?;

    Ok(())
}

/// Logs go to stderr; stdout carries only the document.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("prerender={level}"))),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
