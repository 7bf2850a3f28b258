mod cli;
mod report;

use std::process::exit;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, USAGE};
use scanward_client::{
    scan_to_completion, AuthClient, Credentials, PollPolicy, ScanClient, ScanMetadata, TokioSleeper,
};

fn main() {
    // Initialize logging; stdout stays reserved for the scan result.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::DisplayHelp => err.exit(),
        Err(_) => {
            eprintln!("error: {USAGE}");
            exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("error: {err}");
            exit(1);
        }
    };

    match runtime.block_on(run(&cli)) {
        Ok(rendered) => {
            print!("{rendered}");
            exit(0);
        }
        Err(err) => {
            eprintln!("error: {err}");
            exit(1);
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<String> {
    let credentials = Credentials::new(&cli.client_id, &cli.client_secret);
    let token = AuthClient::new(&cli.auth_url)?
        .fetch_token(&credentials)
        .await?;

    let client = ScanClient::new(&cli.scan_url, token.access_token)?;
    let policy = PollPolicy {
        max_total_wait: cli.max_wait.map(Duration::from_secs),
    };

    let scan_report = scan_to_completion(
        &client,
        &cli.file,
        &ScanMetadata::default(),
        &policy,
        &TokioSleeper,
    )
    .await?;

    Ok(report::render(&scan_report))
}
