use clap::Parser;
use std::path::PathBuf;

pub const USAGE: &str = "usage: scanward AUTH-URL SCAN-URL CLIENT-ID CLIENT-SECRET FILE";

#[derive(Parser)]
#[command(name = "scanward")]
#[command(about = "Submit a file to a remote scanning service and print the findings", long_about = None)]
pub struct Cli {
    /// Authorization service address
    #[arg(value_name = "AUTH-URL")]
    pub auth_url: String,

    /// Scanning service address
    #[arg(value_name = "SCAN-URL")]
    pub scan_url: String,

    /// OAuth2 client id
    #[arg(value_name = "CLIENT-ID")]
    pub client_id: String,

    /// OAuth2 client secret
    #[arg(value_name = "CLIENT-SECRET")]
    pub client_secret: String,

    /// File to scan
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Give up once the total server-requested wait would exceed this many
    /// seconds (default: poll as long as the server keeps saying pending)
    #[arg(long, value_name = "SECS", env = "SCANWARD_MAX_WAIT")]
    pub max_wait: Option<u64>,
}
