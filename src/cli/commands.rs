use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "jt", about = concat!("jotter v", env!("CARGO_PKG_VERSION"), " - notes you can drag into order"), version)]
pub struct Cli {
    /// Directory holding saved notes and logs
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level override (error, warn, info, debug, trace)
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,
}
