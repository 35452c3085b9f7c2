//! Command-line interface definition for www.
//!
//! A single command: serve a directory with live reload. Every flag except
//! the directory can also be given through a `WWW_*` environment variable;
//! the merge happens in [`crate::config`], so the flags here are all optional.


use clap::Parser;
use std::path::PathBuf;

/// www - serve a directory and reload the browser when it changes
#[derive(Parser, Debug)]
#[command(
    name = "www",
    version,
    about = "Serve a directory over HTTP and reload the browser when files change",
    long_about = "www serves a directory tree over HTTP for local development.\n\
                  HTML pages get a small script injected that reloads the page\n\
                  whenever something under the served directory changes.\n\n\
                  Environment: WWW_PORT, WWW_HOST, WWW_PREFIX, WWW_INDEX"
)]
pub struct Cli {
    /// Directory to serve (defaults to the current working directory)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// TCP port to listen on [env: WWW_PORT] [default: 8080]
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Address to bind [env: WWW_HOST] [default: 127.0.0.1]
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// URL path prefix to serve files under [env: WWW_PREFIX] [default: /]
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Filename served for directory requests [env: WWW_INDEX] [default: index.html]
    #[arg(long, value_name = "FILENAME")]
    pub index: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}
