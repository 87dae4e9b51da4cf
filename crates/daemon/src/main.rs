// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! reaperd: deletes pods that failed on node affinity.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use reaper_daemon::{env, lifecycle, Config};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "reaperd", version, about = "Delete pods that failed on node affinity")]
struct Args {
    /// API server URL, overriding the kubeconfig
    #[arg(long, value_name = "URL")]
    master: Option<String>,

    /// Path to a kubeconfig file; in-cluster config is used when omitted
    #[arg(long, value_name = "PATH")]
    kubeconfig: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(env::log_filter()).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();

    let config = Config::load(args.master, args.kubeconfig);
    match lifecycle::start(&config).await {
        Ok(never) => match never {},
        Err(e) => {
            error!(error = %e, "reaper stopped");
            ExitCode::FAILURE
        }
    }
}
