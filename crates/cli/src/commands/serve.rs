// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jc serve` - Run the HTTP server in the foreground

use std::path::Path;

use anyhow::Result;
use clap::Args;
use jc_daemon::{env, serve, startup, Config};

#[derive(Args)]
pub struct ServeArgs {
    /// Listen address, overriding the config file's `webapp` section
    #[arg(long, env = "JC_BIND")]
    pub bind: Option<String>,
}

pub async fn handle(args: ServeArgs, config_path: &Path) -> Result<()> {
    let mut config = Config::new(config_path.to_path_buf(), env::state_dir()?);
    if args.bind.is_some() {
        config.bind = args.bind;
    }
    let result = startup(&config).await?;
    serve(result).await?;
    Ok(())
}
