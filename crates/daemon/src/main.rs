// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! jcd: the jobcontrol HTTP server

use jc_daemon::{env, logging, serve, startup, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = logging::init(&env::log_filter(), env::log_dir().as_deref());
    let config = Config::load()?;
    let result = startup(&config).await?;
    serve(result).await?;
    Ok(())
}
