// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The server started the way `jcd` starts it, spoken to over TCP.

use crate::prelude::*;
use jc_daemon::{serve, startup, Config};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

async fn http_get(addr: std::net::SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn serves_health_and_jobs_over_tcp() {
    let project = Project::new();
    project.build(&["extract"]).await;

    let mut config = Config::new(project.config_path(), project.dir.path().join("state"));
    config.bind = Some("127.0.0.1:0".to_string());
    let result = startup(&config).await.unwrap();
    let addr = result.daemon.addr;
    let server = tokio::spawn(serve(result));

    let health = http_get(addr, "/health").await;
    assert!(health.starts_with("HTTP/1.1 200"), "{health}");
    assert!(health.contains("\"status\":\"ok\""));

    let jobs = http_get(addr, "/jobs/extract").await;
    assert!(jobs.contains("\"latest_successful_build\":1"), "{jobs}");

    server.abort();
}
