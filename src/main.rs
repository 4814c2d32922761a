// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use anyhow::{Context, Result};
use sparkles_server::app::{create_router, AppState};
use sparkles_server::services::mailer::{MailerConfig, SmtpMailer};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP host configuration, separate from the SMTP settings.
struct ServerConfig {
    port: u16,
    build_dir: PathBuf,
}

impl ServerConfig {
    fn from_env() -> Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
            build_dir: env::var("BUILD_DIR")
                .unwrap_or_else(|_| "build".to_string())
                .into(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let server_config = ServerConfig::from_env()?;

    // Fail fast: missing SMTP settings stop the process at startup rather
    // than on the first send attempt.
    let mailer_config = MailerConfig::from_env()?;
    let mailer = SmtpMailer::new(&mailer_config)?;
    println!(
        "SMTP transport ready: {}:{} (secure: {})",
        mailer_config.smtp_host, mailer_config.smtp_port, mailer_config.smtp_secure
    );

    let state = AppState {
        mailer: Arc::new(mailer),
    };
    let app = create_router(state, &server_config.build_dir);

    // Bind to 0.0.0.0 to accept connections from any network interface (required for Docker)
    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    println!("sparkles-server v{} listening on {}", VERSION, addr);
    println!("Serving SPA build from {}", server_config.build_dir.display());

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
