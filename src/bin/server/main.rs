#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! REST API relaying templated emails over caller-supplied SMTP servers

use anyhow::Result;
use clap::Parser;
use mail_relay::infrastructure::{
    email::smtp::SmtpMailer,
    http::{HttpServer, HttpServerConfig},
    templates::fs::FileTemplateStore,
};
use tracing_subscriber::EnvFilter;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may be set by the host.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let templates = FileTemplateStore::new(&args.server.templates_dir);

    HttpServer::new(SmtpMailer::new(), templates, args.server)
        .await?
        .run()
        .await
}
