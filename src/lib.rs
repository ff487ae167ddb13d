mod config;
mod data;
mod error;
mod models;
mod services;
#[cfg(test)]
mod testutil;

pub use config::Config;
pub use data::store::SharedStore;
pub use error::AppError;
pub use models::record::{format_amount, ExpenseRecord, ScanStatus};
pub use models::scan::{Invoice, Performance, ScanData, ScanOptions, ScanResponse};
pub use services::polling_service::{start_polling, DisplayState, PollConfig, PollerHandle};
pub use services::recognition_service::start_recognition;
pub use services::scan_service::ScanClient;

use anyhow::Context;

/// CLI entry. The subcommands map onto the process roles of the pipeline:
/// `save-image` writes the hand-off image, `scan` plays the producer,
/// `watch` plays the consumer. Run `scan` and `watch` as separate processes
/// against the same shared directory to exercise the cross-process flow.
pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let store = SharedStore::new(&config.shared_dir)?;

    let mut args = std::env::args().skip(1);
    let command = args.next();
    match command.as_deref() {
        Some("save-image") => {
            let path = args.next().context("usage: qiaoqiao-scan save-image <file>")?;
            let bytes = std::fs::read(&path).with_context(|| format!("reading {path}"))?;
            store.save_image(&bytes)?;
            println!("图片已保存 ({} bytes)", bytes.len());
        }
        Some("scan") => {
            let inline = match args.next() {
                Some(path) => {
                    Some(std::fs::read(&path).with_context(|| format!("reading {path}"))?)
                }
                None => None,
            };
            let client = ScanClient::new(&config.base_url, config.request_timeout)?;
            let handle = start_recognition(&store, &client, inline, ScanOptions::default())?;
            println!("已开始识别...");
            // a long-lived host would return to its caller here; the CLI has
            // to outlive the background continuation, so wait for it
            handle.await?;
        }
        Some("watch") => {
            let handle = start_polling(store, PollConfig::default());
            let mut states = handle.states();
            println!("{}", states.borrow().summary());
            while states.changed().await.is_ok() {
                let state = states.borrow().clone();
                println!("{}", state.summary());
                if state.is_terminal() {
                    break;
                }
            }
            handle.join().await;
        }
        _ => {
            eprintln!("usage: qiaoqiao-scan <save-image <file> | scan [file] | watch>");
            std::process::exit(2);
        }
    }

    Ok(())
}
