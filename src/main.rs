#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::path;
use std::process;

use anyhow::Error;
use anyhow::Result;
use domain::models::Action;
use domain::models::Event;
use tokio::sync::mpsc;
use tokio::task;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_appender::rolling::Rotation;
use yansi::Paint;

use crate::application::cli;
use crate::application::ui;
use crate::configuration::Config;
use crate::domain::services::actions::ActionsService;
use crate::domain::services::SerialChannel;
use crate::infrastructure::serial::ConnectorManager;

/// Where the debug log goes when `RUST_LOG` mentions waterline.
pub fn log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("WATERLINE_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("waterline");
}

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        Paint::red(format!(
            "Oh no! Waterline has failed with the following app version and error.\n\nVersion: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            err
        ))
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

/// Sends JSON debug logs to `<dir>/debug.log` when `rust_log` mentions
/// waterline. Nothing is created on disk otherwise.
fn init_logging(rust_log: &str, dir: path::PathBuf) -> Result<Option<WorkerGuard>> {
    if !rust_log.contains("waterline") {
        return Ok(None);
    }

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("debug.log")
        .build(dir)?;
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(writer)
        .init();

    return Ok(Some(guard));
}

async fn run() -> Result<()> {
    if !cli::parse().await? {
        return Ok(());
    }

    let settings = Config::channel_settings()?;
    let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let channel = SerialChannel::new(ConnectorManager::get(), settings);
    let mut worker = task::spawn_blocking(move || {
        return ActionsService::start(channel, event_tx, action_rx);
    });

    let ui_future = ui::start(action_tx, event_rx);

    let res = tokio::select!(
        res = &mut worker => match res {
            Ok(res) => res,
            Err(err) => Err(err.into()),
        },
        res = ui_future => res,
    );

    if res.is_err() {
        ui::destruct_terminal_for_panic();
    }

    return res;
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        ui::destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| return "".to_string());
    let guard = match init_logging(&rust_log, log_dir()) {
        Ok(guard) => guard,
        Err(err) => {
            handle_error(err);
            return;
        }
    };

    let res = run().await;

    // Flushes buffered log lines before the process can exit.
    drop(guard);

    if let Err(err) = res {
        handle_error(err);
    }
}
