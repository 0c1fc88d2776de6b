use std::fs::OpenOptions;
use std::sync::Mutex;

use dify_chat_tui::app::App;
use dify_chat_tui::config::AppConfig;
use dify_chat_tui::util::log;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = AppConfig::from_env()?;
    log::init(&config.log_dir, config.debug)?;

    // stdout belongs to the terminal UI, so tracing output goes to a file
    let trace_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_dir.join("trace.log"))?;
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(Mutex::new(trace_file))
        .init();

    let app = App::new(&config)?;
    let terminal = ratatui::init();
    let result = app.run(terminal).await;
    ratatui::restore();
    result
}
