mod app;
mod debounce;
mod modals;
mod notify;
mod paths;
mod screen;
mod settings;
mod table;
mod widgets;

use std::fs;
use std::fs::File;

use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

#[tokio::main]
async fn main() {
    paths::rotate_logs();
    let log_path = paths::log_file().expect("Failed to determine log path");
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent).expect("Failed to create cache directory");
    }
    let log_file = File::create(&log_path).expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut terminal = ratatui::init();
    let result = app::run(&mut terminal).await;
    ratatui::restore();

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }
}
