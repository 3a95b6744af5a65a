//! Log initialization
//!
//! Console logger in debug builds, file logger in release builds. Components
//! log through the `log` facade macros; nothing here captures error records
//! (that is the aggregator's job in `core::reporter`).

use crate::constants::APP_NAME;
use directories::ProjectDirs;
use std::path::PathBuf;

/// Per-user log directory, created on first use
pub fn logs_dir() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", APP_NAME)?;
    let dir = dirs.data_local_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    Some(dir)
}

/// Initialize the global logger; safe to call once at process start
pub fn init_logs() {
    #[cfg(debug_assertions)]
    {
        let _ = simplelog::SimpleLogger::init(
            log::LevelFilter::Debug,
            simplelog::Config::default(),
        );
    }
    #[cfg(not(debug_assertions))]
    {
        let file = logs_dir()
            .map(|dir| dir.join("minilink.log"))
            .and_then(|path| std::fs::File::create(path).ok());

        match file {
            Some(file) => {
                let _ = simplelog::WriteLogger::init(
                    log::LevelFilter::Info,
                    simplelog::Config::default(),
                    file,
                );
            }
            None => {
                let _ = simplelog::SimpleLogger::init(
                    log::LevelFilter::Info,
                    simplelog::Config::default(),
                );
            }
        }
    }
}
