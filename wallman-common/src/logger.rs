use std::{
    str::FromStr,
    sync::{Arc, RwLock},
};
use tracing::{subscriber::set_global_default, Level, Metadata};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    filter::{filter_fn, FilterFn},
    fmt::{self},
    layer::SubscriberExt,
    Layer, Registry,
};
use wallman_error::{WMError, WMResult};

const LOG_FILE_PREFIX: &str = "wallman.log";

/// Console plus daily rolling file logger whose level can change at runtime
pub struct Logger {
    level: Arc<RwLock<Level>>,
    _file_guard: Option<WorkerGuard>,
}

impl Logger {
    pub fn new(level: Option<Level>) -> Self {
        Logger {
            level: Arc::new(RwLock::new(level.unwrap_or(Level::INFO))),
            _file_guard: None,
        }
    }

    /// Parses names such as `debug` or `WARN`; unknown names fall back to INFO
    pub fn from_name(name: &str) -> Self {
        Self::new(Level::from_str(name.trim()).ok())
    }

    #[inline]
    pub fn set_level(&self, new_level: Level) {
        if let Ok(mut level) = self.level.write() {
            *level = new_level;
        }
    }

    #[inline]
    pub fn get_level(&self) -> Level {
        self.level.read().map(|l| *l).unwrap_or(Level::INFO)
    }

    /// Installs the console and file layers as the global subscriber.
    ///
    /// Files roll daily under `dir`.
    pub fn initialize(&mut self, dir: &str) -> WMResult<()> {
        let file_appender = rolling::daily(dir, LOG_FILE_PREFIX);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        self._file_guard = Some(guard);

        let console_filter = level_filter(Arc::clone(&self.level));
        let file_filter = level_filter(Arc::clone(&self.level));

        let console_layer = {
            #[cfg(debug_assertions)]
            let layer = fmt::layer()
                .pretty()
                .with_writer(std::io::stdout)
                .with_file(true)
                .with_line_number(true);

            #[cfg(not(debug_assertions))]
            let layer = fmt::layer()
                .with_writer(std::io::stdout)
                .with_file(false)
                .with_line_number(false);

            layer.with_filter(console_filter)
        };

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_filter(file_filter);

        let subscriber = Registry::default().with(console_layer).with(file_layer);

        set_global_default(subscriber).map_err(|_| WMError::from("Failed to set logger"))?;
        Ok(())
    }
}

fn level_filter(level: Arc<RwLock<Level>>) -> FilterFn<impl Fn(&Metadata<'_>) -> bool> {
    filter_fn(move |metadata| {
        level
            .read()
            .map(|current| metadata.level() <= &*current)
            .unwrap_or(true)
    })
}
