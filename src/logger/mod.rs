use slog::Drain;
pub use slog::Level;

/// Keeps the global logger installed; dropping it flushes pending records.
pub struct LoggerGuard {
    _scope_guard: slog_scope::GlobalLoggerGuard,
}

/// Installs an asynchronous terminal logger on stderr as the global logger
/// and routes the `log` macros into it.
///
/// Stdout stays reserved for the heal output.
pub fn init_global_logger(level: Level) -> anyhow::Result<LoggerGuard> {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = slog::LevelFilter::new(drain, level).fuse();
    let logger = slog::Logger::root(drain, slog::o!());

    let scope_guard = slog_scope::set_global_logger(logger);
    slog_stdlog::init_with_level(std_log_level(level))?;
    Ok(LoggerGuard {
        _scope_guard: scope_guard,
    })
}

fn std_log_level(level: Level) -> log::Level {
    match level {
        Level::Critical | Level::Error => log::Level::Error,
        Level::Warning => log::Level::Warn,
        Level::Info => log::Level::Info,
        Level::Debug => log::Level::Debug,
        Level::Trace => log::Level::Trace,
    }
}
