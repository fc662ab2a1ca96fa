use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Installs the global subscriber. Logs always go to stderr; with a log file
/// they are appended there too. Keep the returned guard alive so buffered
/// file output gets flushed on exit.
pub fn init(log_file: Option<&Path>) -> Option<WorkerGuard> {
    // bridges `log` records; the subscriber below must not install its own
    let _ = tracing_log::LogTracer::init();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    let Some(path) = log_file else {
        let subscriber = builder.with_writer(std::io::stderr).finish();
        let _ = ::tracing::subscriber::set_global_default(subscriber);
        return None;
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let _ = std::fs::create_dir_all(dir);
    let file_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "coursewise.log".into());

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    let subscriber = builder
        .with_ansi(false)
        .with_writer(std::io::stderr.and(file_writer))
        .finish();
    let _ = ::tracing::subscriber::set_global_default(subscriber);
    Some(guard)
}
