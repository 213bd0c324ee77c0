use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Initialise logging. Without `debug` the level is forced to `info`, so a
/// stray `RUST_LOG` in the environment cannot turn on verbose output. With
/// `debug` the default is `debug` and `RUST_LOG` may override it.
///
/// When `file` is given, output goes to that file instead of stdout.
pub fn init(debug: bool, file: Option<PathBuf>) {
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let _ = match file.as_deref().and_then(split_path) {
        Some((dir, name)) => {
            let appender = tracing_appender::rolling::never(dir, name);
            builder.with_ansi(false).with_writer(appender).try_init()
        }
        None => builder.try_init(),
    };
}

fn split_path(path: &Path) -> Option<(PathBuf, PathBuf)> {
    let name = path.file_name()?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Some((dir, PathBuf::from(name)))
}
