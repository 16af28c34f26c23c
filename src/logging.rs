//! Dedicated log file for rejected records.

use std::fs::File;
use std::path::Path;

use anyhow::Result;
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{Layer, filter::Targets, fmt, registry::LookupSpan};

/// Target every rejection is logged under.
pub const REJECTS_TARGET: &str = "rejects";

pub const REJECTS_FILE: &str = "rejects.log";

/// Builds a layer writing only `rejects` events to `path`, truncated on open.
///
/// Keep the returned guard alive until logging is done; dropping it flushes
/// the file.
pub fn rejects_layer<S>(path: &Path) -> Result<(Box<dyn Layer<S> + Send + Sync>, WorkerGuard)>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    let (writer, guard) = tracing_appender::non_blocking(File::create(path)?);

    let layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(writer)
        .with_filter(Targets::new().with_target(REJECTS_TARGET, Level::ERROR));

    Ok((Box::new(layer), guard))
}
