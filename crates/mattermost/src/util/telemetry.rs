use tracing_subscriber::{fmt::MakeWriter, prelude::*, EnvFilter, Registry};

/// Initialize tracing
///
/// Logs go to stderr so stdout stays free for command output. Reads the filter
/// from `RUST_LOG`, falling back to `info`. Set `json` for machine-readable output.
pub fn init(json: bool) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    tracing::subscriber::set_global_default(subscriber(json, std::io::stderr))
}

pub fn subscriber<W>(json: bool, writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let logger = if json {
        tracing_subscriber::fmt::layer().json().with_writer(writer).boxed()
    } else {
        tracing_subscriber::fmt::layer().compact().with_writer(writer).boxed()
    };

    Registry::default().with(logger).with(env_filter)
}
