use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

#[derive(thiserror::Error, Debug)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("failed to install the global subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Installs the global subscriber: an `fmt` layer filtered by `directives`.
pub fn init_tracing(directives: &str) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(directives)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}
