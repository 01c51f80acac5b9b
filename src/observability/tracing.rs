use axum::http::Method;
use tracing::Span;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;
use crate::config::logging::LoggingConfig;
use crate::error::{Error, Result};
use crate::ledger::history::TransactionType;
use crate::types::ids::UserId;
use crate::types::point::Points;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| Error::ConfigError(format!("invalid log level {:?}: {}", config.level, e)))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| Error::ConfigError(e.to_string()))
}

pub fn trace_point_mutation(user_id: UserId, kind: TransactionType, amount: Points) -> Span {
    tracing::info_span!(
        "point_mutation",
        user_id = %user_id,
        kind = kind.as_str(),
        amount = %amount,
    )
}

pub fn trace_request(method: &Method, path: &str) -> Span {
    tracing::info_span!(
        "http_request",
        request_id = %Uuid::new_v4(),
        method = %method,
        path = %path,
    )
}
