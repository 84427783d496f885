//! Tracing setup shared by the binaries.

use gantry_common::config::LogLevel;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

/// Install the global subscriber.
///
/// `RUST_LOG` directives are honored; `verbose` forces DEBUG, otherwise the
/// configured level applies.
pub fn setup_tracing(verbose: bool, json: bool, level: LogLevel) {
    let directive: Directive = if verbose {
        Level::DEBUG.into()
    } else {
        level
            .as_directive()
            .parse::<Directive>()
            .unwrap_or_else(|_| Level::INFO.into())
    };

    let filter = EnvFilter::from_default_env().add_directive(directive);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
