//! Subscriber setup for the service binaries.
//!
//! Production writes flattened JSON lines, development writes the pretty format. Both carry a
//! `tracing_error::ErrorLayer` so eyre reports include the span trace, and both keep the
//! `audit` target at info regardless of the global level.

use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, Layer, prelude::*};

const PRODUCTION_DIRECTIVES: &str = "info,audit=info,tower_http=info,sea_orm=warn,sqlx=warn";
const DEVELOPMENT_DIRECTIVES: &str =
    "debug,audit=info,tower_http=debug,sea_orm=info,sqlx=info,hyper_util=info,h2=info";

fn default_directives(environment: &Environment) -> &'static str {
    if environment.is_production() {
        PRODUCTION_DIRECTIVES
    } else {
        DEVELOPMENT_DIRECTIVES
    }
}

/// `RUST_LOG` when set and valid, the environment's defaults otherwise.
fn env_filter(environment: &Environment) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(environment)))
}

/// Install the color-eyre report hook. Call before anything fallible in `main`.
pub fn install_color_eyre() {
    // a second install returns Err, which tests hit routinely
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Install the global subscriber for `environment`.
///
/// Calling it again is harmless: the first subscriber stays in place.
///
/// ```ignore
/// install_color_eyre();
/// let config = Config::from_env()?;
/// init_tracing(&config.environment);
/// ```
pub fn init_tracing(environment: &Environment) {
    let output = if environment.is_production() {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .flatten_event(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .pretty()
            .with_file(false)
            .with_line_number(false)
            .boxed()
    };

    let installed = tracing_subscriber::registry()
        .with(output)
        .with(tracing_error::ErrorLayer::default())
        .with(env_filter(environment))
        .try_init();

    match installed {
        Ok(()) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        for environment in [Environment::Development, Environment::Production] {
            assert!(EnvFilter::try_new(default_directives(&environment)).is_ok());
        }
    }

    #[test]
    fn test_audit_target_kept_in_every_environment() {
        assert!(default_directives(&Environment::Production).contains("audit=info"));
        assert!(default_directives(&Environment::Development).contains("audit=info"));
    }

    #[test]
    fn test_production_quiets_database_driver() {
        assert!(default_directives(&Environment::Production).contains("sea_orm=warn"));
        assert!(default_directives(&Environment::Development).starts_with("debug"));
    }

    #[test]
    fn test_rust_log_overrides_defaults() {
        temp_env::with_var("RUST_LOG", Some("warn"), || {
            assert_eq!(env_filter(&Environment::Production).to_string(), "warn");
        });
    }

    #[test]
    fn test_init_tracing_twice_keeps_first_subscriber() {
        temp_env::with_var_unset("RUST_LOG", || {
            init_tracing(&Environment::Development);
            init_tracing(&Environment::Production);
        });
    }
}
