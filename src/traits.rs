use crate::binder::bind_with;
use crate::errors::BindError;
use crate::record::Record;
use crate::source::{EnvSource, ProcessEnv};

/// A trait for types that can be constructed from environment variables.
///
/// Implemented for every [`Record`] that is also [`Default`]: a fresh default
/// value is created and bound. On error the partially bound value is dropped,
/// so callers either get a fully bound record or nothing.
///
/// # Examples
/// ```
/// use envbind::{env_record, BindError, FromEnv, MapEnv};
///
/// env_record! {
///     #[derive(Debug, Default)]
///     struct RabbitMQConfig {
///         #[env(var = "RABBITMQ_HOST", default = "localhost")]
///         host: String,
///         #[env(var = "RABBITMQ_PORT", default = "5672")]
///         port: i32,
///     }
/// }
///
/// let env = MapEnv::new().with("RABBITMQ_PORT", "not-a-port");
/// let err = RabbitMQConfig::from_source(&env).unwrap_err();
/// assert!(matches!(err, BindError::CoercionError { field: "port", .. }));
/// ```
pub trait FromEnv: Sized {
    /// Creates a new instance from the process environment.
    fn from_env() -> Result<Self, BindError> {
        Self::from_source(&ProcessEnv)
    }

    /// Creates a new instance from the given source.
    fn from_source<S: EnvSource + ?Sized>(source: &S) -> Result<Self, BindError>;
}

impl<R: Record + Default> FromEnv for R {
    fn from_source<S: EnvSource + ?Sized>(source: &S) -> Result<Self, BindError> {
        let mut record = R::default();
        bind_with(&mut record, source)?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;
    use crate::source::MapEnv;

    crate::env_record! {
        #[derive(Debug, Default, PartialEq)]
        struct WebSocketConfig {
            #[env(var = "WS_HOST", default = "localhost")]
            host: String,
            #[env(var = "WS_PORT", default = "8080")]
            port: i32,
        }
    }

    #[test]
    fn test_from_source_uses_defaults() {
        let config = WebSocketConfig::from_source(&MapEnv::new()).unwrap();
        assert_eq!(
            config,
            WebSocketConfig {
                host: "localhost".to_string(),
                port: 8080,
            }
        );
    }

    #[test]
    fn test_from_source_overrides() {
        let env = MapEnv::new().with("WS_HOST", "0.0.0.0").with("WS_PORT", "9001");
        let config = WebSocketConfig::from_source(&env).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9001);
    }

    #[test]
    fn test_from_source_error_discards_record() {
        let env = MapEnv::new().with("WS_HOST", "0.0.0.0").with("WS_PORT", "80x");
        let result = WebSocketConfig::from_source(&env);
        assert!(matches!(
            result,
            Err(BindError::CoercionError { field: "port", .. })
        ));
    }

    #[test]
    fn test_from_env_reads_process_environment() {
        crate::env_record! {
            #[derive(Debug, Default)]
            struct ProcessConfig {
                #[env(var = "ENVBIND_TRAITS_TEST_DEBUG")]
                debug: bool,
            }
        }

        env::set_var("ENVBIND_TRAITS_TEST_DEBUG", "on");
        let result = ProcessConfig::from_env();
        env::remove_var("ENVBIND_TRAITS_TEST_DEBUG");

        assert!(result.unwrap().debug);
    }
}
