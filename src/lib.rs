//! Binds environment variables to the fields of a configuration record.
//!
//! Records are declared with [`env_record!`], which attaches a variable name
//! and an optional default to each field. [`bind`] then fills a record in
//! place from the process environment, and [`bind_with`] does the same from
//! any [`EnvSource`].
//!
//! Supported field types are `String`, `bool` and integers (`i32`, `i64`,
//! `isize`, always within the 32-bit range). Binding stops at the first field
//! that fails to coerce.
//!
//! ```
//! use envbind::{bind_with, env_record, MapEnv};
//!
//! env_record! {
//!     #[derive(Debug, Default)]
//!     struct Config {
//!         #[env(var = "FOOSTR")]
//!         foo_str: String,
//!         #[env(var = "PORT")]
//!         port: i32,
//!         #[env(var = "DBURL", default = "postgres://localhost:5432/mbp")]
//!         db_url: String,
//!     }
//! }
//!
//! let env = MapEnv::new().with("FOOSTR", "FOO").with("PORT", "3000");
//! let mut config = Config::default();
//! bind_with(&mut config, &env).unwrap();
//!
//! assert_eq!(config.foo_str, "FOO");
//! assert_eq!(config.port, 3000);
//! assert_eq!(config.db_url, "postgres://localhost:5432/mbp");
//! ```

mod binder;
mod coerce;
mod errors;
mod field;
mod record;
mod resolver;
mod source;
mod traits;

pub use binder::{bind, bind_with};
pub use coerce::{parse_bool, parse_int};
pub use errors::{BindError, CoercionFailure, SourceError};
pub use field::{EnvField, FieldDescriptor, FieldKind, FieldSlot, IntSlot};
pub use record::{Bindable, Record, RecordDescriptor, Target};
pub use resolver::resolve;
pub use source::{load_dotenv, load_dotenv_from, EnvSource, MapEnv, ProcessEnv};
pub use traits::FromEnv;
