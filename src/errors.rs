use std::num::ParseIntError;

use thiserror::Error;

use crate::field::FieldKind;

/// Errors that can occur while binding environment variables into a record.
///
/// Binding is fail-fast: the first error stops iteration and is returned as is.
/// Fields visited before the failure keep their new values.
#[derive(Debug, Error)]
pub enum BindError {
    /// The argument was not a mutable reference (a value or a shared reference
    /// was passed, so any assignment would be lost).
    #[error("Expected a mutable reference to a record, got {type_name}")]
    InvalidTarget { type_name: &'static str },

    /// The argument was a mutable reference, but not to a record type.
    #[error("Expected a record type, got {type_name}")]
    InvalidShape { type_name: &'static str },

    /// A resolved value did not match the grammar of the field's kind.
    #[error("Failed to parse field `{field}` as {kind} from {value:?}: {source}")]
    CoercionError {
        field: &'static str,
        kind: FieldKind,
        value: String,
        #[source]
        source: CoercionFailure,
    },

    /// The field is annotated with a variable name but its type is not one of
    /// the bindable kinds.
    #[error("Field `{field}` has unsupported type {type_name}")]
    UnsupportedType {
        field: &'static str,
        type_name: &'static str,
    },
}

impl BindError {
    /// Name of the field the error is attributed to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            BindError::CoercionError { field, .. } | BindError::UnsupportedType { field, .. } => {
                Some(*field)
            }
            BindError::InvalidTarget { .. } | BindError::InvalidShape { .. } => None,
        }
    }
}

/// Why a resolved string could not be coerced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionFailure {
    /// The value is not one of the accepted boolean literals.
    ///
    /// Accepted forms are `true`/`false`, `t`/`f`, `1`/`0`, `yes`/`no`, `y`/`n`
    /// and `on`/`off`, in any ASCII case.
    #[error("invalid boolean literal")]
    InvalidBool,

    /// The value is not a base-10 integer in the 32-bit range.
    ///
    /// Wraps the `ParseIntError` from `i32::from_str`, whose kind tells invalid
    /// digits apart from overflow.
    #[error(transparent)]
    Int(#[from] ParseIntError),
}

/// Errors that can occur while loading an environment source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Represents errors that occur while reading or parsing a .env file.
    ///
    /// This variant is automatically converted from `dotenvy::Error` through the
    /// `From` trait. A missing file is only reported here by
    /// [`MapEnv::from_dotenv`](crate::MapEnv::from_dotenv); the `load_dotenv`
    /// functions treat it as "nothing to load".
    #[error("DotEnv error: {0}")]
    DotEnvError(#[from] dotenvy::Error),
}
