use tracing::{debug, trace};

use crate::errors::BindError;
use crate::record::{Bindable, Target};
use crate::resolver::resolve;
use crate::source::{EnvSource, ProcessEnv};

/// Binds the process environment into the record behind `target`.
///
/// See [`bind_with`].
pub fn bind<T: Bindable>(target: T) -> Result<(), BindError> {
    bind_with(target, &ProcessEnv)
}

/// Binds variables from `source` into the record behind `target`.
///
/// `target` must be a mutable reference to a [`Record`](crate::Record):
/// anything else fails with [`BindError::InvalidTarget`] (values, shared
/// references) or [`BindError::InvalidShape`] (references to non-records)
/// before any field is touched.
///
/// Fields are visited in declaration order. A field whose resolved value is
/// empty is left as is. The first coercion or unsupported-type error stops
/// the bind: earlier fields keep their new values, later fields are not
/// looked up or modified. Bind into a fresh record (see
/// [`FromEnv`](crate::FromEnv)) when that matters.
pub fn bind_with<T, S>(mut target: T, source: &S) -> Result<(), BindError>
where
    T: Bindable,
    S: EnvSource + ?Sized,
{
    let record = match target.target() {
        Target::Value(type_name) => return Err(BindError::InvalidTarget { type_name }),
        Target::Scalar(type_name) => return Err(BindError::InvalidShape { type_name }),
        Target::Record(record) => record,
    };

    let descriptor = record.describe();
    debug!(
        record = descriptor.type_name,
        fields = descriptor.fields.len(),
        "Binding record from environment"
    );

    for field in descriptor.fields {
        let value = resolve(&field, source);
        if value.is_empty() {
            trace!(field = field.name, "No value, leaving field untouched");
            continue;
        }
        field.slot.assign(field.name, value)?;
    }

    Ok(())
}
