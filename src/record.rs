//! Record introspection.
//!
//! A [`Record`] exposes its fields as an ordered list of [`FieldDescriptor`]s.
//! The [`env_record!`](crate::env_record) macro generates the impl from the
//! struct declaration; it can also be written by hand.
//!
//! [`Bindable`] classifies whatever is handed to [`bind`](crate::bind) so that
//! values, shared references and references to non-records are rejected
//! before any field is touched.

use crate::field::FieldDescriptor;

/// Ordered field descriptors of one record instance.
#[derive(Debug)]
pub struct RecordDescriptor<'a> {
    pub type_name: &'static str,
    pub fields: Vec<FieldDescriptor<'a>>,
}

/// A record whose fields can be bound from the environment.
///
/// Fields must be described in declaration order; binding visits them in
/// the order returned here.
pub trait Record {
    /// Describes every field, borrowing each one mutably for the lifetime of
    /// the descriptor.
    fn describe(&mut self) -> RecordDescriptor<'_>;
}

/// What a [`Bindable`] argument turned out to be.
pub enum Target<'a> {
    /// A mutable reference to a record.
    Record(&'a mut dyn Record),
    /// A value or shared reference; assignments would not reach the caller.
    Value(&'static str),
    /// A mutable reference to something that is not a record.
    Scalar(&'static str),
}

/// Anything that may be passed to [`bind`](crate::bind).
pub trait Bindable {
    /// Classifies the argument. Only a mutable reference to a record yields
    /// [`Target::Record`].
    fn target(&mut self) -> Target<'_>;
}

impl<R: Record> Bindable for &mut R {
    fn target(&mut self) -> Target<'_> {
        Target::Record(&mut **self)
    }
}

impl<R: Record> Bindable for &R {
    fn target(&mut self) -> Target<'_> {
        Target::Value(std::any::type_name::<&R>())
    }
}

macro_rules! scalar_targets {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Bindable for $ty {
                fn target(&mut self) -> Target<'_> {
                    Target::Value(std::any::type_name::<$ty>())
                }
            }

            impl Bindable for &$ty {
                fn target(&mut self) -> Target<'_> {
                    Target::Value(std::any::type_name::<&$ty>())
                }
            }

            impl Bindable for &mut $ty {
                fn target(&mut self) -> Target<'_> {
                    Target::Scalar(std::any::type_name::<$ty>())
                }
            }
        )*
    };
}

scalar_targets!(
    String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128,
    usize, f32, f64,
);

/// Declares a struct and implements [`Record`] for it.
///
/// A field is bound when it carries an `#[env(...)]` attribute naming its
/// variable: `#[env(var = "NAME")]`, optionally with `default = "value"`, in
/// either order. The attribute may sit anywhere among the field's other
/// attributes, which are passed through unchanged. `#[cfg(...)]` on a field
/// also removes it from the descriptor list.
///
/// Bound fields must implement [`EnvField`](crate::EnvField). Fields without
/// a variable name can have any type and are never touched.
///
/// ```
/// use envbind::{env_record, FromEnv, MapEnv};
///
/// env_record! {
///     #[derive(Debug, Default)]
///     pub struct Config {
///         /// Listening port.
///         #[env(var = "PORT", default = "8080")]
///         pub port: i32,
///         #[env(default = "false", var = "DEBUG")]
///         /// Verbose output.
///         pub debug: bool,
///         #[allow(dead_code)]
///         pub label: String,
///     }
/// }
///
/// let env = MapEnv::new().with("DEBUG", "true");
/// let config = Config::from_source(&env).unwrap();
/// assert_eq!(config.port, 8080);
/// assert!(config.debug);
/// ```
#[macro_export]
macro_rules! env_record {
    (@var var = $var:literal $(, $($rest:tt)*)?) => { ::std::option::Option::Some($var) };
    (@var default = $default:literal $(, $($rest:tt)*)?) => {
        $crate::env_record!(@var $($($rest)*)?)
    };
    (@var $key:ident = $value:literal $(, $($rest:tt)*)?) => {
        ::std::compile_error!(::std::concat!(
            "unknown `env` key `", ::std::stringify!($key), "`, expected `var` or `default`"
        ))
    };
    (@var) => { ::std::option::Option::None };

    (@default default = $default:literal $(, $($rest:tt)*)?) => { $default };
    (@default $key:ident = $value:literal $(, $($rest:tt)*)?) => {
        $crate::env_record!(@default $($($rest)*)?)
    };
    (@default) => { "" };

    (@slot $place:expr; var = $var:literal $(, $($rest:tt)*)?) => {
        $crate::EnvField::slot($place)
    };
    (@slot $place:expr; $key:ident = $value:literal $(, $($rest:tt)*)?) => {
        $crate::env_record!(@slot $place; $($($rest)*)?)
    };
    (@slot $place:expr;) => { $crate::FieldSlot::Inert };

    // All fields consumed.
    (@munch [$($header:tt)*] $name:ident
        fields: [$($fields:tt)*]
        descs: [$([{$($cfg:tt)*} $dfield:ident {$($env:tt)*}])*]
        attrs: [] cfgs: [] env: []
        rest: []
    ) => {
        $($header)* {
            $($fields)*
        }

        impl $crate::Record for $name {
            fn describe(&mut self) -> $crate::RecordDescriptor<'_> {
                #[allow(unused_mut)]
                let mut fields = ::std::vec::Vec::new();
                $(
                    $($cfg)*
                    fields.push($crate::FieldDescriptor {
                        name: ::std::stringify!($dfield),
                        var: $crate::env_record!(@var $($env)*),
                        default: $crate::env_record!(@default $($env)*),
                        slot: $crate::env_record!(@slot &mut self.$dfield; $($env)*),
                    });
                )*
                $crate::RecordDescriptor {
                    type_name: ::std::any::type_name::<$name>(),
                    fields,
                }
            }
        }

        impl $crate::Bindable for $name {
            fn target(&mut self) -> $crate::Target<'_> {
                $crate::Target::Value(::std::any::type_name::<$name>())
            }
        }
    };

    (@munch [$($header:tt)*] $name:ident
        fields: [$($fields:tt)*] descs: [$($descs:tt)*]
        attrs: [$($attrs:tt)*] cfgs: [$($cfgs:tt)*] env: [$($env:tt)+]
        rest: [#[env($($args:tt)*)] $($rest:tt)*]
    ) => {
        ::std::compile_error!("duplicate `#[env]` attribute on field");
    };

    (@munch [$($header:tt)*] $name:ident
        fields: [$($fields:tt)*] descs: [$($descs:tt)*]
        attrs: [$($attrs:tt)*] cfgs: [$($cfgs:tt)*] env: []
        rest: [#[env($($args:tt)*)] $($rest:tt)*]
    ) => {
        $crate::env_record!(@munch [$($header)*] $name
            fields: [$($fields)*] descs: [$($descs)*]
            attrs: [$($attrs)*] cfgs: [$($cfgs)*] env: [$($args)*]
            rest: [$($rest)*]
        );
    };

    (@munch [$($header:tt)*] $name:ident
        fields: [$($fields:tt)*] descs: [$($descs:tt)*]
        attrs: [$($attrs:tt)*] cfgs: [$($cfgs:tt)*] env: [$($env:tt)*]
        rest: [#[cfg($($cond:tt)*)] $($rest:tt)*]
    ) => {
        $crate::env_record!(@munch [$($header)*] $name
            fields: [$($fields)*] descs: [$($descs)*]
            attrs: [$($attrs)* #[cfg($($cond)*)]]
            cfgs: [$($cfgs)* #[cfg($($cond)*)]]
            env: [$($env)*]
            rest: [$($rest)*]
        );
    };

    (@munch [$($header:tt)*] $name:ident
        fields: [$($fields:tt)*] descs: [$($descs:tt)*]
        attrs: [$($attrs:tt)*] cfgs: [$($cfgs:tt)*] env: [$($env:tt)*]
        rest: [#[$attr:meta] $($rest:tt)*]
    ) => {
        $crate::env_record!(@munch [$($header)*] $name
            fields: [$($fields)*] descs: [$($descs)*]
            attrs: [$($attrs)* #[$attr]] cfgs: [$($cfgs)*] env: [$($env)*]
            rest: [$($rest)*]
        );
    };

    (@munch [$($header:tt)*] $name:ident
        fields: [$($fields:tt)*] descs: [$($descs:tt)*]
        attrs: [$($attrs:tt)*] cfgs: [$($cfgs:tt)*] env: [$($env:tt)*]
        rest: [$field_vis:vis $field:ident : $ty:ty $(, $($rest:tt)*)?]
    ) => {
        $crate::env_record!(@munch [$($header)*] $name
            fields: [$($fields)* $($attrs)* $field_vis $field: $ty,]
            descs: [$($descs)* [{$($cfgs)*} $field {$($env)*}]]
            attrs: [] cfgs: [] env: []
            rest: [$($($rest)*)?]
        );
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($body:tt)*
        }
    ) => {
        $crate::env_record!(@munch [$(#[$meta])* $vis struct $name] $name
            fields: [] descs: []
            attrs: [] cfgs: [] env: []
            rest: [$($body)*]
        );
    };
}
