use std::fmt;

use crate::coerce::{parse_bool, parse_int};
use crate::errors::BindError;

/// The bindable kinds a field can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Assigned verbatim.
    String,
    /// Parsed from a boolean literal such as `true`, `0` or `off`.
    Bool,
    /// Parsed as a base-10 integer in the 32-bit range.
    Int,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => write!(f, "string"),
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::Int => write!(f, "int"),
        }
    }
}

/// Integer storage. Values are always constrained to the 32-bit range,
/// whatever the width of the underlying field.
#[derive(Debug)]
pub enum IntSlot<'a> {
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
}

impl IntSlot<'_> {
    fn set(self, value: i32) {
        match self {
            IntSlot::I32(slot) => *slot = value,
            IntSlot::I64(slot) => *slot = i64::from(value),
            IntSlot::Isize(slot) => *slot = value as isize,
        }
    }
}

/// A mutable view into one field of the caller's record.
#[derive(Debug)]
pub enum FieldSlot<'a> {
    /// A `String` field.
    String(&'a mut String),
    /// A `bool` field.
    Bool(&'a mut bool),
    /// An integer field of any supported width.
    Int(IntSlot<'a>),
    /// The field carries a variable name but its type cannot be bound.
    Unsupported(&'static str),
    /// The field has no variable name and is never touched.
    Inert,
}

impl FieldSlot<'_> {
    /// The declared kind, or `None` for unsupported and inert fields.
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            FieldSlot::String(_) => Some(FieldKind::String),
            FieldSlot::Bool(_) => Some(FieldKind::Bool),
            FieldSlot::Int(_) => Some(FieldKind::Int),
            FieldSlot::Unsupported(_) | FieldSlot::Inert => None,
        }
    }

    /// Coerces `value` to the slot's kind and stores it.
    ///
    /// Nothing is written when coercion fails.
    pub fn assign(self, field: &'static str, value: String) -> Result<(), BindError> {
        let coercion_error = |kind, value, source| BindError::CoercionError {
            field,
            kind,
            value,
            source,
        };

        match self {
            FieldSlot::String(slot) => *slot = value,
            FieldSlot::Bool(slot) => match parse_bool(&value) {
                Ok(parsed) => *slot = parsed,
                Err(e) => return Err(coercion_error(FieldKind::Bool, value, e)),
            },
            FieldSlot::Int(slot) => match parse_int(&value) {
                Ok(parsed) => slot.set(parsed),
                Err(e) => return Err(coercion_error(FieldKind::Int, value, e)),
            },
            FieldSlot::Unsupported(type_name) => {
                return Err(BindError::UnsupportedType { field, type_name })
            }
            FieldSlot::Inert => {}
        }
        Ok(())
    }
}

/// Types that can appear as an annotated field of a record.
///
/// Implemented for `String`, `bool`, `i32`, `i64` and `isize`. A number of
/// other common types implement it by reporting themselves as unsupported, so
/// annotating them is a binding-time error rather than a compile error.
pub trait EnvField {
    /// Returns a mutable view of this value tagged with its kind.
    fn slot(&mut self) -> FieldSlot<'_>;
}

impl EnvField for String {
    fn slot(&mut self) -> FieldSlot<'_> {
        FieldSlot::String(self)
    }
}

impl EnvField for bool {
    fn slot(&mut self) -> FieldSlot<'_> {
        FieldSlot::Bool(self)
    }
}

impl EnvField for i32 {
    fn slot(&mut self) -> FieldSlot<'_> {
        FieldSlot::Int(IntSlot::I32(self))
    }
}

impl EnvField for i64 {
    fn slot(&mut self) -> FieldSlot<'_> {
        FieldSlot::Int(IntSlot::I64(self))
    }
}

impl EnvField for isize {
    fn slot(&mut self) -> FieldSlot<'_> {
        FieldSlot::Int(IntSlot::Isize(self))
    }
}

macro_rules! unsupported_env_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EnvField for $ty {
                fn slot(&mut self) -> FieldSlot<'_> {
                    FieldSlot::Unsupported(std::any::type_name::<$ty>())
                }
            }
        )*
    };
}

unsupported_env_field!(char, i8, i16, i128, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T> EnvField for Vec<T> {
    fn slot(&mut self) -> FieldSlot<'_> {
        FieldSlot::Unsupported(std::any::type_name::<Self>())
    }
}

impl<T> EnvField for Option<T> {
    fn slot(&mut self) -> FieldSlot<'_> {
        FieldSlot::Unsupported(std::any::type_name::<Self>())
    }
}

/// Metadata and storage for one record field.
#[derive(Debug)]
pub struct FieldDescriptor<'a> {
    pub name: &'static str,
    /// Environment variable to read. `None` makes the field inert.
    pub var: Option<&'static str>,
    /// Value used when the variable is unset or empty. May be empty.
    pub default: &'static str,
    pub slot: FieldSlot<'a>,
}

impl<'a> FieldDescriptor<'a> {
    pub fn new(name: &'static str, slot: FieldSlot<'a>) -> Self {
        Self {
            name,
            var: None,
            default: "",
            slot,
        }
    }

    pub fn var(mut self, var: &'static str) -> Self {
        self.var = Some(var);
        self
    }

    pub fn default_value(mut self, default: &'static str) -> Self {
        self.default = default;
        self
    }
}
