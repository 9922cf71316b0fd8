//! Runtime value types read out of records.
//!
//! The [`Value`] enum is the closed set of leaf kinds the engine knows how to
//! compare and match. Anything else a record holds is reported as
//! [`Value::Unsupported`] so the comparator and filter engine can match
//! exhaustively instead of inspecting types at runtime.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::record::Record;

/// Runtime value of a record field, borrowed from the record.
///
/// # Example
///
/// ```
/// use mempage::{FieldValue, Int, Value};
///
/// let name = String::from("Ada");
/// assert_eq!(name.field_value(), Value::String("Ada"));
/// assert_eq!(42i64.field_value(), Value::Int(Int::I64(42)));
/// assert_eq!(None::<String>.field_value(), Value::Null);
/// ```
#[derive(Clone, Copy)]
pub enum Value<'a> {
    /// Boolean value.
    Bool(bool),
    /// Integer value, tagged with its width.
    Int(Int),
    /// Floating point value, tagged with its width.
    Float(Float),
    /// String value (borrowed).
    String(&'a str),
    /// Point in time.
    Timestamp(Timestamp),
    /// Absent optional or empty pointer.
    Null,
    /// Nested structured value.
    Record(&'a dyn Record),
    /// A value of a kind the engine does not interpret, with its type name.
    Unsupported(&'static str),
}

impl<'a> Value<'a> {
    /// Short name of this value's kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(n) => n.width_name(),
            Value::Float(n) => n.width_name(),
            Value::String(_) => "string",
            Value::Timestamp(_) => "timestamp",
            Value::Null => "null",
            Value::Record(_) => "record",
            Value::Unsupported(name) => name,
        }
    }

    /// Returns `true` if this is a `Null` value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the nested record, if present.
    pub fn as_record(&self) -> Option<&'a dyn Record> {
        match self {
            Value::Record(r) => Some(*r),
            _ => None,
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Value::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Timestamp(t) => f.debug_tuple("Timestamp").field(t).finish(),
            Value::Null => f.write_str("Null"),
            Value::Record(r) => f.debug_tuple("Record").field(&r.record_name()).finish(),
            Value::Unsupported(name) => f.debug_tuple("Unsupported").field(name).finish(),
        }
    }
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Null, Value::Null) => true,
            // Nested records are equal only when they are the same record.
            (Value::Record(a), Value::Record(b)) => std::ptr::addr_eq(*a, *b),
            (Value::Unsupported(a), Value::Unsupported(b)) => a == b,
            _ => false,
        }
    }
}

/// Integer value tagged with its width.
///
/// Widths never compare with each other: an `I32` and an `I64` holding the
/// same number are incomparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Int {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
}

impl Int {
    /// Compares two integers of the same width.
    ///
    /// Returns `None` when the widths differ.
    pub fn compare(self, other: Int) -> Option<Ordering> {
        match (self, other) {
            (Int::I8(a), Int::I8(b)) => Some(a.cmp(&b)),
            (Int::I16(a), Int::I16(b)) => Some(a.cmp(&b)),
            (Int::I32(a), Int::I32(b)) => Some(a.cmp(&b)),
            (Int::I64(a), Int::I64(b)) => Some(a.cmp(&b)),
            (Int::Isize(a), Int::Isize(b)) => Some(a.cmp(&b)),
            (Int::U8(a), Int::U8(b)) => Some(a.cmp(&b)),
            (Int::U16(a), Int::U16(b)) => Some(a.cmp(&b)),
            (Int::U32(a), Int::U32(b)) => Some(a.cmp(&b)),
            (Int::U64(a), Int::U64(b)) => Some(a.cmp(&b)),
            (Int::Usize(a), Int::Usize(b)) => Some(a.cmp(&b)),
            _ => None,
        }
    }

    /// Returns the Rust type name of this width.
    pub fn width_name(self) -> &'static str {
        match self {
            Int::I8(_) => "i8",
            Int::I16(_) => "i16",
            Int::I32(_) => "i32",
            Int::I64(_) => "i64",
            Int::Isize(_) => "isize",
            Int::U8(_) => "u8",
            Int::U16(_) => "u16",
            Int::U32(_) => "u32",
            Int::U64(_) => "u64",
            Int::Usize(_) => "usize",
        }
    }
}

/// Floating point value tagged with its width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Float {
    F32(f32),
    F64(f64),
}

impl Float {
    /// Compares two floats of the same width.
    ///
    /// Returns `None` when the widths differ or either side is NaN.
    pub fn compare(self, other: Float) -> Option<Ordering> {
        match (self, other) {
            (Float::F32(a), Float::F32(b)) => a.partial_cmp(&b),
            (Float::F64(a), Float::F64(b)) => a.partial_cmp(&b),
            _ => None,
        }
    }

    /// Returns the Rust type name of this width.
    pub fn width_name(self) -> &'static str {
        match self {
            Float::F32(_) => "f32",
            Float::F64(_) => "f64",
        }
    }
}

/// Timestamp value, stored in UTC.
///
/// Timestamps are ordered by whole seconds since the Unix epoch; see
/// [`compare_values`](crate::compare_values).
///
/// # Example
///
/// ```
/// use mempage::Timestamp;
///
/// let a = Timestamp::from_secs(1_700_000_000).unwrap();
/// assert_eq!(a.as_secs(), 1_700_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp from seconds since the Unix epoch.
    ///
    /// Returns `None` when the value is out of range.
    pub fn from_secs(secs: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp(secs, 0).map(Timestamp)
    }

    /// Creates a timestamp from milliseconds since the Unix epoch.
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp_millis(millis).map(Timestamp)
    }

    /// Whole seconds since the Unix epoch, sub-second precision dropped.
    pub fn as_secs(self) -> i64 {
        self.0.timestamp()
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(dt: DateTime<Tz>) -> Self {
        Timestamp(dt.with_timezone(&Utc))
    }
}

impl From<SystemTime> for Timestamp {
    fn from(t: SystemTime) -> Self {
        Timestamp(DateTime::<Utc>::from(t))
    }
}

/// Conversion of a field into a [`Value`].
///
/// Implemented for the primitive kinds the engine understands, for
/// optionals (where `None` becomes [`Value::Null`]) and for the common
/// pointer types. `#[derive(Record)]` calls this for every plain field, so a
/// custom field type only needs this impl to be usable in requests.
///
/// ```
/// use mempage::{FieldValue, Value};
///
/// enum Status {
///     Open,
///     Closed,
/// }
///
/// impl FieldValue for Status {
///     fn field_value(&self) -> Value<'_> {
///         match self {
///             Status::Open => Value::String("open"),
///             Status::Closed => Value::String("closed"),
///         }
///     }
/// }
/// ```
pub trait FieldValue {
    fn field_value(&self) -> Value<'_>;
}

macro_rules! int_field_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn field_value(&self) -> Value<'_> {
                    Value::Int(Int::$variant(*self))
                }
            }
        )*
    };
}

int_field_value! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
}

impl FieldValue for f32 {
    fn field_value(&self) -> Value<'_> {
        Value::Float(Float::F32(*self))
    }
}

impl FieldValue for f64 {
    fn field_value(&self) -> Value<'_> {
        Value::Float(Float::F64(*self))
    }
}

impl FieldValue for bool {
    fn field_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl FieldValue for str {
    fn field_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl FieldValue for String {
    fn field_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl FieldValue for Cow<'_, str> {
    fn field_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl FieldValue for Timestamp {
    fn field_value(&self) -> Value<'_> {
        Value::Timestamp(*self)
    }
}

impl<Tz: TimeZone> FieldValue for DateTime<Tz> {
    fn field_value(&self) -> Value<'_> {
        Value::Timestamp(Timestamp::from(self.clone()))
    }
}

/// Naive datetimes are read as UTC.
impl FieldValue for NaiveDateTime {
    fn field_value(&self) -> Value<'_> {
        Value::Timestamp(Timestamp(self.and_utc()))
    }
}

impl FieldValue for SystemTime {
    fn field_value(&self) -> Value<'_> {
        Value::Timestamp(Timestamp::from(*self))
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn field_value(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.field_value(),
            None => Value::Null,
        }
    }
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn field_value(&self) -> Value<'_> {
        (**self).field_value()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for Box<T> {
    fn field_value(&self) -> Value<'_> {
        (**self).field_value()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for Rc<T> {
    fn field_value(&self) -> Value<'_> {
        (**self).field_value()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for Arc<T> {
    fn field_value(&self) -> Value<'_> {
        (**self).field_value()
    }
}
