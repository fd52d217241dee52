//! In-process schema reflection: descriptors, values and records.
//!
//! The engines only walk records through this module: the ordered field list
//! of a type, and get/set/clear access on a record.

pub mod descriptor;
pub mod record;
pub mod unknown;
pub mod value;

pub use descriptor::{
    EnumDescriptor, FieldDescriptor, FieldKind, MessageDescriptor, MessageDescriptorBuilder,
    ScalarType,
};
pub use record::Record;
pub use unknown::{UnknownFields, UnknownValue};
pub use value::{EnumValue, Value};
