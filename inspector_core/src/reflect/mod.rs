// inspector_core/src/reflect/mod.rs
pub mod enums;
#[allow(clippy::module_inception)]
pub mod reflect;
pub mod type_info;
pub mod value;

pub use enums::short_type_name;
pub use reflect::{ObjectRef, Reflect, Typed, object_ref};
pub use reflect_derive::Reflect;
pub use type_info::{
    Attribute,
    EditorTypeRef,
    MemberInfo,
    MemberKind,
    TypeInfo,
    TypeInfoBuilder,
    Visibility,
};
pub use value::{EnumValue, ReflectValue, Value, ValueKind, getter_value_type, object_from_value};
