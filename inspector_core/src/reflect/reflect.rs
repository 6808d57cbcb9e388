// inspector_core/src/reflect/reflect.rs
use crate::error::AccessError;
use crate::reflect::type_info::TypeInfo;
use crate::reflect::value::Value;
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

/// Trait that every inspectable object needs to expose.
/// Usually derived with `#[derive(Reflect)]`.
pub trait Reflect: Any {
    /// The registration-time metadata table of the concrete type.
    fn type_info(&self) -> &'static TypeInfo;

    /// Reads a member by name.
    fn get(&self, member: &str) -> Result<Value, AccessError>;

    /// Writes a member by name.
    fn set(&mut self, member: &str, value: Value) -> Result<(), AccessError>;

    fn clone_reflect(&self) -> Box<dyn Reflect>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Structural equality: same type and every readable member equal.
    fn reflect_eq(&self, other: &dyn Reflect) -> bool {
        let info = self.type_info();
        if info.type_id() != other.type_info().type_id() {
            return false;
        }
        info.members()
            .iter()
            .filter(|m| m.is_readable())
            .all(|m| match (self.get(m.name()), other.get(m.name())) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            })
    }
}

/// Static access to the metadata table, without an instance.
pub trait Typed {
    fn static_type_info() -> &'static TypeInfo;
}

/// A selected object. The inspector only ever borrows it for the duration
/// of one read or write.
pub type ObjectRef = Rc<RefCell<dyn Reflect>>;

/// Wraps a value into a shareable selection target.
pub fn object_ref<T: Reflect>(value: T) -> ObjectRef {
    Rc::new(RefCell::new(value))
}
