// inspector_core/src/inspector/values.rs
use crate::error::{AccessError, InspectorError};
use crate::inspector::descriptor::MemberDescriptor;
use crate::reflect::{ObjectRef, Reflect, TypeInfo, Value};
use std::rc::Rc;

/// Type-erased view of one member across every selected instance.
///
/// The root container wraps the selection itself, child containers add one
/// member to the path. Nested values are read by walking the path and
/// written back get-modify-set up to the selected instance.
#[derive(Clone)]
pub struct ValueContainer {
    targets: Rc<[Option<ObjectRef>]>,
    path: Vec<Rc<MemberDescriptor>>,
}

impl ValueContainer {
    /// Wraps a selection. The order of `targets` is the selection order.
    pub fn new(targets: Vec<Option<ObjectRef>>) -> Result<Self, InspectorError> {
        if targets.is_empty() {
            return Err(InspectorError::EmptySelection);
        }
        Ok(Self { targets: targets.into(), path: Vec::new() })
    }

    /// Container for `member` of the values held here.
    pub fn child(&self, member: Rc<MemberDescriptor>) -> Self {
        let mut path = self.path.clone();
        path.push(member);
        Self { targets: Rc::clone(&self.targets), path }
    }

    /// The wrapped member, `None` for the root container.
    pub fn member(&self) -> Option<&MemberDescriptor> {
        self.path.last().map(|m| m.as_ref())
    }

    /// Dotted member path from the selected instances, e.g. `light.range`.
    pub fn path(&self) -> String {
        self.path.iter().map(|m| m.name()).collect::<Vec<_>>().join(".")
    }

    /// Number of selected instances. Never zero.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Reads the value of instance `index`.
    pub fn get(&self, index: usize) -> Result<Value, AccessError> {
        let target = self.target(index)?;
        let Some(target) = target else {
            return if self.path.is_empty() {
                Ok(Value::Null)
            } else {
                Err(AccessError::NullReference { index })
            };
        };

        let object = target.try_borrow().map_err(|_| AccessError::Borrowed { index })?;
        if self.path.is_empty() {
            return Ok(Value::Object(object.clone_reflect()));
        }
        read_path(&*object, &self.path).map_err(|e| e.at(index, self.path()))
    }

    /// Reads the value of every instance, in selection order.
    pub fn values(&self) -> Result<Vec<Value>, AccessError> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }

    /// Writes the value of instance `index`.
    pub fn set(&self, index: usize, value: Value) -> Result<(), AccessError> {
        if self.path.is_empty() {
            return Err(AccessError::NotWritable("<selection>".to_string()));
        }
        if let Some(read_only) = self.path.iter().find(|m| m.is_read_only()) {
            return Err(AccessError::ReadOnly(read_only.name().to_string()));
        }

        let target = self.target(index)?.as_ref().ok_or(AccessError::NullReference { index })?;
        let mut object = target.try_borrow_mut().map_err(|_| AccessError::Borrowed { index })?;
        write_path(&mut *object, &self.path, value).map_err(|e| e.at(index, self.path()))
    }

    /// Writes `value` to every instance, in selection order. Stops at the
    /// first failing instance, earlier instances keep the new value.
    pub fn set_all(&self, value: Value) -> Result<(), AccessError> {
        for index in 0..self.len() {
            self.set(index, value.clone())?;
        }
        Ok(())
    }

    /// True when at least two instances disagree on the value.
    pub fn has_different_values(&self) -> Result<bool, AccessError> {
        let values = self.values()?;
        Ok(values.windows(2).any(|pair| pair[0] != pair[1]))
    }

    /// Reflected type of the value at `index`, `None` when it is null.
    pub fn type_at(&self, index: usize) -> Result<Option<&'static TypeInfo>, AccessError> {
        if self.path.is_empty() {
            return match self.target(index)? {
                Some(target) => {
                    let object = target.try_borrow().map_err(|_| AccessError::Borrowed { index })?;
                    Ok(Some(object.type_info()))
                }
                None => Ok(None),
            };
        }

        match self.get(index)? {
            Value::Null => Ok(None),
            Value::Object(object) => Ok(Some(object.type_info())),
            other => Err(AccessError::type_mismatch("object", &other).at(index, self.path())),
        }
    }

    /// True when the instances hold values of more than one type.
    pub fn has_different_types(&self) -> Result<bool, AccessError> {
        let first = self.type_at(0)?.map(|t| t.type_id());
        for index in 1..self.len() {
            if self.type_at(index)?.map(|t| t.type_id()) != first {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn target(&self, index: usize) -> Result<&Option<ObjectRef>, AccessError> {
        self.targets
            .get(index)
            .ok_or(AccessError::IndexOutOfBounds { index, len: self.targets.len() })
    }
}

impl std::fmt::Debug for ValueContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueContainer")
            .field("instances", &self.targets.len())
            .field("path", &self.path())
            .finish()
    }
}

fn read_path(object: &dyn Reflect, path: &[Rc<MemberDescriptor>]) -> Result<Value, AccessError> {
    let Some((first, rest)) = path.split_first() else {
        return Ok(Value::Object(object.clone_reflect()));
    };

    let value = object.get(first.name())?;
    if rest.is_empty() {
        return Ok(value);
    }

    match value {
        Value::Object(child) => read_path(child.as_ref(), rest),
        Value::Null => Err(AccessError::NullMember(first.name().to_string())),
        other => Err(AccessError::type_mismatch("object", &other)),
    }
}

fn write_path(
    object: &mut dyn Reflect,
    path: &[Rc<MemberDescriptor>],
    value: Value,
) -> Result<(), AccessError> {
    let Some((first, rest)) = path.split_first() else {
        return Err(AccessError::NotWritable("<selection>".to_string()));
    };

    if rest.is_empty() {
        return object.set(first.name(), value);
    }

    let mut child = match object.get(first.name())? {
        Value::Object(child) => child,
        Value::Null => return Err(AccessError::NullMember(first.name().to_string())),
        other => return Err(AccessError::type_mismatch("object", &other)),
    };
    write_path(child.as_mut(), rest, value)?;
    object.set(first.name(), Value::Object(child))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::introspect::TypeIntrospector;
    use crate::reflect::{Reflect as _, Typed, object_ref};
    use std::cell::RefCell;

    #[derive(Debug, Clone, Default, PartialEq, crate::reflect::Reflect)]
    struct Falloff {
        pub radius: f32,
    }

    #[derive(Debug, Clone, Default, PartialEq, crate::reflect::Reflect)]
    struct Lamp {
        pub intensity: f32,
        pub falloff: Falloff,
        #[inspect(read_only)]
        pub serial: String,
    }

    fn member(name: &str) -> Rc<MemberDescriptor> {
        TypeIntrospector::default()
            .members(Lamp::static_type_info())
            .into_iter()
            .find(|m| m.name() == name)
            .expect("member exists")
    }

    fn nested(name: &str) -> Rc<MemberDescriptor> {
        TypeIntrospector::default()
            .members(Falloff::static_type_info())
            .into_iter()
            .find(|m| m.name() == name)
            .expect("member exists")
    }

    #[test]
    fn empty_selection_is_rejected() {
        assert!(matches!(ValueContainer::new(Vec::new()), Err(InspectorError::EmptySelection)));
    }

    #[test]
    fn differs_reports_disagreement() {
        let a = Rc::new(RefCell::new(Lamp { intensity: 1.0, ..Default::default() }));
        let b = Rc::new(RefCell::new(Lamp { intensity: 1.0, ..Default::default() }));
        let root = ValueContainer::new(vec![Some(a.clone() as ObjectRef), Some(b.clone() as ObjectRef)])
            .expect("non-empty");
        let intensity = root.child(member("intensity"));
        assert_eq!(intensity.has_different_values(), Ok(false));

        b.borrow_mut().intensity = 2.0;
        assert_eq!(intensity.has_different_values(), Ok(true));
    }

    #[test]
    fn set_all_writes_every_instance() {
        let a = Rc::new(RefCell::new(Lamp::default()));
        let b = Rc::new(RefCell::new(Lamp::default()));
        let root = ValueContainer::new(vec![Some(a.clone() as ObjectRef), Some(b.clone() as ObjectRef)])
            .expect("non-empty");
        root.child(member("intensity")).set_all(Value::Float(4.0)).expect("writable");
        assert_eq!(a.borrow().intensity, 4.0);
        assert_eq!(b.borrow().intensity, 4.0);
    }

    #[test]
    fn nested_writes_reach_the_instance() {
        let a = Rc::new(RefCell::new(Lamp::default()));
        let root = ValueContainer::new(vec![Some(a.clone() as ObjectRef)]).expect("non-empty");
        let radius = root.child(member("falloff")).child(nested("radius"));
        assert_eq!(radius.path(), "falloff.radius");

        radius.set(0, Value::Float(8.0)).expect("writable");
        assert_eq!(a.borrow().falloff.radius, 8.0);
        assert_eq!(radius.get(0), Ok(Value::Float(8.0)));
    }

    #[test]
    fn read_only_members_reject_writes() {
        let root = ValueContainer::new(vec![Some(object_ref(Lamp::default()))]).expect("non-empty");
        let serial = root.child(member("serial"));
        assert_eq!(
            serial.set(0, Value::Text("x".into())),
            Err(AccessError::ReadOnly("serial".into()))
        );
    }

    #[test]
    fn borrowed_instance_reports_instead_of_panicking() {
        let a = Rc::new(RefCell::new(Lamp::default()));
        let root = ValueContainer::new(vec![Some(a.clone() as ObjectRef)]).expect("non-empty");
        let intensity = root.child(member("intensity"));
        let _guard = a.borrow_mut();
        assert_eq!(intensity.get(0), Err(AccessError::Borrowed { index: 0 }));
    }

    #[test]
    fn type_mismatch_carries_location() {
        let root = ValueContainer::new(vec![Some(object_ref(Lamp::default()))]).expect("non-empty");
        let intensity = root.child(member("intensity"));
        let err = intensity.set(0, Value::Text("bright".into())).unwrap_err();
        assert!(matches!(err, AccessError::At { index: 0, ref path, .. } if path == "intensity"));
        assert!(matches!(err.root_cause(), AccessError::TypeMismatch { expected: "f32", .. }));
    }

    #[test]
    fn root_types_are_read_without_member_access() {
        let root = ValueContainer::new(vec![Some(object_ref(Lamp::default())), None]).expect("non-empty");
        assert_eq!(root.type_at(0).map(|t| t.map(|t| t.name())), Ok(Some("Lamp")));
        assert_eq!(root.type_at(1).map(|t| t.is_none()), Ok(true));
        assert_eq!(root.has_different_types(), Ok(true));
        assert!(Lamp::default().reflect_eq(&Lamp::default()));
    }
}
