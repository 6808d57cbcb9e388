// inspector_core/src/inspector/introspect.rs
use crate::inspector::descriptor::MemberDescriptor;
use crate::reflect::{MemberInfo, MemberKind, TypeInfo, Visibility};
use std::rc::Rc;

/// Ordered member descriptors for one type, before any merging.
pub type MemberList = Vec<Rc<MemberDescriptor>>;

/// Returns true when the member may appear in the inspector.
///
/// Fields need public access. Properties need a public getter and a public
/// setter and no index parameters. Hidden members never qualify.
pub fn is_inspectable(member: &MemberInfo) -> bool {
    if member.is_hidden() {
        return false;
    }

    match member.kind() {
        MemberKind::Field => member.read_visibility() == Some(Visibility::Public),
        MemberKind::Property => {
            member.read_visibility() == Some(Visibility::Public)
                && member.write_visibility() == Some(Visibility::Public)
                && member.index_params() == 0
        }
    }
}

/// Enumerates the inspectable members of a type.
#[derive(Debug, Clone, Copy)]
pub struct TypeIntrospector {
    humanize_names: bool,
}

impl Default for TypeIntrospector {
    fn default() -> Self {
        Self { humanize_names: true }
    }
}

impl TypeIntrospector {
    pub fn new(humanize_names: bool) -> Self {
        Self { humanize_names }
    }

    /// Builds the member list of `info`. Pure, every call parses afresh.
    pub fn members(&self, info: &'static TypeInfo) -> MemberList {
        info.members()
            .iter()
            .filter(|m| is_inspectable(m))
            .map(|m| Rc::new(MemberDescriptor::new(m, self.humanize_names)))
            .collect()
    }
}
