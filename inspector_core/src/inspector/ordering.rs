// inspector_core/src/inspector/ordering.rs
use crate::inspector::descriptor::MemberDescriptor;
use crate::inspector::introspect::MemberList;
use crate::inspector::layout::LayoutBuilder;
use std::cmp::Ordering;

/// Total order over member descriptors.
///
/// 1. Members with an explicit order come first, ascending by order.
/// 2. Grouped members come before ungrouped ones, grouped members sort by
///    group name so a group stays contiguous.
/// 3. Member name breaks the remaining ties.
///
/// Strings compare by code point, which is case-sensitive and independent
/// of the locale.
pub fn compare_members(a: &MemberDescriptor, b: &MemberDescriptor) -> Ordering {
    let by_order = match (a.order(), b.order()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    if by_order != Ordering::Equal {
        return by_order;
    }

    let by_group = match (a.group(), b.group()) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    if by_group != Ordering::Equal {
        return by_group;
    }

    a.name().cmp(b.name())
}

/// Stable sort with `compare_members`.
pub fn sort_members(items: &mut MemberList) {
    items.sort_by(|a, b| compare_members(a, b));
}

/// Opens and closes group sections while the sorted members are emitted.
///
/// Adjacent members of one group share a section. Any change of group
/// closes the open section, a later run of an earlier group name gets a
/// section of its own.
#[derive(Debug, Default)]
pub struct GroupTracker {
    current: Option<String>,
}

impl GroupTracker {
    /// Called before each member is emitted.
    pub fn enter(&mut self, layout: &mut dyn LayoutBuilder, group: Option<&str>) {
        if self.current.as_deref() == group {
            return;
        }
        if self.current.take().is_some() {
            layout.end_group();
        }
        if let Some(name) = group {
            layout.begin_group(name);
            self.current = Some(name.to_string());
        }
    }

    /// Closes the open section, if any.
    pub fn finish(&mut self, layout: &mut dyn LayoutBuilder) {
        if self.current.take().is_some() {
            layout.end_group();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::recording::RecordingLayout;
    use crate::reflect::{Attribute, MemberInfo, ValueKind, Visibility};
    use std::rc::Rc;

    fn member(name: &'static str, attributes: Vec<Attribute>) -> Rc<MemberDescriptor> {
        Rc::new(MemberDescriptor::new(
            &MemberInfo::field(name, "Car", Visibility::Public, ValueKind::Float, "f32")
                .with_attributes(attributes),
            false,
        ))
    }

    fn names(items: &MemberList) -> Vec<&'static str> {
        items.iter().map(|d| d.name()).collect()
    }

    #[test]
    fn explicit_order_always_comes_first() {
        let mut items = vec![
            member("alpha", vec![Attribute::Group("A".into())]),
            member("zulu", vec![Attribute::Order(100)]),
            member("beta", vec![]),
            member("yankee", vec![Attribute::Order(-1), Attribute::Group("Z".into())]),
        ];
        sort_members(&mut items);
        assert_eq!(names(&items), vec!["yankee", "zulu", "alpha", "beta"]);
    }

    #[test]
    fn groups_stay_together_and_names_break_ties() {
        let mut items = vec![
            member("label", vec![]),
            member("mass", vec![Attribute::Group("Physics".into())]),
            member("drag", vec![Attribute::Group("Physics".into())]),
            member("color", vec![Attribute::Group("Look".into())]),
            member("speed", vec![Attribute::Order(0)]),
        ];
        sort_members(&mut items);
        assert_eq!(names(&items), vec!["speed", "color", "drag", "mass", "label"]);
    }

    #[test]
    fn names_compare_case_sensitively() {
        let mut items = vec![member("b", vec![]), member("B", vec![]), member("a", vec![])];
        sort_members(&mut items);
        assert_eq!(names(&items), vec!["B", "a", "b"]);
    }

    #[test]
    fn sorting_is_deterministic() {
        let build = || {
            vec![
                member("speed", vec![Attribute::Order(1)]),
                member("torque", vec![Attribute::Order(1)]),
                member("mass", vec![Attribute::Group("Physics".into())]),
                member("label", vec![]),
            ]
        };
        let mut first = build();
        let mut second = build();
        sort_members(&mut first);
        sort_members(&mut second);
        sort_members(&mut second);
        assert_eq!(names(&first), names(&second));
    }

    #[test]
    fn later_run_of_a_group_opens_a_new_section() {
        let mut layout = RecordingLayout::default();
        let mut groups = GroupTracker::default();
        for group in [Some("Physics"), Some("Physics"), None, Some("Physics"), Some("Look")] {
            groups.enter(&mut layout, group);
            layout.add_header("item");
        }
        groups.finish(&mut layout);

        assert_eq!(
            layout.calls(),
            vec![
                "beginGroup(Physics)",
                "addHeader(item)",
                "addHeader(item)",
                "endGroup()",
                "addHeader(item)",
                "beginGroup(Physics)",
                "addHeader(item)",
                "endGroup()",
                "beginGroup(Look)",
                "addHeader(item)",
                "endGroup()",
            ]
        );
    }
}
