// inspector_core/src/inspector/merge.rs
use crate::inspector::introspect::MemberList;

/// Reduces per-type member lists to the members valid for all of them.
///
/// Starts from the first list and keeps only the members that have a
/// counterpart with the same declaring type and name in every later list.
/// Later lists are not pulled once the result is empty, so a lazy iterator
/// skips the introspection of the remaining types.
pub fn merge_member_lists<I>(lists: I) -> MemberList
where
    I: IntoIterator<Item = MemberList>,
{
    let mut lists = lists.into_iter();
    let Some(mut merged) = lists.next() else {
        return Vec::new();
    };

    while !merged.is_empty() {
        let Some(other) = lists.next() else { break };
        merged.retain(|item| other.iter().any(|o| item.can_merge(o)));
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::descriptor::MemberDescriptor;
    use crate::reflect::{MemberInfo, ValueKind, Visibility};
    use std::cell::Cell;
    use std::rc::Rc;

    fn list(members: &[(&'static str, &'static str)]) -> MemberList {
        members
            .iter()
            .map(|&(ty, name)| {
                Rc::new(MemberDescriptor::new(
                    &MemberInfo::field(name, ty, Visibility::Public, ValueKind::Float, "f32"),
                    true,
                ))
            })
            .collect()
    }

    fn names(list: &MemberList) -> Vec<&'static str> {
        list.iter().map(|d| d.name()).collect()
    }

    #[test]
    fn single_list_is_unchanged() {
        let only = list(&[("Actor", "name"), ("Light", "range")]);
        let merged = merge_member_lists(vec![only.clone()]);
        assert_eq!(names(&merged), names(&only));
    }

    #[test]
    fn keeps_members_shared_by_declaring_type_and_name() {
        let point = list(&[("Actor", "name"), ("Actor", "enabled"), ("PointLight", "range")]);
        let spot = list(&[("Actor", "enabled"), ("Actor", "name"), ("SpotLight", "range")]);
        let merged = merge_member_lists(vec![point, spot]);
        assert_eq!(names(&merged), vec!["name", "enabled"]);
    }

    #[test]
    fn same_name_on_unrelated_types_is_dropped() {
        let a = list(&[("TypeA", "value")]);
        let b = list(&[("TypeB", "value")]);
        assert!(merge_member_lists(vec![a, b]).is_empty());
    }

    #[test]
    fn stops_pulling_lists_once_empty() {
        let pulled = Cell::new(0);
        let sources = vec![
            list(&[("TypeA", "value")]),
            list(&[("TypeB", "value")]),
            list(&[("TypeA", "value")]),
        ];
        let merged = merge_member_lists(sources.into_iter().inspect(|_| pulled.set(pulled.get() + 1)));
        assert!(merged.is_empty());
        assert_eq!(pulled.get(), 2);
    }

    #[test]
    fn no_lists_gives_empty_result() {
        assert!(merge_member_lists(Vec::<MemberList>::new()).is_empty());
    }
}
