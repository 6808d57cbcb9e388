// inspector_core/src/inspector/resolver.rs
use crate::error::EditorResolutionError;
use crate::inspector::descriptor::{EditorOverride, MemberDescriptor};
use crate::inspector::editor::CustomEditor;
use crate::inspector::generic::GenericEditor;
use crate::inspector::registry::EditorRegistry;
use crate::inspector::value_editor::ValueEditor;
use crate::reflect::{Value, ValueKind};

/// Instantiates the explicit override of `member`. `None` when the member
/// declares no override.
pub fn resolve_override(
    registry: &EditorRegistry,
    member: &MemberDescriptor,
) -> Option<Result<Box<dyn CustomEditor>, EditorResolutionError>> {
    let editor = match member.editor_override()? {
        EditorOverride::Type(editor) => registry.instantiate_type(editor),
        EditorOverride::Name(name) => registry.instantiate_named(name),
    };
    Some(editor)
}

/// Picks the editor for a member without an override.
///
/// An editor registered as the default for the object type held by every
/// instance wins. Otherwise objects get the generic editor and everything
/// else the leaf value editor.
pub fn resolve_default(
    registry: &EditorRegistry,
    member: &MemberDescriptor,
    values: &[Value],
) -> Result<Box<dyn CustomEditor>, EditorResolutionError> {
    if let Some(type_id) = common_object_type(values) {
        if let Some(editor) = registry.default_for(type_id) {
            return editor;
        }
    }

    match member.value_kind() {
        ValueKind::Object => Ok(Box::new(GenericEditor::default())),
        _ => Ok(Box::new(ValueEditor::default())),
    }
}

/// `None` unless every value is an object of one type.
fn common_object_type(values: &[Value]) -> Option<std::any::TypeId> {
    let mut types = values.iter().map(|v| v.as_object().map(|o| o.type_info().type_id()));
    let first = types.next()??;
    types.all(|t| t == Some(first)).then_some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InspectorError;
    use crate::inspector::editor::EditorContext;
    use crate::inspector::introspect::TypeIntrospector;
    use crate::inspector::layout::LayoutBuilder;
    use crate::inspector::registry::CustomEditorEntry;
    use crate::inspector::values::ValueContainer;
    use crate::reflect::{ReflectValue, Typed};
    use std::rc::Rc;

    #[derive(Debug, Clone, Default, PartialEq, crate::reflect::Reflect)]
    struct Tint {
        pub r: f32,
        pub g: f32,
    }

    #[derive(Debug, Clone, Default, PartialEq, crate::reflect::Reflect)]
    struct Sprite {
        pub tint: Tint,
        pub opacity: f32,
        #[inspect(editor_alias = "Knob")]
        pub angle: f32,
        #[inspect(editor = TintEditor, editor_alias = "Knob")]
        pub accent: Tint,
    }

    #[derive(Default)]
    struct TintEditor;

    impl CustomEditor for TintEditor {
        fn initialize(
            &mut self,
            _layout: &mut dyn LayoutBuilder,
            _values: &ValueContainer,
            _cx: &mut EditorContext<'_>,
        ) -> Result<(), InspectorError> {
            Ok(())
        }

        fn refresh(&mut self, _cx: &mut EditorContext<'_>) -> Result<(), InspectorError> {
            Ok(())
        }
    }

    fn member(name: &str) -> Rc<MemberDescriptor> {
        TypeIntrospector::default()
            .members(Sprite::static_type_info())
            .into_iter()
            .find(|m| m.name() == name)
            .expect("member exists")
    }

    #[test]
    fn members_without_override_resolve_to_none() {
        let registry = EditorRegistry::empty();
        assert!(resolve_override(&registry, &member("opacity")).is_none());
    }

    #[test]
    fn unknown_alias_is_an_error() {
        let registry = EditorRegistry::empty();
        let err = resolve_override(&registry, &member("angle")).and_then(Result::err);
        assert_eq!(err, Some(EditorResolutionError::UnknownName { name: "Knob".into() }));
    }

    #[test]
    fn type_override_beats_alias() {
        let mut registry = EditorRegistry::empty();
        registry.register::<TintEditor>();
        let editor = resolve_override(&registry, &member("accent")).and_then(Result::ok);
        assert_eq!(editor.map(|e| e.name().to_string()), Some("TintEditor".to_string()));
    }

    #[test]
    fn defaults_follow_the_value_kind() {
        let registry = EditorRegistry::empty();
        let tint = vec![Tint::default().to_value().expect("object")];
        let editor = resolve_default(&registry, &member("tint"), &tint).expect("built-in");
        assert_eq!(editor.name(), "GenericEditor");

        let opacity = vec![Value::Float(1.0)];
        let editor = resolve_default(&registry, &member("opacity"), &opacity).expect("built-in");
        assert_eq!(editor.name(), "ValueEditor");
    }

    #[test]
    fn registered_default_for_the_object_type_wins() {
        let mut registry = EditorRegistry::empty();
        registry.register_entry(CustomEditorEntry::of::<TintEditor>().with_default_for::<Tint>());
        let tint = vec![
            Tint::default().to_value().expect("object"),
            Tint { r: 1.0, g: 0.0 }.to_value().expect("object"),
        ];
        let editor = resolve_default(&registry, &member("tint"), &tint).expect("registered");
        assert_eq!(editor.name(), "TintEditor");
    }

    #[test]
    fn null_among_objects_falls_back_to_generic() {
        let mut registry = EditorRegistry::empty();
        registry.register_entry(CustomEditorEntry::of::<TintEditor>().with_default_for::<Tint>());
        let tint = vec![Tint::default().to_value().expect("object"), Value::Null];
        let editor = resolve_default(&registry, &member("tint"), &tint).expect("built-in");
        assert_eq!(editor.name(), "GenericEditor");
    }
}
