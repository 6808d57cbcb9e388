// inspector_core/src/inspector/registry.rs
use crate::error::EditorResolutionError;
use crate::inspector::editor::CustomEditor;
use crate::reflect::{EditorTypeRef, short_type_name};
use once_cell::sync::Lazy;
use std::any::TypeId;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Builds a fresh editor instance. Errors carry a human readable reason.
pub type EditorFactory = fn() -> Result<Box<dyn CustomEditor>, String>;

/// Every editor registered with `custom_editor!`.
pub static EDITORS: Lazy<Vec<&'static CustomEditorEntry>> = Lazy::new(|| {
    inventory::iter::<CustomEditorEntry>.into_iter().collect()
});

static GLOBAL: Lazy<EditorRegistry> = Lazy::new(EditorRegistry::from_inventory);

/// One entry per editor type.
#[derive(Debug, Clone, Copy)]
pub struct CustomEditorEntry {
    /// Name used by `editor_alias`. The short type name when `None`.
    pub alias: Option<&'static str>,
    pub editor: fn() -> EditorTypeRef,
    /// Value type this editor is the default editor for.
    pub default_for: Option<fn() -> TypeId>,
    pub factory: EditorFactory,
}

inventory::collect!(CustomEditorEntry);

impl CustomEditorEntry {
    pub fn of<T: CustomEditor + Default + 'static>() -> Self {
        Self {
            alias: None,
            editor: EditorTypeRef::of::<T>,
            default_for: None,
            factory: make_editor::<T>,
        }
    }

    pub fn with_alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn with_default_for<V: 'static>(mut self) -> Self {
        self.default_for = Some(TypeId::of::<V>);
        self
    }

    pub fn with_factory(mut self, factory: EditorFactory) -> Self {
        self.factory = factory;
        self
    }

    pub fn name(&self) -> &'static str {
        self.alias.unwrap_or_else(|| short_type_name((self.editor)().type_name()))
    }

    fn instantiate(&self) -> Result<Box<dyn CustomEditor>, EditorResolutionError> {
        let editor = self.name().to_string();
        match catch_unwind(AssertUnwindSafe(self.factory)) {
            Ok(Ok(instance)) => Ok(instance),
            Ok(Err(reason)) => Err(EditorResolutionError::Instantiation { editor, reason }),
            Err(_) => Err(EditorResolutionError::Panicked { editor }),
        }
    }
}

/// Factory used for editors that implement `Default`.
pub fn make_editor<T>() -> Result<Box<dyn CustomEditor>, String>
where
    T: CustomEditor + Default + 'static,
{
    Ok(Box::new(T::default()))
}

/// Editor lookup by type, by name and by value type.
#[derive(Debug, Clone, Default)]
pub struct EditorRegistry {
    entries: Vec<CustomEditorEntry>,
}

impl EditorRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding every editor submitted through `custom_editor!`.
    pub fn from_inventory() -> Self {
        let entries = EDITORS.iter().map(|entry| **entry).collect::<Vec<_>>();
        log::debug!("Collected {} custom editors", entries.len());
        Self { entries }
    }

    /// Shared registry built from the inventory on first use.
    pub fn global() -> &'static EditorRegistry {
        &GLOBAL
    }

    pub fn register<T: CustomEditor + Default + 'static>(&mut self) -> &mut Self {
        self.register_entry(CustomEditorEntry::of::<T>())
    }

    /// Adds an entry. A later entry with the same editor type replaces the
    /// earlier one.
    pub fn register_entry(&mut self, entry: CustomEditorEntry) -> &mut Self {
        let type_id = (entry.editor)().type_id();
        self.entries.retain(|e| (e.editor)().type_id() != type_id);
        self.entries.push(entry);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Instantiates the editor registered for the type `editor`.
    pub fn instantiate_type(
        &self,
        editor: &EditorTypeRef,
    ) -> Result<Box<dyn CustomEditor>, EditorResolutionError> {
        self.entries
            .iter()
            .find(|e| (e.editor)().type_id() == editor.type_id())
            .ok_or(EditorResolutionError::UnknownType { type_name: editor.type_name() })?
            .instantiate()
    }

    /// Instantiates the editor registered under `name`.
    pub fn instantiate_named(&self, name: &str) -> Result<Box<dyn CustomEditor>, EditorResolutionError> {
        self.entries
            .iter()
            .find(|e| e.name() == name)
            .ok_or_else(|| EditorResolutionError::UnknownName { name: name.to_string() })?
            .instantiate()
    }

    /// Instantiates the default editor for values of type `value_type`, if
    /// one is registered.
    pub fn default_for(
        &self,
        value_type: TypeId,
    ) -> Option<Result<Box<dyn CustomEditor>, EditorResolutionError>> {
        self.entries
            .iter()
            .find(|e| e.default_for.is_some_and(|target| target() == value_type))
            .map(CustomEditorEntry::instantiate)
    }
}

/// Registers a custom editor so `EditorRegistry::from_inventory` finds it.
///
/// ```ignore
/// custom_editor!(ColorEditor);
/// custom_editor!(ColorEditor, alias = "Color");
/// custom_editor!(ColorEditor, default_for = Color);
/// custom_editor!(ColorEditor, factory = make_color_editor);
/// ```
#[macro_export]
macro_rules! custom_editor {
    (@submit $entry:expr) => {
        $crate::inventory::submit! {
            $entry
        }
    };

    ($ty:ty) => {
        $crate::custom_editor!(@submit $crate::inspector::registry::CustomEditorEntry::of::<$ty>());
    };

    ($ty:ty, alias = $alias:literal) => {
        $crate::custom_editor!(@submit
            $crate::inspector::registry::CustomEditorEntry::of::<$ty>().with_alias($alias)
        );
    };

    ($ty:ty, default_for = $target:ty) => {
        $crate::custom_editor!(@submit
            $crate::inspector::registry::CustomEditorEntry::of::<$ty>().with_default_for::<$target>()
        );
    };

    ($ty:ty, alias = $alias:literal, default_for = $target:ty) => {
        $crate::custom_editor!(@submit
            $crate::inspector::registry::CustomEditorEntry::of::<$ty>()
                .with_alias($alias)
                .with_default_for::<$target>()
        );
    };

    ($ty:ty, factory = $factory:expr) => {
        $crate::custom_editor!(@submit
            $crate::inspector::registry::CustomEditorEntry::of::<$ty>().with_factory($factory)
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InspectorError;
    use crate::inspector::editor::EditorContext;
    use crate::inspector::layout::LayoutBuilder;
    use crate::inspector::values::ValueContainer;

    #[derive(Default)]
    struct SliderEditor;

    impl CustomEditor for SliderEditor {
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

    #[derive(Default)]
    struct BrokenEditor;

    impl CustomEditor for BrokenEditor {
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

    fn failing_factory() -> Result<Box<dyn CustomEditor>, String> {
        Err("missing texture".to_string())
    }

    fn panicking_factory() -> Result<Box<dyn CustomEditor>, String> {
        panic!("constructor blew up")
    }

    #[test]
    fn lookup_by_type_and_by_name() {
        let mut registry = EditorRegistry::empty();
        registry.register::<SliderEditor>();

        let by_type = registry.instantiate_type(&EditorTypeRef::of::<SliderEditor>()).expect("registered");
        assert_eq!(by_type.name(), "SliderEditor");
        let by_name = registry.instantiate_named("SliderEditor").expect("registered");
        assert_eq!(by_name.name(), "SliderEditor");
    }

    #[test]
    fn aliases_replace_the_type_name() {
        let mut registry = EditorRegistry::empty();
        registry.register_entry(CustomEditorEntry::of::<SliderEditor>().with_alias("Slider"));
        assert!(registry.instantiate_named("Slider").is_ok());
        assert_eq!(
            registry.instantiate_named("SliderEditor").err(),
            Some(EditorResolutionError::UnknownName { name: "SliderEditor".into() })
        );
    }

    #[test]
    fn unknown_type_is_an_error() {
        let registry = EditorRegistry::empty();
        let err = registry.instantiate_type(&EditorTypeRef::of::<SliderEditor>()).err();
        assert!(matches!(err, Some(EditorResolutionError::UnknownType { .. })));
    }

    #[test]
    fn default_for_matches_the_value_type() {
        let mut registry = EditorRegistry::empty();
        registry.register_entry(CustomEditorEntry::of::<SliderEditor>().with_default_for::<f32>());
        assert!(matches!(registry.default_for(TypeId::of::<f32>()), Some(Ok(_))));
        assert!(registry.default_for(TypeId::of::<f64>()).is_none());
    }

    #[test]
    fn factory_failures_are_reported() {
        let mut registry = EditorRegistry::empty();
        registry.register_entry(CustomEditorEntry::of::<SliderEditor>().with_factory(failing_factory));
        registry.register_entry(CustomEditorEntry::of::<BrokenEditor>().with_factory(panicking_factory));

        assert_eq!(
            registry.instantiate_named("SliderEditor").err(),
            Some(EditorResolutionError::Instantiation {
                editor: "SliderEditor".into(),
                reason: "missing texture".into(),
            })
        );
        assert_eq!(
            registry.instantiate_named("BrokenEditor").err(),
            Some(EditorResolutionError::Panicked { editor: "BrokenEditor".into() })
        );
    }

    #[test]
    fn registering_twice_keeps_one_entry() {
        let mut registry = EditorRegistry::empty();
        registry.register::<SliderEditor>().register::<SliderEditor>();
        assert_eq!(registry.len(), 1);
    }
}
