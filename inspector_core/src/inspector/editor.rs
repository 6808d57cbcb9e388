// inspector_core/src/inspector/editor.rs
use crate::error::InspectorError;
use crate::inspector::diagnostics::DiagnosticsSink;
use crate::inspector::introspect::TypeIntrospector;
use crate::inspector::layout::LayoutBuilder;
use crate::inspector::registry::EditorRegistry;
use crate::inspector::values::ValueContainer;
use crate::reflect::short_type_name;
use crate::storage::inspector_config::InspectorConfig;

/// Everything an editor needs besides its layout and values.
pub struct EditorContext<'a> {
    pub registry: &'a EditorRegistry,
    pub config: &'a InspectorConfig,
    pub diagnostics: &'a mut dyn DiagnosticsSink,
    /// Nesting depth of the editor being run, 0 for the selection itself.
    pub depth: usize,
}

impl<'a> EditorContext<'a> {
    pub fn new(
        registry: &'a EditorRegistry,
        config: &'a InspectorConfig,
        diagnostics: &'a mut dyn DiagnosticsSink,
    ) -> Self {
        Self { registry, config, diagnostics, depth: 0 }
    }

    pub fn introspector(&self) -> TypeIntrospector {
        TypeIntrospector::new(self.config.humanize_names)
    }

    /// Runs `f` one nesting level deeper.
    pub fn nested<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

/// Every editor implements this trait, the generic one included.
pub trait CustomEditor {
    /// Name shown for explicit overrides. Uses the Rust type name by default.
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Emits the editor UI for `values` into `layout`.
    fn initialize(
        &mut self,
        layout: &mut dyn LayoutBuilder,
        values: &ValueContainer,
        cx: &mut EditorContext<'_>,
    ) -> Result<(), InspectorError>;

    /// Pushes the current values into the controls created by `initialize`.
    fn refresh(&mut self, cx: &mut EditorContext<'_>) -> Result<(), InspectorError>;

    /// Drops everything created by `initialize`.
    fn deinitialize(&mut self) {}
}
