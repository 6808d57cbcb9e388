// inspector_core/src/inspector/layout.rs
use crate::inspector::editor::CustomEditor;
use crate::inspector::values::ValueContainer;
use crate::reflect::{Value, ValueKind};

/// What a value control shows.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldState {
    /// Every selected instance holds this value.
    Value(Value),
    /// The selected instances disagree.
    Mixed,
}

/// Everything a host needs to create a value control.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub kind: ValueKind,
    pub state: FieldState,
    pub read_only: bool,
    /// Variant names for enum values, empty otherwise.
    pub options: &'static [&'static str],
}

/// A materialized control that a refresh pushes new state into.
pub trait ValueControl {
    fn set_state(&mut self, state: FieldState);
}

/// The layout interface the inspector emits into. Implemented by the host.
pub trait LayoutBuilder {
    /// Opens a named group section. Following calls land inside it until
    /// `end_group`.
    fn begin_group(&mut self, name: &str);

    fn end_group(&mut self);

    /// Blank vertical gap.
    fn add_space(&mut self, height: f32);

    /// Section header text.
    fn add_header(&mut self, text: &str);

    /// Adds a labelled property and returns the layout its editor fills.
    /// `editor` is the explicit override, `None` when the default editor is
    /// used.
    fn add_property(
        &mut self,
        display_name: &str,
        values: &ValueContainer,
        editor: Option<&dyn CustomEditor>,
        tooltip: Option<&str>,
    ) -> &mut dyn LayoutBuilder;

    /// Plain text, used for the null placeholder.
    fn add_label(&mut self, text: &str);

    /// Creates the control of a leaf value.
    fn add_value(&mut self, field: FieldSpec) -> Box<dyn ValueControl>;
}
