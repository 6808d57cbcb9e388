// inspector_core/src/inspector/value_editor.rs
use crate::error::InspectorError;
use crate::inspector::editor::{CustomEditor, EditorContext};
use crate::inspector::layout::{FieldSpec, FieldState, LayoutBuilder, ValueControl};
use crate::inspector::values::ValueContainer;
use crate::reflect::{Value, ValueKind};

/// Built-in editor of leaf values: primitives, text, enums and arrays.
#[derive(Default)]
pub struct ValueEditor {
    values: Option<ValueContainer>,
    control: Option<Box<dyn ValueControl>>,
}

impl ValueEditor {
    /// Current state of the wrapped member across the selection.
    pub fn field_state(values: &ValueContainer) -> Result<FieldState, InspectorError> {
        let mut all = values.values()?.into_iter();
        let Some(first) = all.next() else {
            return Ok(FieldState::Value(Value::Null));
        };
        if all.any(|v| v != first) {
            Ok(FieldState::Mixed)
        } else {
            Ok(FieldState::Value(first))
        }
    }
}

impl CustomEditor for ValueEditor {
    fn initialize(
        &mut self,
        layout: &mut dyn LayoutBuilder,
        values: &ValueContainer,
        _cx: &mut EditorContext<'_>,
    ) -> Result<(), InspectorError> {
        let state = Self::field_state(values)?;
        let (kind, read_only) = match values.member() {
            Some(member) => (member.value_kind(), member.is_read_only()),
            None => (ValueKind::Object, true),
        };
        let options = match &state {
            FieldState::Value(Value::Enum(e)) => e.variants,
            _ => match values.get(0)? {
                Value::Enum(e) => e.variants,
                _ => &[],
            },
        };

        self.control = Some(layout.add_value(FieldSpec { kind, state, read_only, options }));
        self.values = Some(values.clone());
        Ok(())
    }

    fn refresh(&mut self, _cx: &mut EditorContext<'_>) -> Result<(), InspectorError> {
        let (Some(values), Some(control)) = (&self.values, &mut self.control) else {
            return Ok(());
        };
        let state = Self::field_state(values)?;
        control.set_state(state);
        Ok(())
    }

    fn deinitialize(&mut self) {
        self.control = None;
        self.values = None;
    }
}
