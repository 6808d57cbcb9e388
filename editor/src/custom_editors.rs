// editor/src/custom_editors.rs
use crate::sample::Color;
use inspector_core::custom_editor;
use inspector_core::error::{AccessError, InspectorError};
use inspector_core::inspector::{
    CustomEditor,
    EditorContext,
    FieldSpec,
    FieldState,
    LayoutBuilder,
    ValueContainer,
    ValueControl,
    ValueEditor,
};
use inspector_core::reflect::{Value, ValueKind};

/// Shows a `Color` as a single hex swatch instead of three numbers.
#[derive(Default)]
pub struct ColorEditor {
    values: Option<ValueContainer>,
    swatch: Option<Box<dyn ValueControl>>,
}

custom_editor!(ColorEditor, default_for = Color);

impl ColorEditor {
    fn hex(color: &Color) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", channel(color.r), channel(color.g), channel(color.b))
    }

    fn state(values: &ValueContainer) -> Result<FieldState, InspectorError> {
        let mut swatches = Vec::with_capacity(values.len());
        for value in values.values()? {
            let color = value
                .as_object()
                .and_then(|o| o.as_any().downcast_ref::<Color>())
                .ok_or_else(|| AccessError::type_mismatch("Color", &value))?;
            swatches.push(Self::hex(color));
        }

        match swatches.split_first() {
            Some((first, rest)) if rest.iter().all(|s| s == first) => {
                Ok(FieldState::Value(Value::Text(first.clone())))
            }
            Some(_) => Ok(FieldState::Mixed),
            None => Ok(FieldState::Value(Value::Null)),
        }
    }
}

impl CustomEditor for ColorEditor {
    fn initialize(
        &mut self,
        layout: &mut dyn LayoutBuilder,
        values: &ValueContainer,
        _cx: &mut EditorContext<'_>,
    ) -> Result<(), InspectorError> {
        let state = Self::state(values)?;
        let read_only = values.member().is_some_and(|m| m.is_read_only());
        self.swatch = Some(layout.add_value(FieldSpec {
            kind: ValueKind::Text,
            state,
            read_only,
            options: &[],
        }));
        self.values = Some(values.clone());
        Ok(())
    }

    fn refresh(&mut self, _cx: &mut EditorContext<'_>) -> Result<(), InspectorError> {
        if let (Some(values), Some(swatch)) = (&self.values, &mut self.swatch) {
            swatch.set_state(Self::state(values)?);
        }
        Ok(())
    }

    fn deinitialize(&mut self) {
        self.values = None;
        self.swatch = None;
    }
}

/// Numeric field with a header showing the slider range.
#[derive(Default)]
pub struct SliderEditor {
    field: ValueEditor,
}

custom_editor!(SliderEditor, alias = "Slider");

impl CustomEditor for SliderEditor {
    fn initialize(
        &mut self,
        layout: &mut dyn LayoutBuilder,
        values: &ValueContainer,
        cx: &mut EditorContext<'_>,
    ) -> Result<(), InspectorError> {
        layout.add_label("0 ---------- 2000");
        self.field.initialize(layout, values, cx)
    }

    fn refresh(&mut self, cx: &mut EditorContext<'_>) -> Result<(), InspectorError> {
        self.field.refresh(cx)
    }

    fn deinitialize(&mut self) {
        self.field.deinitialize();
    }
}
