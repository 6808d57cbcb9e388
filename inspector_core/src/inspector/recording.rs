// inspector_core/src/inspector/recording.rs
use crate::inspector::editor::CustomEditor;
use crate::inspector::layout::{FieldSpec, FieldState, LayoutBuilder, ValueControl};
use crate::inspector::values::ValueContainer;
use crate::reflect::ValueKind;
use std::cell::RefCell;
use std::rc::Rc;

/// State of a control created by `RecordingLayout`, shared with the layout.
#[derive(Debug, Clone)]
pub struct RecordedControl(Rc<RefCell<FieldState>>);

impl RecordedControl {
    pub fn state(&self) -> FieldState {
        self.0.borrow().clone()
    }
}

impl ValueControl for RecordedControl {
    fn set_state(&mut self, state: FieldState) {
        *self.0.borrow_mut() = state;
    }
}

/// One recorded layout call.
#[derive(Debug, Clone)]
pub enum LayoutEvent {
    BeginGroup(String),
    EndGroup,
    Space(f32),
    Header(String),
    Label(String),
    Property {
        name: String,
        editor: Option<String>,
        tooltip: Option<String>,
        /// Index into the property bodies.
        body: usize,
    },
    Value {
        kind: ValueKind,
        read_only: bool,
        options: &'static [&'static str],
        control: RecordedControl,
    },
}

/// Headless layout that records every call. Property bodies are recorded
/// as nested layouts.
#[derive(Debug, Default)]
pub struct RecordingLayout {
    events: Vec<LayoutEvent>,
    bodies: Vec<RecordingLayout>,
}

impl RecordingLayout {
    pub fn events(&self) -> &[LayoutEvent] {
        &self.events
    }

    /// Top-level calls in a compact form, e.g. `addProperty(Speed)`.
    pub fn calls(&self) -> Vec<String> {
        self.events
            .iter()
            .map(|e| match e {
                LayoutEvent::BeginGroup(name) => format!("beginGroup({name})"),
                LayoutEvent::EndGroup => "endGroup()".to_string(),
                LayoutEvent::Space(h) => format!("addSpace({h})"),
                LayoutEvent::Header(text) => format!("addHeader({text})"),
                LayoutEvent::Label(text) => format!("addLabel({text})"),
                LayoutEvent::Property { name, .. } => format!("addProperty({name})"),
                LayoutEvent::Value { kind, .. } => format!("addValue({kind})"),
            })
            .collect()
    }

    /// Display names of the top-level properties, in emission order.
    pub fn property_names(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                LayoutEvent::Property { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Body of the first top-level property called `name`, searching inside
    /// groups as well.
    pub fn property(&self, name: &str) -> Option<&RecordingLayout> {
        self.events.iter().find_map(|e| match e {
            LayoutEvent::Property { name: n, body, .. } if n == name => self.bodies.get(*body),
            _ => None,
        })
    }

    /// Editor override recorded for the property called `name`.
    pub fn property_editor(&self, name: &str) -> Option<&str> {
        self.events.iter().find_map(|e| match e {
            LayoutEvent::Property { name: n, editor, .. } if n == name => editor.as_deref(),
            _ => None,
        })
    }

    /// Tooltip recorded for the property called `name`.
    pub fn property_tooltip(&self, name: &str) -> Option<&str> {
        self.events.iter().find_map(|e| match e {
            LayoutEvent::Property { name: n, tooltip, .. } if n == name => tooltip.as_deref(),
            _ => None,
        })
    }

    /// The first value control recorded directly in this layout.
    pub fn control(&self) -> Option<&RecordedControl> {
        self.events.iter().find_map(|e| match e {
            LayoutEvent::Value { control, .. } => Some(control),
            _ => None,
        })
    }

    /// Follows a chain of property names and returns the control at the end.
    pub fn control_at(&self, path: &[&str]) -> Option<&RecordedControl> {
        match path.split_first() {
            Some((first, rest)) => self.property(first)?.control_at(rest),
            None => self.control(),
        }
    }
}

impl LayoutBuilder for RecordingLayout {
    fn begin_group(&mut self, name: &str) {
        self.events.push(LayoutEvent::BeginGroup(name.to_string()));
    }

    fn end_group(&mut self) {
        self.events.push(LayoutEvent::EndGroup);
    }

    fn add_space(&mut self, height: f32) {
        self.events.push(LayoutEvent::Space(height));
    }

    fn add_header(&mut self, text: &str) {
        self.events.push(LayoutEvent::Header(text.to_string()));
    }

    fn add_property(
        &mut self,
        display_name: &str,
        _values: &ValueContainer,
        editor: Option<&dyn CustomEditor>,
        tooltip: Option<&str>,
    ) -> &mut dyn LayoutBuilder {
        let body = self.bodies.len();
        self.bodies.push(RecordingLayout::default());
        self.events.push(LayoutEvent::Property {
            name: display_name.to_string(),
            editor: editor.map(|e| e.name().to_string()),
            tooltip: tooltip.map(str::to_string),
            body,
        });
        &mut self.bodies[body]
    }

    fn add_label(&mut self, text: &str) {
        self.events.push(LayoutEvent::Label(text.to_string()));
    }

    fn add_value(&mut self, field: FieldSpec) -> Box<dyn ValueControl> {
        let control = RecordedControl(Rc::new(RefCell::new(field.state)));
        self.events.push(LayoutEvent::Value {
            kind: field.kind,
            read_only: field.read_only,
            options: field.options,
            control: control.clone(),
        });
        Box::new(control)
    }
}
