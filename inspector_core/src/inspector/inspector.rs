// inspector_core/src/inspector/inspector.rs
use crate::error::InspectorError;
use crate::inspector::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticsSink};
use crate::inspector::editor::{CustomEditor, EditorContext};
use crate::inspector::generic::GenericEditor;
use crate::inspector::layout::LayoutBuilder;
use crate::inspector::registry::EditorRegistry;
use crate::inspector::values::ValueContainer;
use crate::reflect::ObjectRef;
use crate::storage::inspector_config::InspectorConfig;

/// Lifecycle of an `Inspector`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum InspectorState {
    Uninitialized,
    Built,
    Refreshing,
    Disposed,
}

/// Owns the editor tree built for one selection.
pub struct Inspector {
    registry: EditorRegistry,
    config: InspectorConfig,
    root: Option<GenericEditor>,
    values: Option<ValueContainer>,
    state: InspectorState,
    generation: u64,
}

impl Inspector {
    pub fn new(registry: EditorRegistry, config: InspectorConfig) -> Self {
        Self {
            registry,
            config,
            root: None,
            values: None,
            state: InspectorState::Uninitialized,
            generation: 0,
        }
    }

    /// Builds the editor tree for `targets` and emits it into `layout`.
    /// Any previous build is released first.
    pub fn select(
        &mut self,
        targets: Vec<Option<ObjectRef>>,
        layout: &mut dyn LayoutBuilder,
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<(), InspectorError> {
        self.release();
        self.generation += 1;
        self.state = InspectorState::Uninitialized;

        let values = ValueContainer::new(targets)?;
        log::debug!("Building inspector generation {} for {} targets", self.generation, values.len());

        let mut root = GenericEditor::default();
        let mut cx = EditorContext::new(&self.registry, &self.config, sink);
        if let Err(e) = root.initialize(layout, &values, &mut cx) {
            cx.diagnostics.warn(Diagnostic::from_error(DiagnosticKind::ValueAccess, "<selection>", &e));
            return Err(e);
        }

        self.root = Some(root);
        self.values = Some(values);
        self.state = InspectorState::Built;
        Ok(())
    }

    /// Pushes the current values of the selection into the built controls.
    pub fn refresh(&mut self, sink: &mut dyn DiagnosticsSink) -> Result<(), InspectorError> {
        let root = match (self.state, self.root.as_mut()) {
            (InspectorState::Built, Some(root)) => root,
            (state, _) => return Err(InspectorError::InvalidState { operation: "refresh", state }),
        };

        self.state = InspectorState::Refreshing;
        let mut cx = EditorContext::new(&self.registry, &self.config, sink);
        let result = root.refresh(&mut cx);
        self.state = InspectorState::Built;
        result
    }

    /// Releases the editor tree and the selection.
    pub fn dispose(&mut self) -> Result<(), InspectorError> {
        match self.state {
            InspectorState::Disposed => Ok(()),
            InspectorState::Uninitialized | InspectorState::Refreshing => {
                Err(InspectorError::InvalidState { operation: "dispose", state: self.state })
            }
            InspectorState::Built => {
                self.release();
                self.state = InspectorState::Disposed;
                Ok(())
            }
        }
    }

    pub fn state(&self) -> InspectorState {
        self.state
    }

    /// Incremented by every `select`.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The selection of the current build.
    pub fn values(&self) -> Option<&ValueContainer> {
        self.values.as_ref()
    }

    pub fn root(&self) -> Option<&GenericEditor> {
        self.root.as_ref()
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    pub fn registry(&self) -> &EditorRegistry {
        &self.registry
    }

    fn release(&mut self) {
        if let Some(mut root) = self.root.take() {
            root.deinitialize();
        }
        self.values = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::diagnostics::CollectingSink;
    use crate::inspector::recording::RecordingLayout;
    use crate::reflect::object_ref;

    #[derive(Debug, Clone, Default, PartialEq, crate::reflect::Reflect)]
    struct Probe {
        pub depth: i32,
    }

    fn inspector() -> Inspector {
        Inspector::new(EditorRegistry::empty(), InspectorConfig::default())
    }

    #[test]
    fn refresh_before_select_is_rejected() {
        let mut inspector = inspector();
        let mut sink = CollectingSink::default();
        assert!(matches!(
            inspector.refresh(&mut sink),
            Err(InspectorError::InvalidState { operation: "refresh", state: InspectorState::Uninitialized })
        ));
    }

    #[test]
    fn dispose_is_idempotent() {
        let mut inspector = inspector();
        let mut sink = CollectingSink::default();
        let mut layout = RecordingLayout::default();
        inspector.select(vec![Some(object_ref(Probe::default()))], &mut layout, &mut sink).expect("built");
        assert_eq!(inspector.state(), InspectorState::Built);

        inspector.dispose().expect("disposed");
        inspector.dispose().expect("still disposed");
        assert_eq!(inspector.state(), InspectorState::Disposed);
        assert!(inspector.values().is_none());
        assert!(matches!(inspector.refresh(&mut sink), Err(InspectorError::InvalidState { .. })));
    }

    #[test]
    fn each_select_is_a_new_generation() {
        let mut inspector = inspector();
        let mut sink = CollectingSink::default();
        for expected in 1..=3 {
            let mut layout = RecordingLayout::default();
            inspector.select(vec![Some(object_ref(Probe::default()))], &mut layout, &mut sink).expect("built");
            assert_eq!(inspector.generation(), expected);
            assert_eq!(layout.property_names(), vec!["Depth".to_string()]);
        }
    }

    #[test]
    fn empty_selection_is_an_error() {
        let mut inspector = inspector();
        let mut sink = CollectingSink::default();
        let mut layout = RecordingLayout::default();
        assert!(matches!(
            inspector.select(Vec::new(), &mut layout, &mut sink),
            Err(InspectorError::EmptySelection)
        ));
        assert_eq!(inspector.state(), InspectorState::Uninitialized);
    }
}
