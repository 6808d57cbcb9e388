// inspector_core/src/inspector/mod.rs
pub mod descriptor;
pub mod diagnostics;
pub mod editor;
pub mod generic;
#[allow(clippy::module_inception)]
pub mod inspector;
pub mod introspect;
pub mod layout;
pub mod merge;
pub mod ordering;
pub mod recording;
pub mod registry;
pub mod resolver;
pub mod value_editor;
pub mod values;

pub use descriptor::{EditorOverride, MemberDescriptor, humanize_member_name};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticKind, DiagnosticsSink, LogSink};
pub use editor::{CustomEditor, EditorContext};
pub use generic::{GenericEditor, Items, PropertyEditor};
pub use inspector::{Inspector, InspectorState};
pub use introspect::{MemberList, TypeIntrospector, is_inspectable};
pub use layout::{FieldSpec, FieldState, LayoutBuilder, ValueControl};
pub use merge::merge_member_lists;
pub use ordering::{GroupTracker, compare_members, sort_members};
pub use recording::{LayoutEvent, RecordedControl, RecordingLayout};
pub use registry::{CustomEditorEntry, EDITORS, EditorFactory, EditorRegistry, make_editor};
pub use resolver::{resolve_default, resolve_override};
pub use value_editor::ValueEditor;
pub use values::ValueContainer;
