// inspector_core/src/inspector/generic.rs
use crate::error::{AccessError, InspectorError};
use crate::inspector::descriptor::MemberDescriptor;
use crate::inspector::diagnostics::{Diagnostic, DiagnosticKind};
use crate::inspector::editor::{CustomEditor, EditorContext};
use crate::inspector::introspect::MemberList;
use crate::inspector::layout::LayoutBuilder;
use crate::inspector::merge::merge_member_lists;
use crate::inspector::ordering::{GroupTracker, sort_members};
use crate::inspector::resolver::{resolve_default, resolve_override};
use crate::inspector::values::ValueContainer;
use crate::reflect::TypeInfo;
use std::rc::Rc;

/// What `GenericEditor` shows for a set of values.
#[derive(Debug)]
pub enum Items {
    /// Every value is null.
    Null,
    /// Sorted members common to every value.
    Members(MemberList),
}

/// One member bound to its values and its editor.
pub struct PropertyEditor {
    member: Rc<MemberDescriptor>,
    values: ValueContainer,
    editor: Box<dyn CustomEditor>,
}

impl PropertyEditor {
    pub fn member(&self) -> &MemberDescriptor {
        &self.member
    }

    pub fn values(&self) -> &ValueContainer {
        &self.values
    }

    pub fn editor(&self) -> &dyn CustomEditor {
        self.editor.as_ref()
    }
}

/// Editor that lays out the members of the selected objects. Used for the
/// selection itself and for every nested object without a dedicated editor.
#[derive(Default)]
pub struct GenericEditor {
    children: Vec<PropertyEditor>,
}

impl GenericEditor {
    pub fn children(&self) -> &[PropertyEditor] {
        &self.children
    }

    /// Collects the members to edit: one type uses its own member list,
    /// several types use the members they have in common.
    pub fn collect_items(
        values: &ValueContainer,
        cx: &EditorContext<'_>,
    ) -> Result<Items, AccessError> {
        let mut types: Vec<&'static TypeInfo> = Vec::new();
        let mut has_null = false;
        for index in 0..values.len() {
            match values.type_at(index)? {
                Some(info) => {
                    if !types.iter().any(|t| t.type_id() == info.type_id()) {
                        types.push(info);
                    }
                }
                None => has_null = true,
            }
        }

        if types.is_empty() {
            return Ok(Items::Null);
        }
        if has_null {
            // A null has no members, so nothing is common
            return Ok(Items::Members(MemberList::new()));
        }

        let introspector = cx.introspector();
        let mut items = match types.as_slice() {
            [single] => introspector.members(*single),
            _ => merge_member_lists(types.iter().map(|t| introspector.members(*t))),
        };
        sort_members(&mut items);
        Ok(Items::Members(items))
    }

    fn spawn_properties(
        &mut self,
        layout: &mut dyn LayoutBuilder,
        values: &ValueContainer,
        items: MemberList,
        cx: &mut EditorContext<'_>,
    ) {
        let mut groups = GroupTracker::default();
        for item in items {
            let overridden = match resolve_override(cx.registry, &item) {
                Some(Ok(editor)) => Some(editor),
                Some(Err(e)) => {
                    let member = values.child(Rc::clone(&item)).path();
                    cx.diagnostics.warn(Diagnostic::from_error(DiagnosticKind::EditorResolution, member, &e));
                    continue;
                }
                None => None,
            };

            // Peek values
            let item_values = values.child(Rc::clone(&item));
            let current = match item_values.values() {
                Ok(current) => current,
                Err(e) => {
                    cx.diagnostics.warn(Diagnostic::from_error(
                        DiagnosticKind::ValueAccess,
                        item_values.path(),
                        &e,
                    ));
                    break;
                }
            };

            let mut editor = match overridden {
                Some(editor) => editor,
                None => match resolve_default(cx.registry, &item, &current) {
                    Ok(editor) => editor,
                    Err(e) => {
                        cx.diagnostics.warn(Diagnostic::from_error(
                            DiagnosticKind::EditorResolution,
                            item_values.path(),
                            &e,
                        ));
                        continue;
                    }
                },
            };

            // Decorations only for members that get a property
            groups.enter(layout, item.group());
            if let Some(height) = item.space() {
                layout.add_space(height);
            }
            if let Some(text) = item.header() {
                layout.add_header(text);
            }

            let explicit = item.editor_override().is_some();
            let body = layout.add_property(
                item.display_name(),
                &item_values,
                explicit.then_some(&*editor),
                item.tooltip(),
            );
            let initialized = cx.nested(|cx| editor.initialize(body, &item_values, cx));
            if let Err(e) = initialized {
                cx.diagnostics.warn(Diagnostic::from_error(DiagnosticKind::Editor, item_values.path(), &e));
            }

            self.children.push(PropertyEditor { member: item, values: item_values, editor });
        }
        groups.finish(layout);
    }
}

impl CustomEditor for GenericEditor {
    fn initialize(
        &mut self,
        layout: &mut dyn LayoutBuilder,
        values: &ValueContainer,
        cx: &mut EditorContext<'_>,
    ) -> Result<(), InspectorError> {
        self.deinitialize();

        if cx.depth > cx.config.max_depth {
            layout.add_label(&cx.config.depth_label);
            cx.diagnostics.warn(Diagnostic::new(
                DiagnosticKind::DepthLimit,
                values.path(),
                format!("nesting deeper than {} levels is not shown", cx.config.max_depth),
            ));
            return Ok(());
        }

        match Self::collect_items(values, cx)? {
            Items::Null => {
                layout.add_label(&cx.config.null_label);
                Ok(())
            }
            Items::Members(items) => {
                self.spawn_properties(layout, values, items, cx);
                Ok(())
            }
        }
    }

    /// Pushes current values into every child. The first failure is
    /// reported and ends the pass, later members keep their previous state.
    fn refresh(&mut self, cx: &mut EditorContext<'_>) -> Result<(), InspectorError> {
        for child in &mut self.children {
            if let Err(e) = cx.nested(|cx| child.editor.refresh(cx)) {
                log::debug!("Refresh stopped at {}", child.values.path());
                cx.diagnostics.warn(Diagnostic::from_error(
                    DiagnosticKind::ValueAccess,
                    child.values.path(),
                    &e,
                ));
                break;
            }
        }
        Ok(())
    }

    fn deinitialize(&mut self) {
        for child in &mut self.children {
            child.editor.deinitialize();
        }
        self.children.clear();
    }
}
