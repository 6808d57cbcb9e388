// inspector_core/src/reflect/type_info.rs
use crate::reflect::value::ValueKind;
use std::any::TypeId;

/// Whether a member is field-like or property-like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum MemberKind {
    Field,
    Property,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
}

/// Reference to a concrete editor type, resolved through the editor registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorTypeRef {
    type_name: &'static str,
    type_id: TypeId,
}

impl EditorTypeRef {
    pub fn of<T: 'static>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}

/// Raw declarative annotation attached to a member.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Order(i32),
    Group(String),
    DisplayName(String),
    Tooltip(String),
    CustomEditor(EditorTypeRef),
    CustomEditorAlias(String),
    Space(f32),
    Header(String),
    HideInEditor,
    ReadOnly,
}

impl Attribute {
    /// Key name, as written in `#[inspect(...)]`.
    pub fn key(&self) -> &'static str {
        match self {
            Attribute::Order(_) => "order",
            Attribute::Group(_) => "group",
            Attribute::DisplayName(_) => "display_name",
            Attribute::Tooltip(_) => "tooltip",
            Attribute::CustomEditor(_) => "editor",
            Attribute::CustomEditorAlias(_) => "editor_alias",
            Attribute::Space(_) => "space",
            Attribute::Header(_) => "header",
            Attribute::HideInEditor => "hide",
            Attribute::ReadOnly => "read_only",
        }
    }
}

/// Shape of one reflected member.
#[derive(Debug, Clone)]
pub struct MemberInfo {
    name: &'static str,
    declaring_type: &'static str,
    kind: MemberKind,
    /// Visibility of the read accessor, `None` when there is none.
    read: Option<Visibility>,
    /// Visibility of the write accessor, `None` when there is none.
    write: Option<Visibility>,
    index_params: usize,
    value_kind: ValueKind,
    value_type: &'static str,
    attributes: Vec<Attribute>,
}

impl MemberInfo {
    /// A field is readable and writable with its own visibility.
    pub fn field(
        name: &'static str,
        declaring_type: &'static str,
        visibility: Visibility,
        value_kind: ValueKind,
        value_type: &'static str,
    ) -> Self {
        Self {
            name,
            declaring_type,
            kind: MemberKind::Field,
            read: Some(visibility),
            write: Some(visibility),
            index_params: 0,
            value_kind,
            value_type,
            attributes: Vec::new(),
        }
    }

    /// A property starts without accessors, add them with `with_getter` and
    /// `with_setter`.
    pub fn property(
        name: &'static str,
        declaring_type: &'static str,
        value_kind: ValueKind,
        value_type: &'static str,
    ) -> Self {
        Self {
            name,
            declaring_type,
            kind: MemberKind::Property,
            read: None,
            write: None,
            index_params: 0,
            value_kind,
            value_type,
            attributes: Vec::new(),
        }
    }

    pub fn with_getter(mut self, visibility: Visibility) -> Self {
        self.read = Some(visibility);
        self
    }

    pub fn with_setter(mut self, visibility: Visibility) -> Self {
        self.write = Some(visibility);
        self
    }

    pub fn with_index_params(mut self, count: usize) -> Self {
        self.index_params = count;
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn declaring_type(&self) -> &'static str {
        self.declaring_type
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn read_visibility(&self) -> Option<Visibility> {
        self.read
    }

    pub fn write_visibility(&self) -> Option<Visibility> {
        self.write
    }

    pub fn index_params(&self) -> usize {
        self.index_params
    }

    pub fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    pub fn value_type(&self) -> &'static str {
        self.value_type
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn is_readable(&self) -> bool {
        self.read.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.write.is_some()
    }

    pub fn is_hidden(&self) -> bool {
        self.attributes.iter().any(|a| matches!(a, Attribute::HideInEditor))
    }
}

/// Metadata table of one reflected type, built once per type.
#[derive(Debug)]
pub struct TypeInfo {
    name: &'static str,
    path: &'static str,
    type_id: TypeId,
    members: Vec<MemberInfo>,
}

impl TypeInfo {
    pub fn builder<T: 'static>(name: &'static str) -> TypeInfoBuilder {
        TypeInfoBuilder {
            name,
            path: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            base: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Short type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fully qualified type path.
    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Members in declaration order, inlined base members first.
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members.iter().find(|m| m.name == name)
    }
}

pub struct TypeInfoBuilder {
    name: &'static str,
    path: &'static str,
    type_id: TypeId,
    base: Vec<MemberInfo>,
    members: Vec<MemberInfo>,
}

impl TypeInfoBuilder {
    /// Inlines the members of an embedded base type. They keep their
    /// declaring type.
    pub fn base(mut self, base: &'static TypeInfo) -> Self {
        self.base.extend(base.members().iter().cloned());
        self
    }

    pub fn member(mut self, member: MemberInfo) -> Self {
        self.members.push(member);
        self
    }

    pub fn build(self) -> TypeInfo {
        let own = self.members;
        // Own members shadow base members of the same name
        let mut members: Vec<MemberInfo> = self
            .base
            .into_iter()
            .filter(|b| !own.iter().any(|m| m.name == b.name))
            .collect();
        members.extend(own);

        TypeInfo {
            name: self.name,
            path: self.path,
            type_id: self.type_id,
            members,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Base;
    struct Derived;

    #[test]
    fn own_members_shadow_base_members() {
        let base: &'static TypeInfo = Box::leak(Box::new(
            TypeInfo::builder::<Base>("Base")
                .member(MemberInfo::field("name", "Base", Visibility::Public, ValueKind::Text, "String"))
                .member(MemberInfo::field("tag", "Base", Visibility::Public, ValueKind::Text, "String"))
                .build(),
        ));
        let derived = TypeInfo::builder::<Derived>("Derived")
            .base(base)
            .member(MemberInfo::field("tag", "Derived", Visibility::Public, ValueKind::Int, "i32"))
            .build();

        let names: Vec<_> = derived.members().iter().map(|m| (m.name(), m.declaring_type())).collect();
        assert_eq!(names, vec![("name", "Base"), ("tag", "Derived")]);
    }

    #[test]
    fn property_accessors_start_empty() {
        let member = MemberInfo::property("volume", "Audio", ValueKind::Float, "f32");
        assert!(!member.is_readable());
        assert!(!member.is_writable());
        let member = member.with_getter(Visibility::Public).with_setter(Visibility::Private);
        assert_eq!(member.write_visibility(), Some(Visibility::Private));
    }
}
