// inspector_core/src/inspector/descriptor.rs
use crate::error::MetadataError;
use crate::reflect::{Attribute, EditorTypeRef, MemberInfo, MemberKind, ValueKind};
use std::borrow::Cow;

/// Explicit editor override declared on a member.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOverride {
    /// A concrete editor type.
    Type(EditorTypeRef),
    /// An editor looked up by its registered name.
    Name(String),
}

/// One inspectable member plus its parsed metadata. Immutable once built.
#[derive(Debug, Clone)]
pub struct MemberDescriptor {
    info: MemberInfo,
    order: Option<i32>,
    group: Option<String>,
    display_name: String,
    tooltip: Option<String>,
    editor: Option<EditorOverride>,
    space: Option<f32>,
    header: Option<String>,
    read_only: bool,
}

impl MemberDescriptor {
    /// Parses the member metadata, logging malformed keys at debug level.
    pub fn new(info: &MemberInfo, humanize: bool) -> Self {
        let (descriptor, errors) = Self::parse(info, humanize);
        for e in errors {
            log::debug!("{e}");
        }
        descriptor
    }

    /// Parses the member metadata. The first occurrence of a key wins,
    /// malformed values are dropped and reported.
    pub fn parse(info: &MemberInfo, humanize: bool) -> (Self, Vec<MetadataError>) {
        let member = info.name();
        let mut errors = Vec::new();

        let mut order = None;
        let mut group = None;
        let mut display_name: Option<String> = None;
        let mut tooltip = None;
        let mut editor_type = None;
        let mut editor_name = None;
        let mut space = None;
        let mut header = None;
        let mut read_only = false;
        let mut seen: Vec<&'static str> = Vec::new();

        for attribute in info.attributes() {
            let key = attribute.key();
            if seen.contains(&key) {
                if !matches!(attribute, Attribute::HideInEditor | Attribute::ReadOnly) {
                    errors.push(MetadataError::Duplicate { member: member.to_string(), key });
                }
                continue;
            }
            seen.push(key);

            match attribute {
                Attribute::Order(o) => order = Some(*o),
                Attribute::Group(g) => group = non_empty(g, member, key, &mut errors),
                Attribute::DisplayName(n) => display_name = non_empty(n, member, key, &mut errors),
                Attribute::Tooltip(t) => tooltip = non_empty(t, member, key, &mut errors),
                Attribute::CustomEditor(e) => editor_type = Some(*e),
                Attribute::CustomEditorAlias(a) => editor_name = non_empty(a, member, key, &mut errors),
                Attribute::Space(h) => {
                    if h.is_finite() && *h >= 0.0 {
                        space = Some(*h);
                    } else {
                        errors.push(MetadataError::InvalidSpace { member: member.to_string(), height: *h });
                    }
                }
                Attribute::Header(h) => header = non_empty(h, member, key, &mut errors),
                Attribute::HideInEditor => {}
                Attribute::ReadOnly => read_only = true,
            }
        }

        // A type override takes precedence over a named one
        let editor = editor_type
            .map(EditorOverride::Type)
            .or(editor_name.map(EditorOverride::Name));

        let display_name = display_name.unwrap_or_else(|| {
            if humanize {
                humanize_member_name(member).into_owned()
            } else {
                member.to_string()
            }
        });

        let descriptor = Self {
            info: info.clone(),
            order,
            group,
            display_name,
            tooltip,
            editor,
            space,
            header,
            read_only,
        };
        (descriptor, errors)
    }

    /// Two descriptors describe the same member when both the declaring type
    /// and the member name match.
    pub fn can_merge(&self, other: &MemberDescriptor) -> bool {
        self.info.declaring_type() == other.info.declaring_type()
            && self.info.name() == other.info.name()
    }

    pub fn info(&self) -> &MemberInfo {
        &self.info
    }

    /// Raw member name.
    pub fn name(&self) -> &'static str {
        self.info.name()
    }

    pub fn declaring_type(&self) -> &'static str {
        self.info.declaring_type()
    }

    pub fn kind(&self) -> MemberKind {
        self.info.kind()
    }

    pub fn value_kind(&self) -> ValueKind {
        self.info.value_kind()
    }

    pub fn order(&self) -> Option<i32> {
        self.order
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    pub fn editor_override(&self) -> Option<&EditorOverride> {
        self.editor.as_ref()
    }

    pub fn space(&self) -> Option<f32> {
        self.space
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Read-only by metadata or because the member cannot be written.
    pub fn is_read_only(&self) -> bool {
        self.read_only || !self.info.is_writable()
    }
}

impl std::fmt::Display for MemberDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.info.name())
    }
}

fn non_empty(
    value: &str,
    member: &str,
    key: &'static str,
    errors: &mut Vec<MetadataError>,
) -> Option<String> {
    if value.trim().is_empty() {
        errors.push(MetadataError::Empty { member: member.to_string(), key });
        None
    } else {
        Some(value.to_string())
    }
}

/// Turns a raw member name into a label.
/// `max_speed` and `maxSpeed` both become `Max Speed`, acronyms stay
/// together (`hdrSettings` becomes `Hdr Settings`, `HDRSettings` becomes
/// `HDR Settings`).
pub fn humanize_member_name(name: &str) -> Cow<'_, str> {
    // Fast path
    if is_plain_word(name) {
        return Cow::Borrowed(name);
    }

    let chars: Vec<char> = name.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    if words.is_empty() {
        return Cow::Borrowed(name);
    }

    // Capitalise each segment and join with spaces
    let result = words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(f) => f.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    Cow::Owned(result)
}

/// Capitalised, single word, nothing to split.
fn is_plain_word(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_uppercase()) && chars.all(|c| c.is_lowercase() || c.is_ascii_digit())
}
