// editor/src/console_layout.rs
use inspector_core::inspector::{
    CustomEditor,
    Diagnostic,
    DiagnosticsSink,
    FieldSpec,
    FieldState,
    LayoutBuilder,
    LogSink,
    ValueContainer,
    ValueControl,
};
use inspector_core::reflect::Value;
use std::cell::RefCell;
use std::fmt::Write;
use std::rc::Rc;

const INDENT: usize = 2;

/// Control that renders whatever state was pushed last.
#[derive(Clone)]
struct ConsoleControl(Rc<RefCell<FieldState>>);

impl ValueControl for ConsoleControl {
    fn set_state(&mut self, state: FieldState) {
        *self.0.borrow_mut() = state;
    }
}

enum Node {
    Group { name: String, children: Vec<Node> },
    Space,
    Header(String),
    Label(String),
    Property {
        name: String,
        editor: Option<String>,
        tooltip: Option<String>,
        body: usize,
    },
    Value {
        read_only: bool,
        options: &'static [&'static str],
        control: ConsoleControl,
    },
}

/// Text layout for terminals. Builds a tree while the inspector emits and
/// renders it on demand, so refreshed values show up on the next render.
#[derive(Default)]
pub struct ConsoleLayout {
    nodes: Vec<Node>,
    open_groups: Vec<(String, Vec<Node>)>,
    bodies: Vec<ConsoleLayout>,
}

impl ConsoleLayout {
    pub fn render(&self, mixed_label: &str) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0, mixed_label);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize, mixed_label: &str) {
        for node in &self.nodes {
            self.render_node(node, out, depth, mixed_label);
        }
    }

    fn render_node(&self, node: &Node, out: &mut String, depth: usize, mixed_label: &str) {
        let pad = " ".repeat(depth * INDENT);
        match node {
            Node::Group { name, children } => {
                let _ = writeln!(out, "{pad}[{name}]");
                for child in children {
                    self.render_node(child, out, depth + 1, mixed_label);
                }
            }
            Node::Space => out.push('\n'),
            Node::Header(text) => {
                let _ = writeln!(out, "{pad}-- {text} --");
            }
            Node::Label(text) => {
                let _ = writeln!(out, "{pad}{text}");
            }
            Node::Property { name, editor, tooltip, body } => {
                let _ = write!(out, "{pad}{name}");
                if let Some(editor) = editor {
                    let _ = write!(out, " <{editor}>");
                }
                if let Some(tooltip) = tooltip {
                    let _ = write!(out, "  # {tooltip}");
                }
                out.push('\n');
                if let Some(body) = self.bodies.get(*body) {
                    body.render_into(out, depth + 1, mixed_label);
                }
            }
            Node::Value { read_only, options, control } => {
                let shown = match &*control.0.borrow() {
                    FieldState::Mixed => mixed_label.to_string(),
                    FieldState::Value(value) => format_value(value),
                };
                let _ = write!(out, "{pad}= {shown}");
                if !options.is_empty() {
                    let _ = write!(out, "  ({})", options.join("|"));
                }
                if *read_only {
                    out.push_str("  (read-only)");
                }
                out.push('\n');
            }
        }
    }

    fn push(&mut self, node: Node) {
        match self.open_groups.last_mut() {
            Some((_, children)) => children.push(node),
            None => self.nodes.push(node),
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Float(v) => format!("{v:.3}"),
        other => other.to_string(),
    }
}

impl LayoutBuilder for ConsoleLayout {
    fn begin_group(&mut self, name: &str) {
        self.open_groups.push((name.to_string(), Vec::new()));
    }

    fn end_group(&mut self) {
        if let Some((name, children)) = self.open_groups.pop() {
            self.push(Node::Group { name, children });
        }
    }

    fn add_space(&mut self, _height: f32) {
        self.push(Node::Space);
    }

    fn add_header(&mut self, text: &str) {
        self.push(Node::Header(text.to_string()));
    }

    fn add_property(
        &mut self,
        display_name: &str,
        _values: &ValueContainer,
        editor: Option<&dyn CustomEditor>,
        tooltip: Option<&str>,
    ) -> &mut dyn LayoutBuilder {
        let body = self.bodies.len();
        self.bodies.push(ConsoleLayout::default());
        self.push(Node::Property {
            name: display_name.to_string(),
            editor: editor.map(|e| e.name().to_string()),
            tooltip: tooltip.map(str::to_string),
            body,
        });
        &mut self.bodies[body]
    }

    fn add_label(&mut self, text: &str) {
        self.push(Node::Label(text.to_string()));
    }

    fn add_value(&mut self, field: FieldSpec) -> Box<dyn ValueControl> {
        let control = ConsoleControl(Rc::new(RefCell::new(field.state)));
        self.push(Node::Value {
            read_only: field.read_only,
            options: field.options,
            control: control.clone(),
        });
        Box::new(control)
    }
}

/// Prints diagnostics to stderr and forwards them to the log.
#[derive(Default)]
pub struct ConsoleSink {
    log: LogSink,
    count: usize,
}

impl ConsoleSink {
    pub fn count(&self) -> usize {
        self.count
    }
}

impl DiagnosticsSink for ConsoleSink {
    fn warn(&mut self, diagnostic: Diagnostic) {
        eprintln!("warning: {} ({}): {}", diagnostic.member, diagnostic.kind, diagnostic.message);
        for line in &diagnostic.context {
            eprintln!("  caused by: {line}");
        }
        self.count += 1;
        self.log.warn(diagnostic);
    }
}
