// inspector_core/src/inspector/diagnostics.rs
use std::error::Error;

/// Which pipeline step produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum DiagnosticKind {
    /// The editor for a member could not be resolved, the member is skipped.
    EditorResolution,
    /// Reading member values failed, the rest of the pass is aborted.
    ValueAccess,
    /// The nesting depth cap was reached.
    DepthLimit,
    /// An editor failed while initializing or refreshing.
    Editor,
}

/// A warning about one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Raw member name, or member path for nested members.
    pub member: String,
    pub message: String,
    /// Source chain of the error, outermost first.
    pub context: Vec<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, member: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind, member: member.into(), message: message.into(), context: Vec::new() }
    }

    /// Builds a diagnostic from an error, collecting its source chain.
    pub fn from_error(kind: DiagnosticKind, member: impl Into<String>, error: &dyn Error) -> Self {
        let mut context = Vec::new();
        let mut source = error.source();
        while let Some(e) = source {
            context.push(e.to_string());
            source = e.source();
        }
        Self { kind, member: member.into(), message: error.to_string(), context }
    }
}

/// Receives pipeline diagnostics. Passed into the inspector explicitly.
pub trait DiagnosticsSink {
    fn warn(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` facade at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn warn(&mut self, diagnostic: Diagnostic) {
        let action = match diagnostic.kind {
            DiagnosticKind::EditorResolution => "Failed to resolve the editor",
            DiagnosticKind::ValueAccess => "Failed to get object values",
            DiagnosticKind::DepthLimit => "Nesting limit reached",
            DiagnosticKind::Editor => "Editor failed",
        };
        log::warn!("{action} for item {}", diagnostic.member);
        log::warn!("{}", diagnostic.message);
        for line in &diagnostic.context {
            log::warn!("  caused by: {line}");
        }
    }
}

/// Keeps every diagnostic, for hosts that display them and for tests.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl DiagnosticsSink for CollectingSink {
    fn warn(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AccessError;

    #[test]
    fn from_error_collects_the_source_chain() {
        let err = AccessError::Borrowed { index: 2 }.at(2, "range");
        let diagnostic = Diagnostic::from_error(DiagnosticKind::ValueAccess, "range", &err);
        assert_eq!(diagnostic.message, "instance 2, member `range`");
        assert_eq!(diagnostic.context, vec!["instance 2 is already borrowed".to_string()]);
    }
}
