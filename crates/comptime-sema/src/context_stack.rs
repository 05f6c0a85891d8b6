//! Saved compile-time contexts of the enclosing loops.

use crate::context::ComptimeContext;

/// Snapshots of enclosing contexts, innermost last.
///
/// Depth equals the current nesting depth of compile-time loops.
#[derive(Debug, Clone, Default)]
pub struct ContextStack {
    saved: Vec<ComptimeContext>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a copy of `active`.
    pub fn push(&mut self, active: &ComptimeContext) {
        self.saved.push(active.clone());
    }

    /// Most recently saved context, if any.
    pub fn pop(&mut self) -> Option<ComptimeContext> {
        self.saved.pop()
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    /// Context of the directly enclosing loop.
    pub fn top(&self) -> Option<&ComptimeContext> {
        self.saved.last()
    }
}
