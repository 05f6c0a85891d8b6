//! RAII guard for compile-time loop bodies.

use std::ops::{Deref, DerefMut};

use super::TypeResolver;
use crate::context::ComptimeLoop;

/// Active compile-time loop. Pops the context pushed on entry when dropped,
/// so early returns through `?` still restore the enclosing loop's bindings.
pub struct ComptimeScope<'r, 'a> {
    resolver: &'r mut TypeResolver<'a>,
}

impl<'r, 'a> ComptimeScope<'r, 'a> {
    pub(super) fn enter(resolver: &'r mut TypeResolver<'a>, comptime_loop: ComptimeLoop) -> Self {
        resolver.push();
        let loop_id = resolver.next_loop_id();
        tracing::debug!(
            category = comptime_loop.category(),
            var = comptime_loop.var(),
            loop_id,
            depth = resolver.depth(),
            "enter comptime loop"
        );
        comptime_loop.apply(resolver.info_mut(), loop_id);
        Self { resolver }
    }
}

impl<'a> Deref for ComptimeScope<'_, 'a> {
    type Target = TypeResolver<'a>;

    fn deref(&self) -> &Self::Target {
        self.resolver
    }
}

impl DerefMut for ComptimeScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.resolver
    }
}

impl Drop for ComptimeScope<'_, '_> {
    fn drop(&mut self) {
        self.resolver.pop();
    }
}
