//! Compile-time type resolver.
//!
//! Answers "what type does this expression have right now?" for expressions
//! whose type depends on the enclosing compile-time loops or on types the
//! host recorded during traversal, rather than on static typing alone.
//!
//! - `resolve` - the two entry points, `get_type` and `get_type_or_default`
//! - `selectors` - predicates and companion routines for comptime selectors
//! - `scope` - RAII guard pairing context pushes with pops

mod resolve;
mod scope;
mod selectors;


pub use scope::ComptimeScope;

use crate::context::{ComptimeContext, ComptimeLoop};
use crate::context_stack::ContextStack;
use crate::host::GenericHost;
use crate::options::{ResolverOptions, UnderflowPolicy};
use crate::table::TypeTable;
use crate::type_map::DynamicTypeMap;

/// Resolver state for one compilation run (or one concurrent traversal
/// unit; only the table may be shared between units).
pub struct TypeResolver<'a> {
    table: &'a dyn TypeTable,
    host: &'a dyn GenericHost,
    /// Active context
    info: ComptimeContext,
    /// Contexts of the enclosing loops
    stack: ContextStack,
    type_map: DynamicTypeMap,
    options: ResolverOptions,
    loop_counter: u32,
}

impl<'a> TypeResolver<'a> {
    pub fn new(table: &'a dyn TypeTable, host: &'a dyn GenericHost) -> Self {
        Self::builder(table, host).build()
    }

    pub fn builder(table: &'a dyn TypeTable, host: &'a dyn GenericHost) -> TypeResolverBuilder<'a> {
        TypeResolverBuilder {
            table,
            host,
            options: ResolverOptions::default(),
        }
    }

    pub fn table(&self) -> &'a dyn TypeTable {
        self.table
    }

    pub fn host(&self) -> &'a dyn GenericHost {
        self.host
    }

    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    /// The active compile-time context.
    pub fn info(&self) -> &ComptimeContext {
        &self.info
    }

    /// Mutable access for hosts that set loop bindings by hand after `push`.
    pub fn info_mut(&mut self) -> &mut ComptimeContext {
        &mut self.info
    }

    pub fn type_map(&self) -> &DynamicTypeMap {
        &self.type_map
    }

    pub fn type_map_mut(&mut self) -> &mut DynamicTypeMap {
        &mut self.type_map
    }

    /// Number of saved enclosing contexts.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Save the active context before entering a nested compile-time loop.
    pub fn push(&mut self) {
        self.stack.push(&self.info);
        tracing::debug!(depth = self.stack.depth(), "push comptime context");
    }

    /// Restore the context saved by the matching `push`.
    ///
    /// An unpaired pop is a caller bug; see [`UnderflowPolicy`].
    pub fn pop(&mut self) {
        match self.stack.pop() {
            Some(saved) => {
                self.info = saved;
                tracing::debug!(depth = self.stack.depth(), "pop comptime context");
            }
            None => match self.options.stack_underflow {
                UnderflowPolicy::Ignore => {
                    tracing::warn!("pop on empty comptime context stack ignored");
                }
                UnderflowPolicy::Abort => {
                    panic!("comptime context stack underflow: pop without matching push")
                }
            },
        }
    }

    /// Fresh loop id; ids start at 1 so 0 means "no loop". Wraps back to 1.
    pub fn next_loop_id(&mut self) -> u32 {
        self.loop_counter = self.loop_counter.wrapping_add(1).max(1);
        self.loop_counter
    }

    /// Enter a compile-time loop. The returned guard derefs to the resolver
    /// and restores the enclosing context when dropped.
    pub fn enter_loop(&mut self, comptime_loop: ComptimeLoop) -> ComptimeScope<'_, 'a> {
        ComptimeScope::enter(self, comptime_loop)
    }

    /// Closure form of [`enter_loop`](Self::enter_loop).
    pub fn with_loop<R>(
        &mut self,
        comptime_loop: ComptimeLoop,
        body: impl FnOnce(&mut TypeResolver<'a>) -> R,
    ) -> R {
        let mut scope = self.enter_loop(comptime_loop);
        body(&mut *scope)
    }

    fn file_name(&self) -> String {
        self.host.current_file().display().to_string()
    }
}

/// Builder for [`TypeResolver`] with non-default options.
pub struct TypeResolverBuilder<'a> {
    table: &'a dyn TypeTable,
    host: &'a dyn GenericHost,
    options: ResolverOptions,
}

impl<'a> TypeResolverBuilder<'a> {
    pub fn options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn stack_underflow(mut self, policy: UnderflowPolicy) -> Self {
        self.options.stack_underflow = policy;
        self
    }

    pub fn build(self) -> TypeResolver<'a> {
        TypeResolver {
            table: self.table,
            host: self.host,
            info: ComptimeContext::default(),
            stack: ContextStack::new(),
            type_map: DynamicTypeMap::new(),
            options: self.options,
            loop_counter: 0,
        }
    }
}
