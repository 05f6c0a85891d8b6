//! Resolver configuration.

/// What `pop` does when the context stack is already empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnderflowPolicy {
    /// Log a warning and keep the active context unchanged.
    #[default]
    Ignore,
    /// Treat the unpaired pop as a compiler bug and panic.
    Abort,
}

/// Options fixed at resolver construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolverOptions {
    pub stack_underflow: UnderflowPolicy,
}

/// Environment variable that turns on [`UnderflowPolicy::Abort`].
pub const STRICT_STACK_ENV: &str = "COMPTIME_STRICT_STACK";

impl ResolverOptions {
    /// Defaults, with `COMPTIME_STRICT_STACK=1` (or `true`) selecting the
    /// aborting underflow policy.
    pub fn from_env() -> Self {
        let strict = std::env::var(STRICT_STACK_ENV).ok();
        Self::from_strict_flag(strict.as_deref())
    }

    fn from_strict_flag(value: Option<&str>) -> Self {
        let stack_underflow = match value {
            Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => UnderflowPolicy::Abort,
            _ => UnderflowPolicy::Ignore,
        };
        Self { stack_underflow }
    }
}
