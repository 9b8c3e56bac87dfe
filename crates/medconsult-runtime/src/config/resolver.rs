//! Configuration resolver trait for layered overrides.
//!
//! ```text
//! ConfigLoader.load()  →  MedConsultConfig (files + env)
//!                              │
//!                              ▼
//!                     ConfigResolver.apply()   (e.g. CLI flags)
//!                              │
//!                              ▼
//!                     MedConsultConfig (final)
//! ```

use super::MedConsultConfig;

/// Trait for applying configuration overrides.
///
/// Keeps config loading (file/env) apart from per-invocation overrides
/// such as command-line flags.
pub trait ConfigResolver {
    /// Applies overrides to the given configuration.
    ///
    /// Only values the resolver actually holds should be applied, leaving
    /// the rest untouched.
    fn apply(&self, config: &mut MedConsultConfig);
}

/// No-op resolver that makes no changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpResolver;

impl ConfigResolver for NoOpResolver {
    fn apply(&self, _config: &mut MedConsultConfig) {}
}
