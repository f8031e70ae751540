//! Capability checks guarding settings builders.
//!
//! The execution context is opaque to this crate: anything that can answer
//! "does the caller hold capability X" implements [`PermissionContext`].

use std::collections::BTreeSet;

use crate::catalogs::ACCESS_TV_TUNER;
use crate::error::{Result, TunerError};

/// Execution context able to verify a caller capability.
pub trait PermissionContext {
    /// Return `Ok(())` if the caller holds `capability`, or the failure that
    /// should be surfaced to the caller otherwise.
    fn check_permission(&self, capability: &str) -> Result<()>;
}

impl<T: PermissionContext + ?Sized> PermissionContext for &T {
    fn check_permission(&self, capability: &str) -> Result<()> {
        (**self).check_permission(capability)
    }
}

/// Check that `ctx` holds [`ACCESS_TV_TUNER`]. Failures are propagated unchanged.
pub fn check_tuner_permission(ctx: &impl PermissionContext) -> Result<()> {
    match ctx.check_permission(ACCESS_TV_TUNER) {
        Ok(()) => {
            tracing::debug!(capability = ACCESS_TV_TUNER, "tuner permission granted");
            Ok(())
        }
        Err(e) => {
            tracing::warn!(capability = ACCESS_TV_TUNER, error = %e, "tuner permission denied");
            Err(e)
        }
    }
}

/// A context backed by an explicit set of granted capability names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantedCapabilities {
    granted: BTreeSet<String>,
}

impl GrantedCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context holding only the tuner capability.
    pub fn tuner() -> Self {
        Self::new().grant(ACCESS_TV_TUNER)
    }

    pub fn grant(mut self, capability: impl Into<String>) -> Self {
        self.granted.insert(capability.into());
        self
    }

    pub fn contains(&self, capability: &str) -> bool {
        self.granted.contains(capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.granted.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for GrantedCapabilities {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            granted: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl PermissionContext for GrantedCapabilities {
    fn check_permission(&self, capability: &str) -> Result<()> {
        if self.contains(capability) {
            Ok(())
        } else {
            Err(TunerError::PermissionDenied {
                capability: capability.to_string(),
            })
        }
    }
}
