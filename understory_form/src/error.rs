// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by [`Composer::compose`](crate::composer::Composer::compose)
//! and [`Composer::label`](crate::composer::Composer::label).
//!
//! An unresolvable inline relation is not an error; it is logged and reported in
//! [`Composition::unresolved`](crate::composer::Composition::unresolved).

use alloc::borrow::Cow;
use alloc::string::String;

/// Failure reported by a render strategy.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct RenderError {
    message: Cow<'static, str>,
}

impl RenderError {
    /// Error carrying `message`.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message given at construction.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A composition pass was aborted.
///
/// After an error the context may hold prefixes pushed by the caller's own
/// strategy; discard it (see [`Composer::set_context`](crate::composer::Composer::set_context))
/// before composing again.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ComposeError {
    /// The resolver produced no entity descriptor.
    #[error("no entity descriptor is available for the current context")]
    MissingDescriptor,

    /// The resolver produced no model while an inline relation needed one.
    #[error("no model is available for the current context")]
    MissingModel,

    /// The resolver reported a qualifier but did not provide it.
    #[error("a qualifier was reported for the current context but none was provided")]
    MissingQualifier,

    /// An entity's qualifier capability has no variant for the active qualifier.
    #[error("entity `{entity}` has no variant for qualifier `{qualifier}`")]
    MissingVariant {
        /// Name of the entity that was asked for a variant.
        entity: String,
        /// Type name of the active qualifier.
        qualifier: &'static str,
    },

    /// The render strategy failed.
    #[error("render strategy failed: {0}")]
    Render(#[from] RenderError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_condition() {
        let err = ComposeError::MissingVariant {
            entity: "Invoice".into(),
            qualifier: "app::Admin",
        };
        assert_eq!(
            err.to_string(),
            "entity `Invoice` has no variant for qualifier `app::Admin`"
        );

        let err: ComposeError = RenderError::new("template missing").into();
        assert_eq!(err.to_string(), "render strategy failed: template missing");
    }
}
