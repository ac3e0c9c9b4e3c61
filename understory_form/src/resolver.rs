// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Variable resolver: what the composer should compose for a given context.

use crate::descriptor::{EntityDescriptor, Model};
use crate::types::{Locale, Qualifier};

/// Exposes the caller's environment to the [`Composer`](crate::composer::Composer).
///
/// The composer asks again on every [`compose`](crate::composer::Composer::compose)
/// and [`label`](crate::composer::Composer::label) call and caches nothing.
pub trait VariableResolver<C> {
    /// Root entity to compose. `None` aborts the pass.
    fn descriptor(&self, context: &C) -> Option<&dyn EntityDescriptor>;

    /// Model used to resolve inline relations. Only consulted when an inline relation is met.
    fn model(&self, context: &C) -> Option<&dyn Model>;

    /// Locale for descriptions, if any.
    fn locale(&self, context: &C) -> Option<Locale>;

    /// Whether a qualifier is active.
    fn has_qualifier(&self, context: &C) -> bool;

    /// The active qualifier. Only consulted when [`has_qualifier`](Self::has_qualifier) is `true`.
    fn qualifier(&self, context: &C) -> Option<Qualifier>;
}
