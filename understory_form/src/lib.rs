// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Form: a deterministic, `no_std` form composer.
//!
//! ## Overview
//!
//! This crate walks an entity's structure (properties, operations, their
//! parameters and results) and dispatches one render call per member to a
//! pluggable strategy, choosing a [`RenderType`](crate::types::RenderType) for each.
//! It does not render anything itself, hold state between passes, or validate values.
//!
//! ## Collaborators
//!
//! - A [`Context`](crate::context::Context): the property path stack. Every push is paired
//!   with a pop, on every exit path.
//! - A [`VariableResolver`](crate::resolver::VariableResolver): supplies the root
//!   [`EntityDescriptor`](crate::descriptor::EntityDescriptor), the [`Model`](crate::descriptor::Model)
//!   for inline relations, an optional [`Locale`](crate::types::Locale), and an optional
//!   [`Qualifier`](crate::types::Qualifier).
//! - A [`RenderFactory`](crate::render::RenderFactory): receives the render calls.
//!
//! Descriptors expose optional metadata (presentation, collection shape, relation
//! presentation, qualifier variants) through accessors returning `Option<&dyn _>`.
//! Missing metadata selects a defined fallback, never an error.
//!
//! ## Decisions
//!
//! Properties, parameters, and results share one decision; see [`decision`](crate::decision).
//! Immutable properties always render as `Undefined`. Hidden properties get no
//! render call, but an inline relation on them is still traversed, and inline
//! entities always expose their operations.
//!
//! ## Workflow
//!
//! 1) Describe entities, e.g. with the plain-data types in [`simple`](crate::simple).
//! 2) Compose: [`Composer::compose`](crate::composer::Composer::compose) resolves the
//!    qualifier and entity, then walks the members depth-first.
//! 3) Label: [`Composer::label`](crate::composer::Composer::label) gives the entity's
//!    display name, localized when possible.
//!
//! ```
//! use understory_form::composer::Composer;
//! use understory_form::context::PathContext;
//! use understory_form::record::{Recorder, RenderEvent};
//! use understory_form::simple::{SimpleEntity, SimpleModel, SimpleProperty, SimpleResolver};
//! use understory_form::types::RenderType;
//!
//! let model = SimpleModel::new()
//!     .with(
//!         SimpleEntity::new("Person")
//!             .presented("A person")
//!             .property(SimpleProperty::new("name", "String"))
//!             .property(SimpleProperty::new("employer", "Company").relation()),
//!     );
//! let mut composer = Composer::new(
//!     PathContext::new(),
//!     SimpleResolver::new(model, "Person"),
//!     Recorder::new(),
//! );
//!
//! let report = composer.compose(true).unwrap();
//! assert_eq!(report.properties, 2);
//! assert!(composer.context().is_empty());
//! assert!(matches!(
//!     &composer.renderer().events()[1],
//!     RenderEvent::Property { render_type: RenderType::Picklist, .. }
//! ));
//! assert_eq!(composer.label().unwrap(), "A person");
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Diagnostics go through `tracing`.

#![no_std]

extern crate alloc;

pub mod composer;
pub mod context;
pub mod decision;
pub mod descriptor;
pub mod error;
pub mod record;
pub mod render;
pub mod resolver;
pub mod simple;
pub mod types;
