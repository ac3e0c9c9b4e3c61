// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Descriptor traits consumed by the composer.
//!
//! ## Overview
//!
//! A [`Model`] is a read-only graph of [`EntityDescriptor`]s. Each entity exposes
//! [`Member`]s: properties and operations. Operations expose ordered parameters
//! and an optional result. Properties, parameters, and results share the
//! [`ValueDescriptor`] shape.
//!
//! ## Capabilities
//!
//! Optional metadata is probed through capability accessors that return `None`
//! when a descriptor does not carry it:
//!
//! - [`EntityDescriptor::presentation`]: ordered members and descriptions.
//! - [`EntityDescriptor::qualifier_variants`]: entity variants keyed by [`Qualifier`].
//! - [`ValueDescriptor::presentation`]: visibility and declared [`RenderType`].
//! - [`ValueDescriptor::collection`]: collection-shaped values.
//! - [`PropertyDescriptor::relation_presentation`]: inline rendering of related entities.
//!
//! `None` selects the plain path in the [`Composer`](crate::composer::Composer); it is never an error.
//!
//! The [`simple`](crate::simple) module has plain-data implementations of every trait.

use alloc::vec::Vec;
use core::fmt;

use crate::types::{Locale, Qualifier, RenderType};

/// Registry of entities, addressed by type name.
pub trait Model {
    /// Returns the entity declared for `type_name`, if the model knows it.
    fn entity(&self, type_name: &str) -> Option<&dyn EntityDescriptor>;
}

/// One modeled type.
pub trait EntityDescriptor {
    /// Bare entity name.
    fn name(&self) -> &str;

    /// Members in their natural (declaration) order.
    fn members(&self) -> Vec<Member<'_>>;

    /// Presentation capability.
    fn presentation(&self) -> Option<&dyn PresentationEntityDescriptor> {
        None
    }

    /// Qualifier-variant capability.
    fn qualifier_variants(&self) -> Option<&dyn QualifierEntityDescriptor> {
        None
    }
}

/// A member of an entity.
#[derive(Copy, Clone)]
pub enum Member<'a> {
    /// A value-carrying property.
    Property(&'a dyn PropertyDescriptor),
    /// An invocable operation.
    Operation(&'a dyn OperationDescriptor),
    /// A member kind the composer does not render (for example a computed
    /// field exposed by a newer model). Carries the member name.
    Other(&'a str),
}

impl<'a> Member<'a> {
    /// Member name.
    pub fn name(&self) -> &'a str {
        match *self {
            Self::Property(p) => p.name(),
            Self::Operation(o) => o.name(),
            Self::Other(name) => name,
        }
    }

    /// Returns `true` for [`Member::Property`].
    pub const fn is_property(&self) -> bool {
        matches!(self, Self::Property(_))
    }

    /// Returns `true` for [`Member::Operation`].
    pub const fn is_operation(&self) -> bool {
        matches!(self, Self::Operation(_))
    }
}

impl fmt::Debug for Member<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Property(_) => "Property",
            Self::Operation(_) => "Operation",
            Self::Other(_) => "Other",
        };
        f.debug_tuple(kind).field(&self.name()).finish()
    }
}

/// Shape shared by properties, parameters, and results.
pub trait ValueDescriptor {
    /// Member name. Results usually answer with their operation's name.
    fn name(&self) -> &str;

    /// Declared type name. For relations this names the related entity in the [`Model`].
    fn value_type(&self) -> &str;

    /// Whether the value points at another modeled entity.
    fn is_relation(&self) -> bool;

    /// Collection capability.
    fn collection(&self) -> Option<&dyn CollectionDescriptor> {
        None
    }

    /// Presentation capability.
    fn presentation(&self) -> Option<&dyn PresentationDescriptor> {
        None
    }
}

/// A property of an entity.
pub trait PropertyDescriptor: ValueDescriptor {
    /// Whether the property value cannot be edited.
    fn is_immutable(&self) -> bool;

    /// Relation presentation capability.
    fn relation_presentation(&self) -> Option<&dyn RelationPresentationDescriptor> {
        None
    }
}

/// A parameter of an operation.
pub trait ParameterDescriptor: ValueDescriptor {
    /// Zero-based position in the operation signature.
    fn index(&self) -> usize;
}

/// The result of an operation.
pub trait ResultDescriptor: ValueDescriptor {}

/// An invocable operation on an entity.
pub trait OperationDescriptor {
    /// Operation name.
    fn name(&self) -> &str;

    /// Parameters in declaration order.
    fn parameters(&self) -> Vec<&dyn ParameterDescriptor>;

    /// Result, if the operation returns one.
    fn result(&self) -> Option<&dyn ResultDescriptor>;
}

/// Collection shape of a value.
pub trait CollectionDescriptor {
    /// Type name of the collection elements.
    fn element_type(&self) -> &str;
}

/// Presentation metadata for a single value.
pub trait PresentationDescriptor {
    /// Declared widget kind.
    fn render_type(&self) -> RenderType;

    /// Whether the value is shown. Only consulted for properties.
    fn is_visible(&self) -> bool {
        true
    }
}

/// Presentation metadata about a relation.
pub trait RelationPresentationDescriptor {
    /// Whether the related entity's members are rendered in place.
    fn is_inline(&self) -> bool;

    /// Name of the related entity, for diagnostics.
    fn related_name(&self) -> &str;
}

/// Presentation metadata for an entity.
pub trait PresentationEntityDescriptor {
    /// All members in presentation order.
    fn ordered_members(&self) -> Vec<Member<'_>>;

    /// Properties in presentation order.
    fn ordered_properties(&self) -> Vec<Member<'_>> {
        let mut members = self.ordered_members();
        members.retain(Member::is_property);
        members
    }

    /// Locale-neutral description.
    fn description(&self) -> &str;

    /// Description for `locale`. Falls back to [`description`](Self::description) by default.
    fn localized_description(&self, locale: &Locale) -> &str {
        let _ = locale;
        self.description()
    }
}

/// Variants of an entity keyed by qualifier.
pub trait QualifierEntityDescriptor {
    /// The variant selected by `qualifier`.
    fn qualifier_entity(&self, qualifier: Qualifier) -> Option<&dyn EntityDescriptor>;
}
