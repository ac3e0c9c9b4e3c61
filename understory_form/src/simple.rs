// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain-data descriptors implementing every trait in [`descriptor`](crate::descriptor).
//!
//! ## Usage
//!
//! Describe entities with chained constructors, collect them in a
//! [`SimpleModel`], and hand the model to a [`SimpleResolver`]:
//!
//! ```
//! use understory_form::simple::{SimpleEntity, SimpleModel, SimpleProperty, SimpleResolver};
//! use understory_form::types::RenderType;
//!
//! let model = SimpleModel::new()
//!     .with(
//!         SimpleEntity::new("Person")
//!             .property(SimpleProperty::new("name", "String"))
//!             .property(SimpleProperty::new("address", "Address").inline("Address")),
//!     )
//!     .with(
//!         SimpleEntity::new("Address")
//!             .property(SimpleProperty::new("city", "String").render_as(RenderType::TextArea)),
//!     );
//! let resolver = SimpleResolver::new(model, "Person");
//! # let _ = resolver;
//! ```
//!
//! ## Capabilities
//!
//! - An entity carries presentation once [`SimpleEntity::presented`] is called,
//!   and qualifier variants once [`SimpleEntity::variant`] is called.
//! - Presentation order lists member names; listed members come first in that
//!   order, the rest follow in declaration order.
//! - An entity with variants answers an unknown qualifier with itself.
//! - Localized descriptions match the exact tag first, then the language subtag,
//!   then fall back to the neutral description.

use alloc::string::String;
use alloc::vec::Vec;

use bitflags::bitflags;

use crate::descriptor::{
    CollectionDescriptor, EntityDescriptor, Member, Model, OperationDescriptor,
    ParameterDescriptor, PresentationDescriptor, PresentationEntityDescriptor, PropertyDescriptor,
    QualifierEntityDescriptor, RelationPresentationDescriptor, ResultDescriptor, ValueDescriptor,
};
use crate::resolver::VariableResolver;
use crate::types::{Locale, Qualifier, RenderType};

bitflags! {
    /// Flags describing a simple value.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ValueFlags: u8 {
        /// Value points at another modeled entity.
        const RELATION  = 0b0000_0001;
        /// Value cannot be edited. Only meaningful for properties.
        const IMMUTABLE = 0b0000_0010;
    }
}

/// Presentation metadata for a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimplePresentation {
    /// Declared widget kind.
    pub render_type: RenderType,
    /// Whether the value is shown.
    pub visible: bool,
}

impl Default for SimplePresentation {
    fn default() -> Self {
        Self {
            render_type: RenderType::Undefined,
            visible: true,
        }
    }
}

impl PresentationDescriptor for SimplePresentation {
    fn render_type(&self) -> RenderType {
        self.render_type
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Collection shape of a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleCollection {
    /// Element type name.
    pub element_type: String,
}

impl CollectionDescriptor for SimpleCollection {
    fn element_type(&self) -> &str {
        &self.element_type
    }
}

/// Relation presentation of a property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleRelation {
    /// Render the related entity in place.
    pub inline: bool,
    /// Related entity name.
    pub related_name: String,
}

impl RelationPresentationDescriptor for SimpleRelation {
    fn is_inline(&self) -> bool {
        self.inline
    }

    fn related_name(&self) -> &str {
        &self.related_name
    }
}

#[derive(Clone, Debug)]
struct Value {
    name: String,
    value_type: String,
    flags: ValueFlags,
    presentation: Option<SimplePresentation>,
    collection: Option<SimpleCollection>,
}

impl Value {
    fn new(name: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: value_type.into(),
            flags: ValueFlags::empty(),
            presentation: None,
            collection: None,
        }
    }
}

// Shared builder methods and `ValueDescriptor` plumbing for types wrapping a `Value`.
macro_rules! value_shape {
    ($ty:ident) => {
        impl $ty {
            /// Mark the value as a relation to another entity.
            pub fn relation(mut self) -> Self {
                self.value.flags |= ValueFlags::RELATION;
                self
            }

            /// Give the value a collection shape with elements of `element_type`.
            pub fn collection_of(mut self, element_type: impl Into<String>) -> Self {
                self.value.collection = Some(SimpleCollection {
                    element_type: element_type.into(),
                });
                self
            }

            /// Attach presentation metadata declaring `render_type`.
            pub fn render_as(mut self, render_type: RenderType) -> Self {
                self.value
                    .presentation
                    .get_or_insert_with(SimplePresentation::default)
                    .render_type = render_type;
                self
            }

            /// Current flags.
            pub fn flags(&self) -> ValueFlags {
                self.value.flags
            }
        }

        impl ValueDescriptor for $ty {
            fn name(&self) -> &str {
                &self.value.name
            }

            fn value_type(&self) -> &str {
                &self.value.value_type
            }

            fn is_relation(&self) -> bool {
                self.value.flags.contains(ValueFlags::RELATION)
            }

            fn collection(&self) -> Option<&dyn CollectionDescriptor> {
                self.value
                    .collection
                    .as_ref()
                    .map(|c| c as &dyn CollectionDescriptor)
            }

            fn presentation(&self) -> Option<&dyn PresentationDescriptor> {
                self.value
                    .presentation
                    .as_ref()
                    .map(|p| p as &dyn PresentationDescriptor)
            }
        }
    };
}

/// A property.
#[derive(Clone, Debug)]
pub struct SimpleProperty {
    value: Value,
    relation: Option<SimpleRelation>,
}

value_shape!(SimpleProperty);

impl SimpleProperty {
    /// Property `name` of type `value_type`.
    pub fn new(name: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            value: Value::new(name, value_type),
            relation: None,
        }
    }

    /// Mark the property immutable.
    pub fn immutable(mut self) -> Self {
        self.value.flags |= ValueFlags::IMMUTABLE;
        self
    }

    /// Hide the property. Attaches presentation metadata if there was none.
    pub fn hidden(mut self) -> Self {
        self.value
            .presentation
            .get_or_insert_with(SimplePresentation::default)
            .visible = false;
        self
    }

    /// Relation to `related_name`, rendered inline.
    pub fn inline(self, related_name: impl Into<String>) -> Self {
        self.related_as(related_name, true)
    }

    /// Relation to `related_name` with relation presentation, not rendered inline.
    pub fn related(self, related_name: impl Into<String>) -> Self {
        self.related_as(related_name, false)
    }

    fn related_as(mut self, related_name: impl Into<String>, inline: bool) -> Self {
        self.value.flags |= ValueFlags::RELATION;
        self.relation = Some(SimpleRelation {
            inline,
            related_name: related_name.into(),
        });
        self
    }
}

impl PropertyDescriptor for SimpleProperty {
    fn is_immutable(&self) -> bool {
        self.value.flags.contains(ValueFlags::IMMUTABLE)
    }

    fn relation_presentation(&self) -> Option<&dyn RelationPresentationDescriptor> {
        self.relation
            .as_ref()
            .map(|r| r as &dyn RelationPresentationDescriptor)
    }
}

/// An operation parameter.
#[derive(Clone, Debug)]
pub struct SimpleParameter {
    index: usize,
    value: Value,
}

value_shape!(SimpleParameter);

impl SimpleParameter {
    /// Parameter `name` of type `value_type` at position `index`.
    pub fn new(index: usize, name: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            index,
            value: Value::new(name, value_type),
        }
    }
}

impl ParameterDescriptor for SimpleParameter {
    fn index(&self) -> usize {
        self.index
    }
}

/// An operation result.
#[derive(Clone, Debug)]
pub struct SimpleResult {
    value: Value,
}

value_shape!(SimpleResult);

impl SimpleResult {
    /// Result of the operation `name`, of type `value_type`.
    pub fn new(name: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            value: Value::new(name, value_type),
        }
    }
}

impl ResultDescriptor for SimpleResult {}

/// An operation.
#[derive(Clone, Debug)]
pub struct SimpleOperation {
    name: String,
    parameters: Vec<SimpleParameter>,
    result: Option<SimpleResult>,
}

impl SimpleOperation {
    /// Operation without parameters or result.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            result: None,
        }
    }

    /// Append a parameter.
    pub fn parameter(mut self, parameter: SimpleParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Set the result.
    pub fn returns(mut self, result: SimpleResult) -> Self {
        self.result = Some(result);
        self
    }
}

impl OperationDescriptor for SimpleOperation {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Vec<&dyn ParameterDescriptor> {
        self.parameters
            .iter()
            .map(|p| p as &dyn ParameterDescriptor)
            .collect()
    }

    fn result(&self) -> Option<&dyn ResultDescriptor> {
        self.result.as_ref().map(|r| r as &dyn ResultDescriptor)
    }
}

#[derive(Clone, Debug)]
enum SimpleMember {
    Property(SimpleProperty),
    Operation(SimpleOperation),
    Computed(String),
}

#[derive(Clone, Debug, Default)]
struct EntityPresentation {
    description: Option<String>,
    translations: Vec<(Locale, String)>,
    order: Vec<String>,
}

/// An entity.
#[derive(Clone, Debug)]
pub struct SimpleEntity {
    name: String,
    members: Vec<SimpleMember>,
    presentation: Option<EntityPresentation>,
    variants: Vec<(Qualifier, SimpleEntity)>,
}

impl SimpleEntity {
    /// Entity `name` without members.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            presentation: None,
            variants: Vec::new(),
        }
    }

    /// Append a property.
    pub fn property(mut self, property: SimpleProperty) -> Self {
        self.members.push(SimpleMember::Property(property));
        self
    }

    /// Append an operation.
    pub fn operation(mut self, operation: SimpleOperation) -> Self {
        self.members.push(SimpleMember::Operation(operation));
        self
    }

    /// Append a member of a kind the composer does not render.
    pub fn computed(mut self, name: impl Into<String>) -> Self {
        self.members.push(SimpleMember::Computed(name.into()));
        self
    }

    /// Attach presentation metadata with a neutral `description`.
    ///
    /// Without this, presentation metadata added by [`translation`](Self::translation)
    /// or [`order`](Self::order) describes the entity by its name.
    pub fn presented(mut self, description: impl Into<String>) -> Self {
        self.presentation
            .get_or_insert_with(EntityPresentation::default)
            .description = Some(description.into());
        self
    }

    /// Add a localized description. Attaches presentation metadata if there was none.
    pub fn translation(mut self, locale: Locale, description: impl Into<String>) -> Self {
        self.presentation
            .get_or_insert_with(EntityPresentation::default)
            .translations
            .push((locale, description.into()));
        self
    }

    /// Set the presentation order by member name. Attaches presentation metadata if there was none.
    pub fn order<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.presentation
            .get_or_insert_with(EntityPresentation::default)
            .order = names.into_iter().map(Into::into).collect();
        self
    }

    /// Register `entity` as the variant selected by `qualifier`.
    pub fn variant(mut self, qualifier: Qualifier, entity: Self) -> Self {
        self.variants.push((qualifier, entity));
        self
    }
}

impl EntityDescriptor for SimpleEntity {
    fn name(&self) -> &str {
        &self.name
    }

    fn members(&self) -> Vec<Member<'_>> {
        self.members
            .iter()
            .map(|m| match m {
                SimpleMember::Property(p) => Member::Property(p),
                SimpleMember::Operation(o) => Member::Operation(o),
                SimpleMember::Computed(name) => Member::Other(name),
            })
            .collect()
    }

    fn presentation(&self) -> Option<&dyn PresentationEntityDescriptor> {
        self.presentation
            .as_ref()
            .map(|_| self as &dyn PresentationEntityDescriptor)
    }

    fn qualifier_variants(&self) -> Option<&dyn QualifierEntityDescriptor> {
        if self.variants.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl PresentationEntityDescriptor for SimpleEntity {
    fn ordered_members(&self) -> Vec<Member<'_>> {
        let order = self
            .presentation
            .as_ref()
            .map(|p| p.order.as_slice())
            .unwrap_or_default();
        let mut members = self.members();
        members.sort_by_key(|m| {
            order
                .iter()
                .position(|name| name == m.name())
                .unwrap_or(order.len())
        });
        members
    }

    fn description(&self) -> &str {
        self.presentation
            .as_ref()
            .and_then(|p| p.description.as_deref())
            .unwrap_or(&self.name)
    }

    fn localized_description(&self, locale: &Locale) -> &str {
        let Some(presentation) = &self.presentation else {
            return &self.name;
        };
        presentation
            .translations
            .iter()
            .find(|(l, _)| l == locale)
            .or_else(|| {
                presentation
                    .translations
                    .iter()
                    .find(|(l, _)| l.language() == locale.language())
            })
            .map(|(_, text)| text.as_str())
            .unwrap_or_else(|| self.description())
    }
}

impl QualifierEntityDescriptor for SimpleEntity {
    fn qualifier_entity(&self, qualifier: Qualifier) -> Option<&dyn EntityDescriptor> {
        let variant = self
            .variants
            .iter()
            .find(|(q, _)| *q == qualifier)
            .map_or(self, |(_, entity)| entity);
        Some(variant)
    }
}

/// A set of entities addressed by name.
#[derive(Clone, Debug, Default)]
pub struct SimpleModel {
    entities: Vec<SimpleEntity>,
}

impl SimpleModel {
    /// Empty model.
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
        }
    }

    /// Add `entity`, replacing an entity of the same name.
    pub fn with(mut self, entity: SimpleEntity) -> Self {
        self.insert(entity);
        self
    }

    /// Add `entity`, replacing an entity of the same name.
    pub fn insert(&mut self, entity: SimpleEntity) {
        match self.entities.iter_mut().find(|e| e.name == entity.name) {
            Some(slot) => *slot = entity,
            None => self.entities.push(entity),
        }
    }

    /// Entity called `name`.
    pub fn get(&self, name: &str) -> Option<&SimpleEntity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` when the model holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Model for SimpleModel {
    fn entity(&self, type_name: &str) -> Option<&dyn EntityDescriptor> {
        self.get(type_name).map(|e| e as &dyn EntityDescriptor)
    }
}

/// Resolver over a [`SimpleModel`], composing a fixed root entity.
///
/// Works with any context type; it never looks at the context.
#[derive(Clone, Debug)]
pub struct SimpleResolver {
    model: SimpleModel,
    root: String,
    locale: Option<Locale>,
    qualifier: Option<Qualifier>,
}

impl SimpleResolver {
    /// Resolve `root` in `model`, without locale or qualifier.
    pub fn new(model: SimpleModel, root: impl Into<String>) -> Self {
        Self {
            model,
            root: root.into(),
            locale: None,
            qualifier: None,
        }
    }

    /// Set the locale.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Set the qualifier.
    pub fn with_qualifier(mut self, qualifier: Qualifier) -> Self {
        self.qualifier = Some(qualifier);
        self
    }

    /// Replace the locale.
    pub fn set_locale(&mut self, locale: Option<Locale>) {
        self.locale = locale;
    }

    /// Replace the qualifier.
    pub fn set_qualifier(&mut self, qualifier: Option<Qualifier>) {
        self.qualifier = qualifier;
    }

    /// Replace the root entity name.
    pub fn set_root(&mut self, root: impl Into<String>) {
        self.root = root.into();
    }

    /// The underlying model.
    pub fn model(&self) -> &SimpleModel {
        &self.model
    }
}

impl<C> VariableResolver<C> for SimpleResolver {
    fn descriptor(&self, _context: &C) -> Option<&dyn EntityDescriptor> {
        self.model.entity(&self.root)
    }

    fn model(&self, _context: &C) -> Option<&dyn Model> {
        Some(&self.model)
    }

    fn locale(&self, _context: &C) -> Option<Locale> {
        self.locale.clone()
    }

    fn has_qualifier(&self, _context: &C) -> bool {
        self.qualifier.is_some()
    }

    fn qualifier(&self, _context: &C) -> Option<Qualifier> {
        self.qualifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    struct Admin;
    struct Guest;

    fn names(members: &[Member<'_>]) -> Vec<String> {
        members.iter().map(|m| String::from(m.name())).collect()
    }

    fn entity() -> SimpleEntity {
        SimpleEntity::new("Invoice")
            .property(SimpleProperty::new("number", "String"))
            .operation(SimpleOperation::new("pay"))
            .property(SimpleProperty::new("total", "Decimal"))
            .computed("balance")
    }

    #[test]
    fn natural_members_keep_declaration_order() {
        let e = entity();
        assert_eq!(names(&e.members()), vec!["number", "pay", "total", "balance"]);
        assert!(e.presentation().is_none());
        assert!(e.qualifier_variants().is_none());
    }

    #[test]
    fn presentation_order_puts_listed_members_first() {
        let e = entity().presented("Invoice").order(["total", "pay"]);
        let p = e.presentation().unwrap();
        assert_eq!(names(&p.ordered_members()), vec!["total", "pay", "number", "balance"]);
        assert_eq!(names(&p.ordered_properties()), vec!["total", "number"]);
    }

    #[test]
    fn localized_description_falls_back() {
        let e = SimpleEntity::new("Invoice")
            .presented("Invoice")
            .translation(Locale::new("nl"), "Factuur")
            .translation(Locale::new("fr-CA"), "Facture (CA)");
        let p = e.presentation().unwrap();
        assert_eq!(p.localized_description(&Locale::new("nl-BE")), "Factuur");
        assert_eq!(p.localized_description(&Locale::new("fr-CA")), "Facture (CA)");
        assert_eq!(p.localized_description(&Locale::new("fr")), "Facture (CA)");
        assert_eq!(p.localized_description(&Locale::new("de")), "Invoice");
        assert_eq!(p.description(), "Invoice");
    }

    #[test]
    fn description_defaults_to_name() {
        let ordered = SimpleEntity::new("Invoice")
            .property(SimpleProperty::new("number", "String"))
            .order(["number"]);
        let p = ordered.presentation().unwrap();
        assert_eq!(p.description(), "Invoice");
        assert_eq!(p.localized_description(&Locale::new("nl")), "Invoice");

        let translated = SimpleEntity::new("Invoice").translation(Locale::new("nl"), "Factuur");
        let p = translated.presentation().unwrap();
        assert_eq!(p.description(), "Invoice");
        assert_eq!(p.localized_description(&Locale::new("nl-BE")), "Factuur");
        assert_eq!(p.localized_description(&Locale::new("de")), "Invoice");
    }

    #[test]
    fn variants_fall_back_to_self() {
        let e = SimpleEntity::new("Invoice").variant(
            Qualifier::of::<Admin>(),
            SimpleEntity::new("InvoiceAdmin"),
        );
        let q = e.qualifier_variants().unwrap();
        assert_eq!(
            q.qualifier_entity(Qualifier::of::<Admin>()).map(|e| e.name()),
            Some("InvoiceAdmin")
        );
        assert_eq!(
            q.qualifier_entity(Qualifier::of::<Guest>()).map(|e| e.name()),
            Some("Invoice")
        );
    }

    #[test]
    fn property_capabilities() {
        let p = SimpleProperty::new("customer", "Customer")
            .inline("Customer")
            .immutable()
            .hidden();
        assert!(p.is_relation());
        assert!(p.is_immutable());
        assert_eq!(p.flags(), ValueFlags::RELATION | ValueFlags::IMMUTABLE);
        assert!(!p.presentation().unwrap().is_visible());
        let relation = p.relation_presentation().unwrap();
        assert!(relation.is_inline());
        assert_eq!(relation.related_name(), "Customer");

        let plain = SimpleProperty::new("note", "String");
        assert!(plain.presentation().is_none());
        assert!(plain.collection().is_none());
        assert!(plain.relation_presentation().is_none());
    }

    #[test]
    fn model_replaces_by_name() {
        let mut model = SimpleModel::new()
            .with(SimpleEntity::new("A"))
            .with(SimpleEntity::new("B"));
        model.insert(SimpleEntity::new("A").presented("Replaced"));
        assert_eq!(model.len(), 2);
        assert!(model.entity("A").unwrap().presentation().is_some());
        assert!(model.entity("C").is_none());
    }
}
