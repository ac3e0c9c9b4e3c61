// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-type decision shared by properties, parameters, and results.
//!
//! ## Table
//!
//! | presentation | relation | collection | render type            | form       |
//! |--------------|----------|------------|------------------------|------------|
//! | absent       | no       | any        | [`Text`](RenderType::Text)         | single     |
//! | absent       | yes      | no         | [`Picklist`](RenderType::Picklist) | single     |
//! | absent       | yes      | yes        | [`Dropdown`](RenderType::Dropdown) | collection |
//! | present      | any      | no         | declared               | single     |
//! | present      | any      | yes        | declared               | collection |
//!
//! Immutable properties bypass this table; see
//! [`Composer::compose`](crate::composer::Composer::compose).

use core::fmt;

use crate::descriptor::{CollectionDescriptor, ValueDescriptor};
use crate::types::RenderType;

/// Outcome of [`decide`].
#[derive(Copy, Clone)]
pub struct Decision<'a> {
    /// Selected widget kind.
    pub render_type: RenderType,
    /// Collection shape when the collection form of the render call applies.
    pub collection: Option<&'a dyn CollectionDescriptor>,
}

impl Decision<'_> {
    /// Returns `true` when the collection form applies.
    pub fn is_collection(&self) -> bool {
        self.collection.is_some()
    }
}

impl fmt::Debug for Decision<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decision")
            .field("render_type", &self.render_type)
            .field("collection", &self.collection.map(|c| c.element_type()))
            .finish()
    }
}

/// Pick the render type and form for `value`.
pub fn decide<V: ValueDescriptor + ?Sized>(value: &V) -> Decision<'_> {
    let collection = value.collection();
    match value.presentation() {
        Some(presentation) => Decision {
            render_type: presentation.render_type(),
            collection,
        },
        None if value.is_relation() => Decision {
            render_type: if collection.is_some() {
                RenderType::Dropdown
            } else {
                RenderType::Picklist
            },
            collection,
        },
        // Plain values always take the single form.
        None => Decision {
            render_type: RenderType::Text,
            collection: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simple::{SimpleParameter, SimpleProperty, SimpleResult};

    #[test]
    fn plain_value_is_text() {
        let title = SimpleProperty::new("title", "String");
        let d = decide(&title);
        assert_eq!(d.render_type, RenderType::Text);
        assert!(!d.is_collection());
    }

    #[test]
    fn plain_collection_stays_single_text() {
        let tags = SimpleProperty::new("tags", "String").collection_of("String");
        let d = decide(&tags);
        assert_eq!(d.render_type, RenderType::Text);
        assert!(!d.is_collection());
    }

    #[test]
    fn relation_is_picklist() {
        let owner = SimpleParameter::new(0, "owner", "Person").relation();
        let d = decide(&owner);
        assert_eq!(d.render_type, RenderType::Picklist);
        assert!(!d.is_collection());
    }

    #[test]
    fn relation_collection_is_dropdown() {
        let found = SimpleResult::new("find", "Person")
            .relation()
            .collection_of("Person");
        let d = decide(&found);
        assert_eq!(d.render_type, RenderType::Dropdown);
        assert_eq!(d.collection.map(|c| c.element_type()), Some("Person"));
    }

    #[test]
    fn presentation_overrides_default() {
        let single = SimpleProperty::new("owner", "Person")
            .relation()
            .render_as(RenderType::Radio);
        let d = decide(&single);
        assert_eq!(d.render_type, RenderType::Radio);
        assert!(!d.is_collection());

        let many = SimpleProperty::new("labels", "String")
            .collection_of("String")
            .render_as(RenderType::Shuttle);
        let d = decide(&many);
        assert_eq!(d.render_type, RenderType::Shuttle);
        assert!(d.is_collection());
    }

    #[test]
    fn works_through_trait_objects() {
        use crate::descriptor::PropertyDescriptor;

        let property = SimpleProperty::new("owner", "Person").relation();
        let object: &dyn PropertyDescriptor = &property;
        assert_eq!(decide(object).render_type, RenderType::Picklist);
    }
}
