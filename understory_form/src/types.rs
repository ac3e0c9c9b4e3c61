// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the composer: render types, qualifiers, and locales.
//!
//! ## Overview
//!
//! These are the small value types that flow between the [`Composer`](crate::composer::Composer),
//! the descriptor model, and the render strategy.

use alloc::borrow::Cow;
use core::any::TypeId;
use core::fmt;

/// Widget kind selected for a member.
///
/// The composer picks [`Text`](Self::Text), [`Picklist`](Self::Picklist),
/// [`Dropdown`](Self::Dropdown), or [`Undefined`](Self::Undefined) on its own.
/// Every other value only appears when presentation metadata declares it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum RenderType {
    /// Single-line text input.
    Text,
    /// Multi-line text input.
    TextArea,
    /// Formatted text editor.
    RichText,
    /// Masked text input.
    Secret,
    /// Boolean toggle.
    Checkbox,
    /// One-of-many choice laid out inline.
    Radio,
    /// Single reference picked from a list of candidates.
    Picklist,
    /// Selection of references from a drop-down list.
    Dropdown,
    /// Two-list transfer selection.
    Shuttle,
    /// Calendar date picker.
    DatePicker,
    /// Time-of-day picker.
    TimePicker,
    /// Combined date and time picker.
    DateTimePicker,
    /// File upload.
    File,
    /// No editable widget; strategies usually render a read-only value.
    #[default]
    Undefined,
}

impl RenderType {
    /// Stable lowercase name, suitable for template lookups.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::TextArea => "text-area",
            Self::RichText => "rich-text",
            Self::Secret => "secret",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Picklist => "picklist",
            Self::Dropdown => "dropdown",
            Self::Shuttle => "shuttle",
            Self::DatePicker => "date-picker",
            Self::TimePicker => "time-picker",
            Self::DateTimePicker => "date-time-picker",
            Self::File => "file",
            Self::Undefined => "undefined",
        }
    }

    /// Returns `true` for every value except [`Undefined`](Self::Undefined).
    pub const fn is_defined(self) -> bool {
        !matches!(self, Self::Undefined)
    }
}

impl fmt::Display for RenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque tag selecting an entity variant.
///
/// A qualifier is identified by a Rust type, usually a zero-sized marker:
///
/// ```
/// use understory_form::types::Qualifier;
///
/// struct Admin;
/// struct Public;
///
/// assert_eq!(Qualifier::of::<Admin>(), Qualifier::of::<Admin>());
/// assert_ne!(Qualifier::of::<Admin>(), Qualifier::of::<Public>());
/// ```
///
/// The composer resolves the qualifier once per pass and hands the same value
/// to every variant lookup, including those made for inline relations.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Qualifier {
    id: TypeId,
    name: &'static str,
}

impl Qualifier {
    /// Qualifier tagged by the type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    /// Type name of the tag, for diagnostics.
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Type identifier of the tag.
    pub const fn type_id(self) -> TypeId {
        self.id
    }
}

impl fmt::Debug for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Qualifier").field(&self.name).finish()
    }
}

/// Language tag used to pick localized descriptions, e.g. `en`, `nl-BE`, `pt_BR`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Locale(Cow<'static, str>);

impl Locale {
    /// Wrap a language tag.
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self(tag.into())
    }

    /// The full tag as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag: everything before the first `-` or `_`.
    pub fn language(&self) -> &str {
        self.0.split(['-', '_']).next().unwrap_or_default()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    struct Admin;
    struct Public;

    #[test]
    fn qualifier_identity_follows_type() {
        let a = Qualifier::of::<Admin>();
        assert_eq!(a, Qualifier::of::<Admin>());
        assert_ne!(a, Qualifier::of::<Public>());
        assert_eq!(a.type_id(), TypeId::of::<Admin>());
        assert!(a.name().ends_with("Admin"));
    }

    #[test]
    fn locale_language_subtag() {
        assert_eq!(Locale::new("nl-BE").language(), "nl");
        assert_eq!(Locale::new("pt_BR").language(), "pt");
        assert_eq!(Locale::new("en").language(), "en");
        assert_eq!(Locale::new("").language(), "");
    }

    #[test]
    fn render_type_names() {
        assert_eq!(RenderType::default(), RenderType::Undefined);
        assert!(!RenderType::Undefined.is_defined());
        assert!(RenderType::Picklist.is_defined());
        assert_eq!(RenderType::DateTimePicker.to_string(), "date-time-picker");
    }
}
