// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composition context: the property path the composer is currently inside.
//!
//! ## Overview
//!
//! The composer pushes a [`PropertyRef`] when it enters a property and pops it
//! when it leaves, so render strategies can see where in the entity graph a call
//! originates. Pushes and pops are paired through [`PrefixGuard`], which pops on
//! drop. The stack is therefore balanced on every exit path, including errors
//! propagated out of a render strategy.
//!
//! [`PathContext`] is a ready-made `Vec`-backed context.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

use crate::descriptor::PropertyDescriptor;

/// Owned reference to a property, as stored on the context stack.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PropertyRef {
    name: String,
    value_type: String,
}

impl PropertyRef {
    /// Reference with the given name and declared type.
    pub fn new(name: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: value_type.into(),
        }
    }

    /// Reference to `property`.
    pub fn of<P: PropertyDescriptor + ?Sized>(property: &P) -> Self {
        Self::new(property.name(), property.value_type())
    }

    /// Property name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type name of the property.
    pub fn value_type(&self) -> &str {
        &self.value_type
    }
}

/// Mutable path stack threaded through a composition pass.
///
/// Must behave as a plain last-in, first-out stack.
pub trait Context {
    /// Enter `prefix`.
    fn push_prefix(&mut self, prefix: PropertyRef);

    /// Leave the innermost prefix, returning it. `None` when the stack is empty.
    fn pop_prefix(&mut self) -> Option<PropertyRef>;
}

/// `Vec`-backed [`Context`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PathContext {
    stack: Vec<PropertyRef>,
}

impl PathContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns `true` when no prefix is pushed.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Pushed prefixes, outermost first.
    pub fn path(&self) -> &[PropertyRef] {
        &self.stack
    }

    /// Innermost prefix, if any.
    pub fn current(&self) -> Option<&PropertyRef> {
        self.stack.last()
    }

    /// Prefix names joined with `.`, outermost first.
    pub fn dotted(&self) -> String {
        let mut out = String::new();
        for (i, prefix) in self.stack.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(prefix.name());
        }
        out
    }
}

impl Context for PathContext {
    fn push_prefix(&mut self, prefix: PropertyRef) {
        self.stack.push(prefix);
    }

    fn pop_prefix(&mut self) -> Option<PropertyRef> {
        self.stack.pop()
    }
}

/// Scoped push: the prefix is pushed on construction and popped on drop.
///
/// Dereferences to the wrapped context so nested calls can keep using it.
#[derive(Debug)]
pub struct PrefixGuard<'a, C: Context> {
    context: &'a mut C,
}

impl<'a, C: Context> PrefixGuard<'a, C> {
    /// Push `prefix` onto `context` until the guard is dropped.
    pub fn push(context: &'a mut C, prefix: PropertyRef) -> Self {
        context.push_prefix(prefix);
        Self { context }
    }
}

impl<C: Context> Deref for PrefixGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        &*self.context
    }
}

impl<C: Context> DerefMut for PrefixGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut *self.context
    }
}

impl<C: Context> Drop for PrefixGuard<'_, C> {
    fn drop(&mut self) {
        if self.context.pop_prefix().is_none() {
            tracing::warn!("prefix stack underflow; a collaborator popped a prefix it did not push");
        }
    }
}
