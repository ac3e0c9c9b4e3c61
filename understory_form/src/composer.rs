// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composer implementation.
//!
//! ## Overview
//!
//! Walks an entity's members depth-first and dispatches one render call per
//! property, parameter, and result to a [`RenderFactory`].
//!
//! ## Traversal
//!
//! - The qualifier is resolved once per pass and reused for every variant lookup,
//!   including those for inline relations.
//! - Members come from the entity's presentation order when it has one, else from
//!   its natural order.
//! - `compose(false)` skips the root's operations. Inline entities always expose
//!   operations as well as properties.
//! - Each property is pushed onto the context for the duration of its handling;
//!   inline descent pushes it again around the nested members.
//!
//! ## Property Rendering
//!
//! - Hidden properties get no render call, but an inline relation on them is still traversed.
//! - Immutable properties render as [`RenderType::Undefined`].
//! - Everything else goes through [`decide`].
//!
//! ## Failure
//!
//! Resolver gaps and strategy errors abort the pass with a [`ComposeError`]. An
//! inline relation whose entity is missing from the model is logged, skipped, and
//! listed in [`Composition::unresolved`].

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use crate::context::{Context, PrefixGuard, PropertyRef};
use crate::decision::decide;
use crate::descriptor::{EntityDescriptor, Member, OperationDescriptor, PropertyDescriptor};
use crate::error::ComposeError;
use crate::render::RenderFactory;
use crate::resolver::VariableResolver;
use crate::types::{Qualifier, RenderType};

/// Summary of one [`Composer::compose`] pass.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Composition {
    /// Properties that received a render call, inline ones included.
    pub properties: usize,
    /// Operations dispatched, inline ones included.
    pub operations: usize,
    /// Related names of inline relations whose entity was not found in the model.
    pub unresolved: Vec<String>,
}

impl Composition {
    /// Returns `true` when every inline relation was resolved.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Form composer.
///
/// ## Usage
///
/// - Construct with [`Composer::new`] from a [`Context`], a [`VariableResolver`],
///   and a [`RenderFactory`].
/// - Call [`Composer::compose`] to dispatch render calls for the resolved entity,
///   and [`Composer::label`] for its display label.
/// - After an error, replace the context with [`Composer::set_context`] before
///   composing again.
///
/// Nothing is cached between calls; the resolver is asked again every time.
pub struct Composer<C, R, F> {
    context: C,
    resolver: R,
    renderer: F,
}

impl<C: fmt::Debug, R, F> fmt::Debug for Composer<C, R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl<C, R, F> Composer<C, R, F> {
    /// Create a composer over its three collaborators.
    pub fn new(context: C, resolver: R, renderer: F) -> Self {
        Self {
            context,
            resolver,
            renderer,
        }
    }

    /// The context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Mutable access to the context.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Replace the context, returning the previous one.
    pub fn set_context(&mut self, context: C) -> C {
        core::mem::replace(&mut self.context, context)
    }

    /// The resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Mutable access to the resolver, e.g. to switch the active qualifier.
    pub fn resolver_mut(&mut self) -> &mut R {
        &mut self.resolver
    }

    /// The render strategy.
    pub fn renderer(&self) -> &F {
        &self.renderer
    }

    /// Mutable access to the render strategy.
    pub fn renderer_mut(&mut self) -> &mut F {
        &mut self.renderer
    }

    /// Take the collaborators back.
    pub fn into_parts(self) -> (C, R, F) {
        (self.context, self.resolver, self.renderer)
    }
}

impl<C: Context, R: VariableResolver<C>, F: RenderFactory<C>> Composer<C, R, F> {
    /// Run one traversal of the resolved entity and dispatch render calls.
    ///
    /// With `include_operations` unset only the root's properties are visited.
    /// Inline entities are always visited in full.
    ///
    /// Inline relations are followed without cycle detection; a model whose inline
    /// relations lead back to an entity already being composed recurses until the
    /// stack overflows. Keep inline relation graphs acyclic.
    pub fn compose(&mut self, include_operations: bool) -> Result<Composition, ComposeError> {
        let Self {
            context,
            resolver,
            renderer,
        } = self;
        let resolver: &R = resolver;
        tracing::debug!(include_operations, "composing");

        let qualifier = resolve_qualifier(resolver, context)?;
        let entity = resolve_entity(resolver, context, qualifier)?;
        let members = member_list(entity, include_operations);
        tracing::debug!(
            entity = entity.name(),
            members = members.len(),
            qualifier = qualifier.map(Qualifier::name),
            "resolved members"
        );

        let mut pass = Pass {
            resolver,
            renderer,
            qualifier,
            report: Composition::default(),
            _context: PhantomData,
        };
        pass.resolve_members(context, &members)?;
        Ok(pass.report)
    }

    /// Display label of the resolved entity.
    ///
    /// The localized description when the entity has presentation metadata and a
    /// locale is available, the neutral description when it has metadata only,
    /// and the bare entity name otherwise.
    pub fn label(&self) -> Result<String, ComposeError> {
        let qualifier = resolve_qualifier(&self.resolver, &self.context)?;
        let entity = resolve_entity(&self.resolver, &self.context, qualifier)?;
        let label: String = match entity.presentation() {
            Some(presentation) => match self.resolver.locale(&self.context) {
                Some(locale) => presentation.localized_description(&locale).into(),
                None => presentation.description().into(),
            },
            None => entity.name().into(),
        };
        tracing::debug!(label = label.as_str(), "resolved label");
        Ok(label)
    }
}

fn resolve_qualifier<C, R: VariableResolver<C>>(
    resolver: &R,
    context: &C,
) -> Result<Option<Qualifier>, ComposeError> {
    if !resolver.has_qualifier(context) {
        return Ok(None);
    }
    resolver
        .qualifier(context)
        .map(Some)
        .ok_or(ComposeError::MissingQualifier)
}

fn resolve_entity<'r, C, R: VariableResolver<C>>(
    resolver: &'r R,
    context: &C,
    qualifier: Option<Qualifier>,
) -> Result<&'r dyn EntityDescriptor, ComposeError> {
    let entity = resolver
        .descriptor(context)
        .ok_or(ComposeError::MissingDescriptor)?;
    variant_for(entity, qualifier)
}

fn variant_for(
    entity: &dyn EntityDescriptor,
    qualifier: Option<Qualifier>,
) -> Result<&dyn EntityDescriptor, ComposeError> {
    let (Some(qualifier), Some(variants)) = (qualifier, entity.qualifier_variants()) else {
        return Ok(entity);
    };
    variants
        .qualifier_entity(qualifier)
        .ok_or_else(|| ComposeError::MissingVariant {
            entity: entity.name().into(),
            qualifier: qualifier.name(),
        })
}

fn member_list(entity: &dyn EntityDescriptor, include_operations: bool) -> Vec<Member<'_>> {
    match entity.presentation() {
        Some(presentation) if include_operations => presentation.ordered_members(),
        Some(presentation) => presentation.ordered_properties(),
        None => {
            let mut members = entity.members();
            if !include_operations {
                members.retain(Member::is_property);
            }
            members
        }
    }
}

/// State of one `compose` call. The context travels separately so a
/// [`PrefixGuard`] can hold it while the pass recurses.
struct Pass<'r, C, R, F> {
    resolver: &'r R,
    renderer: &'r mut F,
    qualifier: Option<Qualifier>,
    report: Composition,
    _context: PhantomData<fn(&mut C)>,
}

impl<'r, C: Context, R: VariableResolver<C>, F: RenderFactory<C>> Pass<'r, C, R, F> {
    fn resolve_members(
        &mut self,
        context: &mut C,
        members: &[Member<'r>],
    ) -> Result<(), ComposeError> {
        for member in members {
            match *member {
                Member::Property(property) => self.render_property(context, property)?,
                Member::Operation(operation) => self.render_operation(context, operation)?,
                Member::Other(name) => {
                    tracing::trace!(member = name, "ignoring member of unsupported kind");
                }
            }
        }
        Ok(())
    }

    fn render_operation(
        &mut self,
        context: &mut C,
        operation: &'r dyn OperationDescriptor,
    ) -> Result<(), ComposeError> {
        self.renderer.begin_operation(context, operation)?;
        for parameter in operation.parameters() {
            let decision = decide(parameter);
            match decision.collection {
                Some(collection) => self.renderer.render_collection_parameter(
                    context,
                    operation,
                    parameter,
                    collection,
                    decision.render_type,
                )?,
                None => self.renderer.render_parameter(
                    context,
                    operation,
                    parameter,
                    decision.render_type,
                )?,
            }
        }
        if let Some(result) = operation.result() {
            let decision = decide(result);
            match decision.collection {
                Some(collection) => self.renderer.render_collection_result_type(
                    context,
                    operation,
                    result,
                    collection,
                    decision.render_type,
                )?,
                None => self.renderer.render_result_type(
                    context,
                    operation,
                    result,
                    decision.render_type,
                )?,
            }
        }
        self.renderer.end_operation(context, operation)?;
        self.report.operations += 1;
        Ok(())
    }

    fn render_property(
        &mut self,
        context: &mut C,
        property: &'r dyn PropertyDescriptor,
    ) -> Result<(), ComposeError> {
        let mut scope = PrefixGuard::push(context, PropertyRef::of(property));

        let visible = property.presentation().is_none_or(|p| p.is_visible());
        tracing::debug!(property = property.name(), visible, "resolved visibility");
        if visible {
            if property.is_immutable() {
                self.renderer
                    .render_property(&mut scope, property, RenderType::Undefined)?;
            } else {
                let decision = decide(property);
                match decision.collection {
                    Some(collection) => self.renderer.render_collection_property(
                        &mut scope,
                        property,
                        collection,
                        decision.render_type,
                    )?,
                    None => self.renderer.render_property(
                        &mut scope,
                        property,
                        decision.render_type,
                    )?,
                }
            }
            self.report.properties += 1;
        }

        let Some(relation) = property.relation_presentation().filter(|r| r.is_inline()) else {
            return Ok(());
        };
        let resolver = self.resolver;
        let model = resolver
            .model(&scope)
            .ok_or(ComposeError::MissingModel)?;
        match model.entity(property.value_type()) {
            Some(inner) => self.process_inline(&mut scope, property, inner),
            None => {
                tracing::warn!(
                    property = property.name(),
                    related = relation.related_name(),
                    "inline relation target not found in model; skipping"
                );
                self.report.unresolved.push(relation.related_name().into());
                Ok(())
            }
        }
    }

    fn process_inline(
        &mut self,
        context: &mut C,
        property: &'r dyn PropertyDescriptor,
        inner: &'r dyn EntityDescriptor,
    ) -> Result<(), ComposeError> {
        let inner = variant_for(inner, self.qualifier)?;
        let members = member_list(inner, true);
        tracing::debug!(
            property = property.name(),
            entity = inner.name(),
            members = members.len(),
            "descending into inline relation"
        );
        let mut scope = PrefixGuard::push(context, PropertyRef::of(property));
        self.resolve_members(&mut scope, &members)
    }
}
