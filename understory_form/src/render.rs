// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render strategy interface.
//!
//! The composer decides *what* to render and with which [`RenderType`]; a
//! [`RenderFactory`] decides *how*. Every call receives the context with the
//! property path already pushed, so a strategy can derive field names or
//! binding paths from it.
//!
//! Call order within one operation is fixed:
//! `begin_operation` → parameters in declaration order → result (if any) → `end_operation`.
//!
//! The [`record`](crate::record) module has a strategy that records the calls.

use crate::descriptor::{
    CollectionDescriptor, OperationDescriptor, ParameterDescriptor, PropertyDescriptor,
    ResultDescriptor,
};
use crate::error::RenderError;
use crate::types::RenderType;

/// Callbacks invoked by the [`Composer`](crate::composer::Composer).
///
/// Returning an error aborts the pass; the composer does not retry.
pub trait RenderFactory<C> {
    /// An operation starts.
    fn begin_operation(
        &mut self,
        context: &mut C,
        operation: &dyn OperationDescriptor,
    ) -> Result<(), RenderError>;

    /// An operation ends.
    fn end_operation(
        &mut self,
        context: &mut C,
        operation: &dyn OperationDescriptor,
    ) -> Result<(), RenderError>;

    /// Render a single-valued property.
    fn render_property(
        &mut self,
        context: &mut C,
        property: &dyn PropertyDescriptor,
        render_type: RenderType,
    ) -> Result<(), RenderError>;

    /// Render a collection-valued property.
    fn render_collection_property(
        &mut self,
        context: &mut C,
        property: &dyn PropertyDescriptor,
        collection: &dyn CollectionDescriptor,
        render_type: RenderType,
    ) -> Result<(), RenderError>;

    /// Render a single-valued parameter.
    fn render_parameter(
        &mut self,
        context: &mut C,
        operation: &dyn OperationDescriptor,
        parameter: &dyn ParameterDescriptor,
        render_type: RenderType,
    ) -> Result<(), RenderError>;

    /// Render a collection-valued parameter.
    fn render_collection_parameter(
        &mut self,
        context: &mut C,
        operation: &dyn OperationDescriptor,
        parameter: &dyn ParameterDescriptor,
        collection: &dyn CollectionDescriptor,
        render_type: RenderType,
    ) -> Result<(), RenderError>;

    /// Render a single-valued operation result.
    fn render_result_type(
        &mut self,
        context: &mut C,
        operation: &dyn OperationDescriptor,
        result: &dyn ResultDescriptor,
        render_type: RenderType,
    ) -> Result<(), RenderError>;

    /// Render a collection-valued operation result.
    fn render_collection_result_type(
        &mut self,
        context: &mut C,
        operation: &dyn OperationDescriptor,
        result: &dyn ResultDescriptor,
        collection: &dyn CollectionDescriptor,
        render_type: RenderType,
    ) -> Result<(), RenderError>;
}
