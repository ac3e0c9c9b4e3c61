// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A render strategy that records the dispatch sequence.
//!
//! [`Recorder`] turns every [`RenderFactory`] call into a [`RenderEvent`]. Property
//! and operation events carry the dotted [`PathContext`] path at the time of the
//! call, so nesting from inline relations is visible in the sequence.
//!
//! ```
//! use understory_form::composer::Composer;
//! use understory_form::context::PathContext;
//! use understory_form::record::{Recorder, RenderEvent};
//! use understory_form::simple::{SimpleEntity, SimpleModel, SimpleProperty, SimpleResolver};
//! use understory_form::types::RenderType;
//!
//! let model = SimpleModel::new()
//!     .with(SimpleEntity::new("Note").property(SimpleProperty::new("title", "String")));
//! let mut composer = Composer::new(
//!     PathContext::new(),
//!     SimpleResolver::new(model, "Note"),
//!     Recorder::new(),
//! );
//! composer.compose(false).unwrap();
//! assert_eq!(
//!     composer.renderer().events(),
//!     &[RenderEvent::Property {
//!         path: "title".into(),
//!         name: "title".into(),
//!         render_type: RenderType::Text,
//!     }]
//! );
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::context::PathContext;
use crate::descriptor::{
    CollectionDescriptor, OperationDescriptor, ParameterDescriptor, PropertyDescriptor,
    ResultDescriptor,
};
use crate::error::RenderError;
use crate::render::RenderFactory;
use crate::types::RenderType;

/// One recorded render call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RenderEvent {
    /// `begin_operation`.
    BeginOperation {
        /// Dotted context path.
        path: String,
        /// Operation name.
        operation: String,
    },
    /// `end_operation`.
    EndOperation {
        /// Dotted context path.
        path: String,
        /// Operation name.
        operation: String,
    },
    /// `render_property`.
    Property {
        /// Dotted context path, ending with the property itself.
        path: String,
        /// Property name.
        name: String,
        /// Selected render type.
        render_type: RenderType,
    },
    /// `render_collection_property`.
    CollectionProperty {
        /// Dotted context path, ending with the property itself.
        path: String,
        /// Property name.
        name: String,
        /// Collection element type.
        element_type: String,
        /// Selected render type.
        render_type: RenderType,
    },
    /// `render_parameter`.
    Parameter {
        /// Owning operation.
        operation: String,
        /// Parameter position.
        index: usize,
        /// Parameter name.
        name: String,
        /// Selected render type.
        render_type: RenderType,
    },
    /// `render_collection_parameter`.
    CollectionParameter {
        /// Owning operation.
        operation: String,
        /// Parameter position.
        index: usize,
        /// Parameter name.
        name: String,
        /// Collection element type.
        element_type: String,
        /// Selected render type.
        render_type: RenderType,
    },
    /// `render_result_type`.
    Result {
        /// Owning operation.
        operation: String,
        /// Result name.
        name: String,
        /// Selected render type.
        render_type: RenderType,
    },
    /// `render_collection_result_type`.
    CollectionResult {
        /// Owning operation.
        operation: String,
        /// Result name.
        name: String,
        /// Collection element type.
        element_type: String,
        /// Selected render type.
        render_type: RenderType,
    },
}

impl fmt::Display for RenderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BeginOperation { path, operation } => write!(f, "begin {operation} @{path}"),
            Self::EndOperation { path, operation } => write!(f, "end {operation} @{path}"),
            Self::Property {
                path, render_type, ..
            } => write!(f, "property {path} [{render_type}]"),
            Self::CollectionProperty {
                path,
                element_type,
                render_type,
                ..
            } => write!(f, "property {path} [{render_type} of {element_type}]"),
            Self::Parameter {
                operation,
                index,
                name,
                render_type,
            } => write!(f, "  param {operation}#{index} {name} [{render_type}]"),
            Self::CollectionParameter {
                operation,
                index,
                name,
                element_type,
                render_type,
            } => write!(
                f,
                "  param {operation}#{index} {name} [{render_type} of {element_type}]"
            ),
            Self::Result {
                operation,
                render_type,
                ..
            } => write!(f, "  result {operation} [{render_type}]"),
            Self::CollectionResult {
                operation,
                element_type,
                render_type,
                ..
            } => write!(f, "  result {operation} [{render_type} of {element_type}]"),
        }
    }
}

/// [`RenderFactory`] over [`PathContext`] that records every call and never fails.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    events: Vec<RenderEvent>,
}

impl Recorder {
    /// Empty recorder.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Events recorded so far, in call order.
    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<RenderEvent> {
        core::mem::take(&mut self.events)
    }

    /// Forget the recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl RenderFactory<PathContext> for Recorder {
    fn begin_operation(
        &mut self,
        context: &mut PathContext,
        operation: &dyn OperationDescriptor,
    ) -> Result<(), RenderError> {
        self.events.push(RenderEvent::BeginOperation {
            path: context.dotted(),
            operation: operation.name().into(),
        });
        Ok(())
    }

    fn end_operation(
        &mut self,
        context: &mut PathContext,
        operation: &dyn OperationDescriptor,
    ) -> Result<(), RenderError> {
        self.events.push(RenderEvent::EndOperation {
            path: context.dotted(),
            operation: operation.name().into(),
        });
        Ok(())
    }

    fn render_property(
        &mut self,
        context: &mut PathContext,
        property: &dyn PropertyDescriptor,
        render_type: RenderType,
    ) -> Result<(), RenderError> {
        self.events.push(RenderEvent::Property {
            path: context.dotted(),
            name: property.name().into(),
            render_type,
        });
        Ok(())
    }

    fn render_collection_property(
        &mut self,
        context: &mut PathContext,
        property: &dyn PropertyDescriptor,
        collection: &dyn CollectionDescriptor,
        render_type: RenderType,
    ) -> Result<(), RenderError> {
        self.events.push(RenderEvent::CollectionProperty {
            path: context.dotted(),
            name: property.name().into(),
            element_type: collection.element_type().into(),
            render_type,
        });
        Ok(())
    }

    fn render_parameter(
        &mut self,
        _context: &mut PathContext,
        operation: &dyn OperationDescriptor,
        parameter: &dyn ParameterDescriptor,
        render_type: RenderType,
    ) -> Result<(), RenderError> {
        self.events.push(RenderEvent::Parameter {
            operation: operation.name().into(),
            index: parameter.index(),
            name: parameter.name().into(),
            render_type,
        });
        Ok(())
    }

    fn render_collection_parameter(
        &mut self,
        _context: &mut PathContext,
        operation: &dyn OperationDescriptor,
        parameter: &dyn ParameterDescriptor,
        collection: &dyn CollectionDescriptor,
        render_type: RenderType,
    ) -> Result<(), RenderError> {
        self.events.push(RenderEvent::CollectionParameter {
            operation: operation.name().into(),
            index: parameter.index(),
            name: parameter.name().into(),
            element_type: collection.element_type().into(),
            render_type,
        });
        Ok(())
    }

    fn render_result_type(
        &mut self,
        _context: &mut PathContext,
        operation: &dyn OperationDescriptor,
        result: &dyn ResultDescriptor,
        render_type: RenderType,
    ) -> Result<(), RenderError> {
        self.events.push(RenderEvent::Result {
            operation: operation.name().into(),
            name: result.name().into(),
            render_type,
        });
        Ok(())
    }

    fn render_collection_result_type(
        &mut self,
        _context: &mut PathContext,
        operation: &dyn OperationDescriptor,
        result: &dyn ResultDescriptor,
        collection: &dyn CollectionDescriptor,
        render_type: RenderType,
    ) -> Result<(), RenderError> {
        self.events.push(RenderEvent::CollectionResult {
            operation: operation.name().into(),
            name: result.name().into(),
            element_type: collection.element_type().into(),
            render_type,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Context, PropertyRef};
    use crate::simple::{SimpleOperation, SimpleProperty};
    use alloc::string::ToString;

    #[test]
    fn records_path_at_call_time() {
        let mut rec = Recorder::new();
        let mut ctx = PathContext::new();
        ctx.push_prefix(PropertyRef::new("order", "Order"));
        ctx.push_prefix(PropertyRef::new("total", "Decimal"));
        let total = SimpleProperty::new("total", "Decimal");
        rec.render_property(&mut ctx, &total, RenderType::Text).unwrap();
        let op = SimpleOperation::new("submit");
        rec.begin_operation(&mut ctx, &op).unwrap();

        assert_eq!(
            rec.events()[0].to_string(),
            "property order.total [text]"
        );
        assert_eq!(rec.events()[1].to_string(), "begin submit @order.total");
        assert_eq!(rec.take().len(), 2);
        assert!(rec.events().is_empty());
    }
}
