// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Form outline.
//!
//! Composes an order form with a hidden inline customer, a collection of
//! relations, an immutable id, and an operation, then prints the recorded
//! dispatch sequence for the properties-only and full passes.
//!
//! Run:
//! - `cargo run -p understory_demos --example form_outline`
//! - `RUST_LOG=understory_form=debug cargo run -p understory_demos --example form_outline`

use tracing_subscriber::EnvFilter;
use understory_form::composer::Composer;
use understory_form::context::PathContext;
use understory_form::error::ComposeError;
use understory_form::record::Recorder;
use understory_form::simple::{
    SimpleEntity, SimpleModel, SimpleOperation, SimpleParameter, SimpleProperty, SimpleResolver,
    SimpleResult,
};
use understory_form::types::RenderType;

fn model() -> SimpleModel {
    SimpleModel::new()
        .with(
            SimpleEntity::new("Order")
                .presented("Purchase order")
                .property(SimpleProperty::new("id", "Long").immutable())
                .property(SimpleProperty::new("placed", "Date").render_as(RenderType::DatePicker))
                .property(
                    SimpleProperty::new("lines", "OrderLine")
                        .relation()
                        .collection_of("OrderLine"),
                )
                .property(
                    SimpleProperty::new("customer", "Customer")
                        .inline("Customer")
                        .hidden(),
                )
                .property(SimpleProperty::new("shipTo", "Region").inline("Region"))
                .operation(
                    SimpleOperation::new("discount")
                        .parameter(SimpleParameter::new(0, "percent", "Decimal"))
                        .parameter(
                            SimpleParameter::new(1, "lines", "OrderLine")
                                .relation()
                                .collection_of("OrderLine"),
                        )
                        .returns(SimpleResult::new("discount", "Order").relation()),
                )
                .order(["placed", "customer", "lines"]),
        )
        .with(
            SimpleEntity::new("Customer")
                .property(SimpleProperty::new("name", "String"))
                .property(SimpleProperty::new("notes", "String").render_as(RenderType::TextArea))
                .operation(SimpleOperation::new("call")),
        )
}

fn main() -> Result<(), ComposeError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut composer = Composer::new(
        PathContext::new(),
        SimpleResolver::new(model(), "Order"),
        Recorder::new(),
    );
    println!("== {} ==", composer.label()?);

    for include_operations in [false, true] {
        let report = composer.compose(include_operations)?;
        println!("-- include_operations = {include_operations} --");
        for event in composer.renderer_mut().take() {
            println!("{event}");
        }
        tracing::info!(
            properties = report.properties,
            operations = report.operations,
            unresolved = ?report.unresolved,
            "pass complete"
        );
    }
    Ok(())
}
