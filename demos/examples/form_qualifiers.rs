// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Qualifiers and labels.
//!
//! The same employee model is composed for a regular viewer and for an admin.
//! The admin qualifier swaps in variant entities at the root and inside the
//! inline address. Labels are printed for a few locales.
//!
//! Run:
//! - `cargo run -p understory_demos --example form_qualifiers`

use tracing_subscriber::EnvFilter;
use understory_form::composer::Composer;
use understory_form::context::PathContext;
use understory_form::error::ComposeError;
use understory_form::record::Recorder;
use understory_form::simple::{SimpleEntity, SimpleModel, SimpleProperty, SimpleResolver};
use understory_form::types::{Locale, Qualifier, RenderType};

struct Admin;

fn model() -> SimpleModel {
    SimpleModel::new()
        .with(
            SimpleEntity::new("Employee")
                .presented("Employee")
                .translation(Locale::new("nl"), "Medewerker")
                .translation(Locale::new("fr-CA"), "Employé")
                .property(SimpleProperty::new("name", "String"))
                .property(SimpleProperty::new("home", "Address").inline("Address"))
                .variant(
                    Qualifier::of::<Admin>(),
                    SimpleEntity::new("EmployeeAdmin")
                        .presented("Employee (admin)")
                        .property(SimpleProperty::new("name", "String"))
                        .property(SimpleProperty::new("salary", "Decimal"))
                        .property(
                            SimpleProperty::new("password", "String")
                                .render_as(RenderType::Secret),
                        )
                        .property(SimpleProperty::new("home", "Address").inline("Address")),
                ),
        )
        .with(
            SimpleEntity::new("Address")
                .property(SimpleProperty::new("city", "String"))
                .variant(
                    Qualifier::of::<Admin>(),
                    SimpleEntity::new("AddressAdmin")
                        .property(SimpleProperty::new("city", "String"))
                        .property(SimpleProperty::new("geo", "Point").immutable()),
                ),
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
        SimpleResolver::new(model(), "Employee"),
        Recorder::new(),
    );

    for qualifier in [None, Some(Qualifier::of::<Admin>())] {
        composer.resolver_mut().set_qualifier(qualifier);
        composer.compose(false)?;
        println!("== {} ==", composer.label()?);
        for event in composer.renderer_mut().take() {
            println!("{event}");
        }
    }

    composer.resolver_mut().set_qualifier(None);
    for tag in ["nl-BE", "fr", "de"] {
        composer.resolver_mut().set_locale(Some(Locale::new(tag)));
        let label = composer.label()?;
        tracing::info!(locale = tag, label = label.as_str(), "label");
        println!("{tag}: {label}");
    }
    Ok(())
}
