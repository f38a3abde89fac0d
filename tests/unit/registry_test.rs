//! Tests for the convention registry

use std::sync::Arc;

use buildlogic::core::ComposeError;
use buildlogic::core::models::{ConventionId, VersionCatalog};
use buildlogic::core::services::{BuiltinKind, ConventionRegistry};

use crate::common::{builtin_registry, full_catalog, new_log, register_recording};

#[test]
fn builtins_are_registered_in_order() {
    let registry = builtin_registry();

    let ids: Vec<&str> = registry.ids().iter().map(ConventionId::as_str).collect();

    assert_eq!(
        ids,
        vec![
            "language-conventions",
            "unit-testing-conventions",
            "integration-testing-conventions",
            "event-driven-conventions",
            "microservice-conventions"
        ]
    );
}

#[test]
fn resolve_returns_convention_with_that_id() {
    let registry = builtin_registry();

    for kind in BuiltinKind::ALL {
        let convention = registry.resolve(&kind.id()).unwrap();
        assert_eq!(convention.id(), kind.id());
    }
}

#[test]
fn resolve_accepts_namespaced_id() {
    let registry = builtin_registry();
    let id = ConventionId::new("buildlogic.event-driven-conventions");

    assert!(registry.contains(&id));
    assert!(registry.resolve(&id).is_ok());
}

#[test]
fn resolve_unknown_id() {
    let registry = builtin_registry();

    let err = registry.resolve(&ConventionId::new("gradle-enterprise")).unwrap_err();

    assert_eq!(err, ComposeError::UnknownConventionId("gradle-enterprise".to_string()));
    assert_eq!(err.to_string(), "unknown convention id 'gradle-enterprise'");
}

#[test]
fn empty_registry_knows_nothing() {
    let registry = ConventionRegistry::new(Arc::new(VersionCatalog::default()));

    assert!(registry.ids().is_empty());
    assert!(!registry.contains(&ConventionId::new("language-conventions")));
}

#[test]
fn custom_conventions_extend_builtins() {
    let log = new_log();
    let mut registry = builtin_registry();

    register_recording(&mut registry, "observability-conventions", &["language-conventions"], None, &log);

    assert_eq!(registry.ids().len(), 6);
    let convention = registry.resolve(&ConventionId::new("observability-conventions")).unwrap();
    assert_eq!(convention.requires(), vec![ConventionId::new("language-conventions")]);
}

#[test]
fn duplicate_registration_is_rejected() {
    let log = new_log();
    let mut registry = ConventionRegistry::new(full_catalog());
    register_recording(&mut registry, "custom", &[], None, &log);

    let err = registry
        .register("buildlogic.custom", |catalog| {
            let registry = ConventionRegistry::with_builtins(catalog);
            registry.resolve(&BuiltinKind::Language.id()).unwrap()
        })
        .unwrap_err();

    assert_eq!(err, ComposeError::DuplicateConventionId(ConventionId::new("custom")));
    assert_eq!(registry.ids().len(), 1);
}

#[test]
fn duplicate_builtin_id_is_rejected() {
    let mut registry = builtin_registry();
    let before = registry.ids().to_vec();

    let err = registry
        .register(BuiltinKind::Microservice.id(), |catalog| {
            ConventionRegistry::with_builtins(catalog)
                .resolve(&BuiltinKind::Language.id())
                .unwrap()
        })
        .unwrap_err();

    assert!(matches!(err, ComposeError::DuplicateConventionId(_)));
    assert_eq!(registry.ids(), before.as_slice());
}

#[test]
fn factories_receive_the_registry_catalog() {
    let registry = builtin_registry();
    let catalog = Arc::clone(registry.catalog());

    assert_eq!(catalog.version("jvm-target").unwrap(), "21");
}
