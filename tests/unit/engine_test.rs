//! Tests for the composition engine
//!
//! Planning order, idempotence, cycle detection and failure isolation.

use std::sync::Arc;
use std::thread;

use buildlogic::core::ComposeError;
use buildlogic::core::models::{
    ConventionId, DependencyScope, EntryKind, Module, ModuleRequest, VersionCatalog,
};
use buildlogic::core::services::conventions::microservice;
use buildlogic::core::services::{CompositionEngine, ConventionRegistry};

use crate::common::{
    builtin_registry, catalog_without, full_catalog, id_strings, new_log, register_recording,
};

const LANGUAGE: &str = "language-conventions";
const UNIT_TESTING: &str = "unit-testing-conventions";
const INTEGRATION_TESTING: &str = "integration-testing-conventions";
const EVENT_DRIVEN: &str = "event-driven-conventions";
const MICROSERVICE: &str = "microservice-conventions";

// =============================================================================
// Planning
// =============================================================================

#[test]
fn plan_puts_requirements_first() {
    let registry = builtin_registry();
    let engine = CompositionEngine::new(&registry);

    let order = engine.plan_ids(&[MICROSERVICE]).unwrap();

    assert_eq!(id_strings(&order), vec![LANGUAGE, UNIT_TESTING, MICROSERVICE]);
}

#[test]
fn plan_contains_each_convention_once() {
    let registry = builtin_registry();
    let engine = CompositionEngine::new(&registry);

    let order = engine
        .plan_ids(&[LANGUAGE, MICROSERVICE, UNIT_TESTING, MICROSERVICE])
        .unwrap();

    assert_eq!(id_strings(&order), vec![LANGUAGE, UNIT_TESTING, MICROSERVICE]);
}

#[test]
fn plan_keeps_request_order_for_unrelated_conventions() {
    let registry = builtin_registry();
    let engine = CompositionEngine::new(&registry);

    let forward = engine.plan_ids(&[EVENT_DRIVEN, INTEGRATION_TESTING]).unwrap();
    let backward = engine.plan_ids(&[INTEGRATION_TESTING, EVENT_DRIVEN]).unwrap();

    assert_eq!(id_strings(&forward), vec![EVENT_DRIVEN, INTEGRATION_TESTING]);
    assert_eq!(id_strings(&backward), vec![INTEGRATION_TESTING, EVENT_DRIVEN]);
}

#[test]
fn plan_is_deterministic() {
    let registry = builtin_registry();
    let engine = CompositionEngine::new(&registry);
    let request = [EVENT_DRIVEN, MICROSERVICE, INTEGRATION_TESTING];

    let first = engine.plan_ids(&request).unwrap();
    for _ in 0..10 {
        assert_eq!(engine.plan_ids(&request).unwrap(), first);
    }
}

#[test]
fn plan_accepts_namespaced_ids() {
    let registry = builtin_registry();
    let engine = CompositionEngine::new(&registry);

    let order = engine.plan_ids(&["buildlogic.microservice-conventions"]).unwrap();

    assert_eq!(order.last(), Some(&ConventionId::new(MICROSERVICE)));
}

#[test]
fn plan_of_nothing_is_empty() {
    let registry = builtin_registry();
    let engine = CompositionEngine::new(&registry);
    let none: [&str; 0] = [];

    assert!(engine.plan_ids(&none).unwrap().is_empty());
}

#[test]
fn unknown_id_fails_planning() {
    let registry = builtin_registry();
    let engine = CompositionEngine::new(&registry);

    let err = engine.plan_ids(&[LANGUAGE, "kotlin-multiplatform-conventions"]).unwrap_err();

    assert_eq!(
        err,
        ComposeError::UnknownConventionId("kotlin-multiplatform-conventions".to_string())
    );
}

#[test]
fn unknown_required_id_fails_planning() {
    let log = new_log();
    let mut registry = ConventionRegistry::new(full_catalog());
    register_recording(&mut registry, "a", &["missing"], None, &log);
    let engine = CompositionEngine::new(&registry);

    let err = engine.plan_ids(&["a"]).unwrap_err();

    assert_eq!(err, ComposeError::UnknownConventionId("missing".to_string()));
}

#[test]
fn diamond_requirements_are_planned_once() {
    let log = new_log();
    let mut registry = ConventionRegistry::new(full_catalog());
    register_recording(&mut registry, "base", &[], None, &log);
    register_recording(&mut registry, "left", &["base"], None, &log);
    register_recording(&mut registry, "right", &["base"], None, &log);
    register_recording(&mut registry, "top", &["left", "right"], None, &log);
    let engine = CompositionEngine::new(&registry);

    let order = engine.plan_ids(&["top"]).unwrap();

    assert_eq!(id_strings(&order), vec!["base", "left", "right", "top"]);
}

// =============================================================================
// Cycles
// =============================================================================

#[test]
fn two_convention_cycle_is_reported_with_path() {
    let log = new_log();
    let mut registry = ConventionRegistry::new(full_catalog());
    register_recording(&mut registry, "a", &["b"], None, &log);
    register_recording(&mut registry, "b", &["a"], None, &log);
    let engine = CompositionEngine::new(&registry);

    let err = engine.plan_ids(&["a"]).unwrap_err();

    match &err {
        ComposeError::ConventionCycleDetected { cycle } => {
            assert_eq!(id_strings(cycle), vec!["a", "b", "a"]);
        },
        other => panic!("expected cycle, got {other:?}"),
    }
    assert_eq!(err.to_string(), "convention cycle detected: a -> b -> a");
}

#[test]
fn self_requirement_is_a_cycle() {
    let log = new_log();
    let mut registry = ConventionRegistry::new(full_catalog());
    register_recording(&mut registry, "loop", &["loop"], None, &log);
    let engine = CompositionEngine::new(&registry);

    let err = engine.plan_ids(&["loop"]).unwrap_err();

    assert!(matches!(err, ComposeError::ConventionCycleDetected { ref cycle } if cycle.len() == 2));
}

#[test]
fn cycle_leaves_module_untouched() {
    let log = new_log();
    let mut registry = ConventionRegistry::new(full_catalog());
    register_recording(&mut registry, "clean", &[], None, &log);
    register_recording(&mut registry, "a", &["b"], None, &log);
    register_recording(&mut registry, "b", &["a"], None, &log);
    let engine = CompositionEngine::new(&registry);
    let mut module = Module::new("svc");

    let err = engine.compose(&mut module, &["clean", "a"]).unwrap_err();

    assert!(matches!(err, ComposeError::ConventionCycleDetected { .. }));
    assert_eq!(module, Module::new("svc"));
    assert!(log.lock().unwrap().is_empty());
}

// =============================================================================
// Composition
// =============================================================================

#[test]
fn compose_applies_requirements_before_dependents() {
    let log = new_log();
    let mut registry = ConventionRegistry::new(full_catalog());
    register_recording(&mut registry, "base", &[], None, &log);
    register_recording(&mut registry, "feature", &["base"], None, &log);
    let engine = CompositionEngine::new(&registry);
    let mut module = Module::new("svc");

    let report = engine.compose(&mut module, &["feature"]).unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["base", "feature"]);
    assert_eq!(id_strings(&report.applied), vec!["base", "feature"]);
    assert_eq!(id_strings(module.applied_conventions()), vec!["base", "feature"]);
}

#[test]
fn compose_twice_is_idempotent() {
    let registry = builtin_registry();
    let engine = CompositionEngine::new(&registry);
    let mut module = Module::new("order-service");

    engine.compose(&mut module, &[MICROSERVICE, EVENT_DRIVEN]).unwrap();
    let once = module.clone();
    let report = engine.compose(&mut module, &[MICROSERVICE, EVENT_DRIVEN]).unwrap();

    assert_eq!(module, once);
    assert!(report.applied.is_empty());
    assert_eq!(report.skipped.len(), 4);
}

#[test]
fn requirement_applied_once_when_also_requested() {
    let registry = builtin_registry();
    let engine = CompositionEngine::new(&registry);
    let mut module = Module::new("svc");

    engine.compose(&mut module, &[UNIT_TESTING, MICROSERVICE]).unwrap();

    let launchers = module
        .dependencies_in(DependencyScope::TestRuntime)
        .filter(|d| d.coordinate.name == "junit-platform-launcher")
        .count();
    assert_eq!(launchers, 1);
    assert_eq!(id_strings(module.applied_conventions()), vec![UNIT_TESTING, LANGUAGE, MICROSERVICE]);
}

#[test]
fn requesting_requirements_explicitly_changes_nothing() {
    let registry = builtin_registry();
    let engine = CompositionEngine::new(&registry);
    let mut implied = Module::new("svc");
    let mut explicit = Module::new("svc");

    engine.compose(&mut implied, &[MICROSERVICE]).unwrap();
    engine
        .compose(&mut explicit, &[LANGUAGE, UNIT_TESTING, MICROSERVICE])
        .unwrap();

    assert_eq!(implied, explicit);
}

#[test]
fn later_compose_skips_already_applied_requirements() {
    let log = new_log();
    let mut registry = ConventionRegistry::new(full_catalog());
    register_recording(&mut registry, "base", &[], None, &log);
    register_recording(&mut registry, "feature", &["base"], None, &log);
    let engine = CompositionEngine::new(&registry);
    let mut module = Module::new("svc");

    engine.compose(&mut module, &["base"]).unwrap();
    let report = engine.compose(&mut module, &["feature"]).unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["base", "feature"]);
    assert_eq!(id_strings(&report.skipped), vec!["base"]);
    assert_eq!(id_strings(&report.applied), vec!["feature"]);
}

#[test]
fn full_stack_scenario() {
    let registry = builtin_registry();
    let engine = CompositionEngine::new(&registry);
    let mut module = Module::new("order-service");

    engine
        .compose(
            &mut module,
            &[MICROSERVICE, EVENT_DRIVEN, INTEGRATION_TESTING, UNIT_TESTING, LANGUAGE],
        )
        .unwrap();

    assert_eq!(
        id_strings(module.applied_conventions()),
        vec![LANGUAGE, UNIT_TESTING, MICROSERVICE, EVENT_DRIVEN, INTEGRATION_TESTING]
    );
    assert_eq!(module.toolchain().unwrap().target, "21");
    assert!(module.has_plugin("org.springframework.boot"));
    assert!(module.has_plugin("io.spring.dependency-management"));
    assert!(module.has_plugin("java-test-fixtures"));

    let excluded: Vec<_> = module.dependencies().iter().filter(|d| !d.exclusions.is_empty()).collect();
    assert_eq!(excluded.len(), 1);
    assert_eq!(excluded[0].coordinate.name, "spring-boot-starter-test");
    assert_eq!(excluded[0].exclusions[0].group.as_deref(), Some("org.junit.vintage"));

    let platforms: Vec<_> = module
        .dependencies()
        .iter()
        .filter(|d| d.is_platform())
        .map(|d| d.coordinate.name.as_str())
        .collect();
    assert_eq!(
        platforms,
        vec!["junit-bom", "spring-boot-dependencies", "axon-bom", "testcontainers-bom"]
    );
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn missing_catalog_key_names_convention_and_key() {
    let registry = ConventionRegistry::with_builtins(catalog_without(
        EntryKind::Library,
        microservice::STARTER_TEST,
    ));
    let engine = CompositionEngine::new(&registry);
    let mut module = Module::new("svc");

    let err = engine.compose(&mut module, &[MICROSERVICE]).unwrap_err();

    match err {
        ComposeError::CatalogKeyNotFound { convention, source } => {
            assert_eq!(convention.as_str(), MICROSERVICE);
            assert_eq!(source.kind, EntryKind::Library);
            assert_eq!(source.key, "spring-boot-starter-test");
        },
        other => panic!("expected missing key, got {other:?}"),
    }
}

#[test]
fn failing_convention_leaves_module_unconfigured() {
    let registry = ConventionRegistry::with_builtins(catalog_without(
        EntryKind::Library,
        microservice::STARTER_TEST,
    ));
    let engine = CompositionEngine::new(&registry);
    let mut module = Module::new("svc");

    engine.compose(&mut module, &[MICROSERVICE]).unwrap_err();

    // Language and unit testing ran before the failure but are discarded too
    assert_eq!(module, Module::new("svc"));
}

#[test]
fn failing_compose_keeps_earlier_compositions() {
    let registry = ConventionRegistry::with_builtins(catalog_without(
        EntryKind::Library,
        microservice::STARTER_TEST,
    ));
    let engine = CompositionEngine::new(&registry);
    let mut module = Module::new("svc");
    engine.compose(&mut module, &[LANGUAGE]).unwrap();
    let before = module.clone();

    engine.compose(&mut module, &[EVENT_DRIVEN, MICROSERVICE]).unwrap_err();

    assert_eq!(module, before);
    assert_eq!(id_strings(module.applied_conventions()), vec![LANGUAGE]);
}

#[test]
fn missing_jvm_target_fails_language_first() {
    let registry = ConventionRegistry::with_builtins(catalog_without(EntryKind::Version, "jvm-target"));
    let engine = CompositionEngine::new(&registry);
    let mut module = Module::new("svc");

    let err = engine.compose(&mut module, &[MICROSERVICE]).unwrap_err();

    assert!(matches!(err, ComposeError::CatalogKeyNotFound { ref convention, .. } if convention.as_str() == LANGUAGE));
    assert_eq!(module, Module::new("svc"));
}

#[test]
fn lookup_failure_discards_earlier_conventions() {
    let log = new_log();
    let mut registry = ConventionRegistry::new(full_catalog());
    register_recording(&mut registry, "first", &[], None, &log);
    register_recording(&mut registry, "broken", &[], Some("no-such-version"), &log);
    register_recording(&mut registry, "last", &[], None, &log);
    let engine = CompositionEngine::new(&registry);
    let mut module = Module::new("svc");

    engine.compose(&mut module, &["first", "broken", "last"]).unwrap_err();

    assert_eq!(*log.lock().unwrap(), vec!["first"]);
    assert_eq!(module, Module::new("svc"));
}

// =============================================================================
// Multi-module builds
// =============================================================================

#[test]
fn compose_all_isolates_module_failures() {
    let log = new_log();
    let mut registry = ConventionRegistry::new(full_catalog());
    register_recording(&mut registry, "ok", &[], None, &log);
    register_recording(&mut registry, "broken", &[], Some("no-such-version"), &log);
    let engine = CompositionEngine::new(&registry);

    let requests = vec![
        ModuleRequest {
            name: "bad".to_string(),
            conventions: vec![ConventionId::new("broken")],
        },
        ModuleRequest {
            name: "good".to_string(),
            conventions: vec![ConventionId::new("ok")],
        },
    ];
    let outcomes = engine.compose_all(&requests);

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].result.is_err());
    assert_eq!(outcomes[0].module, Module::new("bad"));
    assert_eq!(outcomes[1].module.name(), "good");
    assert_eq!(outcomes[1].result.as_ref().unwrap().applied, vec![ConventionId::new("ok")]);
}

#[test]
fn modules_do_not_share_configuration() {
    let registry = builtin_registry();
    let engine = CompositionEngine::new(&registry);
    let requests = vec![
        ModuleRequest {
            name: "service".to_string(),
            conventions: vec![ConventionId::new(MICROSERVICE)],
        },
        ModuleRequest {
            name: "domain".to_string(),
            conventions: vec![ConventionId::new(LANGUAGE)],
        },
    ];

    let outcomes = engine.compose_all(&requests);
    let domain = &outcomes[1].module;

    assert!(domain.dependencies().is_empty());
    assert!(!domain.has_plugin("org.springframework.boot"));
    assert_eq!(domain.toolchain().unwrap().target, "21");
}

#[test]
fn catalog_is_shared_across_threads() {
    let catalog = full_catalog();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let catalog = Arc::clone(&catalog);
            thread::spawn(move || {
                let registry = ConventionRegistry::with_builtins(catalog);
                let engine = CompositionEngine::new(&registry);
                let mut module = Module::new(format!("module-{i}"));
                engine.compose(&mut module, &[MICROSERVICE]).unwrap();
                module.dependencies().len()
            })
        })
        .collect();

    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(counts.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn empty_catalog_still_plans() {
    let registry = ConventionRegistry::with_builtins(Arc::new(VersionCatalog::default()));
    let engine = CompositionEngine::new(&registry);

    assert_eq!(engine.plan_ids(&[MICROSERVICE]).unwrap().len(), 3);
}
