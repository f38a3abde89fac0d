//! Basic language settings (Kotlin, compiler, JVM)

use crate::core::models::{CatalogKeyNotFound, Module};
use crate::core::ports::Catalog;

/// Catalog version holding the toolchain target
pub const JVM_TARGET_KEY: &str = "jvm-target";

/// Sub-plugins enabled on every module using this convention
pub const PLUGINS: [&str; 2] = ["org.jetbrains.kotlin.jvm", "java-library"];

/// Primary (Kotlin) compiler flags: strict nullability annotations, JVM type
/// annotations, context receivers, opt-in acknowledgment and inline classes
pub const COMPILER_FLAGS: [&str; 5] = [
    "-Xjsr305=strict",
    "-Xemit-jvm-type-annotations",
    "-Xcontext-receivers",
    "-opt-in=kotlin.RequiresOptIn",
    "-Xinline-classes",
];

/// Secondary (Java) compiler flags; `-parameters` keeps parameter names
pub const SECONDARY_COMPILER_FLAGS: [&str; 3] = ["-Xlint:unchecked", "-Xlint:deprecation", "-parameters"];

/// Primary compile task
pub const PRIMARY_COMPILE_TASK: &str = "compileKotlin";

/// Secondary compile task, wired to run after the primary one
pub const SECONDARY_COMPILE_TASK: &str = "compileJava";

pub(super) fn apply(module: &mut Module, catalog: &dyn Catalog) -> Result<(), CatalogKeyNotFound> {
    let target = catalog.version(JVM_TARGET_KEY)?;

    for plugin in PLUGINS {
        module.apply_plugin(plugin);
    }

    module.set_toolchain(target);

    let compiler = module.compiler_mut();
    compiler.add_flags(COMPILER_FLAGS);
    compiler.all_warnings_as_errors = true;
    compiler.progressive_mode = true;

    module.add_task_dependency(SECONDARY_COMPILE_TASK, PRIMARY_COMPILE_TASK);
    module.secondary_compiler_mut().add_flags(SECONDARY_COMPILER_FLAGS);

    Ok(())
}
