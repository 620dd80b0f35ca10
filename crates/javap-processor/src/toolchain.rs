//! Command lines for each supported toolchain.

use std::path::Path;

use javap_config::ProcessorSettings;
use javap_core::{Language, Sdk};

use crate::command::Invocation;

/// Compiler command writing class files for `source` into `classes`.
///
/// Toolchains outside the standard set fall back to their language's
/// reference compiler.
pub(crate) fn compiler(
    sdk: &Sdk,
    settings: &ProcessorSettings,
    source: &Path,
    classes: &Path,
) -> Invocation {
    match (sdk.name, sdk.language) {
        ("ECJ", _) => Invocation::new(&settings.ecj)
            .args(["-g", "-nowarn", "-d"])
            .arg(classes)
            .arg(source),
        (_, Language::Java) => Invocation::new(&settings.javac)
            .args(["-g", "-d"])
            .arg(classes)
            .arg(source),
        (_, Language::Kotlin) => Invocation::new(&settings.kotlinc)
            .arg(source)
            .arg("-d")
            .arg(classes),
        (_, Language::Scala) => Invocation::new(&settings.scalac)
            .arg("-d")
            .arg(classes)
            .arg(source),
    }
}

/// Verbose disassembly of `class_files`, private members included.
pub(crate) fn disassembler<'a>(
    settings: &ProcessorSettings,
    class_files: impl IntoIterator<Item = &'a Path>,
) -> Invocation {
    Invocation::new(&settings.javap)
        .args(["-v", "-private", "-c"])
        .args(class_files)
}

/// Procyon decompilation of `class_files`.
pub(crate) fn decompiler<'a>(
    settings: &ProcessorSettings,
    class_files: impl IntoIterator<Item = &'a Path>,
) -> Invocation {
    Invocation::new(&settings.java)
        .arg("-jar")
        .arg(&settings.procyon_jar)
        .args(class_files)
}
