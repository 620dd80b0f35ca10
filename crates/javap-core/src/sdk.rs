//! Registry of the compiler toolchains a paste can be processed with.

use std::collections::BTreeSet;

use serde::Serialize;

/// Source language accepted by a toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    /// Java sources.
    Java,
    /// Kotlin sources.
    Kotlin,
    /// Scala sources.
    Scala,
}

impl Language {
    /// File name the source is written to before compilation.
    #[must_use]
    pub const fn source_file_name(self) -> &'static str {
        match self {
            Self::Java => "Main.java",
            Self::Kotlin => "Main.kt",
            Self::Scala => "Main.scala",
        }
    }

    /// Sample program shown in the built-in paste for this language.
    #[must_use]
    pub const fn sample_code(self) -> &'static str {
        match self {
            Self::Java => {
                "import java.util.*;\nimport java.util.stream.*;\n\npublic class Main {\n    public static void main(String[] args) {\n        List<String> names = Arrays.asList(\"javap\", \"procyon\");\n        System.out.println(names.stream().collect(Collectors.joining(\", \")));\n    }\n}\n"
            }
            Self::Kotlin => {
                "fun main(args: Array<String>) {\n    val names = listOf(\"javap\", \"procyon\")\n    println(names.joinToString(\", \"))\n}\n"
            }
            Self::Scala => {
                "object Main {\n  def main(args: Array[String]): Unit = {\n    val names = List(\"javap\", \"procyon\")\n    println(names.mkString(\", \"))\n  }\n}\n"
            }
        }
    }
}

/// A named compiler toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sdk {
    /// Stable name used as `compilerName`.
    pub name: &'static str,
    /// Language the toolchain compiles.
    pub language: Language,
    /// Human readable label.
    pub display_name: &'static str,
}

const STANDARD_SDKS: &[Sdk] = &[
    Sdk {
        name: "JAVA",
        language: Language::Java,
        display_name: "OpenJDK javac",
    },
    Sdk {
        name: "ECJ",
        language: Language::Java,
        display_name: "Eclipse Compiler for Java",
    },
    Sdk {
        name: "KOTLIN",
        language: Language::Kotlin,
        display_name: "Kotlin kotlinc",
    },
    Sdk {
        name: "SCALA",
        language: Language::Scala,
        display_name: "Scala scalac",
    },
];

/// Ordered, immutable set of toolchains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkRegistry {
    sdks: Vec<Sdk>,
}

impl SdkRegistry {
    /// The toolchains shipped with the service.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            sdks: STANDARD_SDKS.to_vec(),
        }
    }

    /// All toolchains in registration order.
    #[must_use]
    pub fn all(&self) -> &[Sdk] {
        &self.sdks
    }

    /// Names of all toolchains.
    #[must_use]
    pub fn list_names(&self) -> BTreeSet<&'static str> {
        self.sdks.iter().map(|sdk| sdk.name).collect()
    }

    /// Look up a toolchain by its stable name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Sdk> {
        self.sdks.iter().find(|sdk| sdk.name == name)
    }

    /// The default Java toolchain.
    #[must_use]
    pub fn default_java(&self) -> Option<&Sdk> {
        self.sdks.iter().find(|sdk| sdk.language == Language::Java)
    }
}

impl Default for SdkRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
