//! Paste values and the caller-facing paste view.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Source code plus the toolchain it should be processed with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingInput {
    /// User supplied source code.
    pub code: String,
    /// Name of a toolchain in the [`crate::SdkRegistry`].
    pub compiler_name: String,
}

impl ProcessingInput {
    /// Build an input from borrowed or owned strings.
    #[must_use]
    pub fn new(code: impl Into<String>, compiler_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            compiler_name: compiler_name.into(),
        }
    }
}

/// The three textual views produced for a [`ProcessingInput`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingOutput {
    /// Compiler diagnostics, including compile errors.
    #[serde(rename = "compilerLog")]
    pub compiler_log: String,
    /// Bytecode disassembly (`javap`).
    #[serde(rename = "javap")]
    pub disassembly: String,
    /// Decompiled source (procyon).
    #[serde(rename = "procyon")]
    pub decompilation: String,
}

impl ProcessingOutput {
    /// Build an output from its three parts.
    #[must_use]
    pub fn new(
        compiler_log: impl Into<String>,
        disassembly: impl Into<String>,
        decompilation: impl Into<String>,
    ) -> Self {
        Self {
            compiler_log: compiler_log.into(),
            disassembly: disassembly.into(),
            decompilation: decompilation.into(),
        }
    }
}

/// A stored paste. `output` is always the processing result of `input`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paste {
    /// Unique, immutable identifier.
    pub id: String,
    /// Token of the creator; required to update the paste.
    pub owner_token: String,
    /// Current input.
    pub input: ProcessingInput,
    /// Output computed for `input`.
    pub output: ProcessingOutput,
}

impl Paste {
    /// Returns a copy with `input` and `output` replaced together.
    #[must_use]
    pub fn with_contents(&self, input: ProcessingInput, output: ProcessingOutput) -> Self {
        Self {
            id: self.id.clone(),
            owner_token: self.owner_token.clone(),
            input,
            output,
        }
    }

    /// Whether `caller_token` matches the owner token.
    #[must_use]
    pub fn is_owned_by(&self, caller_token: Option<&str>) -> bool {
        caller_token.is_some_and(|token| token == self.owner_token)
    }
}

/// A paste together with the caller's edit rights.
///
/// Serializes as `{"id", "input", "output", "editable"}`; the owner token is
/// never part of the serialized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteView {
    /// The paste being viewed.
    pub paste: Paste,
    /// Whether the caller may update the paste.
    pub editable: bool,
}

impl PasteView {
    /// Build a view, deriving `editable` from the caller token.
    #[must_use]
    pub fn for_caller(paste: Paste, caller_token: Option<&str>) -> Self {
        let editable = paste.is_owned_by(caller_token);
        Self { paste, editable }
    }

    /// Build a view that is never editable.
    #[must_use]
    pub const fn read_only(paste: Paste) -> Self {
        Self {
            paste,
            editable: false,
        }
    }
}

impl Serialize for PasteView {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PasteView", 4)?;
        state.serialize_field("id", &self.paste.id)?;
        state.serialize_field("input", &self.paste.input)?;
        state.serialize_field("output", &self.paste.output)?;
        state.serialize_field("editable", &self.editable)?;
        state.end()
    }
}
