//! Processor that shells out to the configured JVM toolchains.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use javap_config::ProcessorSettings;
use javap_core::{ProcessingInput, ProcessingOutput, Processor, ProcessorError, Sdk, SdkRegistry};
use tempfile::TempDir;
use tracing::{Instrument, debug, info_span, warn};
use walkdir::WalkDir;

use crate::toolchain;

const CLASSES_DIR: &str = "classes";

/// Compiles a paste with its toolchain, then disassembles and decompiles the
/// produced class files.
#[derive(Debug, Clone)]
pub struct CommandProcessor {
    sdks: SdkRegistry,
    settings: ProcessorSettings,
}

impl CommandProcessor {
    /// Processor over `sdks` using the tool locations in `settings`.
    #[must_use]
    pub const fn new(sdks: SdkRegistry, settings: ProcessorSettings) -> Self {
        Self { sdks, settings }
    }

    async fn run(&self, sdk: &Sdk, code: &str) -> ProcessingOutput {
        let workspace = match Workspace::prepare(sdk, code).await {
            Ok(workspace) => workspace,
            Err(err) => {
                warn!(error = %err, "failed to prepare processing workspace");
                return ProcessingOutput::new(
                    format!("failed to prepare workspace: {err}\n"),
                    String::new(),
                    String::new(),
                );
            }
        };
        let limit = self.settings.timeout;

        // Paths stay relative to the workspace so diagnostics do not mention
        // the random directory name.
        let source = Path::new(sdk.language.source_file_name());
        let compiler_log = toolchain::compiler(sdk, &self.settings, source, Path::new(CLASSES_DIR))
            .run(workspace.root(), limit)
            .await;

        let class_files = match workspace.class_files() {
            Ok(files) => files,
            Err(err) => {
                warn!(error = %err, "failed to list compiled classes");
                Vec::new()
            }
        };
        if class_files.is_empty() {
            debug!("compiler produced no class files");
            return ProcessingOutput::new(compiler_log, String::new(), String::new());
        }
        debug!(count = class_files.len(), "analysing class files");

        let relative = class_files.iter().map(PathBuf::as_path);
        let disassembly = toolchain::disassembler(&self.settings, relative.clone())
            .run(&workspace.classes, limit)
            .await;
        let decompilation = toolchain::decompiler(&self.settings, relative)
            .run(&workspace.classes, limit)
            .await;

        ProcessingOutput::new(compiler_log, disassembly, decompilation)
    }
}

#[async_trait]
impl Processor for CommandProcessor {
    async fn process(&self, input: &ProcessingInput) -> Result<ProcessingOutput, ProcessorError> {
        let sdk = self
            .sdks
            .by_name(&input.compiler_name)
            .ok_or_else(|| ProcessorError::UnknownCompiler {
                name: input.compiler_name.clone(),
            })?;
        let span = info_span!("process", compiler = sdk.name);
        Ok(self.run(sdk, &input.code).instrument(span).await)
    }
}

/// Scratch directory holding one paste's source and compiled classes.
struct Workspace {
    dir: TempDir,
    classes: PathBuf,
}

impl Workspace {
    async fn prepare(sdk: &Sdk, code: &str) -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("javap-").tempdir()?;
        let source = dir.path().join(sdk.language.source_file_name());
        let classes = dir.path().join(CLASSES_DIR);
        tokio::fs::write(&source, code).await?;
        tokio::fs::create_dir(&classes).await?;
        Ok(Self { dir, classes })
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Class files below `classes/`, relative to it and sorted by path.
    fn class_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.classes) {
            let entry = entry.map_err(io::Error::from)?;
            let is_class = entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .is_some_and(|extension| extension == "class");
            if !is_class {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&self.classes) {
                files.push(relative.to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }
}
