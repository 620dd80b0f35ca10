#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use javap_config::ProcessorSettings;
use javap_core::{ProcessingInput, Processor, ProcessorError, SdkRegistry};
use javap_processor::CommandProcessor;
use tempfile::TempDir;

const FAKE_JAVAC: &str = r#"#!/bin/sh
classes="$3"
source="$4"
echo "compiling $source"
mkdir -p "$classes/pkg"
cp "$source" "$classes/Main.class"
: > "$classes/pkg/Helper.class"
"#;

const FAKE_JAVAP: &str = "#!/bin/sh\necho \"javap $*\"\n";

const FAKE_JAVA: &str = "#!/bin/sh\nshift 2\necho \"procyon $*\"\n";

const BROKEN_COMPILER: &str = r#"#!/bin/sh
echo "Main.kt:1: error: expecting a top level declaration" >&2
exit 1
"#;

const REJECTING_JAVAC: &str = "#!/bin/sh\necho \"$4:1: error: ';' expected\" >&2\nexit 1\n";

const SLOW_COMPILER: &str = "#!/bin/sh\nexec sleep 5\n";

struct Toolbox {
    dir: TempDir,
}

impl Toolbox {
    fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    fn script(&self, name: &str, body: &str) -> Result<String> {
        let path = self.dir.path().join(name);
        std::fs::write(&path, body)?;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
        Ok(path.to_string_lossy().into_owned())
    }

    fn missing(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().into_owned()
    }
}

fn settings(toolbox: &Toolbox, timeout: Duration) -> ProcessorSettings {
    ProcessorSettings {
        javac: toolbox.missing("javac"),
        ecj: toolbox.missing("ecj"),
        kotlinc: toolbox.missing("kotlinc"),
        scalac: toolbox.missing("scalac"),
        javap: toolbox.missing("javap"),
        java: toolbox.missing("java"),
        procyon_jar: PathBuf::from("/opt/procyon.jar"),
        timeout,
    }
}

fn processor(settings: ProcessorSettings) -> CommandProcessor {
    CommandProcessor::new(SdkRegistry::standard(), settings)
}

#[tokio::test]
async fn compiled_classes_are_disassembled_and_decompiled() -> Result<()> {
    let toolbox = Toolbox::new()?;
    let mut settings = settings(&toolbox, Duration::from_secs(10));
    settings.javac = toolbox.script("javac", FAKE_JAVAC)?;
    settings.javap = toolbox.script("javap", FAKE_JAVAP)?;
    settings.java = toolbox.script("java", FAKE_JAVA)?;

    let output = processor(settings)
        .process(&ProcessingInput::new("class Main {}", "JAVA"))
        .await?;

    assert_eq!(output.compiler_log, "compiling Main.java\n");
    assert_eq!(
        output.disassembly,
        "javap -v -private -c Main.class pkg/Helper.class\n"
    );
    assert_eq!(output.decompilation, "procyon Main.class pkg/Helper.class\n");
    Ok(())
}

#[tokio::test]
async fn compile_errors_land_in_the_log() -> Result<()> {
    let toolbox = Toolbox::new()?;
    let mut settings = settings(&toolbox, Duration::from_secs(10));
    settings.kotlinc = toolbox.script("kotlinc", BROKEN_COMPILER)?;

    let output = processor(settings)
        .process(&ProcessingInput::new("fun", "KOTLIN"))
        .await?;

    assert_eq!(
        output.compiler_log,
        "Main.kt:1: error: expecting a top level declaration\nkotlinc exited with status 1\n"
    );
    assert!(output.disassembly.is_empty());
    assert!(output.decompilation.is_empty());
    Ok(())
}

#[tokio::test]
async fn repeated_runs_produce_identical_output() -> Result<()> {
    let toolbox = Toolbox::new()?;
    let mut rejecting_tools = settings(&toolbox, Duration::from_secs(10));
    rejecting_tools.javac = toolbox.script("javac", REJECTING_JAVAC)?;
    let rejecting = processor(rejecting_tools);
    let input = ProcessingInput::new("class Main { int x }", "JAVA");

    let first = rejecting.process(&input).await?;
    let second = rejecting.process(&input).await?;
    assert_eq!(first, second);
    assert_eq!(
        first.compiler_log,
        "Main.java:1: error: ';' expected\njavac exited with status 1\n"
    );

    let mut working_tools = settings(&toolbox, Duration::from_secs(10));
    working_tools.javac = toolbox.script("javac-ok", FAKE_JAVAC)?;
    working_tools.javap = toolbox.script("javap", FAKE_JAVAP)?;
    working_tools.java = toolbox.script("java", FAKE_JAVA)?;
    let compiling = processor(working_tools);
    let input = ProcessingInput::new("class Main {}", "JAVA");
    assert_eq!(compiling.process(&input).await?, compiling.process(&input).await?);
    Ok(())
}

#[tokio::test]
async fn missing_compiler_is_reported_not_raised() -> Result<()> {
    let toolbox = Toolbox::new()?;
    let settings = settings(&toolbox, Duration::from_secs(10));

    let output = processor(settings)
        .process(&ProcessingInput::new("object Main", "SCALA"))
        .await?;

    assert!(
        output.compiler_log.starts_with("failed to run scalac: "),
        "unexpected log: {}",
        output.compiler_log
    );
    assert!(output.disassembly.is_empty());
    Ok(())
}

#[tokio::test]
async fn slow_compiler_is_cut_off() -> Result<()> {
    let toolbox = Toolbox::new()?;
    let mut settings = settings(&toolbox, Duration::from_millis(300));
    settings.ecj = toolbox.script("ecj", SLOW_COMPILER)?;

    let output = processor(settings)
        .process(&ProcessingInput::new("class Main {}", "ECJ"))
        .await?;

    assert!(output.compiler_log.ends_with("timed out after 300 ms\n"));
    assert!(output.decompilation.is_empty());
    Ok(())
}

#[tokio::test]
async fn unknown_toolchain_is_rejected() -> Result<()> {
    let toolbox = Toolbox::new()?;
    let err = processor(settings(&toolbox, Duration::from_secs(1)))
        .process(&ProcessingInput::new("x", "GROOVY"))
        .await
        .err();
    assert_eq!(
        err,
        Some(ProcessorError::UnknownCompiler {
            name: "GROOVY".to_string()
        })
    );
    Ok(())
}
