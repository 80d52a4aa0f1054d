//! Writing rendered docs and running the documentation generator.
//!
//! The rendered text is written to a source file that `apidoc` scans. The
//! generator is then pointed at the file's directory and writes HTML into
//! a sub-directory of it:
//!
//! ```text
//! ./genDoc/
//! ├── userDoc.js     # rendered comment blocks
//! └── genDocs/       # apidoc output
//! ```

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::SinkError;

/// Writes `text` to `path`, creating missing parent directories.
pub async fn write_docs(path: &Path, text: &str) -> Result<(), SinkError> {
    let to_sink_error = |source| SinkError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(to_sink_error)?;
    }
    tokio::fs::write(path, text).await.map_err(to_sink_error)?;

    info!(path = %path.display(), bytes = text.len(), "Wrote API doc source");
    Ok(())
}

/// Captured result of a successful generator run.
#[derive(Debug, Clone)]
pub struct GeneratorOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// An `apidoc -i <input> -o <output>` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApidocCommand {
    program: String,
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl ApidocCommand {
    pub fn new(
        program: impl Into<String>,
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Derives the invocation for a docs file: the input is the file's
    /// directory (`.` for a bare file name) and the output is
    /// `<input>/<output_dir_name>`.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use docbuilder::ApidocCommand;
    /// use std::path::Path;
    ///
    /// let cmd = ApidocCommand::for_file("./genDoc/userDoc.js", "apidoc", "genDocs");
    /// assert_eq!(cmd.input_dir(), Path::new("./genDoc"));
    /// assert_eq!(cmd.output_dir(), Path::new("./genDoc/genDocs"));
    /// ```
    pub fn for_file(
        path: impl AsRef<Path>,
        program: impl Into<String>,
        output_dir_name: impl AsRef<Path>,
    ) -> Self {
        let input_dir = match path.as_ref().parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let output_dir = input_dir.join(output_dir_name);
        Self::new(program, input_dir, output_dir)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Arguments passed to the program.
    pub fn args(&self) -> [&std::ffi::OsStr; 4] {
        [
            "-i".as_ref(),
            self.input_dir.as_os_str(),
            "-o".as_ref(),
            self.output_dir.as_os_str(),
        ]
    }

    /// Runs the generator and captures its output.
    ///
    /// ## Errors
    ///
    /// Returns [`SinkError::Spawn`] if the program cannot be started and
    /// [`SinkError::GeneratorFailed`] if it exits unsuccessfully.
    pub async fn run(&self) -> Result<GeneratorOutput, SinkError> {
        debug!(program = %self.program, args = ?self.args(), "Running documentation generator");

        let output = Command::new(&self.program)
            .args(self.args())
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| SinkError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(SinkError::GeneratorFailed {
                status: output.status.code(),
                stdout,
                stderr,
            });
        }

        Ok(GeneratorOutput {
            status: output.status,
            stdout,
            stderr,
        })
    }
}
