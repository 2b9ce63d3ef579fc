use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::foundation::error::{ReelError, ReelResult};

/// An external command line: program plus arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCommand {
    /// Program name or path.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
}

impl ToolCommand {
    /// Command with no arguments yet.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a path argument.
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.display().to_string())
    }

    /// Space-joined command line, as shown in errors and logs.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Run `cmd` to completion and return its combined output (stdout, then stderr).
///
/// A non-zero exit or a failure to start becomes [`ReelError::PipelineExecution`] carrying the
/// full output.
#[tracing::instrument(skip_all, fields(program = %cmd.program))]
pub fn run_checked(cmd: &ToolCommand) -> ReelResult<String> {
    let line = cmd.command_line();
    tracing::debug!(command = %line, "run");

    let output = Command::new(&cmd.program)
        .args(&cmd.args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| ReelError::pipeline(line.clone(), format!("failed to start: {e}")))?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        return Err(ReelError::pipeline(line, combined));
    }
    Ok(combined)
}

/// First `PATH` entry containing a regular file named `name`.
pub fn find_executable_on_path(name: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Resolve `binary` (a bare name looked up on `PATH`, or a path) to an existing file.
pub fn ensure_binary_exists(binary: &str) -> ReelResult<PathBuf> {
    let resolved = if is_path_like(binary) {
        let p = PathBuf::from(binary);
        p.is_file().then_some(p)
    } else {
        find_executable_on_path(binary)
    };
    resolved.ok_or_else(|| ReelError::resource(format!("binary not found or not executable: {binary}")))
}

/// Resolve the `adb` binary.
///
/// Paths and custom names are returned as configured. A bare `adb` is looked up on `PATH`, then
/// under `platform-tools/` of `ANDROID_SDK_ROOT`, `ANDROID_HOME` and the default SDK locations in
/// the user's home directory.
pub fn resolve_adb_binary(configured: &str) -> ReelResult<String> {
    let configured = configured.trim();
    if configured.is_empty() {
        return Err(ReelError::validation("adb_bin", "cannot be blank."));
    }
    if is_path_like(configured) {
        return Ok(configured.to_owned());
    }

    let exe = adb_executable_name();
    if configured != exe && configured != "adb" {
        return Ok(configured.to_owned());
    }

    if let Some(found) = find_executable_on_path(exe) {
        return Ok(found.display().to_string());
    }

    let candidates = sdk_adb_candidates(
        std::env::var("ANDROID_SDK_ROOT").ok().as_deref(),
        std::env::var("ANDROID_HOME").ok().as_deref(),
        home_dir().as_deref(),
        exe,
    );
    if let Some(found) = candidates.iter().find(|c| c.exists()) {
        return Ok(found.display().to_string());
    }

    let checked = candidates
        .iter()
        .map(|c| c.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(ReelError::resource(format!(
        "could not locate adb automatically. Install Android SDK platform-tools or set adb_bin to \
         an absolute adb path. Checked ANDROID_SDK_ROOT, ANDROID_HOME, and common SDK paths: {checked}"
    )))
}

/// `platform-tools/<exe>` under each non-blank SDK root, in lookup order, without duplicates.
pub fn sdk_adb_candidates(
    sdk_root: Option<&str>,
    android_home: Option<&str>,
    home: Option<&Path>,
    exe: &str,
) -> Vec<PathBuf> {
    let home_roots = home
        .map(|h| vec![h.join("Library/Android/sdk"), h.join("Android/Sdk")])
        .unwrap_or_default();
    let roots = [sdk_root, android_home]
        .into_iter()
        .flatten()
        .filter(|r| !r.trim().is_empty())
        .map(PathBuf::from)
        .chain(home_roots);

    let mut out: Vec<PathBuf> = Vec::new();
    for root in roots {
        let candidate = root.join("platform-tools").join(exe);
        if !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}

fn adb_executable_name() -> &'static str {
    if cfg!(windows) { "adb.exe" } else { "adb" }
}

fn is_path_like(s: &str) -> bool {
    Path::new(s).is_absolute() || s.contains('/') || s.contains(std::path::MAIN_SEPARATOR)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/tools.rs"]
mod tests;
