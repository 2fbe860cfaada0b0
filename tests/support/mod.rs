use anyhow::{Context, Result, bail};
use app_registry::DEFAULT_CONFIG_FILE;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub fn inspect_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_registry-inspect"))
}

/// Fresh directory holding `react-app-registry.config.json` with `body`.
pub fn config_dir(body: &str) -> Result<TempDir> {
    let dir = TempDir::new().context("failed to allocate config dir")?;
    write_config(dir.path(), body)?;
    Ok(dir)
}

pub fn write_config(dir: &Path, body: &str) -> Result<PathBuf> {
    let path = dir.join(DEFAULT_CONFIG_FILE);
    fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// `registry-inspect` invocation rooted at `cwd`.
pub fn inspect_command(cwd: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(inspect_binary());
    cmd.args(args).current_dir(cwd).env("REGISTRY_LOG", "error");
    cmd
}

/// Run `registry-inspect` without checking its exit status.
pub fn inspect(cwd: &Path, args: &[&str]) -> Result<Output> {
    let mut cmd = inspect_command(cwd, args);
    cmd.output()
        .with_context(|| format!("failed to run command: {:?}", cmd))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn stdout_json(output: &Output) -> Result<Value> {
    serde_json::from_slice(&output.stdout).with_context(|| {
        format!(
            "stdout is not JSON: {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}
