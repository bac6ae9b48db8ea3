use crate::utils::config::SCHEMA_VERSION;
use crate::utils::diagnostics::Diagnostics;
use anyhow::Result;
use log::warn;
use std::path::{Path, PathBuf};

/// Validate the timing log path given on the command line
pub fn validate_log_path(log_path: &Path) -> Result<()> {
    if log_path.as_os_str().is_empty() {
        anyhow::bail!("Log path cannot be empty");
    }

    if !log_path.exists() {
        anyhow::bail!("Log file does not exist: {}", log_path.display());
    }

    if log_path.is_dir() {
        anyhow::bail!("Log path is a directory: {}", log_path.display());
    }

    Ok(())
}

/// Directory outputs are written to: the override, else the log's directory
pub fn output_dir_for(log_path: &Path, output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => log_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    }
}

/// Output path `<dir>/<log stem><suffix>`
pub fn output_file(log_path: &Path, output_dir: Option<&Path>, suffix: &str) -> PathBuf {
    let stem = log_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "timing".to_string());
    output_dir_for(log_path, output_dir).join(format!("{}{}", stem, suffix))
}

/// Turn violations into a command failure when running strict
pub fn enforce_strict(diagnostics: &Diagnostics, strict: bool) -> Result<()> {
    if diagnostics.is_empty() {
        return Ok(());
    }

    warn!("{} violations found in the log", diagnostics.len());
    if strict {
        anyhow::bail!(
            "{} data-integrity violations found (strict mode)",
            diagnostics.len()
        );
    }

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Fronctocol Timing v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Timing analysis for fronctocol runtime logs.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::Violation;

    #[test]
    fn test_output_file_next_to_log() {
        let path = output_file(Path::new("runs/run1.log"), None, "_raw.csv");
        assert_eq!(path, PathBuf::from("runs/run1_raw.csv"));
    }

    #[test]
    fn test_output_file_override_dir() {
        let path = output_file(
            Path::new("runs/run1.log"),
            Some(Path::new("out")),
            "_by_name.csv",
        );
        assert_eq!(path, PathBuf::from("out/run1_by_name.csv"));
    }

    #[test]
    fn test_bare_file_name_writes_to_cwd() {
        assert_eq!(output_dir_for(Path::new("run.log"), None), PathBuf::new());
    }

    #[test]
    fn test_validate_log_path() {
        assert!(validate_log_path(Path::new("")).is_err());
        assert!(validate_log_path(Path::new("/definitely/not/here.log")).is_err());
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_log_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_enforce_strict() {
        let mut diagnostics = Diagnostics::new();
        assert!(enforce_strict(&diagnostics, true).is_ok());

        diagnostics.report(Violation::MalformedLine {
            line: 1,
            reason: "bad".to_string(),
        });
        assert!(enforce_strict(&diagnostics, false).is_ok());
        assert!(enforce_strict(&diagnostics, true).is_err());
    }
}
