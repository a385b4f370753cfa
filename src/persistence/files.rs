use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the data directory, both local and under $HOME
pub const DATA_DIR_NAME: &str = ".dayplan";

/// Environment variable that pins the data directory
pub const HOME_ENV: &str = "DAYPLAN_HOME";

/// Where planner data lives. Resolution order: `$DAYPLAN_HOME`, the nearest
/// `.dayplan` in the working directory or above it, `~/.dayplan`.
pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(home) = env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }

    let cwd = env::current_dir().context("Could not determine current directory")?;
    if let Some(project_dir) = find_local_dir(&cwd) {
        return Ok(project_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DATA_DIR_NAME))
}

/// Closest ancestor of `start_dir` (itself included) holding a `.dayplan` directory
fn find_local_dir(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Resolve the data directory and create it on first use
pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = get_data_dir()?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    Ok(dir)
}

/// `dayplan init`: create `./.dayplan`, refusing if it is already there
pub fn init_local_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let data_dir = current_dir.join(DATA_DIR_NAME);

    if data_dir.exists() {
        anyhow::bail!("Planner directory already exists: {}", data_dir.display());
    }

    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create directory: {}", data_dir.display()))?;

    Ok(data_dir)
}

/// Directory holding one file per persisted key
pub fn store_dir() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join("store"))
}

/// Path to config.toml
pub fn config_file() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join("config.toml"))
}

/// Default path of the markdown report for `date`
pub fn report_file(date: chrono::NaiveDate) -> Result<PathBuf> {
    let filename = format!("report-{}.md", date.format("%Y-%m-%d"));
    Ok(ensure_data_dir()?.join(filename))
}

/// Replace `path` with `content` in one step; readers never see a partial file
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> io::Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no parent directory"))?;

    // Sibling temp file; rename only works within one filesystem
    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Contents of `path`, or "" when there is no such file
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_local_dir_walks_up() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data_dir = temp_dir.path().join(DATA_DIR_NAME);
        fs::create_dir_all(&data_dir).unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_local_dir(&nested), Some(data_dir));
    }

    #[test]
    fn test_find_local_dir_ignores_plain_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("project");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join(DATA_DIR_NAME), "not a dir").unwrap();

        assert_ne!(find_local_dir(&nested), Some(nested.join(DATA_DIR_NAME)));
    }

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.txt");

        atomic_write(&test_file, "first").unwrap();
        atomic_write(&test_file, "second").unwrap();

        assert_eq!(read_file(&test_file).unwrap(), "second");
    }

    #[test]
    fn test_atomic_write_missing_dir_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("missing").join("test.txt");
        assert!(atomic_write(&test_file, "x").is_err());
    }

    #[test]
    fn test_read_nonexistent_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("nonexistent.txt");

        assert_eq!(read_file(&test_file).unwrap(), "");
    }
}
