use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use crate::runtime::Runtime;

/// Name of the cache directory created under the working directory.
pub const CACHE_DIR_NAME: &str = "cache";

/// Resolve the cache directory: the explicit one, or `./cache`.
#[tracing::instrument(skip(runtime))]
pub fn resolve_cache_dir<R: Runtime>(runtime: &R, cache_dir: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match cache_dir {
        Some(path) => path,
        None => default_cache_dir(runtime)?,
    };
    info!("Using cache directory: {}", dir.display());
    Ok(dir)
}

#[tracing::instrument(skip(runtime))]
pub fn default_cache_dir<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let cwd = runtime
        .current_dir()
        .context("Could not determine the working directory")?;
    Ok(cwd.join(CACHE_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;

    #[test]
    fn test_default_cache_dir() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_current_dir()
            .returning(|| Ok(PathBuf::from("/srv/site")));

        assert_eq!(
            default_cache_dir(&runtime).unwrap(),
            PathBuf::from("/srv/site/cache")
        );
    }

    #[test]
    fn test_explicit_cache_dir_wins() {
        let mut runtime = MockRuntime::new();
        runtime.expect_current_dir().never();

        let dir = resolve_cache_dir(&runtime, Some(PathBuf::from("/tmp/c"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/c"));
    }

    #[test]
    fn test_current_dir_failure() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_current_dir()
            .returning(|| Err(anyhow::anyhow!("gone")));

        assert!(resolve_cache_dir(&runtime, None).is_err());
    }
}
