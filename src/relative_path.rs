//! Display-path resolution for report output.
//!
//! Analysis engines report absolute paths; printers show them relative to
//! the repository root so tables stay narrow.

use std::path::{Path, PathBuf};

/// Turns a path reported by the analysis engine into the form shown to users.
pub trait RelativePathHelper {
    fn relative_path(&self, path: &str) -> String;
}

impl<T: RelativePathHelper + ?Sized> RelativePathHelper for Box<T> {
    fn relative_path(&self, path: &str) -> String {
        (**self).relative_path(path)
    }
}

/// Shows absolute paths under `base` (the detected repository root in the
/// binary) relative to it.
pub struct BaseDirRelativePathHelper {
    base: PathBuf,
}

impl BaseDirRelativePathHelper {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl RelativePathHelper for BaseDirRelativePathHelper {
    fn relative_path(&self, path: &str) -> String {
        let p = Path::new(path);
        if !p.is_absolute() || !self.base.is_absolute() {
            return path.to_string();
        }
        match pathdiff::diff_paths(p, &self.base) {
            // Paths outside the base would render as `../..`; keep them as given
            Some(rel) if !rel.starts_with("..") => to_display(&rel),
            _ => path.to_string(),
        }
    }
}

/// Passes paths through unchanged.
pub struct SimpleRelativePathHelper;

impl RelativePathHelper for SimpleRelativePathHelper {
    fn relative_path(&self, path: &str) -> String {
        path.to_string()
    }
}

fn to_display(p: &Path) -> String {
    p.components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_relativizes_paths_under_base() {
        let helper = BaseDirRelativePathHelper::new("/work/project");
        assert_eq!(helper.relative_path("/work/project/src/Foo.php"), "src/Foo.php");
        assert_eq!(helper.relative_path("/work/project/phpstan.neon"), "phpstan.neon");
    }

    #[cfg(unix)]
    #[test]
    fn test_keeps_paths_outside_base_and_relative_inputs() {
        let helper = BaseDirRelativePathHelper::new("/work/project");
        assert_eq!(helper.relative_path("/elsewhere/Bar.php"), "/elsewhere/Bar.php");
        assert_eq!(helper.relative_path("src/Baz.php"), "src/Baz.php");
    }

    #[test]
    fn test_display_joins_components_with_slashes() {
        assert_eq!(to_display(Path::new("src//nested/./Foo.php")), "src/nested/Foo.php");
    }

    #[cfg(windows)]
    #[test]
    fn test_display_normalizes_backslashes() {
        assert_eq!(to_display(Path::new("src\\nested\\Foo.php")), "src/nested/Foo.php");
    }

    #[test]
    fn test_simple_helper_is_identity() {
        assert_eq!(SimpleRelativePathHelper.relative_path("/a/b.php"), "/a/b.php");
    }
}
