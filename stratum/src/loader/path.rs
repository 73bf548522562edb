//! Path resolution for file-backed loaders.
//!
//! Resource identifiers are resolved relative to the document that declared
//! them. The helpers here are purely lexical: they never touch the
//! filesystem and never follow symlinks.

use std::env;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand a leading `~` component into the home directory.
///
/// Only a bare `~` component is expanded. A resource such as `~ops/app.yaml`
/// names another user's home and is rejected.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if the resource starts with `~name` or the
/// home directory is unknown.
///
/// # Examples
///
/// ```
/// use stratum::loader::path::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/config/app.yaml")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("config/app.yaml"));
///
/// let unchanged = expand_tilde(Path::new("config/app.yaml")).unwrap();
/// assert_eq!(unchanged, Path::new("config/app.yaml"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let mut components = path.components();
    let first = match components.next() {
        Some(Component::Normal(first)) => first,
        _ => return Ok(path.to_path_buf()),
    };

    if first != OsStr::new("~") {
        if first.to_string_lossy().starts_with('~') {
            return Err(Error::InvalidPath {
                path: path.to_path_buf(),
                reason: "resources may start with ~/ but not ~name/".to_string(),
            });
        }
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "no home directory to expand ~ against".to_string(),
    })?;
    let rest = components.as_path();
    if rest.as_os_str().is_empty() {
        return Ok(home);
    }
    Ok(home.join(rest))
}

/// Remove `.` components and fold `..` components where possible.
///
/// Leading `..` components of a relative path are kept, since there is
/// nothing to fold them into.
///
/// # Errors
///
/// Returns an error if an absolute path climbs above its root.
///
/// # Examples
///
/// ```
/// use stratum::loader::path::clean;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(clean(Path::new("/a/./b/../c")).unwrap(), PathBuf::from("/a/c"));
/// assert_eq!(clean(Path::new("./config/../shared/base.yaml")).unwrap(), PathBuf::from("shared/base.yaml"));
/// assert_eq!(clean(Path::new("../up.yaml")).unwrap(), PathBuf::from("../up.yaml"));
/// ```
pub fn clean(path: &Path) -> Result<PathBuf> {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "Path contains too many '..' components (escapes root)"
                            .to_string(),
                    });
                }
                Some(Component::ParentDir | Component::CurDir) | None => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return Ok(PathBuf::from("."));
    }

    Ok(parts.iter().collect())
}

/// Resolve `resource` against the directory of `context`.
///
/// Without a context, or for absolute resources, the resource is used as
/// given. `~` is expanded in either case.
///
/// # Errors
///
/// Returns an error if tilde expansion or cleaning fails.
pub fn resolve_relative(resource: &str, context: Option<&Path>) -> Result<PathBuf> {
    let resource = expand_tilde(Path::new(resource))?;

    let joined = match context {
        Some(ctx) if !resource.is_absolute() => ctx
            .parent()
            .map_or_else(|| resource.clone(), |dir| dir.join(&resource)),
        _ => resource,
    };

    clean(&joined)
}

/// Make a path absolute against the current directory and clean it.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined or the
/// path escapes the root.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = env::current_dir().map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Cannot get current directory: {e}"),
        })?;
        cwd.join(expanded)
    };

    clean(&absolute)
}
