// Path resolution module
// Joins the public root with a caller-supplied segment using lexical
// normalisation: `.` vanishes, `..` pops, a leading separator stays under root

use std::path::{Component, Path, PathBuf};

use super::ListingError;

/// Resolve `relative` against `root`.
///
/// With `confine` set, a `..` that would climb above `root` is rejected as
/// [`ListingError::PermissionDenied`]. Without it, `..` keeps popping into
/// the root's own segments (`public` + `../secret` is `secret`), and only
/// goes past them with literal `..` segments.
pub fn resolve(root: &Path, relative: &str, confine: bool) -> Result<PathBuf, ListingError> {
    let mut parts: Vec<Component<'_>> = root.components().collect();
    let floor = parts.len();

    for component in Path::new(relative).components() {
        match component {
            Component::Normal(_) => parts.push(component),
            Component::ParentDir => {
                if confine && parts.len() <= floor {
                    return Err(ListingError::PermissionDenied {
                        path: root.join(relative.trim_start_matches(['/', '\\'])),
                    });
                }
                match parts.last() {
                    Some(Component::Normal(_)) => {
                        parts.pop();
                    }
                    // `..` at the filesystem root stays at the root
                    Some(Component::RootDir | Component::Prefix(_)) => {}
                    _ => parts.push(component),
                }
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    if parts.is_empty() {
        return Ok(PathBuf::from("."));
    }
    Ok(parts.iter().collect())
}
