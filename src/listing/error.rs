// Listing error module
// Closed set of failure kinds; all of them surface as the same 500 payload

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("no such file or directory, scandir '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("not a directory, scandir '{}'", path.display())]
    NotADirectory { path: PathBuf },

    #[error("permission denied, scandir '{}'", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("{source}, scandir '{}'", path.display())]
    OtherIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ListingError {
    /// Classify an I/O failure that happened while reading `path`
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::OtherIo { path, source: err },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(kind: io::ErrorKind) -> ListingError {
        ListingError::from_io(Path::new("public/x"), io::Error::from(kind))
    }

    #[test]
    fn test_io_kinds_map_to_variants() {
        assert!(matches!(
            classify(io::ErrorKind::NotFound),
            ListingError::NotFound { .. }
        ));
        assert!(matches!(
            classify(io::ErrorKind::NotADirectory),
            ListingError::NotADirectory { .. }
        ));
        assert!(matches!(
            classify(io::ErrorKind::PermissionDenied),
            ListingError::PermissionDenied { .. }
        ));
        assert!(matches!(
            classify(io::ErrorKind::Interrupted),
            ListingError::OtherIo { .. }
        ));
    }

    #[test]
    fn test_message_names_path() {
        let err = classify(io::ErrorKind::NotFound);
        assert_eq!(
            err.to_string(),
            "no such file or directory, scandir 'public/x'"
        );
    }
}
