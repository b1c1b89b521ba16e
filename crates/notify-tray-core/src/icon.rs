//! Image resource shown in the notification area.

use crate::{ImageHandle, Shell, TrayError, TrayResult};

use std::{
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use tracing::{debug, instrument};

/// OS image-type classifier selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// `.ico`
    Icon,
    /// `.bmp`
    Bitmap,
    /// `.cur`
    Cursor,
}

impl ImageKind {
    /// Classify a path by its extension, case-insensitively.
    #[track_caller]
    pub fn from_path(path: &Path) -> TrayResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("ico") => Ok(Self::Icon),
            Some("bmp") => Ok(Self::Bitmap),
            Some("cur") => Ok(Self::Cursor),
            _ => Err(TrayError::UnsupportedFormat {
                path: path.to_path_buf(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// Loaded image that exclusively owns its OS handle.
///
/// The handle is valid for the whole lifetime of the value and released
/// when it is dropped.
pub struct Icon<S: Shell> {
    shell: S,
    handle: ImageHandle,
    kind: ImageKind,
    path: PathBuf,
}

impl<S: Shell> Icon<S> {
    /// Load an `.ico`, `.bmp` or `.cur` file through `shell`.
    ///
    /// Unsupported extensions fail before the loader is called.
    #[track_caller]
    #[instrument(skip(shell))]
    pub fn load(shell: S, path: &Path) -> TrayResult<Self> {
        let kind = ImageKind::from_path(path)?;

        let handle = shell
            .load_image(path, kind)
            .map_err(|code| TrayError::ResourceLoadFailed {
                path: path.to_path_buf(),
                code,
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(path = ?path, kind = ?kind, "Image loaded");

        Ok(Self {
            shell,
            handle,
            kind,
            path: path.to_path_buf(),
        })
    }

    /// Native handle, valid while `self` is alive.
    pub fn handle(&self) -> ImageHandle {
        self.handle
    }

    /// Image type the file was loaded as.
    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    /// File the image was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<S: Shell> std::fmt::Debug for Icon<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Icon")
            .field("handle", &self.handle)
            .field("kind", &self.kind)
            .field("path", &self.path)
            .finish()
    }
}

impl<S: Shell> Drop for Icon<S> {
    fn drop(&mut self) {
        self.shell.release_image(self.handle, self.kind);
    }
}
