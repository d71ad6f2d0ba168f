//! Read/write access to markdown documents.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::Builder;

/// Source and sink for document contents.
pub trait MarkdownAccess {
    fn read(&self, path: &Path) -> io::Result<String>;
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

impl<T: MarkdownAccess + ?Sized> MarkdownAccess for &T {
    fn read(&self, path: &Path) -> io::Result<String> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        (**self).write(path, contents)
    }
}

/// Documents on the local filesystem, written atomically.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsMarkdown;

impl MarkdownAccess for FsMarkdown {
    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        atomic_write(path, contents)
    }
}

/// Write via a temporary sibling file and rename, keeping the permissions of
/// the file being replaced.
fn atomic_write(path: &Path, contents: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = Builder::new().prefix(".markdown-toc").tempfile_in(parent)?;
    tmp.as_file_mut().write_all(contents.as_bytes())?;
    tmp.as_file_mut().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = fs::metadata(path) {
            let mode = metadata.permissions().mode();
            let _ = fs::set_permissions(tmp.path(), fs::Permissions::from_mode(mode));
        }
    }

    tmp.persist(path).map(|_| ()).map_err(|err| err.error)
}
