use std::{
  io::{self, Read, Write},
  path::Path,
};

use vfs::{MemoryFS, VfsPath};

use crate::FileSystem;

/// In-memory file system. Paths are treated as absolute, `/` separated.
#[derive(Debug, Clone)]
pub struct MemoryFileSystem {
  root: VfsPath,
}

impl Default for MemoryFileSystem {
  fn default() -> Self {
    Self { root: VfsPath::new(MemoryFS::new()) }
  }
}

impl MemoryFileSystem {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds a file system holding `files`, creating parent directories as needed.
  pub fn with_files<P: AsRef<Path>, C: AsRef<[u8]>>(
    files: impl IntoIterator<Item = (P, C)>,
  ) -> io::Result<Self> {
    let fs = Self::new();
    for (path, content) in files {
      let path = path.as_ref();
      if let Some(parent) = path.parent() {
        fs.create_dir_all(parent)?;
      }
      fs.write(path, content.as_ref())?;
    }
    Ok(fs)
  }

  fn vfs_path(&self, path: &Path) -> io::Result<VfsPath> {
    let path = path.to_string_lossy().replace('\\', "/");
    let relative = path.trim_start_matches('/').trim_end_matches('/');
    if relative.is_empty() {
      return Ok(self.root.clone());
    }
    self.root.join(relative).map_err(into_io_error)
  }
}

fn into_io_error(err: vfs::VfsError) -> io::Error {
  io::Error::other(err.to_string())
}

impl FileSystem for MemoryFileSystem {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    let vfs_path = self.vfs_path(path)?;
    if !vfs_path.is_file().unwrap_or(false) {
      return Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("No such file: {}", path.display()),
      ));
    }
    let mut file = vfs_path.open_file().map_err(into_io_error)?;
    let mut content = Vec::new();
    file.read_to_end(&mut content)?;
    Ok(content)
  }

  fn is_file(&self, path: &Path) -> bool {
    self.vfs_path(path).is_ok_and(|p| p.is_file().unwrap_or(false))
  }

  fn is_dir(&self, path: &Path) -> bool {
    self.vfs_path(path).is_ok_and(|p| p.is_dir().unwrap_or(false))
  }

  fn create_dir_all(&self, path: &Path) -> io::Result<()> {
    self.vfs_path(path)?.create_dir_all().map_err(into_io_error)
  }

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    let vfs_path = self.vfs_path(path)?;
    let mut file = vfs_path.create_file().map_err(into_io_error)?;
    file.write_all(content)?;
    file.flush()
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use super::MemoryFileSystem;
  use crate::FileSystem;

  #[test]
  fn write_then_read() {
    let fs = MemoryFileSystem::with_files([("/project/src/a.js", "export default 1")]).unwrap();
    assert!(fs.is_file(Path::new("/project/src/a.js")));
    assert!(fs.is_dir(Path::new("/project/src")));
    assert!(!fs.is_file(Path::new("/project/src")));
    assert_eq!(fs.read_to_string(Path::new("/project/src/a.js")).unwrap(), "export default 1");
  }

  #[test]
  fn missing_file_is_not_found() {
    let fs = MemoryFileSystem::new();
    let err = fs.read(Path::new("/nope.js")).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    assert!(!fs.is_dir(Path::new("/nope")));
  }
}
