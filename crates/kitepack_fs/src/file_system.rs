use std::{io, path::Path, sync::Arc};

/// The only door to the disk. Resolver, module loader and emitter all go through it.
pub trait FileSystem: Send + Sync {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    String::from_utf8(self.read(path)?)
      .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
  }

  fn is_file(&self, path: &Path) -> bool;

  fn is_dir(&self, path: &Path) -> bool;

  fn create_dir_all(&self, path: &Path) -> io::Result<()>;

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;
}

impl<T: FileSystem + ?Sized> FileSystem for Arc<T> {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    (**self).read(path)
  }

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    (**self).read_to_string(path)
  }

  fn is_file(&self, path: &Path) -> bool {
    (**self).is_file(path)
  }

  fn is_dir(&self, path: &Path) -> bool {
    (**self).is_dir(path)
  }

  fn create_dir_all(&self, path: &Path) -> io::Result<()> {
    (**self).create_dir_all(path)
  }

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    (**self).write(path, content)
  }
}
