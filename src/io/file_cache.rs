//! File system abstraction for testability.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

/// Trait for file system access, allowing both real and virtual implementations.
pub trait FileCache: Send + Sync + std::fmt::Debug {
    /// Opens a file for line-oriented reading.
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + '_>>;

    /// Checks if a file exists.
    fn exists(&self, path: &Path) -> bool;

    /// Lists files matching a glob pattern, sorted.
    fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>>;
}

/// Real file system implementation.
#[derive(Debug, Clone, Default)]
pub struct RealFileCache {
    /// Base directory for relative paths.
    pub base_dir: PathBuf,
}

impl RealFileCache {
    /// Creates a new RealFileCache with the given base directory.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Resolves a path relative to the base directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl FileCache for RealFileCache {
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + '_>> {
        let file = File::open(self.resolve(path))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>> {
        let full_pattern = self.resolve(Path::new(pattern));
        let pattern_str = full_pattern.to_string_lossy();

        let mut paths: Vec<PathBuf> = glob::glob(&pattern_str)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .map(|p| {
                p.strip_prefix(&self.base_dir)
                    .map(|p| p.to_path_buf())
                    .unwrap_or(p)
            })
            .collect();
        paths.sort();

        Ok(paths)
    }
}

/// In-memory file system for tests.
///
/// Contents are raw bytes so documents that are not valid UTF-8 can be modelled.
#[derive(Debug, Clone, Default)]
pub struct VirtualFS {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl VirtualFS {
    /// Creates a new empty virtual file system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file to the virtual file system.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), content.into());
    }

    /// Removes a file from the virtual file system.
    pub fn remove_file(&mut self, path: &Path) {
        self.files.remove(path);
    }
}

impl FileCache for VirtualFS {
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + '_>> {
        self.files
            .get(path)
            .map(|content| Box::new(Cursor::new(content.as_slice())) as Box<dyn BufRead + '_>)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "File not found"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>> {
        let glob_pattern = glob::Pattern::new(pattern)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let mut matches: Vec<PathBuf> = self
            .files
            .keys()
            .filter(|p| glob_pattern.matches_path(p))
            .cloned()
            .collect();
        matches.sort();

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;
    use tempfile::tempdir;

    fn read_all(cache: &dyn FileCache, path: &str) -> String {
        let mut content = String::new();
        cache
            .open(Path::new(path))
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    #[test]
    fn test_virtual_fs_basic() {
        let mut vfs = VirtualFS::new();
        vfs.add_file("notes.md", "hello world");

        assert!(vfs.exists(Path::new("notes.md")));
        assert!(!vfs.exists(Path::new("other.md")));
        assert_eq!(read_all(&vfs, "notes.md"), "hello world");

        vfs.remove_file(Path::new("notes.md"));
        assert!(vfs.open(Path::new("notes.md")).is_err());
    }

    #[test]
    fn test_virtual_fs_glob() {
        let mut vfs = VirtualFS::new();
        vfs.add_file("docs/b.md", "");
        vfs.add_file("docs/a.md", "");
        vfs.add_file("README.md", "");
        vfs.add_file("main.go", "");

        assert_eq!(
            vfs.glob("docs/*.md").unwrap(),
            vec![PathBuf::from("docs/a.md"), PathBuf::from("docs/b.md")]
        );
        assert_eq!(vfs.glob("*.go").unwrap(), vec![PathBuf::from("main.go")]);
    }

    #[test]
    fn test_real_file_cache() {
        let dir = tempdir().unwrap();
        let cache = RealFileCache::new(dir.path().to_path_buf());
        fs::write(dir.path().join("doc.md"), "content").unwrap();

        assert!(cache.exists(Path::new("doc.md")));
        assert!(!cache.exists(Path::new("missing.md")));
        assert_eq!(read_all(&cache, "doc.md"), "content");
        assert!(cache.open(Path::new("missing.md")).is_err());
    }

    #[test]
    fn test_real_file_cache_glob() {
        let dir = tempdir().unwrap();
        let cache = RealFileCache::new(dir.path().to_path_buf());

        fs::write(dir.path().join("b.md"), "b").unwrap();
        fs::write(dir.path().join("a.md"), "a").unwrap();
        fs::write(dir.path().join("c.txt"), "c").unwrap();
        fs::create_dir(dir.path().join("dir.md")).unwrap();

        assert_eq!(
            cache.glob("*.md").unwrap(),
            vec![PathBuf::from("a.md"), PathBuf::from("b.md")]
        );
    }
}
