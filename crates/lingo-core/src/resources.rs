//! Locale resource providers for dependency injection in the catalog loader.
//!
//! The loader only needs to list resource names and fetch their bytes. How
//! the resources are packaged is up to the provider:
//!
//! - [`EmbeddedResources`] serves the `locales/` directory compiled into the
//!   library (feature `embedded`, on by default)
//! - [`DirectoryResources`] reads `*.json` files from a directory on disk
//! - [`MemoryResources`] holds resources in memory, for tests and callers
//!   that build locale data at runtime
//!
//! ```
//! use lingo_core::{Catalog, MemoryResources};
//!
//! let resources = MemoryResources::new()
//!     .with("en.json", r#"{"hello": "Hello"}"#)
//!     .with("fr.json", r#"{"hello": "Bonjour"}"#);
//! let catalog = Catalog::load(&resources).unwrap();
//! assert_eq!(catalog.available().len(), 2);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Maximum size of a single locale file read from disk (1 MiB).
pub const MAX_RESOURCE_SIZE: u64 = 1024 * 1024;

/// Read-only access to raw locale resources.
pub trait ResourceProvider: Send + Sync + std::fmt::Debug {
    /// Names of the available resources (e.g. `en.json`), sorted.
    fn list(&self) -> io::Result<Vec<String>>;

    /// Raw bytes of the named resource.
    fn read(&self, name: &str) -> io::Result<Vec<u8>>;
}

/// Locales compiled into the library.
#[cfg(feature = "embedded")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedResources;

#[cfg(feature = "embedded")]
#[derive(rust_embed::RustEmbed)]
#[folder = "locales/"]
struct BundledLocales;

#[cfg(feature = "embedded")]
impl ResourceProvider for EmbeddedResources {
    fn list(&self) -> io::Result<Vec<String>> {
        let mut names: Vec<String> = BundledLocales::iter().map(|n| n.into_owned()).collect();
        names.sort();
        Ok(names)
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        BundledLocales::get(name)
            .map(|file| file.data.into_owned())
            .ok_or_else(|| not_found(name))
    }
}

/// Locale files read from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceProvider for DirectoryResources {
    fn list(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid resource name: {name}"),
            ));
        }

        let path = self.root.join(name);
        let metadata = fs::symlink_metadata(&path)?;
        if metadata.file_type().is_symlink() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("refusing to read symlink: {}", path.display()),
            ));
        }
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a regular file: {}", path.display()),
            ));
        }
        if metadata.len() > MAX_RESOURCE_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "file too large: {} ({} bytes, limit {} bytes)",
                    path.display(),
                    metadata.len(),
                    MAX_RESOURCE_SIZE
                ),
            ));
        }

        fs::read(&path)
    }
}

/// In-memory resources keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryResources {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, replacing any previous content under the same name.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files.insert(name.into(), content.into());
    }

    /// Builder form of [`MemoryResources::insert`].
    pub fn with(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(name, content);
        self
    }
}

impl ResourceProvider for MemoryResources {
    fn list(&self) -> io::Result<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        self.files.get(name).cloned().ok_or_else(|| not_found(name))
    }
}

fn not_found(name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("locale resource not found: {name}"),
    )
}
