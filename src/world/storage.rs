//! Physical storage of worlds and their files.
//!
//! All methods are blocking and are meant to be run on the blocking thread
//! pool. Auto-named entries are allocated with exclusive-create primitives
//! (`create_new` for files, non-recursive `create_dir` for worlds), so two
//! concurrent uploads never end up with the same name.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::naming::{numbered_name, validate_component};
use super::PICTURES_DIRECTORY_NAME;
use crate::{AartError, Result};

/// Which directory of a world an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// Files directly inside the world directory.
    World,
    /// Files inside the world's `pictures` subdirectory.
    Pictures,
}

/// Storage for worlds rooted at a single directory.
///
/// ```text
/// {root}/
/// ├── 3f2b.../
/// │   ├── 0.json
/// │   ├── 1.png
/// │   └── pictures/
/// │       └── 0.png
/// └── ...
/// ```
#[derive(Debug, Clone)]
pub struct WorldStorage {
    root: PathBuf,
}

impl WorldStorage {
    /// Create storage rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        Ok(Self { root })
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a world directory.
    pub fn world_path(&self, world: &str) -> Result<PathBuf> {
        validate_component("world name", world)?;
        Ok(self.root.join(world))
    }

    /// Path of the directory backing `collection` in `world`.
    pub fn collection_path(&self, world: &str, collection: Collection) -> Result<PathBuf> {
        let world_path = self.world_path(world)?;
        Ok(match collection {
            Collection::World => world_path,
            Collection::Pictures => world_path.join(PICTURES_DIRECTORY_NAME),
        })
    }

    /// Whether a world directory exists.
    pub fn world_exists(&self, world: &str) -> Result<bool> {
        Ok(self.world_path(world)?.is_dir())
    }

    /// List the names of all worlds, sorted.
    pub fn list_worlds(&self) -> Result<Vec<String>> {
        list_entries(&self.root, EntryKind::Directory)
    }

    /// List the file names in a world collection, sorted.
    ///
    /// Fails with `NotFound` if the world does not exist. A world without a
    /// `pictures` directory has no pictures.
    pub fn list_files(&self, world: &str, collection: Collection) -> Result<Vec<String>> {
        if !self.world_exists(world)? {
            return Err(AartError::NotFound(format!("world '{world}'")));
        }
        list_entries(
            &self.collection_path(world, collection)?,
            EntryKind::File,
        )
    }

    /// Create a world with a fresh random name and store `content` as its
    /// first file. Returns the world name.
    pub fn create_world(&self, content: &[u8], extension: &str) -> Result<String> {
        validate_component("extension", extension)?;
        fs::create_dir_all(&self.root)?;

        let name = loop {
            let candidate = Uuid::new_v4().to_string();
            match fs::create_dir(self.root.join(&candidate)) {
                Ok(()) => break candidate,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        };

        let file_name = write_unique(&self.root.join(&name), content, extension)?;
        tracing::info!(world = %name, file = %file_name, "Created world");
        Ok(name)
    }

    /// Store `content` under the smallest unused `{n}.{extension}` name in
    /// the collection, creating directories as needed. Returns the file name.
    pub fn add_file(
        &self,
        world: &str,
        collection: Collection,
        content: &[u8],
        extension: &str,
    ) -> Result<String> {
        validate_component("extension", extension)?;
        let dir = self.collection_path(world, collection)?;
        fs::create_dir_all(&dir)?;

        let file_name = write_unique(&dir, content, extension)?;
        tracing::debug!(world, ?collection, file = %file_name, size = content.len(), "Stored file");
        Ok(file_name)
    }

    /// Store `content` under exactly `file_name`, replacing any existing file.
    pub fn put_file(
        &self,
        world: &str,
        collection: Collection,
        file_name: &str,
        content: &[u8],
    ) -> Result<()> {
        validate_component("file name", file_name)?;
        if collection == Collection::World && file_name == PICTURES_DIRECTORY_NAME {
            return Err(AartError::Validation(format!(
                "'{PICTURES_DIRECTORY_NAME}' is reserved for the pictures collection"
            )));
        }
        let dir = self.collection_path(world, collection)?;
        fs::create_dir_all(&dir)?;

        let path = dir.join(file_name);
        if path.is_dir() {
            return Err(AartError::Validation(format!(
                "'{file_name}' is a directory"
            )));
        }

        fs::write(&path, content)?;
        tracing::debug!(world, ?collection, file = file_name, size = content.len(), "Stored named file");
        Ok(())
    }

    /// Delete a world and everything in it.
    ///
    /// Returns `true` if the world was deleted, `false` if it didn't exist.
    pub fn delete_world(&self, world: &str) -> Result<bool> {
        remove_tree(&self.world_path(world)?)
    }

    /// Delete a world's `pictures` directory, leaving its other files alone.
    ///
    /// Returns `true` if the directory was deleted, `false` if it didn't exist.
    pub fn delete_pictures(&self, world: &str) -> Result<bool> {
        remove_tree(&self.collection_path(world, Collection::Pictures)?)
    }

    /// Delete a single file.
    ///
    /// Returns `true` if the file was deleted, `false` if there was no
    /// regular file by that name.
    pub fn delete_file(&self, world: &str, collection: Collection, file_name: &str) -> Result<bool> {
        validate_component("file name", file_name)?;
        let path = self.collection_path(world, collection)?.join(file_name);

        match fs::symlink_metadata(&path) {
            Ok(meta) if meta.is_dir() => return Ok(false),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        }

        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum EntryKind {
    File,
    Directory,
}

/// Names of entries of the given kind in `dir`. A missing directory, or a
/// non-directory in its place, is empty.
fn list_entries(dir: &Path, kind: EntryKind) -> Result<Vec<String>> {
    if !is_directory(dir)? {
        return Ok(Vec::new());
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let wanted = match kind {
            EntryKind::File => file_type.is_file(),
            EntryKind::Directory => file_type.is_dir(),
        };
        if !wanted {
            continue;
        }
        // Names that aren't valid UTF-8 can't be addressed through the API.
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// Write `content` to the first `{n}.{extension}` in `dir` that can be
/// exclusively created.
fn write_unique(dir: &Path, content: &[u8], extension: &str) -> Result<String> {
    let mut n: u64 = 0;
    loop {
        let name = numbered_name(n, extension);
        let path = dir.join(&name);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                let written = file.write_all(content);
                drop(file);
                if let Err(e) = written {
                    let _ = fs::remove_file(&path);
                    return Err(e.into());
                }
                return Ok(name);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Whether `path` resolves to a directory.
fn is_directory(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        // A regular file somewhere up the path makes this one unreachable.
        Err(_) if path.parent().is_some_and(|parent| !parent.is_dir()) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Recursively delete the directory at `path`. Anything that isn't a
/// directory counts as absent.
fn remove_tree(path: &Path) -> Result<bool> {
    if !is_directory(path)? {
        return Ok(false);
    }
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
