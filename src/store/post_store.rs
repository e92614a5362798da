//! Post Store
//!
//! JSON-file backed, insertion-ordered collection of posts.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::error::{BlogError, Result};
use crate::model::{NewPost, Post, PostId, PostPatch};

/// The post collection and its backing file
///
/// ## Concurrency: Single Writer
/// - Reads take the read lock and may run concurrently
/// - Mutations hold the write lock across the in-memory change *and* the
///   file write, so the file always reflects some serial order of writes
/// - A failed file write rolls the in-memory change back before the lock
///   is released
pub struct PostStore {
    /// Backing JSON file
    path: PathBuf,

    /// Posts in insertion order
    posts: RwLock<Vec<Post>>,
}

impl PostStore {
    /// Open the store backed by `path`
    ///
    /// A missing file, or one that does not hold a JSON array of posts,
    /// opens as an empty store. Other I/O errors are returned.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let posts = Self::load(&path)?;

        Ok(Self {
            path,
            posts: RwLock::new(posts),
        })
    }

    fn load(path: &Path) -> Result<Vec<Post>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    "Failed to load posts from {}: file not found. Starting with an empty list.",
                    path.display()
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Vec<Post>>(&bytes) {
            Ok(posts) => {
                tracing::info!("Loaded {} posts from {}", posts.len(), path.display());
                Ok(posts)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load posts from {}: {}. Starting with an empty list.",
                    path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Write the current collection to the backing file
    pub fn save(&self) -> Result<()> {
        let posts = self.posts.read();
        self.write_file(&posts)
    }

    /// Replace the backing file with `posts` (caller holds a lock)
    fn write_file(&self, posts: &[Post]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(posts)?;

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, bytes)?;
        fs::rename(&tmp_path, &self.path)?;

        tracing::trace!("Wrote {} posts to {}", posts.len(), self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name: OsString = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All posts in store order
    pub fn list(&self) -> Vec<Post> {
        self.posts.read().clone()
    }

    /// Look up a post by id
    pub fn get(&self, id: PostId) -> Option<Post> {
        self.posts.read().iter().find(|post| post.id == id).cloned()
    }

    /// Run `f` against the collection under the read lock
    pub fn with_posts<R>(&self, f: impl FnOnce(&[Post]) -> R) -> R {
        let posts = self.posts.read();
        f(&posts)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append a new post with the next free id
    ///
    /// The id is one more than the largest id currently stored, so ids freed
    /// by deleting the newest post are handed out again. Fails with
    /// `IdsExhausted` when the largest id is already `PostId::MAX`.
    pub fn create(&self, new: NewPost) -> Result<Post> {
        let mut posts = self.posts.write();

        let max_id = posts.iter().map(|post| post.id).max().unwrap_or(0);
        let id = max_id
            .checked_add(1)
            .ok_or(BlogError::IdsExhausted(max_id))?;
        let post = Post::from_new(id, new);
        posts.push(post.clone());

        if let Err(e) = self.write_file(&posts) {
            posts.pop();
            return Err(e);
        }

        tracing::debug!("Created post {}", id);
        Ok(post)
    }

    /// Merge `patch` into the post with `id`
    ///
    /// Returns `Ok(None)` when no such post exists.
    pub fn update(&self, id: PostId, patch: PostPatch) -> Result<Option<Post>> {
        let mut posts = self.posts.write();

        let Some(index) = posts.iter().position(|post| post.id == id) else {
            return Ok(None);
        };

        let previous = posts[index].clone();
        posts[index].apply(patch);
        let updated = posts[index].clone();

        if let Err(e) = self.write_file(&posts) {
            posts[index] = previous;
            return Err(e);
        }

        tracing::debug!("Updated post {}", id);
        Ok(Some(updated))
    }

    /// Remove the post with `id`
    ///
    /// Returns whether a post was removed. Nothing is written when the id is
    /// unknown.
    pub fn delete(&self, id: PostId) -> Result<bool> {
        let mut posts = self.posts.write();

        let Some(index) = posts.iter().position(|post| post.id == id) else {
            return Ok(false);
        };

        let removed = posts.remove(index);

        if let Err(e) = self.write_file(&posts) {
            posts.insert(index, removed);
            return Err(e);
        }

        tracing::debug!("Deleted post {}", id);
        Ok(true)
    }

    /// Replace the whole collection and persist it
    pub fn replace_all(&self, replacement: Vec<Post>) -> Result<()> {
        let mut posts = self.posts.write();

        let previous = std::mem::replace(&mut *posts, replacement);
        if let Err(e) = self.write_file(&posts) {
            *posts = previous;
            return Err(e);
        }

        tracing::debug!("Replaced store contents with {} posts", posts.len());
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of posts
    pub fn len(&self) -> usize {
        self.posts.read().len()
    }

    /// True when the store holds no posts
    pub fn is_empty(&self) -> bool {
        self.posts.read().is_empty()
    }
}
