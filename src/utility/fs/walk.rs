// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{FsError, Result};
use bon::Builder;
use flume::bounded;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};
use wax::{Glob, Program};

/// Options for parallel directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Maximum depth to traverse (None = unlimited)
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    /// Follow symbolic links
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = false)]
    include_hidden: bool,
    /// Respect .gitignore files
    #[builder(setters(name = with_respect_gitignore), default = true)]
    respect_gitignore: bool,
    /// Number of threads (None = auto-detect based on CPU count)
    #[builder(setters(name = with_threads))]
    threads: Option<usize>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    #[must_use]
    pub const fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Options for collecting build artifacts.
    ///
    /// Every file counts: hidden files and ignore files are not filtered,
    /// and symbolic links are reported instead of followed. A non-recursive
    /// walk only looks at the direct children of the root.
    #[must_use]
    pub fn for_artifacts(recursive: bool) -> Self {
        Self::builder()
            .with_include_hidden(true)
            .with_respect_gitignore(false)
            .maybe_with_max_depth((!recursive).then_some(1))
            .build()
    }
}

/// A file found by [`find_files`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FoundFile {
    path: PathBuf,
    symlink: bool,
}

impl FoundFile {
    /// Full path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the entry itself is a symbolic link.
    #[must_use]
    pub const fn is_symlink(&self) -> bool {
        self.symlink
    }
}

/// Builds a `WalkBuilder` with the given options.
fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    if let Some(depth) = options.max_depth() {
        builder.max_depth(Some(depth));
    }

    builder.follow_links(options.follow_links());
    builder.hidden(!options.include_hidden());

    builder.ignore(options.respect_gitignore());
    builder.parents(options.respect_gitignore());
    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());

    if let Some(threads) = options.threads() {
        builder.threads(threads);
    }

    builder
}

/// Finds files whose name matches a glob pattern using parallel traversal.
///
/// The pattern is matched against the file name only (`*.so*` matches
/// `lib/libPocoNet.so.60`). Symbolic links are reported when they are not
/// followed. Results are sorted by path, so callers see the same order on
/// every run regardless of traversal scheduling.
///
/// # Errors
///
/// Returns an error if:
/// - The root directory does not exist.
/// - The glob pattern is invalid.
/// - Any entry below the root could not be read ([`FsError::IncompleteWalk`]);
///   a partial listing is never returned.
///
/// # Example
/// ```no_run
/// use pocopack::utility::fs::walk::{WalkOptions, find_files};
///
/// let headers = find_files("poco/Foundation/include", "*.h", &WalkOptions::for_artifacts(true))?;
/// for header in headers {
///     println!("{}", header.path().display());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn find_files<P: AsRef<Path>>(
    root: P,
    pattern: &str,
    options: &WalkOptions,
) -> Result<Vec<FoundFile>> {
    let root = root.as_ref();

    if !root.is_dir() {
        return Err(FsError::NotFound(root.display().to_string()).into());
    }

    let glob =
        Glob::new(pattern).map_err(|e| anyhow::anyhow!("invalid glob pattern '{pattern}': {e}"))?;

    // Bounded so a huge tree cannot buffer unbounded paths
    let (tx, rx) = bounded::<FoundFile>(1000);
    let glob = Arc::new(glob);
    let errors: Arc<Mutex<Vec<String>>> = Arc::default();

    let parallel = build_walker(root, options).build_parallel();

    // The walker blocks until every visitor is done, so results are drained
    // on a scoped thread to keep the bounded channel moving.
    let mut found: Vec<FoundFile> = std::thread::scope(|scope| {
        let collector = scope.spawn(move || rx.iter().collect::<Vec<_>>());

        parallel.run(|| {
            let tx = tx.clone();
            let glob = Arc::clone(&glob);
            let errors = Arc::clone(&errors);

            Box::new(move |entry_result| {
                match entry_result {
                    Ok(entry) => {
                        let Some(file_type) = entry.file_type() else {
                            return ignore::WalkState::Continue;
                        };
                        let symlink = file_type.is_symlink();
                        if (file_type.is_file() || symlink)
                            && let Some(name) = entry.file_name().to_str()
                            && glob.is_match(Path::new(name))
                        {
                            let _ = tx.send(FoundFile {
                                path: entry.path().to_path_buf(),
                                symlink,
                            });
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "walk error");
                        errors
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .push(e.to_string());
                    }
                }
                ignore::WalkState::Continue
            })
        });

        drop(tx);
        collector.join().unwrap_or_default()
    });

    let mut errors = std::mem::take(&mut *errors.lock().unwrap_or_else(PoisonError::into_inner));
    if !errors.is_empty() {
        errors.sort();
        return Err(FsError::IncompleteWalk {
            root: root.display().to_string(),
            errors: errors.len(),
            first: errors.swap_remove(0),
        }
        .into());
    }

    found.sort();
    debug!(root = %root.display(), pattern, matches = found.len(), "walk finished");
    Ok(found)
}
