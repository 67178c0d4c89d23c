// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with parallel traversal and async copy.
//!
//! ```text
//! walk:  find_files()      ignore::WalkParallel + wax file-name glob
//!        WalkOptions       max_depth, hidden, gitignore, threads
//! copy:  copy_file_async()     tokio::fs copy, parents created
//!        copy_symlink_async()  recreate link with the same target
//! ```

pub mod copy;
pub mod walk;
