// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! ProcessBuilder::new("cmake")
//!   .arg() .name() .stderr_flags()
//!   .run_with_cancellation(token)
//!       --> tokio::process::Command
//!           stream stdout/stderr
//!       --> ProcessOutput { exit_code, stderr, interrupted }
//! ```

pub mod builder;
mod io;
mod runner;
