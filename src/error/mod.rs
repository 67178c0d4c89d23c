// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              PackError (~24 bytes)
//!                     |
//!   +------+------+---+---+-------+-----+------+
//!   |      |      |       |       |     |      |
//!   v      v      v       v       v     v      v
//! Bail   Cfg   Recipe   Build  Package Proc   Fs    Io
//!  Box<str>  Box   Box     Box     Box    Box   Box   Box
//!
//! Sub-errors (unboxed internally):
//!   Config   ParseError, MissingKey, InvalidValue
//!   Recipe   UnknownOption, UnsupportedSettings
//!   Build    StepFailed, Interrupted
//!   Package  MissingArtifact, MissingLibrary
//!   Process  SpawnFailed, NonZeroExit
//!   Fs       NotFound, IoError, IncompleteWalk
//!
//! All variants boxed => PackError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`PackError`].
pub type PackResult<T> = std::result::Result<T, PackError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum PackError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Option or settings combination rejected by the recipe.
    #[error("recipe error: {0}")]
    Recipe(#[from] Box<RecipeError>),

    /// Build tool invocation failed.
    #[error("build error: {0}")]
    Build(#[from] Box<BuildError>),

    /// Packaging failed.
    #[error("package error: {0}")]
    Package(#[from] Box<PackageError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

/// Create a fatal [`PackError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> PackError {
    PackError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for PackError {
                fn from(err: $error) -> Self {
                    PackError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    RecipeError => Recipe,
    BuildError => Build,
    PackageError => Package,
    ProcessError => Process,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Recipe Errors ---

/// Errors raised while resolving options and settings.
#[derive(Debug, Error)]
pub enum RecipeError {
    /// Option name not declared by the recipe.
    #[error("unknown option '{name}'")]
    UnknownOption { name: String },

    /// Settings combination the recipe cannot build.
    #[error("unsupported settings: {message}")]
    UnsupportedSettings { message: String },
}

// --- Build Errors ---

/// Build tool invocation errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A configure or build step failed.
    #[error("{tool} {step} failed: {message}")]
    StepFailed {
        tool: String,
        step: String,
        message: String,
    },

    /// A step was interrupted by the user.
    #[error("{tool} {step} was interrupted")]
    Interrupted { tool: String, step: String },
}

// --- Package Errors ---

/// Packaging errors.
#[derive(Debug, Error)]
pub enum PackageError {
    /// A required copy rule matched nothing.
    #[error("missing artifact: no '{pattern}' in {src}")]
    MissingArtifact { pattern: String, src: String },

    /// A library listed in the consumer info was not produced.
    #[error("missing library '{name}' in {dir}")]
    MissingLibrary { name: String, dir: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a code outside the success set.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Some entries under a directory could not be read.
    #[error("incomplete walk of '{root}': {errors} entries could not be read (first: {first})")]
    IncompleteWalk {
        root: String,
        errors: usize,
        first: String,
    },
}

#[cfg(test)]
mod tests;
