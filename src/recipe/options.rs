// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Recipe options.
//!
//! ```text
//! OPTION_TABLE (static, ordered)
//!   (name, default, role)
//!        |
//!        v
//! Options { name -> bool }
//!   defaults + overrides from [options]
//!   fPIC removed on Windows
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::settings::Os;
use crate::error::RecipeError;

/// How an option takes part in definition derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionRole {
    /// Emitted as `NAME_UPPERCASED = ON|OFF`.
    Definition,
    /// The shared/static switch, emitted inverted as `POCO_STATIC`.
    StaticToggle,
    /// Position-independent code; handled by the toolchain, never a definition.
    PositionIndependentCode,
}

/// One declared recipe option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub default: bool,
    pub role: OptionRole,
}

const fn definition(name: &'static str, default: bool) -> OptionSpec {
    OptionSpec {
        name,
        default,
        role: OptionRole::Definition,
    }
}

pub const SHARED: &str = "shared";
pub const FPIC: &str = "fPIC";
pub const ENABLE_NETSSL_WIN: &str = "enable_netssl_win";

/// Every option the recipe declares, in declaration order.
pub const OPTION_TABLE: &[OptionSpec] = &[
    OptionSpec {
        name: SHARED,
        default: false,
        role: OptionRole::StaticToggle,
    },
    OptionSpec {
        name: FPIC,
        default: true,
        role: OptionRole::PositionIndependentCode,
    },
    definition("enable_encodings", true),
    definition("enable_encodings_compiler", false),
    definition("enable_xml", true),
    definition("enable_json", true),
    definition("enable_mongodb", false),
    definition("enable_redis", false),
    definition("enable_pdf", false),
    definition("enable_util", true),
    definition("enable_net", true),
    definition("enable_netssl", false),
    definition(ENABLE_NETSSL_WIN, false),
    definition("enable_crypto", false),
    definition("enable_data", true),
    definition("enable_data_sqlite", true),
    definition("enable_data_mysql", false),
    definition("enable_data_odbc", false),
    definition("enable_sevenzip", false),
    definition("enable_zip", true),
    definition("enable_apacheconnector", false),
    definition("enable_cppparser", false),
    definition("enable_pocodoc", false),
    definition("enable_pagecompiler", false),
    definition("enable_pagecompiler_file2page", false),
    definition("force_openssl", true),
    definition("enable_tests", false),
    definition("poco_unbundled", false),
];

/// Looks up an option declaration by name.
///
/// Matching ignores ASCII case; configuration sources may lowercase keys.
#[must_use]
pub fn spec(name: &str) -> Option<&'static OptionSpec> {
    OPTION_TABLE
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
}

/// Option values for one invocation.
///
/// Always holds a value for every declared option, except options the
/// target platform removes (see [`Options::for_os`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, bool>", into = "BTreeMap<String, bool>")]
pub struct Options {
    values: BTreeMap<&'static str, bool>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            values: OPTION_TABLE
                .iter()
                .map(|spec| (spec.name, spec.default))
                .collect(),
        }
    }
}

impl Options {
    /// Builds options from defaults plus the given overrides.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::UnknownOption`] for a name the recipe does not declare.
    pub fn with_overrides<I, S>(overrides: I) -> Result<Self, RecipeError>
    where
        I: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        for (name, value) in overrides {
            options.set(name.as_ref(), value)?;
        }
        Ok(options)
    }

    /// Sets one option.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::UnknownOption`] for a name the recipe does not declare.
    pub fn set(&mut self, name: &str, value: bool) -> Result<(), RecipeError> {
        let spec = spec(name).ok_or_else(|| RecipeError::UnknownOption {
            name: name.to_string(),
        })?;
        self.values.insert(spec.name, value);
        Ok(())
    }

    /// Returns the value of an option, or `None` when it was removed.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<bool> {
        spec(name).and_then(|spec| self.values.get(spec.name).copied())
    }

    /// Returns whether an option is present and enabled.
    #[must_use]
    pub fn enabled(&self, name: &str) -> bool {
        self.get(name).unwrap_or(false)
    }

    /// Returns whether the package is built as shared libraries.
    #[must_use]
    pub fn shared(&self) -> bool {
        self.enabled(SHARED)
    }

    /// Returns a copy with the options the platform does not support removed.
    ///
    /// Windows has no `fPIC` option.
    #[must_use]
    pub fn for_os(&self, os: Os) -> Self {
        let mut options = self.clone();
        match os {
            Os::Windows => {
                options.values.remove(FPIC);
            }
            Os::Linux | Os::Macos | Os::FreeBsd => {}
        }
        options
    }

    /// Iterates present options in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static OptionSpec, bool)> + '_ {
        OPTION_TABLE
            .iter()
            .filter_map(|spec| self.get(spec.name).map(|value| (spec, value)))
    }

    /// Number of present options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when no option is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TryFrom<BTreeMap<String, bool>> for Options {
    type Error = RecipeError;

    fn try_from(map: BTreeMap<String, bool>) -> Result<Self, Self::Error> {
        Self::with_overrides(map)
    }
}

impl From<Options> for BTreeMap<String, bool> {
    fn from(options: Options) -> Self {
        options
            .values
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }
}
