// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build-tool definitions.
//!
//! ```text
//! Options --(table order)--> option definitions
//!   shared  --> POCO_STATIC = !shared
//!   fPIC    --> skipped
//!   other   --> NAME = ON|OFF
//!
//! Options + Settings + BuildType? --> toolchain definitions
//!   CMAKE_POSITION_INDEPENDENT_CODE, CMAKE_BUILD_TYPE,
//!   CMAKE_C_FLAGS / CMAKE_CXX_FLAGS, POCO_MT
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use super::options::{FPIC, OptionRole, Options};
use super::plan::BuildType;
use super::settings::{Arch, Compiler, Libcxx, Settings};

/// Converts a flag into the build tool's boolean spelling.
#[must_use]
pub const fn on_off(value: bool) -> &'static str {
    if value { "ON" } else { "OFF" }
}

/// Insertion-ordered `KEY=VALUE` definitions passed to the build tool.
///
/// Re-inserting a key replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definitions {
    entries: Vec<(String, String)>,
}

impl Definitions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Appends every entry of `other`, replacing duplicates.
    pub fn extend(&mut self, other: &Self) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Definitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}

impl Serialize for Definitions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Maps every option except `fPIC` to a definition, in table order.
#[must_use]
pub fn option_definitions(options: &Options) -> Definitions {
    let mut definitions = Definitions::new();
    for (spec, value) in options.iter() {
        match spec.role {
            OptionRole::StaticToggle => definitions.insert("POCO_STATIC", on_off(!value)),
            OptionRole::Definition => definitions.insert(spec.name.to_ascii_uppercase(), on_off(value)),
            OptionRole::PositionIndependentCode => {}
        }
    }
    definitions
}

/// Definitions a build helper adds on top of the option definitions.
///
/// `build_type` is set only for configure steps of single-config tools.
#[must_use]
pub fn toolchain_definitions(
    options: &Options,
    settings: &Settings,
    build_type: Option<BuildType>,
) -> Definitions {
    let mut definitions = Definitions::new();

    if let Some(fpic) = options.get(FPIC) {
        definitions.insert("CMAKE_POSITION_INDEPENDENT_CODE", on_off(fpic));
    }

    if let Some(build_type) = build_type {
        definitions.insert("CMAKE_BUILD_TYPE", build_type.as_str());
    }

    match settings.compiler {
        Compiler::Gcc | Compiler::Clang | Compiler::AppleClang => {
            let arch_flag = match settings.arch {
                Arch::X86 => Some("-m32"),
                Arch::X86_64 => Some("-m64"),
                Arch::Armv8 => None,
            };
            let abi_flag = match settings.compiler_libcxx {
                Some(Libcxx::LibStdCxx) => Some("-D_GLIBCXX_USE_CXX11_ABI=0"),
                Some(Libcxx::LibStdCxx11) => Some("-D_GLIBCXX_USE_CXX11_ABI=1"),
                Some(Libcxx::LibCxx) | None => None,
            };
            if let Some(arch_flag) = arch_flag {
                definitions.insert("CMAKE_C_FLAGS", arch_flag);
            }
            let cxx_flags: Vec<&str> = arch_flag.into_iter().chain(abi_flag).collect();
            if !cxx_flags.is_empty() {
                definitions.insert("CMAKE_CXX_FLAGS", cxx_flags.join(" "));
            }
        }
        Compiler::VisualStudio => {
            if settings.compiler_runtime.is_some_and(|runtime| runtime.is_static()) {
                definitions.insert("POCO_MT", "ON");
            }
        }
    }

    definitions
}
