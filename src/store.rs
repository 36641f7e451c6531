// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Live settings store access.
//!
//! The running desktop session keeps its appearance settings in a persistent
//! key-value service. On GNOME-less compositors that service is still
//! reachable through the `gsettings` command line tool, which is the only
//! transport nwg-look uses. The [`KeyValueStore`] trait hides that transport
//! so the merge and export logic can run against [`MemoryStore`] instead.

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    ffi::{OsStr, OsString},
    process::{Command, Stdio},
};
use tracing::{debug, instrument};

/// Schema holding interface appearance keys.
pub const INTERFACE_SCHEMA: &str = "org.gnome.desktop.interface";

/// Schema holding sound keys.
pub const SOUND_SCHEMA: &str = "org.gnome.desktop.sound";

/// Key-value settings store.
pub trait KeyValueStore {
    /// Query value of `key` in `schema`.
    ///
    /// Surrounding quote characters are stripped from string values.
    fn get(&self, schema: &str, key: &str) -> Result<String>;

    /// Set `key` in `schema` to `value`.
    fn set(&self, schema: &str, key: &str, value: &str) -> Result<()>;
}

/// Live store backed by the `gsettings` binary.
#[derive(Debug, Clone)]
pub struct Gsettings {
    program: OsString,
}

impl Gsettings {
    /// Use `gsettings` from `$PATH`.
    pub fn new() -> Self {
        Self::with_program("gsettings")
    }

    /// Use a specific program speaking the `gsettings` interface.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Gsettings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for Gsettings {
    #[instrument(skip(self), level = "debug")]
    fn get(&self, schema: &str, key: &str) -> Result<String> {
        let output = syscall(&self.program, ["get", schema, key])?;
        Ok(unquote(output.trim()).to_owned())
    }

    #[instrument(skip(self), level = "debug")]
    fn set(&self, schema: &str, key: &str, value: &str) -> Result<()> {
        syscall(&self.program, ["set", schema, key, value])?;
        Ok(())
    }
}

/// In-memory store.
///
/// Keys can be marked as failing to simulate command errors.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<(String, String), String>>,
    failing: HashSet<(String, String)>,
}

impl MemoryStore {
    /// Construct empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert value directly without going through [`KeyValueStore::set`].
    pub fn insert(&self, schema: &str, key: &str, value: impl Into<String>) {
        self.values
            .borrow_mut()
            .insert((schema.into(), key.into()), value.into());
    }

    /// Make every get and set of `key` in `schema` fail.
    pub fn fail_on(mut self, schema: &str, key: &str) -> Self {
        self.failing.insert((schema.into(), key.into()));
        self
    }

    /// Current value of `key` in `schema`, if any.
    pub fn value(&self, schema: &str, key: &str) -> Option<String> {
        self.values
            .borrow()
            .get(&(schema.to_owned(), key.to_owned()))
            .cloned()
    }

    fn check(&self, schema: &str, key: &str) -> Result<()> {
        if self.failing.contains(&(schema.to_owned(), key.to_owned())) {
            return Err(StoreError::Rejected {
                schema: schema.into(),
                key: key.into(),
            });
        }

        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, schema: &str, key: &str) -> Result<String> {
        self.check(schema, key)?;
        self.value(schema, key).ok_or_else(|| StoreError::NoSuchKey {
            schema: schema.into(),
            key: key.into(),
        })
    }

    fn set(&self, schema: &str, key: &str, value: &str) -> Result<()> {
        self.check(schema, key)?;
        self.insert(schema, key, value);
        Ok(())
    }
}

/// Strip one pair of surrounding single or double quotes.
pub fn unquote(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }

    value
}

fn syscall(
    cmd: impl AsRef<OsStr>,
    args: impl IntoIterator<Item = impl AsRef<OsStr>>,
) -> Result<String> {
    let output = Command::new(cmd.as_ref())
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|err| StoreError::Spawn {
            source: err,
            program: cmd.as_ref().to_string_lossy().into_owned(),
        })?;
    let stdout = String::from_utf8_lossy(output.stdout.as_slice()).into_owned();
    let stderr = String::from_utf8_lossy(output.stderr.as_slice()).into_owned();

    if !output.status.success() {
        return Err(StoreError::Command {
            program: cmd.as_ref().to_string_lossy().into_owned(),
            message: stderr.trim_end().to_owned(),
        });
    }

    debug!("{}", stdout.trim_end());
    Ok(stdout)
}

/// Store interaction error types.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Store program could not be started.
    #[error("failed to run {program:?}")]
    Spawn {
        #[source]
        source: std::io::Error,
        program: String,
    },

    /// Store program exited with failure.
    #[error("command {program:?} failed: {message}")]
    Command { program: String, message: String },

    /// Key holds no value.
    #[error("no value for {schema} {key}")]
    NoSuchKey { schema: String, key: String },

    /// Store refused the operation.
    #[error("store rejected {schema} {key}")]
    Rejected { schema: String, key: String },
}

/// Friendly result alias :3
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sealed_test::prelude::*;
    use simple_test_case::test_case;

    #[test_case("'Adwaita'", "Adwaita"; "single quoted")]
    #[test_case("\"Sans 10\"", "Sans 10"; "double quoted")]
    #[test_case("24", "24"; "bare")]
    #[test_case("'", "'"; "lone quote")]
    #[test_case("'mixed\"", "'mixed\""; "mismatched quotes")]
    #[test]
    fn unquote_strips_surrounding_quotes(input: &str, expect: &str) {
        pretty_assertions::assert_eq!(unquote(input), expect);
    }

    #[test]
    fn memory_store_get_and_set() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        store.set(INTERFACE_SCHEMA, "gtk-theme", "Arc")?;
        assert_eq!(store.get(INTERFACE_SCHEMA, "gtk-theme")?, "Arc");
        assert!(matches!(
            store.get(SOUND_SCHEMA, "event-sounds"),
            Err(StoreError::NoSuchKey { .. })
        ));

        Ok(())
    }

    #[test]
    fn memory_store_failing_key() {
        let store = MemoryStore::new().fail_on(INTERFACE_SCHEMA, "cursor-theme");
        store.insert(INTERFACE_SCHEMA, "cursor-theme", "Breeze");

        assert!(matches!(
            store.get(INTERFACE_SCHEMA, "cursor-theme"),
            Err(StoreError::Rejected { .. })
        ));
        assert!(store.set(INTERFACE_SCHEMA, "cursor-theme", "x").is_err());
        assert_eq!(
            store.value(INTERFACE_SCHEMA, "cursor-theme").as_deref(),
            Some("Breeze")
        );
    }

    #[test]
    fn gsettings_missing_program() {
        let store = Gsettings::with_program("./definitely-not-gsettings");
        assert!(matches!(
            store.get(INTERFACE_SCHEMA, "gtk-theme"),
            Err(StoreError::Spawn { .. })
        ));
    }

    #[cfg(unix)]
    #[sealed_test]
    fn gsettings_program_output_is_unquoted() -> anyhow::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let script = std::env::current_dir()?.join("fake-gsettings");
        std::fs::write(
            &script,
            "#!/bin/sh\n[ \"$1\" = get ] || exit 1\necho \"'$3-value'\"\n",
        )?;
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))?;

        let store = Gsettings::with_program(&script);
        assert_eq!(
            store.get(INTERFACE_SCHEMA, "gtk-theme")?,
            "gtk-theme-value"
        );
        assert!(matches!(
            store.set(INTERFACE_SCHEMA, "gtk-theme", "Arc"),
            Err(StoreError::Command { .. })
        ));

        Ok(())
    }
}
