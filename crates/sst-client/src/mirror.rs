//! Local mirror of fetched lists.
//!
//! One JSON file per key under the storage directory:
//!
//! ```text
//! ~/.sst/cache/
//!   registrosASO.json      ultimoASOId.json
//!   avaliacoesNR17.json    ultimaNR17Id.json
//!   registrosLTCAT.json    ultimoLTCATId.json
//! ```
//!
//! The mirror is never authoritative. The `remember_*`/`recall_*` calls are
//! best-effort: failures are logged and swallowed so a broken cache never
//! fails a command. `read`/`write` surface [`MirrorError`] for callers that
//! want it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use sst_config::StorageConfig;

use crate::error::MirrorError;

/// Record modules that keep a mirrored list and a last-saved id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordModule {
    Aso,
    Nr17,
    Ltcat,
}

impl RecordModule {
    pub const ALL: [Self; 3] = [Self::Aso, Self::Nr17, Self::Ltcat];

    #[must_use]
    pub const fn list_key(self) -> &'static str {
        match self {
            Self::Aso => "registrosASO",
            Self::Nr17 => "avaliacoesNR17",
            Self::Ltcat => "registrosLTCAT",
        }
    }

    #[must_use]
    pub const fn last_id_key(self) -> &'static str {
        match self {
            Self::Aso => "ultimoASOId",
            Self::Nr17 => "ultimaNR17Id",
            Self::Ltcat => "ultimoLTCATId",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocalMirror {
    dir: Option<PathBuf>,
    writes_enabled: bool,
}

impl LocalMirror {
    /// `dir = None` disables the mirror entirely. With `writes_enabled`
    /// off, existing files are still readable.
    #[must_use]
    pub const fn new(dir: Option<PathBuf>, writes_enabled: bool) -> Self {
        Self {
            dir,
            writes_enabled,
        }
    }

    #[must_use]
    pub fn from_config(storage: &StorageConfig) -> Self {
        Self::new(storage.resolved_dir(), storage.mirror)
    }

    #[must_use]
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    fn path(&self, key: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| dir.join(format!("{key}.json")))
    }

    /// Read `key`. A missing file (or no directory) is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// [`MirrorError::Io`] when the file exists but cannot be read,
    /// [`MirrorError::Json`] when it does not hold a `T`.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, MirrorError> {
        let Some(path) = self.path(key) else {
            return Ok(None);
        };
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(MirrorError::Io { path, source }),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| MirrorError::Json { path, source })
    }

    /// Write `value` under `key`, replacing the file atomically. A no-op
    /// when writes are disabled.
    ///
    /// # Errors
    ///
    /// [`MirrorError::Io`] when the directory or file cannot be written.
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), MirrorError> {
        let (Some(dir), Some(path)) = (self.dir.as_ref(), self.path(key)) else {
            return Ok(());
        };
        if !self.writes_enabled {
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|source| MirrorError::Io {
            path: dir.clone(),
            source,
        })?;
        let json = serde_json::to_vec_pretty(value).map_err(|source| MirrorError::Json {
            path: path.clone(),
            source,
        })?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| MirrorError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| MirrorError::Io { path, source })
    }

    pub fn remember_list<T: Serialize>(&self, module: RecordModule, items: &[T]) {
        if let Err(error) = self.write(module.list_key(), items) {
            tracing::warn!(%error, key = module.list_key(), "mirror write failed");
        }
    }

    /// Mirrored list for `module`; empty when nothing usable is stored.
    #[must_use]
    pub fn recall_list<T: DeserializeOwned>(&self, module: RecordModule) -> Vec<T> {
        match self.read(module.list_key()) {
            Ok(items) => items.unwrap_or_default(),
            Err(error) => {
                tracing::warn!(%error, key = module.list_key(), "mirror read failed");
                Vec::new()
            }
        }
    }

    pub fn remember_last_id(&self, module: RecordModule, id: i64) {
        if let Err(error) = self.write(module.last_id_key(), &id) {
            tracing::warn!(%error, key = module.last_id_key(), "mirror write failed");
        }
    }

    #[must_use]
    pub fn recall_last_id(&self, module: RecordModule) -> Option<i64> {
        self.read(module.last_id_key()).unwrap_or_else(|error| {
            tracing::warn!(%error, key = module.last_id_key(), "mirror read failed");
            None
        })
    }
}
