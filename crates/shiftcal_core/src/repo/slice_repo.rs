//! Persistence gateway for the three calendar slices.
//!
//! # Responsibility
//! - Encode/decode shifts, notes and theme independently as JSON records.
//! - Degrade unreadable records to slice defaults.
//!
//! # Invariants
//! - `load` never returns an error; failures are logged and replaced by
//!   `Default::default()` for that slice only.
//! - `save` writes exactly one key and reports failure to the caller.

use crate::model::date::IsoDate;
use crate::model::shift::ShiftAssignment;
use crate::model::theme::ThemeConfig;
use crate::repo::kv_repo::{KeyValueStore, RepoError};
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Day notes keyed by date.
pub type NoteMap = BTreeMap<IsoDate, String>;

/// Independently persisted state category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    Shifts,
    Notes,
    Theme,
}

impl Slice {
    pub const ALL: [Slice; 3] = [Slice::Shifts, Slice::Notes, Slice::Theme];

    /// Storage key of the slice record.
    pub fn key(self) -> &'static str {
        match self {
            Self::Shifts => "shifts_data",
            Self::Notes => "memos_data",
            Self::Theme => "theme_data",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Shifts => "shifts",
            Self::Notes => "notes",
            Self::Theme => "theme",
        }
    }
}

/// A value persisted as one slice record.
pub trait SliceRecord: Serialize + DeserializeOwned + Default {
    const SLICE: Slice;
}

impl SliceRecord for Vec<ShiftAssignment> {
    const SLICE: Slice = Slice::Shifts;
}

impl SliceRecord for NoteMap {
    const SLICE: Slice = Slice::Notes;
}

impl SliceRecord for ThemeConfig {
    const SLICE: Slice = Slice::Theme;
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Write-back failure for one slice.
#[derive(Debug)]
pub enum GatewayError {
    Encode {
        slice: Slice,
        source: serde_json::Error,
    },
    Storage {
        slice: Slice,
        source: RepoError,
    },
}

impl GatewayError {
    pub fn slice(&self) -> Slice {
        match self {
            Self::Encode { slice, .. } | Self::Storage { slice, .. } => *slice,
        }
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode { slice, source } => {
                write!(f, "failed to encode {} slice: {source}", slice.name())
            }
            Self::Storage { slice, source } => {
                write!(f, "failed to save {} slice: {source}", slice.name())
            }
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode { source, .. } => Some(source),
            Self::Storage { source, .. } => Some(source),
        }
    }
}

/// Slice-level load/save over a key-value store.
pub struct SliceGateway<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SliceGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads one slice, falling back to its default when the record is
    /// absent, unreadable or fails to decode.
    pub fn load<T: SliceRecord>(&self) -> T {
        let slice = T::SLICE;
        let raw = match self.store.get(slice.key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(
                    "event=slice_load module=repo status=absent slice={}",
                    slice.name()
                );
                return T::default();
            }
            Err(err) => {
                warn!(
                    "event=slice_load module=repo status=fallback slice={} error_code=storage_read_failed error={}",
                    slice.name(),
                    err
                );
                return T::default();
            }
        };

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => {
                debug!(
                    "event=slice_load module=repo status=ok slice={} bytes={}",
                    slice.name(),
                    raw.len()
                );
                value
            }
            Err(err) => {
                // Error text may echo user content; log category and position only.
                warn!(
                    "event=slice_load module=repo status=fallback slice={} error_code=decode_failed category={:?} line={} column={}",
                    slice.name(),
                    err.classify(),
                    err.line(),
                    err.column()
                );
                T::default()
            }
        }
    }

    /// Encodes and writes one slice record.
    ///
    /// # Errors
    /// - `GatewayError::Encode` when serialization fails.
    /// - `GatewayError::Storage` when the key-value write fails.
    pub fn save<T: SliceRecord>(&mut self, value: &T) -> GatewayResult<()> {
        let slice = T::SLICE;
        let encoded =
            serde_json::to_string(value).map_err(|source| GatewayError::Encode { slice, source })?;
        match self.store.set(slice.key(), &encoded) {
            Ok(()) => {
                debug!(
                    "event=slice_save module=repo status=ok slice={} bytes={}",
                    slice.name(),
                    encoded.len()
                );
                Ok(())
            }
            Err(source) => {
                error!(
                    "event=slice_save module=repo status=error slice={} error_code=storage_write_failed error={}",
                    slice.name(),
                    source
                );
                Err(GatewayError::Storage { slice, source })
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
