//! Shared ticket store with optional JSON snapshot persistence.
//!
//! Wraps the in-memory [`TicketBoard`] behind an `RwLock` and mirrors every
//! mutation to a snapshot file when one is configured. A failed snapshot
//! write rolls the in-memory mutation back, so the board and the file never
//! disagree.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use chrono::{DateTime, Utc};
use rifa_core::{BoardStats, CoreError, Ticket, TicketBoard, TicketNumber};
use serde::{Deserialize, Serialize};

/// Errors that can occur while reading or mutating the ticket store.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// A domain rule was violated (out-of-range number, already sold, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The snapshot file could not be read or did not describe a valid board.
    #[error("failed to load ticket state from {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    /// The snapshot file could not be written; the mutation was rolled back.
    #[error("failed to persist ticket state to {path}: {reason}")]
    Persist { path: PathBuf, reason: String },
}

/// On-disk form of the ticket board.
#[derive(Debug, Serialize, Deserialize)]
struct BoardSnapshot {
    saved_at: DateTime<Utc>,
    tickets: Vec<Ticket>,
}

/// Thread-safe ticket store shared by all request handlers.
#[derive(Debug)]
pub struct TicketStore {
    board: RwLock<TicketBoard>,
    state_path: Option<PathBuf>,
}

impl TicketStore {
    /// Opens the store, loading an existing snapshot or creating a fresh
    /// board of 100 available tickets.
    ///
    /// When `state_path` is set and no snapshot exists yet, the initial
    /// board is written out immediately.
    ///
    /// # Errors
    /// Returns [`StoreError::Load`] if an existing snapshot is unreadable or
    /// invalid, or [`StoreError::Persist`] if the initial snapshot cannot be
    /// written.
    pub fn open(state_path: Option<PathBuf>) -> Result<Self, StoreError> {
        let board = match &state_path {
            Some(path) if path.exists() => {
                let board = load_snapshot(path)?;
                tracing::info!(path = %path.display(), "ticket board restored from snapshot");
                board
            }
            _ => {
                let board = TicketBoard::new();
                if let Some(path) = &state_path {
                    persist_snapshot(path, &board)?;
                }
                tracing::info!(count = TicketBoard::COUNT, "ticket board initialised");
                board
            }
        };
        Ok(Self { board: RwLock::new(board), state_path })
    }

    /// Marks `number` as sold, recording the buyer if given.
    ///
    /// The mutation and the snapshot write happen under one write lock; if
    /// the write fails the board is restored to its previous state.
    ///
    /// # Errors
    /// Returns [`CoreError::AlreadySold`] (wrapped) if the ticket is taken,
    /// or [`StoreError::Persist`] on a snapshot failure.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn claim(&self, number: TicketNumber, buyer: Option<String>) -> Result<(), StoreError> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut board = self.board.write().expect("ticket board write lock poisoned");
        let prior = board.clone();
        board.claim(number, buyer)?;
        if let Some(path) = &self.state_path {
            if let Err(e) = persist_snapshot(path, &board) {
                *board = prior;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Returns every ticket to the available state.
    ///
    /// # Errors
    /// Returns [`StoreError::Persist`] on a snapshot failure; the board is
    /// rolled back to its pre-reset state.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn reset_all(&self) -> Result<(), StoreError> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut board = self.board.write().expect("ticket board write lock poisoned");
        let prior = board.clone();
        board.reset_all();
        if let Some(path) = &self.state_path {
            if let Err(e) = persist_snapshot(path, &board) {
                *board = prior;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Returns a copy of all 100 tickets in numeric order.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn tickets(&self) -> Vec<Ticket> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let board = self.board.read().expect("ticket board read lock poisoned");
        board.tickets()
    }

    /// Computes aggregate sale counters.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn stats(&self) -> BoardStats {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let board = self.board.read().expect("ticket board read lock poisoned");
        board.stats()
    }
}

fn load_snapshot(path: &Path) -> Result<TicketBoard, StoreError> {
    let load_err = |reason: String| StoreError::Load { path: path.to_path_buf(), reason };
    let bytes = fs::read(path).map_err(|e| load_err(e.to_string()))?;
    let snapshot: BoardSnapshot =
        serde_json::from_slice(&bytes).map_err(|e| load_err(e.to_string()))?;
    TicketBoard::from_tickets(snapshot.tickets).map_err(|e| load_err(e.to_string()))
}

/// Write-then-rename so a crash mid-write never leaves a torn snapshot.
fn persist_snapshot(path: &Path, board: &TicketBoard) -> Result<(), StoreError> {
    let persist_err = |reason: String| StoreError::Persist { path: path.to_path_buf(), reason };
    let snapshot = BoardSnapshot { saved_at: Utc::now(), tickets: board.tickets() };
    let bytes = serde_json::to_vec_pretty(&snapshot).map_err(|e| persist_err(e.to_string()))?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes).map_err(|e| persist_err(e.to_string()))?;
    fs::rename(&tmp, path).map_err(|e| persist_err(e.to_string()))
}
