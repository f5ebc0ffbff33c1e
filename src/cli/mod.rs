//! # CLI Module
//!
//! This module provides the command-line interface layer for radarsync. It
//! implements the user-facing commands and coordinates between the roster
//! and token management, the Spotify client, and the synchronization engine.
//!
//! ## Commands
//!
//! - [`sync`] - Runs the full pipeline: collects releases from the roster,
//!   deduplicates them, and converges both target playlists. Supports a
//!   dry-run mode that reports pending operations without mutating anything.
//! - [`roster`] - Displays the configured artist roster as a table, with an
//!   optional name search, flagging entries a sync run would skip.
//!
//! ## Error Presentation
//!
//! Recoverable issues (a skipped roster entry, an unparseable release date,
//! a failed duration lookup) surface as warning lines and the run continues.
//! Fatal conditions (missing configuration, unreadable roster or token
//! cache, a failed playlist mutation) print an error and exit non-zero.

mod roster;
mod sync;

pub use roster::roster;
pub use sync::sync;
