//! mpris-panel - control MPRIS media players on the session bus.
//!
//! Discovers players speaking either the legacy MPRIS v1 (`org.mpris.*`) or the
//! MPRIS2 (`org.mpris.MediaPlayer2.*`) dialect, attaches to one of them, and keeps
//! its playback status and track metadata in sync through bus signals. The main
//! features include:
//!
//! - A session controller that binds and rebinds signal subscriptions as players
//!   come and go
//! - Template rendering of track metadata with `%key` placeholders
//! - A terminal front end and one-shot CLI commands
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use mpris_panel::services::mpris::{BusDirectory, ZbusMediaBus, V2Strategy};
//!
//! # async fn run() {
//! let bus = Arc::new(ZbusMediaBus::connect_session().await);
//! let players = BusDirectory::new(bus).list_candidates(&V2Strategy).await;
//! println!("Players: {players:?}");
//! # }
//! ```

/// Configuration schema definitions and validation.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Command-line interface and one-shot commands.
pub mod cli;

/// Terminal front end for the session controller.
pub mod panel;

/// Services for system integration.
pub mod services;

/// Tracing subscriber setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{PanelError, Result};
