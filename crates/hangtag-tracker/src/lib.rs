//! # Hangtag Tracker
//!
//! Orchestration layer for Hangtag: the Inventory Ledger, the scan decoder
//! bridge, the notification boundary, and the chart/QR view payloads.
//!
//! ## Module Organization
//! ```text
//! hangtag_tracker/
//! ├── lib.rs          ◄─── You are here (exports & tracing setup)
//! ├── ledger.rs       ◄─── Ledger + LedgerState (the sole mutable state)
//! ├── scanner.rs      ◄─── Scan device trait, controller, decode handler
//! ├── notify.rs       ◄─── TrackerError + Notice (error boundary)
//! └── render.rs       ◄─── Chart payloads, QR options, renderer traits
//! ```
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Scan, End to End                               │
//! │                                                                         │
//! │  Camera frame ──► ScanDevice ──► ScanEvent::Decoded(token)             │
//! │                                        │                                │
//! │                                        ▼                                │
//! │  handle_scan_event(&ledger_state, event)                               │
//! │       │                                                                 │
//! │       ├── record_sale: decrement 1, append event, persist pair         │
//! │       │                                                                 │
//! │       └── Notice { severity, message } ──► transient notification      │
//! │                                                                         │
//! │  The host event loop never overlaps two mutations; the mutex makes     │
//! │  the non-reentrant contract explicit in Rust.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod ledger;
pub mod notify;
pub mod render;
pub mod scanner;

pub use ledger::{Ledger, LedgerState};
pub use notify::{Notice, Severity, TrackerError};
pub use scanner::{
    handle_scan_event, CameraFacing, ScanConfig, ScanController, ScanDevice, ScanError, ScanEvent,
};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for the host process.
///
/// Reads the filter from `RUST_LOG`, defaulting to `info`. Call once at
/// startup; repeated calls are a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
