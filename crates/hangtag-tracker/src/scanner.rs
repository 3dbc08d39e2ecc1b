//! # Scan Decoder Bridge
//!
//! Bridges the external QR scan device into ledger mutations.
//!
//! ## Bridge Anatomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Scan Decoder Bridge                                  │
//! │                                                                         │
//! │  Camera frames (external device, async)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ScanDevice::start(facing, config, sender)                             │
//! │       │                                                                 │
//! │       │   one ScanEvent per decoded frame                              │
//! │       ▼                                                                 │
//! │  mpsc::UnboundedReceiver<ScanEvent>   ← the onDecoded/onDecodeError    │
//! │       │                                 callback pair as a channel     │
//! │       ▼                                                                 │
//! │  handle_scan_event(&ledger_state, event)                               │
//! │       ├── Decoded(token) ──► record_sale(token) ──► Notice             │
//! │       └── DecodeError(_) ──► ignored (no code in this frame)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Start/Stop Discipline
//! Scanning is start/stop controlled by view navigation. Starting while
//! already running is a no-op; stopping is best-effort and safe to call
//! unconditionally, including when the device was never started.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, trace, warn};
use ts_rs::TS;

use hangtag_store::KvStore;

use crate::ledger::LedgerState;
use crate::notify::Notice;

// =============================================================================
// Scan Error
// =============================================================================

/// Scan device failures.
///
/// A start failure leaves the ledger untouched and is surfaced as a
/// notice; a stop failure on the navigation-away path is logged and
/// swallowed.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The camera could not be started.
    ///
    /// ## When This Occurs
    /// - No camera on the device
    /// - The user denied the camera permission
    /// - Another page holds the camera
    #[error("Could not start the scanner: {0}")]
    StartFailed(String),

    /// The running device could not be stopped.
    #[error("Could not stop the scanner: {0}")]
    StopFailed(String),
}

// =============================================================================
// Device Configuration
// =============================================================================

/// Which camera the device should open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CameraFacing {
    /// The rear camera (pointed at the rack).
    Environment,
    /// The front camera.
    User,
}

impl Default for CameraFacing {
    fn default() -> Self {
        CameraFacing::Environment
    }
}

/// The decode viewport, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BoxSize {
    pub width: u32,
    pub height: u32,
}

/// Scan device configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ScanConfig {
    /// Decode attempts per second.
    pub fps: u32,
    /// The viewport the decoder looks at.
    pub qr_box: BoxSize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            fps: 10,
            qr_box: BoxSize {
                width: 250,
                height: 250,
            },
        }
    }
}

// =============================================================================
// Scan Events
// =============================================================================

/// One outcome of one camera frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// A QR code was decoded to this text token.
    Decoded(String),
    /// The frame held no decodable code. Fired constantly while the
    /// camera points at nothing; carries the device's message.
    DecodeError(String),
}

// =============================================================================
// Scan Device Trait
// =============================================================================

/// The camera collaborator contract.
///
/// The real implementation wraps the host's QR scanning component; tests
/// use a scripted fake. Events flow through the provided sender until the
/// device is stopped or the receiver is dropped.
pub trait ScanDevice: Send {
    /// Opens the camera and begins delivering one [`ScanEvent`] per frame.
    fn start(
        &mut self,
        facing: CameraFacing,
        config: &ScanConfig,
        events: UnboundedSender<ScanEvent>,
    ) -> Result<(), ScanError>;

    /// Stops the camera and the event stream.
    fn stop(&mut self) -> Result<(), ScanError>;

    /// Whether the device is currently delivering frames.
    fn is_scanning(&self) -> bool;
}

// =============================================================================
// Scan Controller
// =============================================================================

/// Owns a [`ScanDevice`] and enforces the start/stop discipline.
#[derive(Debug)]
pub struct ScanController<D: ScanDevice> {
    device: D,
}

impl<D: ScanDevice> ScanController<D> {
    /// Wraps a device.
    pub fn new(device: D) -> Self {
        ScanController { device }
    }

    /// Starts scanning and returns the event stream.
    ///
    /// Idempotent: starting while already running returns `Ok(None)` and
    /// leaves the running stream undisturbed.
    pub fn start(
        &mut self,
        facing: CameraFacing,
        config: &ScanConfig,
    ) -> Result<Option<UnboundedReceiver<ScanEvent>>, ScanError> {
        if self.device.is_scanning() {
            debug!("Scanner already running, start ignored");
            return Ok(None);
        }

        let (tx, rx) = mpsc::unbounded_channel();
        self.device.start(facing, config, tx)?;

        info!(?facing, fps = config.fps, "Scanner started");
        Ok(Some(rx))
    }

    /// Stops scanning, best-effort.
    ///
    /// Safe to call unconditionally on navigation away from the scanning
    /// view, including when the device was never started. A stop failure
    /// is logged, not propagated.
    pub fn stop(&mut self) {
        if !self.device.is_scanning() {
            return;
        }

        match self.device.stop() {
            Ok(()) => info!("Scanner stopped"),
            Err(e) => warn!(error = %e, "Failed to stop scanner"),
        }
    }

    /// Whether the device is currently scanning.
    pub fn is_scanning(&self) -> bool {
        self.device.is_scanning()
    }
}

// =============================================================================
// Decode Handler
// =============================================================================

/// Handles one scan event against the ledger.
///
/// A decoded token triggers exactly one `record_sale` call; every call is
/// independent, so rapid repeats of the same token decrement repeatedly
/// (frame de-duplication belongs to the device). Frame decode errors
/// produce no notice.
pub fn handle_scan_event<S: KvStore>(state: &LedgerState<S>, event: ScanEvent) -> Option<Notice> {
    match event {
        ScanEvent::Decoded(token) => {
            let outcome = state.with_ledger_mut(|ledger| ledger.record_sale(&token));
            Some(match outcome {
                Ok(sale) => Notice::deducted(sale.sku.as_str()),
                Err(err) => Notice::from(&err),
            })
        }
        ScanEvent::DecodeError(message) => {
            trace!(message = %message, "Frame without a decodable code");
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use crate::notify::Severity;
    use hangtag_store::MemoryStore;

    /// A scripted device: delivers its queued events on start.
    struct ScriptedDevice {
        script: Vec<ScanEvent>,
        scanning: bool,
        start_calls: u32,
        fail_start: bool,
    }

    impl ScriptedDevice {
        fn with_script(script: Vec<ScanEvent>) -> Self {
            ScriptedDevice {
                script,
                scanning: false,
                start_calls: 0,
                fail_start: false,
            }
        }

        fn failing() -> Self {
            ScriptedDevice {
                script: Vec::new(),
                scanning: false,
                start_calls: 0,
                fail_start: true,
            }
        }
    }

    impl ScanDevice for ScriptedDevice {
        fn start(
            &mut self,
            _facing: CameraFacing,
            _config: &ScanConfig,
            events: UnboundedSender<ScanEvent>,
        ) -> Result<(), ScanError> {
            self.start_calls += 1;
            if self.fail_start {
                return Err(ScanError::StartFailed("camera permission denied".into()));
            }

            for event in self.script.drain(..) {
                let _ = events.send(event);
            }
            self.scanning = true;
            Ok(())
        }

        fn stop(&mut self) -> Result<(), ScanError> {
            self.scanning = false;
            Ok(())
        }

        fn is_scanning(&self) -> bool {
            self.scanning
        }
    }

    fn stocked_state() -> LedgerState<MemoryStore> {
        let mut ledger = Ledger::open(MemoryStore::new());
        ledger.add_stock("100", "SHIRT", "RED", "M", 2).unwrap();
        LedgerState::new(ledger)
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut controller = ScanController::new(ScriptedDevice::with_script(Vec::new()));

        let first = controller
            .start(CameraFacing::default(), &ScanConfig::default())
            .unwrap();
        assert!(first.is_some());
        assert!(controller.is_scanning());

        // Second start: no-op, device not started again
        let second = controller
            .start(CameraFacing::default(), &ScanConfig::default())
            .unwrap();
        assert!(second.is_none());
        assert_eq!(controller.device.start_calls, 1);
    }

    #[test]
    fn test_stop_is_safe_when_never_started() {
        let mut controller = ScanController::new(ScriptedDevice::with_script(Vec::new()));

        // Unconditional stop on navigation away: no panic, no error
        controller.stop();
        controller.stop();
        assert!(!controller.is_scanning());
    }

    #[test]
    fn test_stop_then_restart() {
        let mut controller = ScanController::new(ScriptedDevice::with_script(Vec::new()));

        controller
            .start(CameraFacing::default(), &ScanConfig::default())
            .unwrap();
        controller.stop();
        assert!(!controller.is_scanning());

        let again = controller
            .start(CameraFacing::default(), &ScanConfig::default())
            .unwrap();
        assert!(again.is_some());
    }

    #[test]
    fn test_failed_start_surfaces_error() {
        let mut controller = ScanController::new(ScriptedDevice::failing());

        let err = controller
            .start(CameraFacing::default(), &ScanConfig::default())
            .unwrap_err();
        assert!(matches!(err, ScanError::StartFailed(_)));
        assert!(!controller.is_scanning());
    }

    #[tokio::test]
    async fn test_decoded_tokens_drive_sales() {
        let state = stocked_state();
        let mut controller = ScanController::new(ScriptedDevice::with_script(vec![
            ScanEvent::Decoded("100-SHIRT-RED-M".into()),
            ScanEvent::DecodeError("no code in view".into()),
            ScanEvent::Decoded("999-X-X-X".into()),
        ]));

        let mut events = controller
            .start(CameraFacing::default(), &ScanConfig::default())
            .unwrap()
            .expect("fresh start yields a stream");

        // Known SKU: one unit deducted
        let notice = handle_scan_event(&state, events.recv().await.unwrap()).unwrap();
        assert_eq!(notice.severity, Severity::Success);
        assert_eq!(notice.message, "1 piece deducted: 100-SHIRT-RED-M");

        // Frame decode errors are silent
        assert!(handle_scan_event(&state, events.recv().await.unwrap()).is_none());

        // Unknown SKU: error notice, ledger untouched
        let notice = handle_scan_event(&state, events.recv().await.unwrap()).unwrap();
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.message, "Unrecognized SKU: 999-X-X-X");

        assert_eq!(state.with_ledger(|l| l.total_pieces()), 1);
        assert_eq!(state.with_ledger(|l| l.sales().len()), 1);
    }

    #[tokio::test]
    async fn test_each_decoded_frame_decrements_independently() {
        let state = stocked_state();

        // The same token twice in quick succession: two sales
        for _ in 0..2 {
            let notice =
                handle_scan_event(&state, ScanEvent::Decoded("100-SHIRT-RED-M".into())).unwrap();
            assert_eq!(notice.severity, Severity::Success);
        }

        // Third repeat: out of stock, refused
        let notice =
            handle_scan_event(&state, ScanEvent::Decoded("100-SHIRT-RED-M".into())).unwrap();
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.message, "No stock left for 100-SHIRT-RED-M");

        assert_eq!(state.with_ledger(|l| l.total_pieces()), 0);
        assert_eq!(state.with_ledger(|l| l.sales().len()), 2);
    }
}
