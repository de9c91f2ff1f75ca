//! Diagnostic sink for recoverable protocol anomalies
//!
//! Decoding never fails on data the device is allowed to send but this crate
//! does not recognise (for example a route code added by newer firmware).
//! Such anomalies are handed to a [`DiagnosticSink`] instead, and decoding
//! continues with a sentinel value.

use std::sync::Mutex;

use tracing::{error, warn};

use crate::routes::RouteDirection;

/// A recoverable anomaly observed while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    UnknownRouteCode { direction: RouteDirection, code: u32 },
}

/// Receiver for recoverable decoding anomalies.
///
/// Implementations must be `Send + Sync`; a single sink may be shared by
/// decoders running on several threads.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);

    fn unknown_route_code(&self, direction: RouteDirection, code: u32) {
        self.report(Diagnostic::UnknownRouteCode { direction, code });
    }
}

/// Default sink: forwards every anomaly to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::UnknownRouteCode { direction, code } => {
                warn!(%direction, route_code = code, "unknown ES-9 route code");
                error!(
                    %direction,
                    route_code = code,
                    "route code 0x{code:02X} has no channel; using Unspecified"
                );
            }
        }
    }
}

/// Sink that stores every anomaly, for inspection by the caller.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(diagnostic);
    }
}
