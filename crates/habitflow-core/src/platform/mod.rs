//! Platform capability seams: notifications, haptics, and the native
//! preference bridge.
//!
//! The core never talks to a platform API directly. Each capability is a
//! trait with a no-op default, so a headless build degrades gracefully
//! and call sites can swallow platform failures without branching.

use std::path::PathBuf;

/// Delivers reminder notifications to the user.
///
/// Implementations are best-effort: a delivery failure is logged by the
/// caller and never propagates into domain state.
pub trait Notifier: Send + Sync {
    /// Show a notification with the given title and body.
    fn notify(&self, title: &str, body: &str) -> Result<(), Box<dyn std::error::Error>>;

    /// Cancel any pending scheduled notification.
    fn cancel(&self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(()) // default no-op
    }
}

/// Fire-and-forget haptic feedback on user gestures.
pub trait Haptics: Send + Sync {
    /// Light impact tap. Must never fail outward.
    fn impact(&self) {}
}

/// Publishes the derived "pending habits today" count to a slot a native
/// companion process can read (badge counts, reminder bodies).
pub trait PreferenceBridge: Send + Sync {
    /// Write the pending count to the platform-visible slot.
    fn set_pending_count(&self, count: usize) -> Result<(), Box<dyn std::error::Error>>;
}

/// Notifier that prints to the terminal, the CLI's toast fallback.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), Box<dyn std::error::Error>> {
        println!("🔔 {title}: {body}");
        Ok(())
    }
}

/// Silent notifier for headless and test use.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _title: &str, _body: &str) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

/// Haptics stub for platforms without a haptic engine.
#[derive(Debug, Default)]
pub struct NullHaptics;

impl Haptics for NullHaptics {}

/// Bridge that drops the count, for headless use.
#[derive(Debug, Default)]
pub struct NullBridge;

impl PreferenceBridge for NullBridge {
    fn set_pending_count(&self, _count: usize) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

/// File-backed bridge: writes the count as plain text into the data dir,
/// where the native reminder worker reads it.
#[derive(Debug)]
pub struct FileBridge {
    path: PathBuf,
}

impl FileBridge {
    /// Slot file name inside the data directory.
    pub const SLOT: &'static str = "pending_count";

    /// Bridge writing into the given data directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(Self::SLOT),
        }
    }

    /// Read the slot back, if present and well-formed.
    pub fn read(&self) -> Option<usize> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

impl PreferenceBridge for FileBridge {
    fn set_pending_count(&self, count: usize) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(&self.path, count.to_string())?;
        Ok(())
    }
}
