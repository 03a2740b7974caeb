//! Portrait acquisition boundary.
//!
//! Capture is an interactive external step that owns the user until it
//! resolves. The navigator only sees the outcome: a loadable image at the
//! destination path, or a cancellation. Device failures degrade to
//! cancellation so the affected player simply ends up without a portrait.

use crate::config;
use log::warn;
use std::path::Path;
use std::process::{Child, Command};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    Captured,
    Cancelled,
}

/// Interactive portrait acquisition service.
pub trait PortraitSource {
    fn acquire(&self, name_hint: &str, destination: &Path) -> CaptureOutcome;
}

/// Runs an external capture tool, invoked as `<program> <name> <destination>`.
/// Exit status 0 with the destination file present counts as a capture;
/// anything else, including the safety timeout, counts as a cancellation.
pub struct CommandCapture {
    program: String,
    timeout: Duration,
}

impl CommandCapture {
    pub fn new(program: String) -> Self {
        CommandCapture {
            program,
            timeout: Duration::from_secs(config::CAPTURE_TIMEOUT_SECS),
        }
    }

    fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Option<std::process::ExitStatus> {
        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Some(status),
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return None;
                    }
                    std::thread::sleep(Duration::from_millis(100));
                }
                Err(e) => {
                    warn!("Lost track of capture tool: {}", e);
                    return None;
                }
            }
        }
    }
}

impl PortraitSource for CommandCapture {
    fn acquire(&self, name_hint: &str, destination: &Path) -> CaptureOutcome {
        crate::debug_capture!(
            "Launching {} for {} -> {}",
            self.program,
            name_hint,
            destination.display()
        );
        let mut child = match Command::new(&self.program)
            .arg(name_hint)
            .arg(destination)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                warn!("Capture tool {} failed to start: {}", self.program, e);
                return CaptureOutcome::Cancelled;
            }
        };

        match Self::wait_with_timeout(&mut child, self.timeout) {
            Some(status) if status.success() && destination.exists() => CaptureOutcome::Captured,
            Some(status) => {
                crate::debug_capture!("Capture tool exited without an image ({})", status);
                CaptureOutcome::Cancelled
            }
            None => {
                warn!(
                    "Capture timed out after {}s, treating as cancelled",
                    config::CAPTURE_TIMEOUT_SECS
                );
                CaptureOutcome::Cancelled
            }
        }
    }
}

/// Used when no capture tool is configured; every request cancels.
pub struct DisabledCapture;

impl PortraitSource for DisabledCapture {
    fn acquire(&self, name_hint: &str, _destination: &Path) -> CaptureOutcome {
        crate::debug_capture!("No capture tool configured, skipping portrait for {}", name_hint);
        CaptureOutcome::Cancelled
    }
}
