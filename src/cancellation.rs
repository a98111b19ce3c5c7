use anyhow::{Result, anyhow};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tracing::info;

/// Shared stop flag checked between playback slices.
#[derive(Clone, Debug, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a signal that trips on Ctrl-C. Falls back to a plain signal if
    /// the handler cannot be installed (e.g. one is already registered).
    pub fn with_ctrlc() -> Self {
        let signal = Self::new();
        let handler = signal.clone();
        if let Err(err) = ctrlc::set_handler(move || {
            info!("Interrupt received; stopping playback");
            handler.stop();
        }) {
            tracing::warn!("Could not install Ctrl-C handler: {err}");
        }
        signal
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    pub fn checkpoint(&self, stage: &'static str) -> Result<()> {
        if self.is_stopped() {
            return Err(anyhow!("playback stopped at stage={stage}"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::StopSignal;

    #[test]
    fn starts_unstopped_and_latches() {
        let signal = StopSignal::new();
        assert!(!signal.is_stopped());
        assert!(signal.checkpoint("pass").is_ok());
        signal.stop();
        assert!(signal.is_stopped());
        assert!(signal.checkpoint("pass").is_err());
    }

    #[test]
    fn clones_share_the_flag() {
        let signal = StopSignal::new();
        let other = signal.clone();
        other.stop();
        assert!(signal.is_stopped());
    }
}
