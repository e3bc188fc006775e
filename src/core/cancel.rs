use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared stop flag. Cloned into the Ctrl-C handler and the window loop; the
/// sequencer checks it before computing each frame.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Routes SIGINT / Ctrl-C to this token. Only one handler may be installed per process.
    pub fn install_ctrlc(&self) -> Result<(), ctrlc::Error> {
        let token = self.clone();
        ctrlc::set_handler(move || {
            tracing::debug!("interrupt received, stopping after the current frame");
            token.cancel();
        })
    }
}
