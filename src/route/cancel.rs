use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable signal which asks a running search to stop at its next
/// checkpoint. A cancelled search reports "no path", it is not an error.
#[derive(Clone, Debug, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
