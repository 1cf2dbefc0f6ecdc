use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Cancellable deferred write. Scheduling always replaces any pending task,
/// so rapid changes inside one quiet window coalesce into a single flush
/// carrying the last value.
#[derive(Debug, Default)]
pub struct DebouncedSave {
    pending: Option<JoinHandle<()>>,
}

impl DebouncedSave {
    pub fn schedule<F>(&mut self, quiet_period: Duration, flush: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            flush.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for DebouncedSave {
    fn drop(&mut self) {
        self.cancel();
    }
}
