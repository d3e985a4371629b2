//! Busy flags for spinner gating.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

/// A busy flag shared by overlapping operations.
///
/// The flag stays raised while at least one [`BusyGuard`] is alive.
#[derive(Debug)]
pub(crate) struct BusyFlag {
    holders: Mutex<usize>,
    busy: watch::Sender<bool>,
}

impl BusyFlag {
    pub(crate) fn new() -> Self {
        let (busy, _) = watch::channel(false);

        Self {
            holders: Mutex::new(0),
            busy,
        }
    }

    pub(crate) fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<bool> {
        self.busy.subscribe()
    }

    fn update(&self, change: impl FnOnce(usize) -> usize) {
        let mut holders = self.holders.lock().unwrap_or_else(PoisonError::into_inner);

        *holders = change(*holders);

        let raised = *holders > 0;

        self.busy.send_if_modified(|busy| {
            let changed = *busy != raised;

            *busy = raised;

            changed
        });
    }
}

/// Holds a [`BusyFlag`] raised until dropped, whichever way the guarded
/// operation exits.
#[derive(Debug)]
pub(crate) struct BusyGuard {
    flag: Arc<BusyFlag>,
}

impl BusyGuard {
    pub(crate) fn acquire(flag: &Arc<BusyFlag>) -> Self {
        flag.update(|holders| holders.saturating_add(1));

        Self {
            flag: Arc::clone(flag),
        }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.update(|holders| holders.saturating_sub(1));
    }
}
