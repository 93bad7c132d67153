//! Logout coordination
//!
//! At most one logout request is in flight per coordinator. Callers that hit
//! a 401 while a logout is running join it instead of starting another, and
//! every caller resumes only once that single logout has finished.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use parking_lot::Mutex;

type InFlight = Shared<BoxFuture<'static, ()>>;

#[derive(Default)]
struct Slot {
    generation: u64,
    in_flight: Option<InFlight>,
}

/// Start-or-join coordinator owning one nullable in-flight logout
///
/// Cheap to clone; clones share the same slot. Independent coordinators
/// (e.g. one per client in tests) never interfere.
#[derive(Clone, Default)]
pub struct LogoutCoordinator {
    slot: Arc<Mutex<Slot>>,
}

impl LogoutCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a logout is currently running
    pub fn is_in_flight(&self) -> bool {
        self.slot.lock().in_flight.is_some()
    }

    /// Run the logout produced by `start`, or join the one already running.
    ///
    /// `start` is only invoked when nothing is in flight. Returns `true` for
    /// the caller that started the logout. The slot is cleared once the
    /// logout completes, so a later 401 starts a fresh one.
    pub async fn run_or_join<F, Fut>(&self, start: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (generation, in_flight, started) = {
            let mut slot = self.slot.lock();
            match &slot.in_flight {
                Some(in_flight) => (slot.generation, in_flight.clone(), false),
                None => {
                    slot.generation += 1;
                    let in_flight = start().boxed().shared();
                    slot.in_flight = Some(in_flight.clone());
                    (slot.generation, in_flight, true)
                }
            }
        };

        in_flight.await;

        let mut slot = self.slot.lock();
        if slot.generation == generation {
            slot.in_flight = None;
        }
        started
    }
}

impl std::fmt::Debug for LogoutCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogoutCoordinator")
            .field("in_flight", &self.is_in_flight())
            .finish()
    }
}
