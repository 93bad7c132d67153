//! Access-token freshness
//!
//! - [`routine`]: one check-and-refresh pass over the stored credentials
//! - [`scheduler`]: the background timer driving that pass
//! - [`realtime`]: the push channel carrying forced-refresh events

mod realtime;
mod routine;
mod scheduler;

pub use realtime::{BroadcastRealtime, RealtimeChannel, RealtimeEvent};
pub use routine::{
    RefreshError, RefreshOutcome, RefreshRoutine, TokenChecker, check_and_refresh_token,
    needs_refresh,
};
pub use scheduler::{
    OverlapPolicy, RefresherHandle, RefresherOptions, TokenRefresher, UNAUTHENTICATED_PATHS,
};
