//! Resto Client - HTTP client for the restaurant backend and edge server
//!
//! - [`HttpClient`]: request interceptor (error classification, credential
//!   persistence, coalesced logout on 401)
//! - [`api`]: typed wrappers for auth, accounts, dishes and orders
//! - [`refresh`]: access-token freshness (check routine + background refresher)

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod logout;
pub mod navigator;
pub mod refresh;
pub mod storage;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{ExecutionContext, HttpClient, HttpResponse, RequestBody, RequestOptions};
pub use logout::LogoutCoordinator;
pub use navigator::{ChannelNavigator, Navigator};
pub use refresh::{
    BroadcastRealtime, OverlapPolicy, RealtimeChannel, RealtimeEvent, RefreshError,
    RefreshOutcome, RefreshRoutine, RefresherHandle, RefresherOptions, TokenChecker,
    TokenRefresher,
};
pub use storage::{CredentialStore, FileCredentialStore, MemoryCredentialStore};

// Re-export shared types for convenience
pub use shared::client::{ApiResponse, LoginData, MessageResponse, OrderItem};
pub use shared::{CredentialPair, Locale, Role};
