//! Supabase Lite
//!
//! A small browser client for a hosted Supabase project.
//! Covers PostgREST table CRUD, GoTrue password auth, Storage uploads and the
//! Realtime change feed over a single multiplexed WebSocket.
//!
//! All network types are single-threaded (`Rc`/`RefCell`) and meant to run on
//! the browser event loop.

pub mod auth;
pub mod config;
pub mod error;
pub mod query;
pub mod realtime;
pub mod rest;
pub mod storage;

mod client;

pub use auth::{Session, User};
pub use client::Client;
pub use config::ClientConfig;
pub use error::{ConfigError, ServiceError, ServiceResult};
pub use query::{Filter, Order, Query};
pub use realtime::{ChangeKind, ChannelHandle, RawChange, RealtimeClient, TableFilter};
pub use rest::TableApi;
pub use storage::ObjectStorage;
