//! Realtime change feed
//!
//! One WebSocket per client, many channels multiplexed over it. Each
//! subscription hands back a `ChannelHandle` (close it to leave) and an mpsc
//! receiver that yields decoded `RawChange`s.

mod protocol;
mod socket;

pub use protocol::{parse_change, ChangeKind, PhoenixMessage, RawChange, TableFilter};
pub use socket::{backoff_ms, ChannelHandle, RealtimeClient};
