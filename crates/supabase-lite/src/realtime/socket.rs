//! Multiplexed Realtime socket.

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::{SinkExt, StreamExt};
use gloo_net::websocket::futures::WebSocket;
use gloo_net::websocket::Message;
use gloo_timers::future::TimeoutFuture;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

use super::protocol::{
    access_token_message, heartbeat_message, join_message, leave_message, parse_change,
    PhoenixMessage, RawChange, TableFilter, EVENT_ERROR,
};

const HEARTBEAT_MS: u32 = 25_000;
const BASE_BACKOFF_MS: u32 = 1_000;
const MAX_BACKOFF_MS: u32 = 30_000;

/// Delay before reconnect attempt `attempts` (0-based).
pub fn backoff_ms(attempts: u32) -> u32 {
    BASE_BACKOFF_MS
        .saturating_mul(1u32 << attempts.min(16))
        .min(MAX_BACKOFF_MS)
}

struct Channel {
    filter: TableFilter,
    sender: UnboundedSender<RawChange>,
}

/// Channel bookkeeping, free of any socket IO.
struct SocketState {
    url: String,
    /// Sent in place of a user token after sign-out
    anon_key: String,
    outbound: Option<UnboundedSender<String>>,
    generation: u64,
    next_ref: u64,
    next_channel: u64,
    reconnect_attempts: u32,
    access_token: Option<String>,
    channels: HashMap<String, Channel>,
}

impl SocketState {
    fn new(url: String, anon_key: String) -> Self {
        Self {
            url,
            anon_key,
            outbound: None,
            generation: 0,
            next_ref: 0,
            next_channel: 0,
            reconnect_attempts: 0,
            access_token: None,
            channels: HashMap::new(),
        }
    }

    fn make_ref(&mut self) -> String {
        self.next_ref += 1;
        self.next_ref.to_string()
    }

    fn is_connected(&self) -> bool {
        self.outbound.is_some()
    }

    fn send(&mut self, msg: &PhoenixMessage) {
        let Some(out) = &self.outbound else { return };
        if out.unbounded_send(msg.to_text()).is_err() {
            self.outbound = None;
        }
    }

    fn join(&mut self, topic: &str) {
        let Some(filter) = self.channels.get(topic).map(|c| c.filter.clone()) else { return };
        let reference = self.make_ref();
        let msg = join_message(topic, &reference, &filter, self.access_token.as_deref());
        self.send(&msg);
    }

    fn join_all(&mut self) {
        let topics: Vec<String> = self.channels.keys().cloned().collect();
        for topic in topics {
            self.join(&topic);
        }
    }

    /// Register a channel and join it right away when the socket is up.
    fn register(&mut self, name: &str, filter: TableFilter) -> (String, UnboundedReceiver<RawChange>) {
        self.next_channel += 1;
        let topic = format!("realtime:{}:{}", name, self.next_channel);
        let (sender, receiver) = mpsc::unbounded();
        self.channels.insert(topic.clone(), Channel { filter, sender });
        if self.is_connected() {
            self.join(&topic);
        }
        (topic, receiver)
    }

    /// Drop the channel (ending its stream) and tell the server.
    fn remove(&mut self, topic: &str) {
        if self.channels.remove(topic).is_some() {
            let reference = self.make_ref();
            self.send(&leave_message(topic, &reference));
        }
    }

    /// Push the new token to every live channel; `None` downgrades them to
    /// the anon key.
    fn set_access_token(&mut self, token: Option<String>) {
        self.access_token = token;
        let token = self.access_token.clone().unwrap_or_else(|| self.anon_key.clone());
        let topics: Vec<String> = self.channels.keys().cloned().collect();
        for topic in topics {
            let reference = self.make_ref();
            self.send(&access_token_message(&topic, &reference, &token));
        }
    }

    fn dispatch(&mut self, text: &str) {
        let msg: PhoenixMessage = match serde_json::from_str(text) {
            Ok(msg) => msg,
            Err(err) => {
                log::warn!("realtime: unreadable frame: {}", err);
                return;
            }
        };
        self.reconnect_attempts = 0;

        if let Some(reason) = msg.reply_error() {
            log::warn!("realtime: {} refused: {}", msg.topic, reason);
            return;
        }
        if msg.event == EVENT_ERROR {
            log::warn!("realtime: channel {} errored", msg.topic);
            return;
        }
        let Some(change) = parse_change(&msg) else { return };
        if let Some(channel) = self.channels.get(&msg.topic) {
            let _ = channel.sender.unbounded_send(change);
        }
    }
}

/// Shared handle to the socket; clones refer to the same connection.
#[derive(Clone)]
pub struct RealtimeClient {
    state: Rc<RefCell<SocketState>>,
}

impl RealtimeClient {
    pub fn new(url: String, anon_key: String) -> Self {
        Self { state: Rc::new(RefCell::new(SocketState::new(url, anon_key))) }
    }

    pub fn set_access_token(&self, token: Option<String>) {
        self.state.borrow_mut().set_access_token(token);
    }

    /// Listen to changes on one table. `name` only labels the topic.
    pub fn subscribe(&self, name: &str, filter: TableFilter) -> (ChannelHandle, UnboundedReceiver<RawChange>) {
        let (topic, receiver, connected) = {
            let mut state = self.state.borrow_mut();
            let (topic, receiver) = state.register(name, filter);
            (topic, receiver, state.is_connected())
        };
        if !connected {
            self.connect();
        }
        log::debug!("realtime: subscribed {}", topic);
        (ChannelHandle { topic, client: self.clone(), open: true }, receiver)
    }

    fn unsubscribe(&self, topic: &str) {
        self.state.borrow_mut().remove(topic);
        log::debug!("realtime: left {}", topic);
    }

    fn connect(&self) {
        let (url, generation) = {
            let mut state = self.state.borrow_mut();
            state.generation += 1;
            (state.url.clone(), state.generation)
        };

        let socket = match WebSocket::open(&url) {
            Ok(socket) => socket,
            Err(err) => {
                log::error!("realtime: connect failed: {:?}", err);
                self.schedule_reconnect(generation);
                return;
            }
        };
        let (mut sink, mut stream) = socket.split();
        let (out_tx, mut out_rx) = mpsc::unbounded::<String>();
        {
            let mut state = self.state.borrow_mut();
            state.outbound = Some(out_tx);
            state.join_all();
        }

        // Writer: the sink waits for the socket to open, so queued joins go out first.
        spawn_local(async move {
            while let Some(text) = out_rx.next().await {
                if let Err(err) = sink.send(Message::Text(text)).await {
                    log::warn!("realtime: send failed: {}", err);
                    break;
                }
            }
            let _ = sink.close().await;
        });

        let reader = self.clone();
        spawn_local(async move {
            while let Some(frame) = stream.next().await {
                match frame {
                    Ok(Message::Text(text)) => reader.state.borrow_mut().dispatch(&text),
                    Ok(Message::Bytes(_)) => {}
                    Err(err) => {
                        log::warn!("realtime: socket error: {}", err);
                        break;
                    }
                }
            }
            reader.on_disconnect(generation);
        });

        let heart = self.clone();
        spawn_local(async move {
            loop {
                TimeoutFuture::new(HEARTBEAT_MS).await;
                let mut state = heart.state.borrow_mut();
                if state.generation != generation || !state.is_connected() {
                    break;
                }
                let reference = state.make_ref();
                state.send(&heartbeat_message(&reference));
            }
        });
    }

    fn on_disconnect(&self, generation: u64) {
        let retry = {
            let mut state = self.state.borrow_mut();
            if state.generation != generation {
                return;
            }
            state.outbound = None;
            !state.channels.is_empty()
        };
        log::warn!("realtime: disconnected");
        if retry {
            self.schedule_reconnect(generation);
        }
    }

    fn schedule_reconnect(&self, generation: u64) {
        let delay = {
            let mut state = self.state.borrow_mut();
            let delay = backoff_ms(state.reconnect_attempts);
            state.reconnect_attempts += 1;
            delay
        };
        let client = self.clone();
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            let stale = {
                let state = client.state.borrow();
                state.generation != generation || state.is_connected() || state.channels.is_empty()
            };
            if !stale {
                client.connect();
            }
        });
    }
}

/// Owning handle for one channel. Closing (or dropping) leaves the channel
/// and ends the paired receiver.
pub struct ChannelHandle {
    topic: String,
    client: RealtimeClient,
    open: bool,
}

impl ChannelHandle {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        if self.open {
            self.open = false;
            self.client.unsubscribe(&self.topic);
        }
    }
}

impl Drop for ChannelHandle {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Filter;
    use crate::realtime::ChangeKind;
    use serde_json::Value;

    fn connected_state() -> (SocketState, UnboundedReceiver<String>) {
        let mut state = SocketState::new("ws://test".into(), "anon".into());
        let (tx, rx) = mpsc::unbounded();
        state.outbound = Some(tx);
        (state, rx)
    }

    fn drain(rx: &mut UnboundedReceiver<String>) -> Vec<Value> {
        let mut sent = Vec::new();
        while let Ok(Some(text)) = rx.try_next() {
            sent.push(serde_json::from_str(&text).unwrap());
        }
        sent
    }

    fn change_frame(topic: &str, kind: &str, id: &str) -> String {
        format!(
            r#"{{"topic":"{}","event":"postgres_changes","ref":null,
                "payload":{{"data":{{"table":"projects","type":"{}","record":{{"id":"{}"}},"old_record":{{"id":"{}"}}}}}}}}"#,
            topic, kind, id, id
        )
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        assert_eq!(backoff_ms(0), 1_000);
        assert_eq!(backoff_ms(1), 2_000);
        assert_eq!(backoff_ms(4), 16_000);
        assert_eq!(backoff_ms(5), 30_000);
        assert_eq!(backoff_ms(40), 30_000);
    }

    #[test]
    fn test_register_joins_when_connected() {
        let (mut state, mut out) = connected_state();
        let (topic, _rx) = state.register("projects", TableFilter::table("projects"));
        assert_eq!(topic, "realtime:projects:1");

        let sent = drain(&mut out);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["event"], "phx_join");
        assert_eq!(sent[0]["topic"], "realtime:projects:1");
    }

    #[test]
    fn test_register_offline_defers_join() {
        let mut state = SocketState::new("ws://test".into(), "anon".into());
        let (_topic, _rx) = state.register("projects", TableFilter::table("projects"));
        assert!(state.outbound.is_none());

        let (tx, mut out) = mpsc::unbounded();
        state.outbound = Some(tx);
        state.join_all();
        assert_eq!(drain(&mut out).len(), 1);
    }

    #[test]
    fn test_topics_are_unique_per_subscription() {
        let (mut state, _out) = connected_state();
        let (a, _ra) = state.register("activities", TableFilter::table("activities"));
        let (b, _rb) = state.register("activities", TableFilter::table("activities"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_dispatch_routes_by_topic() {
        let (mut state, _out) = connected_state();
        let (projects, mut rx_projects) = state.register("projects", TableFilter::table("projects"));
        let (_other, mut rx_other) = state.register("mails", TableFilter::table("mails"));

        state.dispatch(&change_frame(&projects, "INSERT", "p1"));

        let change = rx_projects.try_next().unwrap().unwrap();
        assert_eq!(change.kind, ChangeKind::Insert);
        assert_eq!(change.id().as_deref(), Some("p1"));
        assert!(rx_other.try_next().is_err());
    }

    #[test]
    fn test_remove_ends_stream_and_sends_leave() {
        let (mut state, mut out) = connected_state();
        let (topic, mut rx) = state.register("reminders", TableFilter::table("reminders"));
        drain(&mut out);

        state.remove(&topic);
        let sent = drain(&mut out);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["event"], "phx_leave");

        // Closed channel delivers nothing further.
        state.dispatch(&change_frame(&topic, "INSERT", "r1"));
        assert_eq!(rx.try_next().unwrap(), None);

        // Removing twice is a no-op.
        state.remove(&topic);
        assert!(drain(&mut out).is_empty());
    }

    #[test]
    fn test_access_token_broadcast_and_used_on_join() {
        let (mut state, mut out) = connected_state();
        let filter = TableFilter::table("mails").with_filter(Filter::eq("category", "inbox"));
        let (_topic, _rx) = state.register("mails", filter);
        drain(&mut out);

        state.set_access_token(Some("jwt".into()));
        let sent = drain(&mut out);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["event"], "access_token");
        assert_eq!(sent[0]["payload"]["access_token"], "jwt");

        state.join_all();
        let sent = drain(&mut out);
        assert_eq!(sent[0]["payload"]["access_token"], "jwt");
        assert_eq!(
            sent[0]["payload"]["config"]["postgres_changes"][0]["filter"],
            "category=eq.inbox"
        );
    }

    #[test]
    fn test_garbage_frames_are_ignored() {
        let (mut state, _out) = connected_state();
        let (_topic, mut rx) = state.register("projects", TableFilter::table("projects"));
        state.dispatch("not json");
        state.dispatch(r#"{"topic":"phoenix","event":"phx_reply","payload":{"status":"ok"},"ref":"3"}"#);
        assert!(rx.try_next().is_err());
    }

    #[test]
    fn test_sign_out_downgrades_channels_to_anon_key() {
        let (mut state, mut out) = connected_state();
        let (_topic, _rx) = state.register("projects", TableFilter::table("projects"));
        state.set_access_token(Some("jwt".into()));
        drain(&mut out);

        state.set_access_token(None);
        let sent = drain(&mut out);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["event"], "access_token");
        assert_eq!(sent[0]["payload"]["access_token"], "anon");
    }
}
