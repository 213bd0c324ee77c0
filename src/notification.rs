//! Background notification listener.
//!
//! The listener owns the host notification transport on its own thread and
//! hands each decoded notification to a [`NotificationSink`]. The render loop
//! reads them back through a [`NotificationInbox`].

use crate::host::NotificationTransport;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TryRecvError};
use std::thread::{self, JoinHandle};

pub const NOTIFICATION_PAYLOAD_LEN: usize = 0x80;
const HEADER_LEN: usize = 4;

/// Raw notification as delivered by the host.
#[derive(Clone, PartialEq, Eq)]
pub struct NotificationPacket {
    pub tick: u64,
    pub payload: [u8; NOTIFICATION_PAYLOAD_LEN],
}

impl std::fmt::Debug for NotificationPacket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationPacket")
            .field("tick", &self.tick)
            .field("payload", &hex::encode(self.payload))
            .finish()
    }
}

impl NotificationPacket {
    /// Build a packet from a kind and body, truncating the body to fit.
    pub fn new(tick: u64, kind: u16, body: &[u8]) -> Self {
        let mut payload = [0u8; NOTIFICATION_PAYLOAD_LEN];
        let len = body.len().min(NOTIFICATION_PAYLOAD_LEN - HEADER_LEN);
        payload[0..2].copy_from_slice(&kind.to_le_bytes());
        payload[2..4].copy_from_slice(&(len as u16).to_le_bytes());
        payload[HEADER_LEN..HEADER_LEN + len].copy_from_slice(&body[..len]);
        Self { tick, payload }
    }

    pub fn decode(&self) -> Notification {
        let kind = u16::from_le_bytes([self.payload[0], self.payload[1]]);
        let declared = u16::from_le_bytes([self.payload[2], self.payload[3]]) as usize;
        let len = declared.min(NOTIFICATION_PAYLOAD_LEN - HEADER_LEN);
        let body = &self.payload[HEADER_LEN..HEADER_LEN + len];
        Notification {
            tick: self.tick,
            kind: NotificationKind::from(kind),
            body: String::from_utf8_lossy(body)
                .trim_end_matches('\0')
                .to_string(),
            raw_hex: hex::encode(self.payload),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Message,
    LowBattery,
    Download,
    Other(u16),
}

impl From<u16> for NotificationKind {
    fn from(value: u16) -> Self {
        match value {
            1 => NotificationKind::Message,
            2 => NotificationKind::LowBattery,
            3 => NotificationKind::Download,
            other => NotificationKind::Other(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub tick: u64,
    pub kind: NotificationKind,
    pub body: String,
    pub raw_hex: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkClosed;

/// Receiver side of the listener. Must accept deliveries from the listener
/// thread while the render thread reads them.
pub trait NotificationSink: Send {
    /// Deliver one notification. Returns once the hand-off is complete.
    fn present(&mut self, notification: Notification) -> Result<(), SinkClosed>;
}

pub struct MailboxSender {
    tx: SyncSender<Notification>,
}

impl NotificationSink for MailboxSender {
    fn present(&mut self, notification: Notification) -> Result<(), SinkClosed> {
        // Blocks while the mailbox is full so nothing is dropped.
        self.tx.send(notification).map_err(|_| SinkClosed)
    }
}

pub struct NotificationInbox {
    rx: Receiver<Notification>,
    capacity: usize,
}

impl NotificationInbox {
    /// Number of notifications the mailbox buffers before the listener blocks.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Take one delivered notification without blocking.
    pub fn try_next(&self) -> Option<Notification> {
        self.rx.try_recv().ok()
    }

    /// Take everything delivered so far without blocking.
    pub fn drain(&self) -> Vec<Notification> {
        let mut out = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(n) => out.push(n),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }
}

/// Bounded hand-off between the listener and the notification surface.
pub fn notification_mailbox(capacity: usize) -> (MailboxSender, NotificationInbox) {
    let capacity = capacity.max(1);
    let (tx, rx) = sync_channel(capacity);
    (MailboxSender { tx }, NotificationInbox { rx, capacity })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerExit {
    InitFailed,
    WaitHandleFailed,
    WaitFailed,
    SinkClosed,
}

/// Run the listener until the transport or the sink goes away.
pub fn run_listener<T, S>(transport: &mut T, sink: &mut S) -> ListenerExit
where
    T: NotificationTransport + ?Sized,
    S: NotificationSink + ?Sized,
{
    if let Err(err) = transport.initialize() {
        tracing::warn!(%err, "notification channel init failed, notifications disabled");
        return ListenerExit::InitFailed;
    }
    if let Err(err) = transport.acquire_wait_handle() {
        tracing::warn!(%err, "notification wait handle unavailable");
        transport.shutdown();
        return ListenerExit::WaitHandleFailed;
    }

    let exit = loop {
        if let Err(err) = transport.wait() {
            tracing::info!(%err, "notification wait failed");
            break ListenerExit::WaitFailed;
        }
        let packet = match transport.receive() {
            Ok(packet) => packet,
            Err(err) => {
                tracing::warn!(%err, "notification receive failed");
                continue;
            }
        };
        let notification = packet.decode();
        tracing::debug!(
            tick = notification.tick,
            kind = ?notification.kind,
            raw = %notification.raw_hex,
            "got notification"
        );
        if sink.present(notification).is_err() {
            tracing::info!("notification sink closed");
            break ListenerExit::SinkClosed;
        }
    };

    transport.shutdown();
    tracing::info!(?exit, "exiting notification listener");
    exit
}

pub fn spawn_listener<T, S>(mut transport: T, mut sink: S) -> std::io::Result<JoinHandle<ListenerExit>>
where
    T: NotificationTransport + 'static,
    S: NotificationSink + 'static,
{
    thread::Builder::new()
        .name("notifications".into())
        .spawn(move || run_listener(&mut transport, &mut sink))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_reads_header_and_body() {
        let packet = NotificationPacket::new(42, 2, b"Battery at 15%");
        let n = packet.decode();
        assert_eq!(n.tick, 42);
        assert_eq!(n.kind, NotificationKind::LowBattery);
        assert_eq!(n.body, "Battery at 15%");
        assert_eq!(n.raw_hex.len(), NOTIFICATION_PAYLOAD_LEN * 2);
    }

    #[test]
    fn oversized_declared_length_is_clamped() {
        let mut payload = [b'x'; NOTIFICATION_PAYLOAD_LEN];
        payload[0..2].copy_from_slice(&9u16.to_le_bytes());
        payload[2..4].copy_from_slice(&u16::MAX.to_le_bytes());
        let n = NotificationPacket { tick: 0, payload }.decode();
        assert_eq!(n.kind, NotificationKind::Other(9));
        assert_eq!(n.body.len(), NOTIFICATION_PAYLOAD_LEN - HEADER_LEN);
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = vec![b'a'; 500];
        let n = NotificationPacket::new(1, 1, &body).decode();
        assert_eq!(n.body.len(), NOTIFICATION_PAYLOAD_LEN - HEADER_LEN);
    }

    #[test]
    fn inbox_hands_out_one_at_a_time() {
        let (mut tx, inbox) = notification_mailbox(0);
        assert_eq!(inbox.capacity(), 1);
        assert!(inbox.try_next().is_none());
        tx.present(NotificationPacket::new(7, 2, b"low").decode()).unwrap();
        assert_eq!(inbox.try_next().map(|n| n.tick), Some(7));
        assert!(inbox.try_next().is_none());
    }

    #[test]
    fn mailbox_drains_in_order_and_reports_closed() {
        let (mut tx, inbox) = notification_mailbox(4);
        tx.present(NotificationPacket::new(1, 1, b"one").decode()).unwrap();
        tx.present(NotificationPacket::new(2, 1, b"two").decode()).unwrap();
        let bodies: Vec<_> = inbox.drain().into_iter().map(|n| n.body).collect();
        assert_eq!(bodies, vec!["one", "two"]);
        assert!(inbox.drain().is_empty());
        drop(inbox);
        assert_eq!(
            tx.present(NotificationPacket::new(3, 1, b"three").decode()),
            Err(SinkClosed)
        );
    }
}
