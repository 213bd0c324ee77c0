use crate::notification::{Notification, NotificationInbox, NotificationKind};
use crate::window::{Frame, Window};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

struct Pending {
    notification: Notification,
    shown_at: Option<Instant>,
}

/// Pop-up showing notifications delivered by the listener thread, one at a
/// time, each for `display_for`.
pub struct NotificationWindow {
    inbox: NotificationInbox,
    queue: VecDeque<Pending>,
    display_for: Duration,
    visible: bool,
}

impl NotificationWindow {
    pub fn new(inbox: NotificationInbox, display_for: Duration) -> Self {
        Self {
            inbox,
            queue: VecDeque::new(),
            display_for,
            visible: true,
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn collect(&mut self) {
        // Surplus stays in the mailbox so the listener blocks instead of the
        // queue growing.
        while self.queue.len() < self.inbox.capacity() {
            let Some(notification) = self.inbox.try_next() else {
                break;
            };
            self.queue.push_back(Pending {
                notification,
                shown_at: None,
            });
        }
        while let Some(front) = self.queue.front() {
            match front.shown_at {
                Some(at) if at.elapsed() >= self.display_for => {
                    self.queue.pop_front();
                }
                _ => break,
            }
        }
    }
}

fn kind_label(kind: NotificationKind) -> String {
    match kind {
        NotificationKind::Message => "Message".into(),
        NotificationKind::LowBattery => "Battery".into(),
        NotificationKind::Download => "Download".into(),
        NotificationKind::Other(code) => format!("Notice {code}"),
    }
}

impl Window for NotificationWindow {
    fn name(&self) -> &str {
        "notifications"
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn should_render(&mut self) -> bool {
        self.collect();
        self.visible && !self.queue.is_empty()
    }

    fn update(&mut self, frame: &mut Frame) {
        let remaining = self.queue.len().saturating_sub(1);
        let Some(front) = self.queue.front_mut() else {
            return;
        };
        front.shown_at.get_or_insert_with(Instant::now);
        let mut lines = vec![front.notification.body.clone()];
        if remaining > 0 {
            lines.push(format!("+{remaining} more"));
        }
        frame.draw(kind_label(front.notification.kind), lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::LatchedEvents;
    use crate::input::InputState;
    use crate::notification::{notification_mailbox, NotificationPacket, NotificationSink};
    use std::sync::Arc;

    fn frame() -> Frame {
        Frame::new(
            InputState::default(),
            Arc::new(Default::default()),
            LatchedEvents::default(),
        )
    }

    #[test]
    fn each_notification_is_shown_once_then_expires() {
        let (mut tx, inbox) = notification_mailbox(4);
        let mut window = NotificationWindow::new(inbox, Duration::ZERO);
        assert!(!window.should_render());

        tx.present(NotificationPacket::new(1, 1, b"hello").decode()).unwrap();
        tx.present(NotificationPacket::new(2, 3, b"update ready").decode()).unwrap();

        assert!(window.should_render());
        let mut f = frame();
        window.update(&mut f);
        assert_eq!(f.panels()[0].title, "Message");
        assert_eq!(f.panels()[0].lines, vec!["hello", "+1 more"]);

        assert!(window.should_render());
        let mut f = frame();
        window.update(&mut f);
        assert_eq!(f.panels()[0].title, "Download");

        assert!(!window.should_render());
        assert_eq!(window.pending(), 0);
    }

    #[test]
    fn backlog_is_bounded_by_mailbox_capacity() {
        let (mut tx, inbox) = notification_mailbox(4);
        let mut window = NotificationWindow::new(inbox, Duration::from_secs(60));
        for tick in 0..4 {
            tx.present(NotificationPacket::new(tick, 1, b"first batch").decode()).unwrap();
        }
        assert!(window.should_render());
        for tick in 4..8 {
            tx.present(NotificationPacket::new(tick, 1, b"second batch").decode()).unwrap();
        }
        for _ in 0..10 {
            assert!(window.should_render());
            assert_eq!(window.pending(), 4);
        }
        // The second batch is still waiting in the mailbox.
        assert_eq!(window.inbox.drain().len(), 4);
    }

    #[test]
    fn hidden_window_keeps_queue() {
        let (mut tx, inbox) = notification_mailbox(1);
        let mut window = NotificationWindow::new(inbox, Duration::from_secs(60));
        window.set_visible(false);
        tx.present(NotificationPacket::new(1, 2, b"low").decode()).unwrap();
        assert!(!window.should_render());
        assert_eq!(window.pending(), 1);
    }
}
