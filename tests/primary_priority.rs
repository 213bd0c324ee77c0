
use console_overlay::classifier::LatchedEvents;
use console_overlay::input::InputState;
use console_overlay::window::{Frame, PrimarySlot, WindowSet};
use mock_host::{EventLog, TestWindow};
use std::sync::Arc;

fn frame() -> Frame {
    Frame::new(
        InputState::default(),
        Arc::new(Default::default()),
        LatchedEvents::default(),
    )
}

#[test]
fn highest_priority_surface_wins_for_every_combination() {
    for mask in 0u8..8 {
        let log = EventLog::default();
        let (power, power_h) = TestWindow::new("power", &log);
        let (fg, fg_h) = TestWindow::new("foreground", &log);
        let (sidebar, sidebar_h) = TestWindow::new("sidebar", &log);
        let (notifications, _) = TestWindow::new("notifications", &log);

        let mut set = WindowSet::new(Box::new(power), Box::new(sidebar), Box::new(notifications));
        set.set_foreground(Box::new(fg));
        if mask & 1 != 0 {
            power_h.show();
        }
        if mask & 2 != 0 {
            fg_h.show();
        }
        if mask & 4 != 0 {
            sidebar_h.show();
        }

        let expected = if mask & 1 != 0 {
            Some(PrimarySlot::Power)
        } else if mask & 2 != 0 {
            Some(PrimarySlot::Foreground)
        } else if mask & 4 != 0 {
            Some(PrimarySlot::Sidebar)
        } else {
            None
        };

        let mut f = frame();
        assert_eq!(set.update_primary(&mut f), expected, "mask {mask:03b}");
        assert_eq!(log.entries().len(), usize::from(expected.is_some()), "mask {mask:03b}");
        assert_eq!(f.panels().len(), usize::from(expected.is_some()));
    }
}

#[test]
fn missing_foreground_is_skipped() {
    let log = EventLog::default();
    let (power, _) = TestWindow::new("power", &log);
    let (sidebar, sidebar_h) = TestWindow::new("sidebar", &log);
    let (notifications, _) = TestWindow::new("notifications", &log);
    let mut set = WindowSet::new(Box::new(power), Box::new(sidebar), Box::new(notifications));
    sidebar_h.show();

    assert_eq!(set.select_primary(), Some(PrimarySlot::Sidebar));
    set.clear_foreground();
    assert!(set.foreground.is_none());
}

#[test]
fn notifications_render_beside_primary() {
    let log = EventLog::default();
    let (power, power_h) = TestWindow::new("power", &log);
    let (sidebar, _) = TestWindow::new("sidebar", &log);
    let (notifications, notif_h) = TestWindow::new("notifications", &log);
    let mut set = WindowSet::new(Box::new(power), Box::new(sidebar), Box::new(notifications));
    power_h.show();
    notif_h.show();

    let mut f = frame();
    set.update_primary(&mut f);
    assert!(set.update_notifications(&mut f));
    assert_eq!(log.entries(), vec!["update:power", "update:notifications"]);
    assert_eq!(f.panels().len(), 2);
}
