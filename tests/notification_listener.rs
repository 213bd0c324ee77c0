
use console_overlay::notification::{
    notification_mailbox, run_listener, spawn_listener, ListenerExit, Notification,
    NotificationKind, NotificationPacket, NotificationSink, SinkClosed,
};
use mock_host::{EventLog, ScriptedTransport};

struct LoggingSink {
    log: EventLog,
    received: Vec<Notification>,
    accept: usize,
}

impl NotificationSink for LoggingSink {
    fn present(&mut self, notification: Notification) -> Result<(), SinkClosed> {
        self.log.push("present");
        if self.received.len() == self.accept {
            return Err(SinkClosed);
        }
        self.received.push(notification);
        Ok(())
    }
}

fn sink(log: &EventLog, accept: usize) -> LoggingSink {
    LoggingSink {
        log: log.clone(),
        received: Vec::new(),
        accept,
    }
}

#[test]
fn back_to_back_packets_are_presented_in_order() {
    let log = EventLog::default();
    let mut transport = ScriptedTransport::new(
        vec![
            NotificationPacket::new(1, 1, b"first"),
            NotificationPacket::new(2, 2, b"second"),
            NotificationPacket::new(3, 3, b"third"),
        ],
        log.clone(),
    );
    let mut sink = sink(&log, usize::MAX);

    let exit = run_listener(&mut transport, &mut sink);
    assert_eq!(exit, ListenerExit::WaitFailed);

    let mut expected = vec!["init", "handle"];
    for _ in 0..3 {
        expected.extend(["wait", "receive", "present"]);
    }
    expected.extend(["wait", "shutdown"]);
    assert_eq!(log.entries(), expected);

    let bodies: Vec<&str> = sink.received.iter().map(|n| n.body.as_str()).collect();
    assert_eq!(bodies, vec!["first", "second", "third"]);
    assert_eq!(sink.received[1].kind, NotificationKind::LowBattery);
}

#[test]
fn init_failure_exits_without_shutdown() {
    let log = EventLog::default();
    let mut transport = ScriptedTransport::new(vec![], log.clone());
    transport.fail_init = true;

    let exit = run_listener(&mut transport, &mut sink(&log, 0));
    assert_eq!(exit, ListenerExit::InitFailed);
    assert_eq!(log.entries(), vec!["init"]);
}

#[test]
fn wait_handle_failure_shuts_channel_down() {
    let log = EventLog::default();
    let mut transport = ScriptedTransport::new(vec![NotificationPacket::new(1, 1, b"x")], log.clone());
    transport.fail_handle = true;

    let exit = run_listener(&mut transport, &mut sink(&log, 1));
    assert_eq!(exit, ListenerExit::WaitHandleFailed);
    assert_eq!(log.entries(), vec!["init", "handle", "shutdown"]);
}

#[test]
fn closed_sink_stops_listener() {
    let log = EventLog::default();
    let mut transport = ScriptedTransport::new(
        vec![
            NotificationPacket::new(1, 1, b"kept"),
            NotificationPacket::new(2, 1, b"refused"),
            NotificationPacket::new(3, 1, b"never read"),
        ],
        log.clone(),
    );
    let mut sink = sink(&log, 1);

    assert_eq!(run_listener(&mut transport, &mut sink), ListenerExit::SinkClosed);
    assert_eq!(log.count("receive"), 2);
    assert_eq!(log.entries().last().map(String::as_str), Some("shutdown"));
    assert_eq!(transport.packets.len(), 1);
}

#[test]
fn spawned_listener_feeds_mailbox() {
    let log = EventLog::default();
    let transport = ScriptedTransport::new(
        vec![
            NotificationPacket::new(10, 3, b"download done"),
            NotificationPacket::new(11, 9, b"other"),
        ],
        log.clone(),
    );
    let (tx, inbox) = notification_mailbox(4);

    let handle = spawn_listener(transport, tx).unwrap();
    assert_eq!(handle.join().unwrap(), ListenerExit::WaitFailed);

    let received = inbox.drain();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].tick, 10);
    assert_eq!(received[0].kind, NotificationKind::Download);
    assert_eq!(received[1].kind, NotificationKind::Other(9));
}
