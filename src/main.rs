use console_overlay::desktop::{DesktopEnvironment, DesktopHost, TextRenderer};
use console_overlay::mode::ModeController;
use console_overlay::notification::{notification_mailbox, spawn_listener};
use console_overlay::settings::{Settings, SETTINGS_FILE};
use console_overlay::status::StatusCache;
use console_overlay::window::WindowSet;
use console_overlay::windows::{NotificationWindow, PowerWindow, Sidebar};
use console_overlay::{logging, Session};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let (settings, settings_err) = match Settings::load(SETTINGS_FILE) {
        Ok(settings) => (settings, None),
        Err(err) => (Settings::default(), Some(err)),
    };
    logging::init(settings.debug_logging, settings.log_file.as_ref().map(PathBuf::from));
    if let Some(err) = settings_err {
        tracing::warn!(?err, "couldn't read {SETTINGS_FILE}, using defaults");
    }

    if settings.startup_delay_secs > 0 {
        tracing::info!(secs = settings.startup_delay_secs, "waiting before start-up");
        std::thread::sleep(Duration::from_secs(settings.startup_delay_secs));
    }

    let host = DesktopHost::start()?;
    let status = Arc::new(StatusCache::new(
        Box::new(DesktopEnvironment::new()),
        settings.status_refresh(),
    ));

    let (sink, inbox) = notification_mailbox(settings.notification_mailbox);
    let listener = match spawn_listener(host.notifications, sink) {
        Ok(handle) => Some(handle),
        Err(err) => {
            tracing::warn!(%err, "failed to start notification listener");
            None
        }
    };

    let windows = WindowSet::new(
        Box::new(PowerWindow::new()),
        Box::new(Sidebar::new()),
        Box::new(NotificationWindow::new(inbox, settings.notification_display())),
    );
    let mut session = Session::new(
        Box::new(host.messages),
        Box::new(host.input),
        Box::new(TextRenderer::new(std::io::stdout())),
        ModeController::new(Box::new(host.hooks)),
        status,
        windows,
        settings.cadence(),
    );

    tracing::info!("overlay ready; type power, home-long, key <button>, notify <text> or quit");
    session.run();
    // The session only ends after the stdin reader queued its exit request,
    // so the listener's transport is already closed.
    drop(session);
    if let Some(handle) = listener {
        match handle.join() {
            Ok(exit) => tracing::info!(?exit, "notification listener stopped"),
            Err(_) => tracing::warn!("notification listener panicked"),
        }
    }
    Ok(())
}
