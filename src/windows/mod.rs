pub mod menu;
pub mod notifications;
pub mod power;
pub mod sidebar;
pub mod status_window;

pub use notifications::NotificationWindow;
pub use power::PowerWindow;
pub use sidebar::Sidebar;
pub use status_window::StatusWindow;
