pub mod classifier;
pub mod desktop;
pub mod host;
pub mod input;
pub mod logging;
pub mod mode;
pub mod notification;
pub mod session;
pub mod settings;
pub mod status;
pub mod window;
pub mod windows;

pub use session::Session;
