pub mod event;
pub mod event_log;
pub mod policy;
pub mod session;

pub use event::*;
pub use event_log::*;
pub use policy::*;
pub use session::*;
