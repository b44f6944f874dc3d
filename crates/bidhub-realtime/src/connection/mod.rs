//! Connection handles and the presence registry.

pub mod handle;
pub mod presence;

pub use handle::ConnectionHandle;
pub use presence::PresenceRegistry;
