pub mod bootstrap;
pub mod map_session;

pub use bootstrap::{SessionHandle, StyleBootstrapper};
pub use map_session::{MapSession, MapSessionBuilder};
