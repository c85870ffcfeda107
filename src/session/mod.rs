//! Dashboard session gate and the local store it persists to.

pub mod gate;
pub mod store;

pub use self::gate::{Guard, LOGIN_PATH, Session, SessionGate};
pub use self::store::{FileStore, KeyValueStore, MemoryStore};
