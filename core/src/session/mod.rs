//! Client-side session lifecycle: data model, transition rules, the state
//! container and its persistence seam.

pub mod container;
pub mod persist;
pub mod transitions;
pub mod types;

pub use container::SessionContainer;
pub use persist::SessionPersistence;
pub use transitions::{SessionAction, SessionTransition, TransitionError};
pub use types::{PersistedRecord, Session, SessionEvent, SessionPhase, User};
