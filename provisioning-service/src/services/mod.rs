pub mod context_store;
pub mod error;
pub mod metrics;
pub mod mist;
pub mod session;

pub use context_store::{ContextStore, InMemoryContextStore, RedisContextStore, StoreError};
pub use error::ServiceError;
pub use mist::{HttpMistConnector, MistApi, MistConnector, MistError, MockMistConnector};
pub use session::{SessionContext, SessionRepository, SessionScope};
