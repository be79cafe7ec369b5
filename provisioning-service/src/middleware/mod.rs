pub mod credential;

pub use credential::{ApiCredential, API_KEY_HEADER};
