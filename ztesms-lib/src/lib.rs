pub mod auth;
pub mod codec;
pub mod error;
pub mod sms;
pub mod store;
pub mod transport;


// Re-export the main entry points for easy access
pub use auth::AuthSession;
pub use codec::PasswordEncoding;
pub use error::RouterError;
pub use sms::{ChangeResult, SmsList, SmsMessage, SmsSync};
pub use store::{FileStore, FingerprintStore, MemoryStore};
pub use transport::{HttpTransport, RouterTransport};
