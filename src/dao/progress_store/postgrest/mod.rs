mod config;
mod error;
mod session;
mod store;

pub use config::PostgrestConfig;
pub use error::{PostgrestError, PostgrestResult};
pub use session::SupabaseSession;
pub use store::PostgrestStore;
