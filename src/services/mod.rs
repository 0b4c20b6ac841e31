pub mod conversation;
pub mod genres;
pub mod providers;
pub mod recommendations;
pub mod render;
pub mod session;

pub use conversation::Conversation;
pub use genres::GenreRegistry;
pub use recommendations::Selector;
pub use session::{InMemorySessionStore, SessionStore};
