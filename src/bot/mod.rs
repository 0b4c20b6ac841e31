pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::{run, schema};
pub use state::AppContext;
