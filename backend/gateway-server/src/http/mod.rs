pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod utils;

pub use router::create_router;
pub use state::AppState;
pub use utils::ValidatedJson;
