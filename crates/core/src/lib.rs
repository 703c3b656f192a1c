pub mod models;
pub mod traits;
pub mod discovery;
pub mod cover_cache;
pub mod resolver;

pub use models::*;
pub use traits::*;
pub use discovery::*;
pub use cover_cache::*;
pub use resolver::*;
