pub mod config;
pub mod session;
pub mod task;
pub mod tip;

pub use config::*;
pub use session::*;
pub use task::*;
pub use tip::*;
