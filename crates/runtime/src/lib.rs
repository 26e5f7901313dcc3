pub mod frame;
pub mod scheduler;
pub mod tokio_scheduler;

pub use frame::*;
pub use scheduler::*;
pub use tokio_scheduler::*;
