mod lifecycle_errors;
mod notify_errors;
mod state_errors;
mod storage_errors;
mod validation_errors;

pub use lifecycle_errors::*;
pub use notify_errors::*;
pub use state_errors::*;
pub use storage_errors::*;
pub use validation_errors::*;
