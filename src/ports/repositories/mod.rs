mod lifecycle_repository;
mod transfer_state_repository;

pub use lifecycle_repository::LifecycleRepository;
pub use transfer_state_repository::{TransferStateOpener, TransferStateRepository};
