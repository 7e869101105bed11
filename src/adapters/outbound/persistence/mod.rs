mod file_transfer_state;
mod in_memory_lifecycle_repository;
mod in_memory_transfer_state;
mod sqlite_transfer_state;

pub use file_transfer_state::FileTransferState;
pub use in_memory_lifecycle_repository::InMemoryLifecycleRepository;
pub use in_memory_transfer_state::InMemoryTransferState;
pub use sqlite_transfer_state::SqliteTransferState;
