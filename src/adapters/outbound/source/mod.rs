mod fs_log_source;
mod in_memory_log_source;

pub use fs_log_source::FsLogSource;
pub use in_memory_log_source::InMemoryLogSource;
