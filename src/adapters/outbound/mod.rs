pub mod notify;
pub mod persistence;
pub mod source;
pub mod storage;
