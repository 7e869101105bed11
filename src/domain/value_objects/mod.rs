mod bucket_name;
mod log_id;
mod object_key;

pub use bucket_name::BucketName;
pub use log_id::LogId;
pub use object_key::ObjectKey;
