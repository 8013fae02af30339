pub mod config;
pub mod demo;
pub mod errors;
pub mod facade;
pub mod interfaces;
pub mod storage;
pub mod testing;
pub mod utils {
    pub mod log_utils;
    pub mod path_utils;
}

pub use config::LabConfig;
pub use errors::{ErrorKind, Result, StorageError};
pub use facade::StorageFacade;
pub use interfaces::ObjectStore;
pub use storage::S3Backend;
