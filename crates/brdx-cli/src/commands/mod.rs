//! Command implementations.

pub mod metadata;
pub mod process;
pub mod upload;

pub use self::metadata::execute_metadata;
pub use self::process::execute_process;
pub use self::upload::execute_upload;
