pub mod checkpoint;
pub mod language;
pub mod utils;

pub use checkpoint::{Checkpoint, CheckpointError, CheckpointStore};
pub use language::resolve_extension;
pub use utils::sanitize_filename;
