pub mod batch;
pub mod folder;
pub mod mover;
pub mod preview;

pub use batch::{BatchOrganizer, OrganizerOptions};
pub use folder::{extract_folder_name, FolderName};
pub use mover::FileMover;
pub use preview::PreviewTree;
