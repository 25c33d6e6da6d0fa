pub mod dashboard;
pub mod handlers;
pub mod sidebar;
pub mod upload_scanner;
pub mod utils;
pub mod webcam_scanner;
