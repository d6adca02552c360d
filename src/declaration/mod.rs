pub mod controller;
pub mod session;

pub use controller::DeclarationController;
pub use session::{CaptureSession, CaptureSnapshot, CapturedTag, ConfirmOutcome, TagStatus};
