pub mod focus;
pub mod modal;

pub use modal::FormModal;
