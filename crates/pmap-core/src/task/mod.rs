pub mod build;
pub mod model;
pub mod validate;

pub use build::build_task;
pub use model::TaskDocument;
pub use validate::{TaskValidationError, validate_task};
