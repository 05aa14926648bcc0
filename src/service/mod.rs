//! Request-level rules on top of the repositories.

mod crud;
mod relations;
mod validation;
pub use crud::CrudService;
pub use relations::RelationService;
pub use validation::RequestValidator;
