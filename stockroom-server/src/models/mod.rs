//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod item;
pub mod pagination;
pub mod patch;
pub mod user;
pub mod validation;

pub use item::{ItemName, ItemUpdate, NewItem, Price, Quantity};
pub use pagination::{Pagination, PaginationParams, DEFAULT_LIMIT};
pub use user::{Email, NewUser, Password, UserName, UserUpdate};
pub use validation::ValidationError;
