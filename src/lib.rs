//! Shelf application library
//!
//! Project modules (the book catalog) and the service bootstrap.

pub mod app;
pub mod modules;

pub use app::run;
pub use modules::books;
