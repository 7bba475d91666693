//! Named analysis setups and their persistence.
//!
//! [`CodeExplorerConfiguration`] is a plain value holding only persisted
//! fields. Compiled rules live in a [`DerivedCache`] next to it, and
//! [`CodeExplorerConfigurations`] binds an ordered collection to a file.

mod cache;
mod model;
mod store;

pub use cache::DerivedCache;
pub use model::CodeExplorerConfiguration;
pub use store::{CodeExplorerConfigurations, StoreError};
