//! Record loaders and the adapter that turns them into loading actions.
//!
//! A loader is the single external capability the core consumes: produce a
//! sequence of [`Record`]s asynchronously, or fail. Two implementations ship
//! with the crate:
//!
//! - [`SodaLoader`]: fetches a Socrata Open Data API JSON endpoint over HTTP
//! - [`FakeLoader`]: synthetic fixtures for demos and tests
//!
//! [`LoaderAction`] bridges any loader into the machine's side-effect slot.

mod action;
mod fake;
mod soda;

use async_trait::async_trait;

use crate::core::Record;
use crate::error::LoadError;

pub use action::LoaderAction;
pub use fake::FakeLoader;
pub use soda::{SodaLoader, CHICAGO_FOOD_INSPECTIONS_URL};

/// Asynchronously produce an ordered sequence of records, or fail.
///
/// The core imposes no further contract: how records are obtained, cached, or
/// ordered is entirely the loader's business.
#[async_trait]
pub trait RecordsLoader: Send + Sync {
    /// Fetch the current set of records.
    async fn fetch(&self) -> Result<Vec<Record>, LoadError>;
}
