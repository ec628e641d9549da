//! Bulkclone GitHub - Repository listing backends
//!
//! Provides the `gh` CLI and REST API implementations of
//! [`bulkclone_core::RepositoryLister`].

mod api;
mod error;
mod gh;

pub use api::ApiLister;
pub use error::{Error, Result};
pub use gh::GhCliLister;

use bulkclone_core::{Config, ListingBackend, RepositoryLister};

/// Build the lister selected by the configuration
pub fn lister_for(config: &Config) -> Result<Box<dyn RepositoryLister>> {
    match config.listing.backend {
        ListingBackend::Gh => Ok(Box::new(GhCliLister::new(config.clone.gh_path.clone()))),
        ListingBackend::Api => Ok(Box::new(ApiLister::from_secrets(
            config.listing.api_base_url.as_deref(),
        )?)),
    }
}
