
pub mod defaults;
pub mod document;
pub mod error;
pub mod parameters;
pub mod snapshot;
pub mod summary;

pub use {
    defaults::DefaultTable,
    document::Document,
    error::{Error, Result},
    parameters::Parameters,
    snapshot::Snapshot,
};
