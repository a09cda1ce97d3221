//! This crate builds a dataset of the school holidays and public holidays of Paris.
//!
//! The school holidays are read from the school calendar published on
//! <https://data.education.gouv.fr/explore/dataset/fr-en-calendrier-scolaire/>, the
//! French public holidays are computed.

pub mod config;
pub mod error;
pub mod holidays;
pub mod loader;
pub mod normalize;
pub mod pipeline;
pub mod schema;
pub mod school_year;
pub mod table;
pub mod writer;

pub use config::{Config, DateWindow};
pub use error::{Error, Result};
pub use table::{Cell, Table};
