//! Response rendering.
//!
//! - [`Envelope`] - JSON success envelopes
//! - [`csv_export`] - listing export as a CSV download

pub mod csv_export;
mod envelope;

pub use csv_export::CsvDownload;
pub use envelope::Envelope;
