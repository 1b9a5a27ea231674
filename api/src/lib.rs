//! Map pin assembly with coordinate geomasking.
//!
//! The core is two pure pieces: [`masking`] displaces a true coordinate by a
//! random bearing and distance, and [`validation`] holds the URL, hex colour
//! and identifier rules. [`record`] glues them into a pins.json entry, served
//! over HTTP by [`routes`] or collected interactively by [`prompt`].

pub mod config;
pub mod errors;
pub mod geo;
pub mod masking;
pub mod models;
pub mod prompt;
pub mod record;
mod response;
pub mod routes;
pub mod validation;
pub mod zones;

pub use errors::AppError;
pub use masking::mask_coordinate;
pub use validation::{validate_hex_colour, validate_identifier, validate_url};
