use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

use crate::errors::AppError;

pub const MAX_RADIUS_M: f64 = 500_000.0;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^https?://",
        r"(?:(?:[A-Za-z0-9-]+\.)+[A-Za-z]{2,6}",
        r"|localhost",
        r"|\d{1,3}(?:\.\d{1,3}){3})",
        r"(?::\d+)?",
        r"(?:/\S*)?$",
    ))
    .unwrap()
});
static HEX_COLOUR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9A-Fa-f]{3}){1,2}$").unwrap());
static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").unwrap());

/// `http(s)://` followed by a dotted host, `localhost` or an IPv4 literal,
/// an optional port and an optional path.
pub fn validate_url(text: &str) -> bool {
    URL_RE.is_match(text)
}

/// `#RGB` or `#RRGGBB`, any case.
pub fn validate_hex_colour(text: &str) -> bool {
    HEX_COLOUR_RE.is_match(text)
}

/// Lowercase letters, digits, `-` and `_`.
pub fn validate_identifier(text: &str) -> bool {
    IDENTIFIER_RE.is_match(text)
}

// Field adapters for `#[validate(custom(...))]`.

pub fn validate_lat(lat: f64) -> Result<(), ValidationError> {
    if !lat.is_finite() || lat < -90.0 || lat > 90.0 {
        return Err(ValidationError::new("latitude"));
    }
    Ok(())
}

pub fn validate_lon(lon: f64) -> Result<(), ValidationError> {
    if !lon.is_finite() || lon < -180.0 || lon > 180.0 {
        return Err(ValidationError::new("longitude"));
    }
    Ok(())
}

pub fn validate_radius_field(radius: f64) -> Result<(), ValidationError> {
    if !radius.is_finite() || radius <= 0.0 || radius > MAX_RADIUS_M {
        return Err(ValidationError::new("radius"));
    }
    Ok(())
}

pub fn validate_optional_url_field(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() || validate_url(url) {
        return Ok(());
    }
    Err(ValidationError::new("url"))
}

pub fn validate_colour_field(colour: &str) -> Result<(), ValidationError> {
    if !validate_hex_colour(colour) {
        return Err(ValidationError::new("colour"));
    }
    Ok(())
}

pub fn validate_required_field(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), AppError> {
    if !lat.is_finite() || !lon.is_finite() {
        return Err(AppError::Validation(
            "Coordinates must be finite numbers".to_string(),
        ));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(AppError::Validation(
            "Latitude must be between -90 and 90".to_string(),
        ));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(AppError::Validation(
            "Longitude must be between -180 and 180".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_radius(radius_m: f64, min_radius_m: f64) -> Result<(), AppError> {
    if !radius_m.is_finite() || radius_m <= 0.0 || radius_m > MAX_RADIUS_M {
        return Err(AppError::Validation(format!(
            "Radius must be between 0 and {} m",
            MAX_RADIUS_M
        )));
    }
    if !min_radius_m.is_finite() || min_radius_m < 0.0 || min_radius_m > radius_m {
        return Err(AppError::Validation(format!(
            "Minimum radius must be between 0 and {} m",
            radius_m
        )));
    }
    Ok(())
}
