use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MaskQuery {
    /// True latitude in decimal degrees.
    #[validate(custom(function = "crate::validation::validate_lat"))]
    pub lat: f64,
    /// True longitude in decimal degrees.
    #[validate(custom(function = "crate::validation::validate_lon"))]
    pub lon: f64,
    /// Maximum displacement in meters. Falls back to the configured masking radius.
    pub radius_m: Option<f64>,
    /// Minimum displacement in meters.
    pub min_radius_m: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ValidationKind {
    Url,
    #[serde(alias = "color")]
    Colour,
    Identifier,
}

impl ValidationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Colour => "colour",
            Self::Identifier => "identifier",
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ValidateQuery {
    pub kind: ValidationKind,
    /// Text to check.
    #[serde(default)]
    pub value: String,
}

/// A submitted pin form. Zone codes are resolved against the climate-zone table.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PinForm {
    #[validate(custom(function = "crate::validation::validate_required_field"))]
    pub id: String,
    #[validate(custom(function = "crate::validation::validate_required_field"))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(function = "crate::validation::validate_optional_url_field"))]
    pub link: String,
    #[validate(custom(function = "crate::validation::validate_required_field"))]
    pub address: String,
    #[validate(length(min = 1, message = "Select at least one climate zone"))]
    pub zones: Vec<String>,
    #[validate(custom(function = "crate::validation::validate_lat"))]
    pub latitude: f64,
    #[validate(custom(function = "crate::validation::validate_lon"))]
    pub longitude: f64,
    #[serde(default)]
    pub mask: bool,
    #[validate(custom(function = "crate::validation::validate_radius_field"))]
    pub radius_m: Option<f64>,
    pub min_radius_m: Option<f64>,
    #[validate(custom(function = "crate::validation::validate_colour_field"))]
    pub colour: String,
    #[serde(default)]
    #[validate(custom(function = "crate::validation::validate_optional_url_field"))]
    pub image_url: String,
    #[serde(default, rename = "type")]
    pub pin_type: Option<String>,
}
