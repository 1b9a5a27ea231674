use std::env;

use crate::masking::Projection;
use crate::record::OutputProfile;
use crate::validation::MAX_RADIUS_M;

pub const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mask_radius_m: f64,
    pub mask_min_radius_m: f64,
    pub projection: Projection,
    pub max_zones: usize,
    pub strict_ids: bool,
    pub profile: OutputProfile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            mask_radius_m: 5000.0,
            mask_min_radius_m: 0.0,
            projection: Projection::Spherical,
            max_zones: 3,
            strict_ids: true,
            profile: OutputProfile::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let mask_radius_m = var("PINS_MASK_RADIUS_M")
            .and_then(|r| r.parse::<f64>().ok())
            .filter(|r| r.is_finite() && *r > 0.0 && *r <= MAX_RADIUS_M)
            .unwrap_or(defaults.mask_radius_m);
        let mask_min_radius_m = var("PINS_MASK_MIN_RADIUS_M")
            .and_then(|r| r.parse::<f64>().ok())
            .filter(|r| r.is_finite() && *r >= 0.0 && *r <= mask_radius_m)
            .unwrap_or(defaults.mask_min_radius_m);

        let mut profile = defaults.profile.clone();
        match var("PINS_MASK_KEY").map(|k| k.trim().to_string()) {
            Some(key) if OutputProfile::is_reserved_key(&key) => {
                log::warn!(
                    "PINS_MASK_KEY '{key}' collides with a record field, using '{}'",
                    profile.mask_key
                );
            }
            Some(key) if !key.is_empty() => profile.mask_key = key,
            _ => {}
        }
        if let Some(flag) = var("PINS_EMIT_EMPTY").and_then(|s| parse_bool(&s)) {
            profile.emit_empty = flag;
        }
        if let Some(flag) = var("PINS_LEGACY_ZONE_KEYS").and_then(|s| parse_bool(&s)) {
            profile.legacy_zone_keys = flag;
        }
        if let Some(omit) = var("PINS_OMIT_FIELDS") {
            profile.omit = omit
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        Self {
            host: var("PINS_HOST").unwrap_or(defaults.host),
            port: var("PINS_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            mask_radius_m,
            mask_min_radius_m,
            projection: var("PINS_PROJECTION")
                .and_then(|p| Projection::parse(&p))
                .unwrap_or(defaults.projection),
            max_zones: var("PINS_MAX_ZONES")
                .and_then(|s| s.parse().ok())
                .filter(|&s| s > 0)
                .unwrap_or(defaults.max_zones),
            strict_ids: var("PINS_STRICT_IDS")
                .and_then(|s| parse_bool(&s))
                .unwrap_or(defaults.strict_ids),
            profile,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
