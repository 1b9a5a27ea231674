use serde_json::{json, Map, Value};

use crate::errors::AppError;
use crate::geo::Coordinate;
use crate::masking::{DrawSource, MaskRequest, Masker};
use crate::validation::{validate_hex_colour, validate_identifier, validate_url};
use crate::zones::{self, ZoneDescriptor};

/// Which keys a rendered pin carries and under what names.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputProfile {
    /// Key for the masking flag, `gdpr` in older pin files and `mask` in newer ones.
    pub mask_key: String,
    /// Emit `link` and `imageUrl` even when they are empty strings.
    pub emit_empty: bool,
    /// Also emit flat `zoneText`/`zoneColour` for single-zone pins.
    pub legacy_zone_keys: bool,
    /// Keys dropped from the output entirely.
    pub omit: Vec<String>,
}

/// Keys a rendered pin always uses for its own fields.
pub const RECORD_KEYS: &[&str] = &[
    "id", "title", "link", "address", "zones", "zoneText", "zoneColour", "latitude",
    "longitude", "radiusKm", "imageUrl", "colour", "type",
];

impl OutputProfile {
    /// A masking flag key that would collide with a record field.
    pub fn is_reserved_key(key: &str) -> bool {
        RECORD_KEYS.contains(&key)
    }
}

impl Default for OutputProfile {
    fn default() -> Self {
        Self {
            mask_key: "gdpr".to_string(),
            emit_empty: true,
            legacy_zone_keys: false,
            omit: Vec::new(),
        }
    }
}

/// A complete pin, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct PinRecord {
    pub id: String,
    pub title: String,
    pub link: String,
    pub address: String,
    pub zones: Vec<ZoneDescriptor>,
    /// Published position; the masked one when `masked` is set.
    pub position: Coordinate,
    pub masked: bool,
    pub radius_km: f64,
    pub colour: String,
    pub image_url: String,
    pub pin_type: Option<String>,
}

impl PinRecord {
    pub fn to_value(&self, profile: &OutputProfile) -> Value {
        let mut out = Map::new();
        let mut put = |key: &str, value: Value| {
            if !profile.omit.iter().any(|k| k == key) {
                out.insert(key.to_string(), value);
            }
        };

        put("id", json!(self.id));
        put("title", json!(self.title));
        if profile.emit_empty || !self.link.is_empty() {
            put("link", json!(self.link));
        }
        put("address", json!(self.address));
        put("zones", json!(self.zones));
        if profile.legacy_zone_keys {
            if let [zone] = self.zones.as_slice() {
                put("zoneText", json!(zone.text));
                put("zoneColour", json!(zone.colour));
            }
        }
        put("latitude", json!(self.position.lat));
        put("longitude", json!(self.position.lon));
        put(&profile.mask_key, json!(self.masked));
        put("radiusKm", number(self.radius_km));
        if profile.emit_empty || !self.image_url.is_empty() {
            put("imageUrl", json!(self.image_url));
        }
        put("colour", json!(self.colour));
        if let Some(pin_type) = &self.pin_type {
            put("type", json!(pin_type));
        }

        Value::Object(out)
    }

    /// Two-space indented JSON.
    pub fn to_json_pretty(&self, profile: &OutputProfile) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(&self.to_value(profile))?)
    }
}

// Whole kilometres render as integers, as hand-written pin files do.
fn number(v: f64) -> Value {
    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        json!(v as i64)
    } else {
        json!(v)
    }
}

#[derive(Debug, Clone, Copy)]
struct MaskOutcome {
    position: Coordinate,
    radius_m: f64,
}

/// Collects pin fields one at a time. A setter that rejects its input leaves
/// the previous value untouched.
#[derive(Debug, Clone)]
pub struct PinBuilder {
    max_zones: usize,
    strict_ids: bool,
    id: Option<String>,
    title: Option<String>,
    link: String,
    address: Option<String>,
    zones: Vec<ZoneDescriptor>,
    origin: Option<Coordinate>,
    // None until the masking question is answered; Some(None) means unmasked.
    mask: Option<Option<MaskOutcome>>,
    colour: Option<String>,
    image_url: String,
    pin_type: Option<String>,
}

impl PinBuilder {
    pub fn new(max_zones: usize, strict_ids: bool) -> Self {
        Self {
            max_zones,
            strict_ids,
            id: None,
            title: None,
            link: String::new(),
            address: None,
            zones: Vec::new(),
            origin: None,
            mask: None,
            colour: None,
            image_url: String::new(),
            pin_type: None,
        }
    }

    pub fn max_zones(&self) -> usize {
        self.max_zones
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn id(&mut self, value: &str) -> Result<(), AppError> {
        let value = required(value, "id")?;
        if self.strict_ids && !validate_identifier(value) {
            return Err(AppError::Validation(
                "id may only contain lowercase letters, digits, '-' and '_'".to_string(),
            ));
        }
        self.id = Some(value.to_string());
        Ok(())
    }

    pub fn title(&mut self, value: &str) -> Result<(), AppError> {
        self.title = Some(required(value, "title")?.to_string());
        Ok(())
    }

    pub fn link(&mut self, value: &str) -> Result<(), AppError> {
        self.link = optional_url(value, "link")?;
        Ok(())
    }

    pub fn address(&mut self, value: &str) -> Result<(), AppError> {
        self.address = Some(required(value, "address")?.to_string());
        Ok(())
    }

    pub fn add_zone(&mut self, code: &str) -> Result<&ZoneDescriptor, AppError> {
        let entry = zones::lookup(code)
            .ok_or_else(|| AppError::Validation(format!("Unknown climate zone '{}'", code.trim())))?;
        if self.zones.iter().any(|z| z.code == entry.code) {
            return Err(AppError::Validation(format!(
                "Climate zone '{}' already selected",
                entry.code
            )));
        }
        if self.zones.len() >= self.max_zones {
            return Err(AppError::Validation(format!(
                "At most {} climate zones may be selected",
                self.max_zones
            )));
        }
        self.zones.push(entry.descriptor());
        Ok(&self.zones[self.zones.len() - 1])
    }

    /// Sets the true position. Any earlier masking decision is discarded.
    pub fn coordinate(&mut self, lat: f64, lon: f64) -> Result<(), AppError> {
        self.origin = Some(Coordinate::new(lat, lon)?);
        self.mask = None;
        Ok(())
    }

    pub fn mask<D: DrawSource>(
        &mut self,
        masker: &Masker,
        radius_m: f64,
        min_radius_m: f64,
        draws: &mut D,
    ) -> Result<Coordinate, AppError> {
        let origin = self.origin.ok_or_else(|| {
            AppError::Validation("coordinate must be set before masking".to_string())
        })?;
        let request = MaskRequest::new(origin, radius_m, min_radius_m)?;
        let position = masker.mask(&request, draws)?;
        self.mask = Some(Some(MaskOutcome { position, radius_m }));
        Ok(position)
    }

    pub fn no_mask(&mut self) {
        self.mask = Some(None);
    }

    pub fn image_url(&mut self, value: &str) -> Result<(), AppError> {
        self.image_url = optional_url(value, "imageUrl")?;
        Ok(())
    }

    pub fn colour(&mut self, value: &str) -> Result<(), AppError> {
        let value = value.trim();
        if !validate_hex_colour(value) {
            return Err(AppError::Validation(
                "colour must be a hex code like #RRGGBB or #RGB".to_string(),
            ));
        }
        self.colour = Some(value.to_string());
        Ok(())
    }

    pub fn pin_type(&mut self, value: &str) -> Result<(), AppError> {
        let value = value.trim();
        self.pin_type = (!value.is_empty()).then(|| value.to_string());
        Ok(())
    }

    /// Mandatory fields still unset, in field order.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.id.is_none() {
            missing.push("id");
        }
        if self.title.is_none() {
            missing.push("title");
        }
        if self.address.is_none() {
            missing.push("address");
        }
        if self.zones.is_empty() {
            missing.push("zones");
        }
        if self.origin.is_none() {
            missing.push("coordinate");
        }
        if self.mask.is_none() {
            missing.push("mask");
        }
        if self.colour.is_none() {
            missing.push("colour");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    pub fn build(&self) -> Result<PinRecord, AppError> {
        let missing = self.missing();
        let (Some(id), Some(title), Some(address), Some(origin), Some(mask), Some(colour)) = (
            &self.id,
            &self.title,
            &self.address,
            self.origin,
            self.mask,
            &self.colour,
        ) else {
            return Err(AppError::Incomplete(missing));
        };
        if !missing.is_empty() {
            return Err(AppError::Incomplete(missing));
        }

        let (position, masked, radius_km) = match mask {
            Some(outcome) => (outcome.position, true, outcome.radius_m / 1000.0),
            None => (origin, false, 0.0),
        };

        log::info!("Assembled pin '{id}' (masked: {masked})");
        Ok(PinRecord {
            id: id.clone(),
            title: title.clone(),
            link: self.link.clone(),
            address: address.clone(),
            zones: self.zones.clone(),
            position,
            masked,
            radius_km,
            colour: colour.clone(),
            image_url: self.image_url.clone(),
            pin_type: self.pin_type.clone(),
        })
    }
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(value)
}

fn optional_url(value: &str, field: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() || validate_url(value) {
        return Ok(value.to_string());
    }
    Err(AppError::Validation(format!(
        "{field} must be a valid http:// or https:// URL"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::haversine_m;
    use crate::masking::{FixedDraws, RandomDraws};

    fn filled() -> PinBuilder {
        let mut b = PinBuilder::new(3, true);
        b.id("house-5").unwrap();
        b.title("House 5").unwrap();
        b.address("5 Example Road").unwrap();
        b.add_zone("cfb").unwrap();
        b.coordinate(51.5074, -0.1278).unwrap();
        b.colour("#FF0000").unwrap();
        b
    }

    #[test]
    fn incomplete_until_mask_decided() {
        let mut b = filled();
        assert_eq!(b.missing(), vec!["mask"]);
        assert!(matches!(b.build(), Err(AppError::Incomplete(_))));
        b.no_mask();
        assert!(b.is_complete());
    }

    #[test]
    fn empty_builder_lists_all_missing() {
        let b = PinBuilder::new(3, true);
        assert_eq!(
            b.missing(),
            vec!["id", "title", "address", "zones", "coordinate", "mask", "colour"]
        );
    }

    #[test]
    fn rejected_values_are_not_stored() {
        let mut b = PinBuilder::new(3, true);
        assert!(b.id("House 5").is_err());
        assert!(b.link("ftp://x.com").is_err());
        assert!(b.colour("red").is_err());
        assert!(b.title("   ").is_err());
        assert!(b.coordinate(91.0, 0.0).is_err());
        assert!(b.missing().contains(&"id"));
        assert!(b.missing().contains(&"colour"));
        assert!(b.missing().contains(&"coordinate"));
    }

    #[test]
    fn lenient_ids_allow_any_text() {
        let mut b = PinBuilder::new(3, false);
        assert!(b.id("House 5").is_ok());
    }

    #[test]
    fn zone_limits() {
        let mut b = PinBuilder::new(2, true);
        b.add_zone("Af").unwrap();
        assert!(b.add_zone("af").is_err());
        b.add_zone("ET").unwrap();
        assert!(b.add_zone("EF").is_err());
        assert!(b.add_zone("Zz").is_err());
        assert_eq!(b.zone_count(), 2);
    }

    #[test]
    fn masked_record_uses_masked_position() {
        let mut b = filled();
        let mut draws = FixedDraws {
            distance_m: 5000.0,
            bearing_rad: 0.0,
        };
        let masked = b
            .mask(&Masker::default(), 5000.0, 0.0, &mut draws)
            .unwrap();
        let record = b.build().unwrap();
        assert!(record.masked);
        assert_eq!(record.radius_km, 5.0);
        assert_eq!(record.position, masked);
        let origin = Coordinate::new(51.5074, -0.1278).unwrap();
        assert!((haversine_m(origin, record.position) - 5000.0).abs() < 1e-3);
    }

    #[test]
    fn resetting_coordinate_clears_mask() {
        let mut b = filled();
        b.mask(&Masker::default(), 1000.0, 0.0, &mut RandomDraws::seeded(3))
            .unwrap();
        b.coordinate(10.0, 10.0).unwrap();
        assert_eq!(b.missing(), vec!["mask"]);
    }

    #[test]
    fn mask_needs_coordinate() {
        let mut b = PinBuilder::new(3, true);
        assert!(b
            .mask(&Masker::default(), 1000.0, 0.0, &mut RandomDraws::seeded(3))
            .is_err());
    }

    #[test]
    fn default_profile_rendering() {
        let mut b = filled();
        b.no_mask();
        let value = b.build().unwrap().to_value(&OutputProfile::default());
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "id", "title", "link", "address", "zones", "latitude", "longitude", "gdpr",
                "radiusKm", "imageUrl", "colour"
            ]
        );
        assert_eq!(value["gdpr"], json!(false));
        assert_eq!(value["radiusKm"], json!(0));
        assert_eq!(value["zones"][0]["code"], json!("Cfb"));
        assert_eq!(value["zones"][0]["text"], json!("Oceanic (Cfb)"));
        assert_eq!(value["latitude"], json!(51.5074));
    }

    #[test]
    fn custom_profile_rendering() {
        let mut b = filled();
        b.no_mask();
        b.pin_type("house").unwrap();
        let profile = OutputProfile {
            mask_key: "mask".to_string(),
            emit_empty: false,
            legacy_zone_keys: true,
            omit: vec!["address".to_string()],
        };
        let value = b.build().unwrap().to_value(&profile);
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("mask"));
        assert!(!obj.contains_key("gdpr"));
        assert!(!obj.contains_key("link"));
        assert!(!obj.contains_key("imageUrl"));
        assert!(!obj.contains_key("address"));
        assert_eq!(obj["zoneText"], json!("Oceanic (Cfb)"));
        assert_eq!(obj["type"], json!("house"));
    }

    #[test]
    fn record_keys_are_reserved() {
        assert!(OutputProfile::is_reserved_key("id"));
        assert!(OutputProfile::is_reserved_key("latitude"));
        assert!(!OutputProfile::is_reserved_key("gdpr"));
        assert!(!OutputProfile::is_reserved_key("mask"));
    }

    #[test]
    fn pretty_json_uses_two_spaces() {
        let mut b = filled();
        b.no_mask();
        let text = b.build().unwrap().to_json_pretty(&OutputProfile::default()).unwrap();
        assert!(text.starts_with("{\n  \"id\": \"house-5\",\n  \"title\": \"House 5\","));
    }
}
