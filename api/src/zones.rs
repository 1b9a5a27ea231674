use serde::Serialize;
use utoipa::ToSchema;

/// One Köppen climate classification with its map legend colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneEntry {
    pub code: &'static str,
    pub name: &'static str,
    pub colour: &'static str,
}

/// A zone as it appears in a pin record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ZoneDescriptor {
    pub code: String,
    pub text: String,
    pub colour: String,
}

impl ZoneEntry {
    pub fn descriptor(&self) -> ZoneDescriptor {
        ZoneDescriptor {
            code: self.code.to_string(),
            text: format!("{} ({})", self.name, self.code),
            colour: self.colour.to_string(),
        }
    }

    /// Legend colour as an (r, g, b) triple.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |i: usize| u8::from_str_radix(&self.colour[i..i + 2], 16).unwrap_or(0);
        (channel(1), channel(3), channel(5))
    }
}

const fn zone(code: &'static str, name: &'static str, colour: &'static str) -> ZoneEntry {
    ZoneEntry { code, name, colour }
}

static ZONES: [ZoneEntry; 30] = [
    zone("Af", "Tropical Rainforest", "#0000fe"),
    zone("Am", "Tropical Monsoon", "#0078ff"),
    zone("Aw", "Tropical Savannah", "#45aafa"),
    zone("BWh", "Hot Desert", "#fe0000"),
    zone("BWk", "Cold Desert", "#fe9695"),
    zone("BSh", "Hot Steppe", "#f4a500"),
    zone("BSk", "Cold Steppe", "#ffdc64"),
    zone("Csa", "Hot-Summer Mediterranean", "#ffff00"),
    zone("Csb", "Warm-Summer Mediterranean", "#c7c800"),
    zone("Csc", "Cold-Summer Mediterranean", "#969600"),
    zone("Cwa", "Humid Subtropical (dry winter, hot summer)", "#96ff96"),
    zone("Cwb", "Subtropical Highland (dry winter)", "#64c865"),
    zone("Cwc", "Cold Subtropical Highland", "#329633"),
    zone("Cfa", "Humid Subtropical (no dry season)", "#c9ff51"),
    zone("Cfb", "Oceanic", "#65ff51"),
    zone("Cfc", "Subpolar Oceanic", "#31c800"),
    zone("Dsa", "Hot-Summer Continental (dry summer)", "#ff00fe"),
    zone("Dsb", "Warm-Summer Continental (dry summer)", "#c900c8"),
    zone("Dsc", "Cold-Summer Continental (dry summer)", "#963295"),
    zone("Dsd", "Extremely Cold-Summer Continental (dry summer)", "#963295"),
    zone("Dwa", "Humid Continental (dry winter, hot summer)", "#aaafff"),
    zone("Dwb", "Humid Continental (dry winter, warm summer)", "#5a77db"),
    zone("Dwc", "Subarctic (dry winter, cold summer)", "#4b50b4"),
    zone("Dwd", "Extremely Cold Subarctic (dry winter)", "#320087"),
    zone("Dfa", "Humid Continental (no dry season, hot summer)", "#00ffff"),
    zone("Dfb", "Humid Continental (no dry season, warm summer)", "#37c8ff"),
    zone("Dfc", "Subarctic (no dry season, cold summer)", "#007e7d"),
    zone("Dfd", "Extremely Cold Subarctic (no dry season)", "#00465f"),
    zone("ET", "Tundra", "#b2b2b2"),
    zone("EF", "Ice Cap", "#666666"),
];

pub fn all() -> &'static [ZoneEntry] {
    &ZONES
}

/// Case-insensitive lookup by code.
pub fn lookup(code: &str) -> Option<&'static ZoneEntry> {
    let code = code.trim();
    ZONES.iter().find(|z| z.code.eq_ignore_ascii_case(code))
}
