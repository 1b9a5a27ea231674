use std::io::{self, BufRead, Write};

use crate::config::Config;
use crate::errors::AppError;
use crate::masking::{DrawSource, Masker, RandomDraws};
use crate::record::{PinBuilder, PinRecord};
use crate::zones;

/// Interactive console session on stdin/stdout.
pub fn run(cfg: &Config) -> Result<(), AppError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(cfg, stdin.lock(), stdout.lock(), &mut RandomDraws::thread())?;
    Ok(())
}

pub fn run_with<R: BufRead, W: Write, D: DrawSource>(
    cfg: &Config,
    input: R,
    output: W,
    draws: &mut D,
) -> Result<PinRecord, AppError> {
    let mut p = Prompter { input, output };
    let mut pin = PinBuilder::new(cfg.max_zones, cfg.strict_ids);

    p.say("\n--- Generate a new pins.json entry ---\n")?;

    p.ask_until("Enter a unique ID (e.g. 'site01'): ", |s| pin.id(s))?;
    p.ask_until("Title for popup (e.g. 'House 5'): ", |s| pin.title(s))?;
    p.ask_until(
        "Link URL (http:// or https://, leave blank if none): ",
        |s| pin.link(s),
    )?;
    p.ask_until("Address text: ", |s| pin.address(s))?;

    p.say("\nAvailable climate zones (input code like 'Aw'):")?;
    for zone in zones::all() {
        let (r, g, b) = zone.rgb();
        p.say(&format!(
            "\x1b[38;2;{r};{g};{b}m{} ({})\x1b[0m",
            zone.name, zone.code
        ))?;
    }
    p.ask_until("Enter climate zone code (e.g. Aw): ", |s| {
        pin.add_zone(s).map(|_| ())
    })?;
    while pin.zone_count() < pin.max_zones() {
        let more = p.ask_until(
            "Another climate zone code (leave blank to finish): ",
            |s| {
                if s.is_empty() {
                    return Ok(false);
                }
                pin.add_zone(s).map(|_| true)
            },
        )?;
        if !more {
            break;
        }
    }

    let lat = p.ask_until("Latitude (decimal degrees): ", |s| parse_in_range(s, -90.0, 90.0))?;
    let lon = p.ask_until("Longitude (decimal degrees): ", |s| {
        parse_in_range(s, -180.0, 180.0)
    })?;
    pin.coordinate(lat, lon)?;

    let masked = p.ask_until("GDPR geomasking required? (y/n): ", |s| {
        match s.to_ascii_lowercase().as_str() {
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            _ => Err(AppError::Validation(
                "Invalid choice. Valid options: y, n, yes, no".to_string(),
            )),
        }
    })?;
    if masked {
        pin.mask(
            &Masker::new(cfg.projection),
            cfg.mask_radius_m,
            cfg.mask_min_radius_m,
            draws,
        )?;
    } else {
        pin.no_mask();
    }

    p.ask_until(
        "Image URL (http:// or https://, leave blank if none): ",
        |s| pin.image_url(s),
    )?;
    p.ask_until("Marker colour hex (e.g. '#FF0000'): ", |s| pin.colour(s))?;

    let record = pin.build()?;
    p.say("\nCopy and paste this JSON object into pins.json:\n")?;
    p.say(&record.to_json_pretty(&cfg.profile)?)?;
    p.say("\n--- End of entry ---\n")?;
    Ok(record)
}

fn parse_in_range(text: &str, min: f64, max: f64) -> Result<f64, AppError> {
    let value: f64 = text
        .parse()
        .map_err(|_| AppError::Validation("Invalid number. Please enter a numeric value.".into()))?;
    if !(min..=max).contains(&value) {
        return Err(AppError::Validation(format!(
            "Value must be between {min} and {max}."
        )));
    }
    Ok(value)
}

struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    fn say(&mut self, line: &str) -> Result<(), AppError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<String, AppError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }
        Ok(answer.trim().to_string())
    }

    /// Re-asks until `accept` takes the answer. Rejections are shown to the user.
    fn ask_until<T>(
        &mut self,
        question: &str,
        mut accept: impl FnMut(&str) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        loop {
            let answer = self.ask(question)?;
            match accept(&answer) {
                Ok(value) => return Ok(value),
                Err(AppError::Validation(msg)) | Err(AppError::InvalidArgument(msg)) => {
                    self.say(&msg)?
                }
                Err(other) => return Err(other),
            }
        }
    }
}
