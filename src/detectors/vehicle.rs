use crate::config::RedactConfig;
use crate::context::RedactionContext;
use crate::detectors::{build_span, dedup_first_match_wins, try_accelerate, utf16_table};
use crate::registry::Detector;
use crate::span::{FilterType, Span};
use crate::validators::{is_valid_ipv6, is_valid_vin, is_vital_sign_context};
use once_cell::sync::Lazy;
use regex::Regex;

static VIN_LABELED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:VIN|Vehicle\s+Identification\s+Number)[\s:#]*([A-HJ-NPR-Z0-9]{17})\b").expect("invalid VIN labeled pattern")
});

static VIN_STANDALONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-HJ-NPR-Z0-9]{17})\b").expect("invalid VIN standalone pattern"));

static PLATE_LABELED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:license\s+plate|plate\s+number|plate)[\s:#]*([A-Z]{2}[-\s]?[A-Z0-9]{5,7}|[A-Z0-9]{2,3}[-\s]?[A-Z0-9]{3,4})\b")
        .expect("invalid PLATE labeled pattern")
});

/// A representative cross-section of the teacher's plate-shape table: a
/// couple of the common US standalone formats, gated by the vital-sign
/// negative context check below so a reading like "BP 150/90" is never
/// mistaken for a plate.
static PLATE_STANDALONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Z]{3}[- ]?[0-9]{3,4}|[0-9][A-Z]{3}[0-9]{3})\b").expect("invalid PLATE standalone pattern")
});

static YEAR_MAKE_MODEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b((?:19|20)\d{2}\s+(?:Toyota|Honda|Ford|Chevrolet|Chevy|Nissan|Hyundai|Kia|Subaru|BMW|Mercedes|Audi|Volkswagen|Jeep|Dodge|Ram|GMC|Lexus|Mazda)\s+[A-Z][a-zA-Z0-9-]+)\b")
        .expect("invalid vehicle year/make/model pattern")
});

static GPS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(-?\d{1,3}\.\d{4,10})\s*°?\s*[NS]?,?\s*(-?\d{1,3}\.\d{4,10})\s*°?\s*[EW]?\b").expect("invalid GPS pattern")
});

static IPV6_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([0-9a-fA-F:]*::[0-9a-fA-F:]*|(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4})\b").expect("invalid IPv6 pattern"));

pub fn scan(text: &str) -> Vec<Span> {
    let utf16 = utf16_table(text);
    let mut out = Vec::new();

    for caps in VIN_LABELED_RE.captures_iter(text) {
        let Some(m) = caps.get(1) else { continue };
        if !is_valid_vin(m.as_str()) {
            continue;
        }
        out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Vehicle, 0.96, "labeled VIN", 40));
    }
    for m in VIN_STANDALONE_RE.find_iter(text) {
        if !is_valid_vin(m.as_str()) {
            continue;
        }
        out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Vehicle, 0.9, "standalone VIN checksum", 40));
    }

    for caps in PLATE_LABELED_RE.captures_iter(text) {
        let Some(m) = caps.get(1) else { continue };
        out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Vehicle, 0.88, "labeled license plate", 40));
    }
    for m in PLATE_STANDALONE_RE.find_iter(text) {
        let window_start = m.start().saturating_sub(40);
        let window = &text[window_start..m.start()];
        if is_vital_sign_context(window) {
            continue;
        }
        out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Vehicle, 0.75, "standalone plate format", 40));
    }

    for m in YEAR_MAKE_MODEL_RE.find_iter(text) {
        out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Vehicle, 0.8, "year/make/model triple", 40));
    }

    for caps in GPS_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        out.push(build_span(text, &utf16, whole.start(), whole.end(), FilterType::Vehicle, 0.85, "GPS coordinates", 40));
    }

    for m in IPV6_RE.find_iter(text) {
        if !is_valid_ipv6(m.as_str()) {
            continue;
        }
        out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Vehicle, 0.9, "IPv6 address", 40));
    }

    dedup_first_match_wins(out)
}

pub struct VehicleDetector;

impl Detector for VehicleDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::Vehicle
    }

    fn name(&self) -> &'static str {
        "vehicle"
    }

    fn detect(&self, text: &str, _config: &RedactConfig, context: &RedactionContext) -> Vec<Span> {
        if let Some(spans) = try_accelerate(context, text, FilterType::Vehicle, "accelerated vehicle", 40) {
            return spans;
        }
        scan(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_labeled_vin_with_valid_checksum() {
        let spans = scan("VIN: 1HGCM82633A004352 on the intake form.");
        assert!(spans.iter().any(|s| s.pattern == "labeled VIN"));
    }

    #[test]
    fn vital_sign_reading_does_not_match_plate() {
        assert!(scan("BP 150 over 90").is_empty());
    }

    #[test]
    fn matches_gps_coordinates() {
        let spans = scan("Incident location recorded at 42.3601° N, 71.0589° W.");
        assert!(spans.iter().any(|s| s.pattern == "GPS coordinates"));
    }
}
