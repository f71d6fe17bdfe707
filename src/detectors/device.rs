use crate::config::RedactConfig;
use crate::context::RedactionContext;
use crate::detectors::{build_span, dedup_first_match_wins, try_accelerate, utf16_table};
use crate::dictionaries::DEVICE_KEYWORDS;
use crate::registry::Detector;
use crate::span::{FilterType, Span};
use crate::validators::is_valid_device_identifier;
use once_cell::sync::Lazy;
use regex::Regex;

/// Device-word + serial/ID, standalone manufacturer-prefixed serials, and
/// model numbers in medical context. Shape: 7-25 alphanumerics with
/// optional dashes ([`is_valid_device_identifier`]); requires a device
/// keyword within 100 characters of the match.
static DEVICE_LABELED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:Pacemaker|Defibrillator|ICD|AICD|CRT|Implant|Device|Stent|Catheter|Pump|Stimulator|Valve)\s+(?:Serial|SN|ID|Number|Model)\s*[#:]?\s*([A-Z0-9][A-Z0-9-]{6,24})\b")
        .expect("invalid DEVICE labeled pattern")
});

static DEVICE_MODEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bModel(?:\s+(?:Number|No|#))?\s*[#:]?\s*([A-Z0-9][A-Z0-9-]{6,24})\b").expect("invalid DEVICE model pattern")
});

/// Standalone manufacturer-prefixed serials, e.g. `MEDTRONIC-8734-ICD`.
static DEVICE_MANUFACTURER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b((?:ABBOTT|STRYKER|MEDTRONIC|BOSTON|ZIMMER|BIOMET|DEPUY|SYNTHES|BIOTRONIK|SORIN|NEVRO|AXONICS|INSPIRE)(?:-[A-Z0-9]+){1,3})\b")
        .expect("invalid DEVICE manufacturer pattern")
});

fn has_device_keyword_nearby(text: &str, byte_start: usize, byte_len: usize) -> bool {
    let left = byte_start.saturating_sub(100);
    let right = (byte_start + byte_len + 100).min(text.len());
    let left = crate::offsets::prev_char_boundary(text, left);
    let right = crate::offsets::next_char_boundary(text, right);
    let window = text[left..right].to_ascii_lowercase();
    DEVICE_KEYWORDS.iter().any(|k| window.contains(k))
}

pub fn scan(text: &str) -> Vec<Span> {
    let utf16 = utf16_table(text);
    let mut out = Vec::new();

    for caps in DEVICE_LABELED_RE.captures_iter(text) {
        let Some(m) = caps.get(1) else { continue };
        if !is_valid_device_identifier(m.as_str()) {
            continue;
        }
        out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Device, 0.92, "device serial with label", 60));
    }

    for caps in DEVICE_MODEL_RE.captures_iter(text) {
        let Some(m) = caps.get(1) else { continue };
        if !is_valid_device_identifier(m.as_str()) || !has_device_keyword_nearby(text, m.start(), m.len()) {
            continue;
        }
        out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Device, 0.85, "model number in device context", 100));
    }

    for m in DEVICE_MANUFACTURER_RE.find_iter(text) {
        out.push(build_span(text, &utf16, m.start(), m.end(), FilterType::Device, 0.9, "manufacturer-prefixed serial", 60));
    }

    dedup_first_match_wins(out)
}

pub struct DeviceDetector;

impl Detector for DeviceDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::Device
    }

    fn name(&self) -> &'static str {
        "device"
    }

    fn detect(&self, text: &str, _config: &RedactConfig, context: &RedactionContext) -> Vec<Span> {
        if let Some(spans) = try_accelerate(context, text, FilterType::Device, "accelerated device", 60) {
            return spans;
        }
        scan(text)
    }
}
