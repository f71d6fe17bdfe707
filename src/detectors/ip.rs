use crate::config::RedactConfig;
use crate::context::RedactionContext;
use crate::detectors::{build_span, try_accelerate, utf16_table};
use crate::registry::Detector;
use crate::span::{FilterType, Span};
use crate::validators::is_valid_ipv4;
use once_cell::sync::Lazy;
use regex::Regex;

static IPV4_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b").expect("invalid IPV4 pattern"));

pub fn scan(text: &str) -> Vec<Span> {
    let utf16 = utf16_table(text);
    IPV4_RE
        .find_iter(text)
        .filter(|m| is_valid_ipv4(m.as_str()))
        .map(|m| build_span(text, &utf16, m.start(), m.end(), FilterType::Ip, 0.95, "IPv4 dotted-quad", 60))
        .collect()
}

pub struct IpDetector;

impl Detector for IpDetector {
    fn filter_type(&self) -> FilterType {
        FilterType::Ip
    }

    fn name(&self) -> &'static str {
        "ip"
    }

    fn detect(&self, text: &str, _config: &RedactConfig, context: &RedactionContext) -> Vec<Span> {
        if let Some(spans) = try_accelerate(context, text, FilterType::Ip, "accelerated IP", 60) {
            return spans;
        }
        scan(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_valid_ipv4() {
        let spans = scan("Workstation at 192.168.1.42 logged the access.");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "192.168.1.42");
    }

    #[test]
    fn rejects_out_of_range_octet() {
        assert!(scan("Ratio recorded as 192.168.1.999 in the notes.").is_empty());
    }

    #[test]
    fn rejects_leading_zero_octet() {
        assert!(scan("Bogus address 192.168.01.1 should not match.").is_empty());
    }
}
