//! Thin NAPI boundary over the detection pipeline.
//!
//! Every type here is a plain data projection of the core's own types —
//! no logic lives in this module beyond config translation and the
//! one-time registry construction. Offsets exposed to JavaScript are
//! UTF-16 code units, per [`crate::offsets`].

use crate::config::{NameDetectionMode, RedactConfig};
use crate::context::RedactionContext;
use crate::pipeline::detect_all;
use crate::registry::{build_default_registry, DetectorRegistry};
use napi_derive::napi;
use once_cell::sync::Lazy;

static REGISTRY: Lazy<DetectorRegistry> = Lazy::new(build_default_registry);

#[napi(object)]
#[derive(Clone, Debug)]
pub struct RedactOptionsFfi {
    /// One of `"rules"`, `"ml"`, `"hybrid"`. Unrecognized values fall back
    /// to `"hybrid"`, the core default.
    pub name_detection_mode: Option<String>,
    pub gliner_enabled: Option<bool>,
    pub context_window_chars: Option<u32>,
    pub min_confidence: Option<f64>,
}

impl From<RedactOptionsFfi> for RedactConfig {
    fn from(opts: RedactOptionsFfi) -> Self {
        let default = RedactConfig::default();
        let name_detection_mode = match opts.name_detection_mode.as_deref() {
            Some("rules") => NameDetectionMode::Rules,
            Some("ml") => NameDetectionMode::Ml,
            Some("hybrid") | None => NameDetectionMode::Hybrid,
            Some(_) => NameDetectionMode::Hybrid,
        };
        Self {
            name_detection_mode,
            gliner_enabled: opts.gliner_enabled.unwrap_or(default.gliner_enabled),
            context_window_chars: opts.context_window_chars.unwrap_or(default.context_window_chars),
            min_confidence: opts.min_confidence.unwrap_or(default.min_confidence),
        }
    }
}

#[napi(object)]
#[derive(Clone, Debug)]
pub struct SpanFfi {
    pub id: f64,
    pub filter_type: String,
    pub text: String,
    pub original_value: String,
    pub character_start: u32,
    pub character_end: u32,
    pub confidence: f64,
    pub pattern: String,
}

impl From<crate::span::Span> for SpanFfi {
    fn from(span: crate::span::Span) -> Self {
        Self {
            id: span.id as f64,
            filter_type: span.filter_type.as_str().to_string(),
            text: span.text,
            original_value: span.original_value,
            character_start: span.character_start,
            character_end: span.character_end,
            confidence: span.confidence,
            pattern: span.pattern.to_string(),
        }
    }
}

/// Runs the full detection pipeline over `text` and returns the resolved,
/// disjoint span list. A detector that panics mid-scan is silently
/// excluded (see [`crate::pipeline::Plan::faulted_detectors`]) rather than
/// failing the whole call — callers needing that visibility should prefer
/// an embedding that surfaces `Plan` directly rather than this FFI shim.
#[napi]
pub fn detect_all_js(text: String, options: Option<RedactOptionsFfi>) -> napi::Result<Vec<SpanFfi>> {
    let config: RedactConfig = options.map(RedactConfig::from).unwrap_or_default();
    let context = RedactionContext::new();
    let plan = detect_all(&text, &config, &context, &REGISTRY)?;
    Ok(plan.spans.into_iter().map(SpanFfi::from).collect())
}

/// Runs only the detectors registered for a single filter type, named by
/// its wire string (e.g. `"SSN"`, `"EMAIL"`). Returns an empty vector for
/// an unrecognized name rather than erroring, since an unknown type simply
/// has no detectors to run.
#[napi]
pub fn detect_type_js(text: String, filter_type: String, options: Option<RedactOptionsFfi>) -> napi::Result<Vec<SpanFfi>> {
    let Some(target) = parse_filter_type(&filter_type) else {
        return Ok(Vec::new());
    };
    let config: RedactConfig = options.map(RedactConfig::from).unwrap_or_default();
    let context = RedactionContext::new();

    let mut spans = Vec::new();
    for detector in REGISTRY.by_type(target, &config) {
        spans.extend(detector.detect(&text, &config, &context));
    }
    let resolved = crate::resolver::resolve(spans);
    Ok(resolved.into_iter().map(SpanFfi::from).collect())
}

fn parse_filter_type(name: &str) -> Option<crate::span::FilterType> {
    use crate::span::FilterType::*;
    Some(match name {
        "EMAIL" => Email,
        "PHONE" => Phone,
        "FAX" => Fax,
        "SSN" => Ssn,
        "CREDIT_CARD" => CreditCard,
        "MRN" => Mrn,
        "NPI" => Npi,
        "DEA" => Dea,
        "ZIPCODE" => ZipCode,
        "ADDRESS" => Address,
        "DATE" => Date,
        "URL" => Url,
        "IP" => Ip,
        "LICENSE" => License,
        "DEVICE" => Device,
        "VEHICLE" => Vehicle,
        "BIOMETRIC" => Biometric,
        "HEALTHPLAN" => HealthPlan,
        "NAME" => Name,
        "PROVIDER_NAME" => ProviderName,
        "FAMILY_NAME" => FamilyName,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_all_js_returns_resolved_spans() {
        let spans = detect_all_js("MRN: 00482913 recorded on 03/14/1985.".to_string(), None).expect("should succeed");
        assert!(spans.iter().any(|s| s.filter_type == "MRN"));
    }

    #[test]
    fn unknown_filter_type_yields_empty_result() {
        let spans = detect_type_js("text".to_string(), "NOT_A_TYPE".to_string(), None).expect("should succeed");
        assert!(spans.is_empty());
    }

    #[test]
    fn options_override_min_confidence() {
        let options = RedactOptionsFfi { name_detection_mode: None, gliner_enabled: None, context_window_chars: None, min_confidence: Some(0.99) };
        let spans = detect_all_js("City, MA 02139 USA".to_string(), Some(options)).expect("should succeed");
        assert!(spans.iter().all(|s| s.confidence >= 0.99));
    }
}
