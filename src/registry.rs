//! Detector trait and the registry that enumerates active detectors.

use crate::config::RedactConfig;
use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

/// Every detector is pure over `(text, config, context)` and safe to run
/// concurrently with every other detector on the same text — the
/// registry and pipeline rely on this to fan out via `rayon`.
pub trait Detector: Send + Sync {
    fn filter_type(&self) -> FilterType;
    fn priority(&self) -> u32 {
        self.filter_type().priority_class()
    }
    fn name(&self) -> &'static str;

    /// Feature-toggle predicate; a disabled detector is skipped entirely
    /// rather than run-and-discarded, so it pays no cost.
    fn is_enabled(&self, _config: &RedactConfig) -> bool {
        true
    }

    fn detect(&self, text: &str, config: &RedactConfig, context: &RedactionContext) -> Vec<Span>;
}

/// Enumerates the detectors active for a given config. Construction order
/// has no bearing on output — the resolver is the sole authority on
/// cross-detector precedence (§5 ordering guarantee).
pub struct DetectorRegistry {
    detectors: Vec<Box<dyn Detector>>,
}

impl DetectorRegistry {
    pub fn new(detectors: Vec<Box<dyn Detector>>) -> Self {
        Self { detectors }
    }

    pub fn active(&self, config: &RedactConfig) -> impl Iterator<Item = &dyn Detector> {
        self.detectors.iter().filter(move |d| d.is_enabled(config)).map(|d| d.as_ref())
    }

    pub fn by_type(&self, filter_type: FilterType, config: &RedactConfig) -> impl Iterator<Item = &dyn Detector> {
        self.active(config).filter(move |d| d.filter_type() == filter_type)
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}

/// Builds the registry of every detector this crate ships. The set is
/// fixed at construction; `RedactConfig` only turns members on or off via
/// [`Detector::is_enabled`], it never changes which detectors exist.
pub fn build_default_registry() -> DetectorRegistry {
    use crate::detectors::{
        address::{AddressDetector, HospitalFacilityDetector},
        biometric::BiometricDetector,
        credit_card::CreditCardDetector,
        date::DateDetector,
        dea::DeaDetector,
        device::DeviceDetector,
        email::EmailDetector,
        fax::FaxDetector,
        healthplan::HealthPlanDetector,
        ip::IpDetector,
        license::LicenseDetector,
        mrn::MrnDetector,
        name::{DiverseNameDetector, MlNameDetector, TitledNameDetector},
        npi::NpiDetector,
        phone::PhoneDetector,
        relative_date::RelativeDateDetector,
        ssn::SsnDetector,
        url::UrlDetector,
        vehicle::VehicleDetector,
        zipcode::ZipCodeDetector,
    };

    DetectorRegistry::new(vec![
        Box::new(EmailDetector),
        Box::new(PhoneDetector),
        Box::new(FaxDetector),
        Box::new(SsnDetector),
        Box::new(CreditCardDetector),
        Box::new(MrnDetector),
        Box::new(NpiDetector),
        Box::new(DeaDetector),
        Box::new(ZipCodeDetector),
        Box::new(AddressDetector),
        Box::new(HospitalFacilityDetector),
        Box::new(DateDetector),
        Box::new(RelativeDateDetector),
        Box::new(UrlDetector),
        Box::new(IpDetector),
        Box::new(LicenseDetector),
        Box::new(DeviceDetector),
        Box::new(VehicleDetector),
        Box::new(BiometricDetector),
        Box::new(HealthPlanDetector),
        Box::new(TitledNameDetector::new()),
        Box::new(DiverseNameDetector::new()),
        Box::new(MlNameDetector::new()),
    ])
}

#[cfg(test)]
mod default_registry_tests {
    use super::*;

    #[test]
    fn default_registry_has_one_entry_per_detector() {
        let registry = build_default_registry();
        assert_eq!(registry.len(), 23);
    }
}
