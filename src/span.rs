use std::fmt;

/// The closed set of identifier classes this engine recognizes.
///
/// Deliberately a fixed enum rather than a free-form string: callers
/// cannot register new types at runtime, and every arm here has an
/// assigned [`priority_class`] the resolver depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterType {
    Email,
    Phone,
    Fax,
    Ssn,
    CreditCard,
    Mrn,
    Npi,
    Dea,
    ZipCode,
    Address,
    Date,
    Url,
    Ip,
    License,
    Device,
    Vehicle,
    Biometric,
    HealthPlan,
    Name,
    ProviderName,
    FamilyName,
}

impl FilterType {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterType::Email => "EMAIL",
            FilterType::Phone => "PHONE",
            FilterType::Fax => "FAX",
            FilterType::Ssn => "SSN",
            FilterType::CreditCard => "CREDIT_CARD",
            FilterType::Mrn => "MRN",
            FilterType::Npi => "NPI",
            FilterType::Dea => "DEA",
            FilterType::ZipCode => "ZIPCODE",
            FilterType::Address => "ADDRESS",
            FilterType::Date => "DATE",
            FilterType::Url => "URL",
            FilterType::Ip => "IP",
            FilterType::License => "LICENSE",
            FilterType::Device => "DEVICE",
            FilterType::Vehicle => "VEHICLE",
            FilterType::Biometric => "BIOMETRIC",
            FilterType::HealthPlan => "HEALTHPLAN",
            FilterType::Name => "NAME",
            FilterType::ProviderName => "PROVIDER_NAME",
            FilterType::FamilyName => "FAMILY_NAME",
        }
    }

    /// Priority class used by the resolver's tie-break rules. Higher wins.
    ///
    /// Preserves the partial order `NAME < PROVIDER_NAME < ADDRESS < DATE <
    /// URL/IP < ZIPCODE < FAX < MRN/SSN/CREDIT_CARD < DEA/NPI`.
    pub fn priority_class(self) -> u32 {
        match self {
            FilterType::Name | FilterType::FamilyName => 10,
            FilterType::ProviderName => 20,
            FilterType::Address => 30,
            FilterType::Date => 40,
            FilterType::Url | FilterType::Ip => 60,
            FilterType::ZipCode => 70,
            FilterType::Fax => 80,
            FilterType::Phone | FilterType::License | FilterType::HealthPlan => 85,
            FilterType::Device | FilterType::Vehicle | FilterType::Biometric => 90,
            FilterType::Mrn | FilterType::Ssn | FilterType::CreditCard => 100,
            FilterType::Dea | FilterType::Npi => 110,
        }
    }

    /// Priority a relative-date match is emitted at: `DATE + 10`, so a
    /// relative-date reading outranks an absolute-date one over the same
    /// range even though both are tagged `DATE` in the closed type set
    /// (spec.md §4.5 — `RelativeDateFilterSpan` declares `DATE + 10`).
    pub fn relative_date_priority() -> u32 {
        FilterType::Date.priority_class() + 10
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for FilterType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

pub type SpanId = u64;

/// Audit trail of why the resolver picked (or dropped) a span, kept
/// alongside the winner for diagnostics. Never used by the resolver to
/// choose a winner — the resolver's own sweep does that; this is the
/// record of how it happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisambiguationScore {
    pub priority: u32,
    pub length: u32,
    pub confidence: f64,
}

/// Fields only ever written by the (out-of-scope) replacement stage.
/// The core never populates these; they exist so a `Span` round-trips
/// through that stage's data model without widening the core's own type.
#[derive(Debug, Clone, Default)]
pub struct PostEmitFields {
    pub replacement: Option<String>,
    pub salt: Option<String>,
    pub applied: bool,
    pub ignored: bool,
}

/// One identified PHI candidate, in UTF-16 code-unit offsets (the
/// convention every consumer of this engine expects on the wire).
#[derive(Debug, Clone)]
pub struct Span {
    pub id: SpanId,
    pub filter_type: FilterType,
    pub text: String,
    /// The exact input substring at `[character_start, character_end)`,
    /// byte-for-byte, regardless of any normalization `text` applied.
    pub original_value: String,
    pub character_start: u32,
    pub character_end: u32,
    pub confidence: f64,
    pub priority: u32,
    /// Name of the producing pattern/rule, for audit and test assertions.
    pub pattern: &'static str,
    /// Bounded text window around the match, used by the context analyzer.
    pub context: String,
    /// Neighboring tokens, when a detector records them (name detectors).
    pub window: Option<Vec<String>>,
    /// Other spans this one overlapped with before resolution dropped them.
    pub ambiguous_with: Vec<SpanId>,
    pub disambiguation_score: Option<DisambiguationScore>,
    pub post_emit: PostEmitFields,
}

impl Span {
    pub fn len_utf16(&self) -> u32 {
        self.character_end.saturating_sub(self.character_start)
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.character_start < other.character_end && other.character_start < self.character_end
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.character_start <= other.character_start && other.character_end <= self.character_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: u32, end: u32) -> Span {
        Span {
            id: 0,
            filter_type: FilterType::Name,
            text: String::new(),
            original_value: String::new(),
            character_start: start,
            character_end: end,
            confidence: 0.9,
            priority: FilterType::Name.priority_class(),
            pattern: "test",
            context: String::new(),
            window: None,
            ambiguous_with: Vec::new(),
            disambiguation_score: None,
            post_emit: PostEmitFields::default(),
        }
    }

    #[test]
    fn priority_order_matches_partial_order() {
        assert!(FilterType::Name.priority_class() < FilterType::ProviderName.priority_class());
        assert!(FilterType::ProviderName.priority_class() < FilterType::Address.priority_class());
        assert!(FilterType::Address.priority_class() < FilterType::Date.priority_class());
        assert!(FilterType::Date.priority_class() < FilterType::Url.priority_class());
        assert!(FilterType::Url.priority_class() < FilterType::ZipCode.priority_class());
        assert!(FilterType::ZipCode.priority_class() < FilterType::Fax.priority_class());
        assert!(FilterType::Fax.priority_class() < FilterType::Ssn.priority_class());
        assert!(FilterType::Ssn.priority_class() < FilterType::Dea.priority_class());
    }

    #[test]
    fn relative_date_outranks_absolute_date() {
        assert_eq!(FilterType::relative_date_priority(), FilterType::Date.priority_class() + 10);
    }

    #[test]
    fn containment_and_overlap() {
        let a = span(0, 10);
        let b = span(2, 5);
        let c = span(9, 20);
        assert!(a.contains(&b));
        assert!(a.overlaps(&c));
        assert!(!a.contains(&c));
    }
}
