//! End-to-end scenarios straight off the detection pipeline's public API,
//! one per concrete example enumerated for testable properties: span
//! coordinates, type assignment, and cross-detector suppression all have
//! to line up through the full registry → detect → resolve path, not
//! just inside a single detector's own unit tests.

use vulpes_core::config::RedactConfig;
use vulpes_core::context::RedactionContext;
use vulpes_core::pipeline::detect_all;
use vulpes_core::registry::build_default_registry;
use vulpes_core::span::{FilterType, Span};

fn run(text: &str) -> Vec<Span> {
    let registry = build_default_registry();
    let config = RedactConfig::default();
    let context = RedactionContext::new();
    detect_all(text, &config, &context, &registry).expect("detection should succeed").spans
}

fn find<'a>(spans: &'a [Span], text: &str, value: &str) -> Option<&'a Span> {
    spans.iter().find(|s| &text[s.character_start as usize..s.character_end as usize] == value)
}

#[test]
fn scenario_1_mrn_date_phone_triplet() {
    let text = "Patient MRN: 12345678, DOB 03/14/1980, phone 555-123-4567.";
    let spans = run(text);

    let mrn = find(&spans, text, "12345678").expect("MRN span");
    assert_eq!(mrn.filter_type, FilterType::Mrn);

    let date = find(&spans, text, "03/14/1980").expect("DATE span");
    assert_eq!(date.filter_type, FilterType::Date);

    let phone = find(&spans, text, "555-123-4567").expect("PHONE span");
    assert_eq!(phone.filter_type, FilterType::Phone);

    for w in spans.windows(2) {
        assert!(w[0].character_end <= w[1].character_start);
    }
}

#[test]
fn scenario_2_credit_card_and_fax_no_phone_double_emit() {
    let text = "Card 4532-0151-1283-0366, Fax: 555-123-4567.";
    let spans = run(text);

    let card = find(&spans, text, "4532-0151-1283-0366").expect("CREDIT_CARD span");
    assert_eq!(card.filter_type, FilterType::CreditCard);

    let fax_spans: Vec<&Span> = spans.iter().filter(|s| s.filter_type == FilterType::Fax).collect();
    assert_eq!(fax_spans.len(), 1);
    assert_eq!(&text[fax_spans[0].character_start as usize..fax_spans[0].character_end as usize], "555-123-4567");

    assert!(
        !spans.iter().any(|s| s.filter_type == FilterType::Phone),
        "fax-labeled digits must not also surface as a PHONE span"
    );
}

#[test]
fn scenario_3_titled_name_survives_whitelist_eponym_does_not() {
    let text = "Seen by Dr. Wilson for Wilson's disease.";
    let spans = run(text);

    let provider = find(&spans, text, "Dr. Wilson").expect("PROVIDER_NAME span for the titled occurrence");
    assert_eq!(provider.filter_type, FilterType::ProviderName);

    let eponym_start = text.rfind("Wilson's").expect("second Wilson occurs in the eponym");
    assert!(
        !spans.iter().any(|s| (s.character_start as usize) >= eponym_start),
        "the eponym occurrence must be suppressed by the whitelist"
    );
}

#[test]
fn scenario_4_relative_date_requires_clinical_context() {
    let with_context = "Patient admitted yesterday to the ICU for observation.";
    let spans = run(with_context);
    let yesterday = find(&spans, with_context, "yesterday").expect("DATE span on 'yesterday' with clinical context");
    assert_eq!(yesterday.filter_type, FilterType::Date);

    let without_context = "The weather changed yesterday afternoon.";
    let spans = run(without_context);
    assert!(
        find(&spans, without_context, "yesterday").is_none(),
        "relative date must not fire without clinical context"
    );
}

#[test]
fn scenario_5_url_and_email_do_not_overlap() {
    let text = "Visit www.mychart.epic.com/patient?patientid=ABC123 and email jane@x.org.";
    let spans = run(text);

    assert!(spans.iter().any(|s| s.filter_type == FilterType::Url), "expected a URL span");
    let email = find(&spans, text, "jane@x.org").expect("EMAIL span");
    assert_eq!(email.filter_type, FilterType::Email);

    for w in spans.windows(2) {
        assert!(w[0].character_end <= w[1].character_start);
    }
}

#[test]
fn scenario_6_vital_sign_reading_is_not_a_plate_or_license() {
    let text = "BP 150 over 90";
    let spans = run(text);
    assert!(
        !spans.iter().any(|s| s.filter_type == FilterType::Vehicle || s.filter_type == FilterType::License),
        "a vital-sign reading must not be mistaken for a plate or license"
    );
}

#[test]
fn every_emitted_span_meets_the_confidence_floor_and_substring_fidelity() {
    let text = "Patient Maria Gonzalez, MRN 00482913, DOB 03/14/1985, SSN 123-45-6789, \
                seen by Dr. Patel at Mercy General Hospital, card 4111-1111-1111-1111, \
                fax: 555-222-3333, admitted yesterday with BP 120 over 80.";
    let spans = run(text);
    assert!(!spans.is_empty());
    for s in &spans {
        assert!(s.confidence >= 0.5, "span below the minimum confidence floor: {s:?}");
        let slice = &text[s.character_start as usize..s.character_end as usize];
        assert_eq!(slice, s.original_value, "originalValue must match the literal input slice");
    }
    for w in spans.windows(2) {
        assert!(w[0].character_end <= w[1].character_start, "plan must be disjoint");
    }
}
