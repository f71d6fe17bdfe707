//! Frozen whitelist dictionaries and clinical-context keyword sets.
//!
//! These are data, not logic: the sourcing and curation of the word lists
//! themselves is out of scope here. Everything is loaded once behind
//! `once_cell::sync::Lazy` and shared by reference across every detector
//! and every invocation.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Disease names that are also surnames ("Wilson's disease", "Parkinson's
/// disease"). A bare mention of one of these must not, by itself, redact
/// the underlying name — but "Dr. Wilson" still must, because the title
/// context overrides the whitelist (see [`crate::context`]).
pub static DISEASE_EPONYMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "wilson", "wilson's", "wilsons", "parkinson", "parkinson's", "parkinsons",
        "alzheimer", "alzheimer's", "alzheimers", "crohn", "crohn's", "crohns",
        "hodgkin", "hodgkin's", "hodgkins", "addison", "addison's", "addisons",
        "graves", "graves'", "cushing", "cushing's", "cushings", "raynaud",
        "raynaud's", "raynauds", "huntington", "huntington's", "huntingtons",
        "down", "down's", "downs", "asperger", "asperger's", "aspergers",
        "tourette", "tourette's", "tourettes", "bell's", "bells",
    ]
    .into_iter()
    .collect()
});

pub static DISEASE_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "diabetes", "hypertension", "asthma", "copd", "pneumonia", "influenza",
        "sepsis", "anemia", "arthritis", "osteoporosis", "migraine", "epilepsy",
        "lupus", "fibromyalgia", "psoriasis", "eczema", "gout", "cirrhosis",
        "hepatitis", "nephritis", "bronchitis", "tonsillitis", "appendicitis",
    ]
    .into_iter()
    .collect()
});

pub static MEDICATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "lisinopril", "metformin", "atorvastatin", "amlodipine", "metoprolol",
        "omeprazole", "albuterol", "gabapentin", "hydrochlorothiazide",
        "levothyroxine", "simvastatin", "losartan", "warfarin", "furosemide",
        "prednisone", "insulin", "aspirin", "ibuprofen", "acetaminophen",
    ]
    .into_iter()
    .collect()
});

pub static PROCEDURES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "appendectomy", "colonoscopy", "endoscopy", "biopsy", "mri", "ct scan",
        "x-ray", "ultrasound", "catheterization", "angioplasty", "bypass",
        "transplant", "dialysis", "chemotherapy", "radiotherapy", "intubation",
    ]
    .into_iter()
    .collect()
});

pub static ANATOMICAL: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "heart", "liver", "kidney", "lung", "brain", "spine", "femur", "humerus",
        "pancreas", "spleen", "thyroid", "colon", "stomach", "bladder", "aorta",
        "ventricle", "atrium", "cornea", "retina", "sinus",
    ]
    .into_iter()
    .collect()
});

/// Clinical document section headers — "FINDINGS", "IMPRESSION", etc. A
/// standalone all-caps line matching one of these is never a name even
/// though it passes the surface shape of a titled-name pattern.
pub static SECTION_HEADERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "CLINICAL INFORMATION", "FINDINGS", "IMPRESSION", "HISTORY", "HISTORY OF PRESENT ILLNESS",
        "PAST MEDICAL HISTORY", "MEDICATIONS", "ALLERGIES", "ASSESSMENT", "PLAN",
        "ASSESSMENT AND PLAN", "PHYSICAL EXAMINATION", "REVIEW OF SYSTEMS", "VITAL SIGNS",
        "LABORATORY DATA", "RADIOLOGY", "DISCHARGE SUMMARY", "DISCHARGE INSTRUCTIONS",
        "CHIEF COMPLAINT", "SOCIAL HISTORY", "FAMILY HISTORY", "SURGICAL HISTORY",
        "HIPAA PHI", "REDACTION GUIDE", "PROCEDURE", "OPERATIVE REPORT", "PATHOLOGY REPORT",
    ]
    .into_iter()
    .collect()
});

pub static ORGANIZATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "red cross", "mayo clinic", "kaiser permanente", "cleveland clinic",
        "cdc", "who", "fda", "nih", "blue cross", "blue shield", "aetna",
        "cigna", "unitedhealthcare", "humana",
    ]
    .into_iter()
    .collect()
});

/// Insurance/health-plan context keywords — a healthplan-shaped number
/// must fall within `contextWindowChars` of one of these to be emitted.
pub static INSURANCE_KEYWORDS: [&str; 16] = [
    "insurance", "medicare", "medicaid", "health plan", "coverage", "benefits",
    "premium", "deductible", "copay", "hmo", "ppo", "subscriber", "beneficiary",
    "covered", "carrier", "payer",
];

pub static DEVICE_KEYWORDS: [&str; 12] = [
    "pacemaker", "implant", "defibrillator", "stent", "prosthesis", "catheter",
    "infusion pump", "serial number", "model number", "device id", "lot number",
    "udi",
];

pub static TITLE_CONTEXT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:Dr|Doctor|Prof|Professor|Nurse|RN|NP|PA|MD|DO)\.?\s*$").expect("invalid title context regex")
});

pub static FAMILY_TERMS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:mother|father|spouse|husband|wife|son|daughter|sibling|brother|sister|parent|guardian|next of kin|emergency contact)\b")
        .expect("invalid family terms regex")
});

pub static PHI_LABELS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:patient|pt|name|dob|mrn|ssn)[:\s]")
        .expect("invalid phi labels regex")
});

pub static CLINICAL_ROLES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:attending|consulting|referring|ordering|supervising)\s+(?:physician|provider|doctor)\b")
        .expect("invalid clinical roles regex")
});

/// High-precision types whose own confidence is trusted enough that the
/// whitelist penalty, if any, is damped rather than zeroing them out.
pub static HIGH_PRECISION_TYPES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["SSN", "CREDIT_CARD", "DEA", "NPI"].into_iter().collect());

/// Street suffixes recognized by the address detector, joined into a
/// single alternation once rather than rebuilding the pattern per call.
pub static STREET_SUFFIXES: [&str; 46] = [
    "street", "st", "avenue", "ave", "road", "rd", "drive", "dr", "boulevard", "blvd", "lane",
    "ln", "way", "court", "ct", "circle", "cir", "place", "pl", "terrace", "ter", "parkway",
    "pkwy", "highway", "hwy", "trail", "path", "alley", "plaza", "close", "crescent", "cres",
    "gardens", "gdns", "grove", "gr", "mews", "rise", "row", "square", "sq", "walk", "parade",
    "pde", "esplanade", "promenade",
];

pub static STREET_SUFFIX_PATTERN: Lazy<String> = Lazy::new(|| STREET_SUFFIXES.join("|"));

pub static US_STATES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS",
    "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY",
    "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV",
    "WI", "WY", "DC",
];

pub static US_STATE_PATTERN: Lazy<String> = Lazy::new(|| US_STATES.join("|"));

pub static CA_PROVINCES: [&str; 13] =
    ["AB", "BC", "MB", "NB", "NL", "NS", "NT", "NU", "ON", "PE", "QC", "SK", "YT"];

pub static CA_PROVINCE_PATTERN: Lazy<String> = Lazy::new(|| CA_PROVINCES.join("|"));

pub static AU_STATES: [&str; 8] = ["NSW", "VIC", "QLD", "WA", "SA", "TAS", "ACT", "NT"];

pub static AU_STATE_PATTERN: Lazy<String> = Lazy::new(|| AU_STATES.join("|"));

/// Hospital/facility designator words — a capitalized run of words
/// immediately followed by one of these reads as a facility name rather
/// than a person or an ordinary place.
pub static FACILITY_DESIGNATORS: [&str; 15] = [
    "Hospital", "Medical Center", "Health Center", "Healthcare", "Clinic", "Memorial", "Regional",
    "General", "Community", "University", "Children's", "Veterans", "VA", "Rehabilitation",
    "Urgent Care",
];

/// Common given and family names used to anchor noisy name patterns
/// (standalone all-caps runs, concatenated names) so they aren't emitted
/// on every capitalized phrase. Deliberately small and unglamorous: the
/// curation of an exhaustive name census is out of scope here.
pub static COMMON_FIRST_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "james", "john", "robert", "michael", "william", "david", "richard", "joseph", "thomas",
        "charles", "mary", "patricia", "jennifer", "linda", "elizabeth", "barbara", "susan",
        "jessica", "sarah", "karen", "maria", "nancy", "lisa", "betty", "margaret", "sandra",
        "ashley", "kimberly", "emily", "donna", "carlos", "jose", "luis", "juan", "wei", "li",
        "ahmed", "mohammed", "priya", "raj",
    ]
    .into_iter()
    .collect()
});

pub static COMMON_SURNAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "smith", "johnson", "williams", "brown", "jones", "garcia", "miller", "davis",
        "rodriguez", "martinez", "hernandez", "lopez", "gonzalez", "wilson", "anderson",
        "thomas", "taylor", "moore", "jackson", "martin", "lee", "perez", "thompson", "white",
        "harris", "sanchez", "clark", "ramirez", "lewis", "robinson", "walker", "young", "allen",
        "king", "wright", "patel", "chen", "kim", "nguyen", "khan", "singh",
    ]
    .into_iter()
    .collect()
});
