#![forbid(unsafe_code)]

//! Check-digit and shape rules for national IDs and e-mail addresses.
//!
//! All functions are pure. Non-digit characters are ignored by the national-ID
//! checks, so masked and unmasked inputs validate the same way. Only ASCII
//! digits count as digits.

/// Digits in a short national ID (individual taxpayer number, `###.###.###-##`).
pub const NATIONAL_ID_SHORT_DIGITS: usize = 11;
/// Digits in a long national ID (company registration number, `##.###.###/####-##`).
pub const NATIONAL_ID_LONG_DIGITS: usize = 14;

/// Collect exactly `N` ASCII digits from `text`, ignoring everything else.
fn digits<const N: usize>(text: &str) -> Option<[u32; N]> {
    let mut out = [0u32; N];
    let mut count = 0;
    for d in text.chars().filter_map(|c| c.to_digit(10)) {
        if count == N {
            return None;
        }
        out[count] = d;
        count += 1;
    }
    (count == N).then_some(out)
}

fn all_identical(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

/// Validate the two check digits of an 11-digit short national ID.
///
/// ```rust
/// use maskform_validation::checksum::is_valid_national_id_short;
///
/// assert!(is_valid_national_id_short("100.202.149-95"));
/// assert!(!is_valid_national_id_short("123.456.789-01"));
/// ```
pub fn is_valid_national_id_short(text: &str) -> bool {
    let Some(d) = digits::<NATIONAL_ID_SHORT_DIGITS>(text) else {
        return false;
    };
    if all_identical(&d) {
        return false;
    }

    let first: u32 = (0..9).map(|i| (i as u32 + 1) * d[i]).sum::<u32>() % 11;
    let first = if first >= 10 { 0 } else { first };

    let second: u32 = ((0..9).map(|i| i as u32 * d[i]).sum::<u32>() + 9 * first) % 11;
    let second = if second >= 10 { 0 } else { second };

    d[9] == first && d[10] == second
}

/// Expected check digit at `check_pos` of a long national ID.
///
/// Positions `check_pos - 1` down to 0 are weighted `2..=9`, cycling, starting
/// from the rightmost position.
fn long_check_digit(d: &[u32; NATIONAL_ID_LONG_DIGITS], check_pos: usize) -> u32 {
    let weight_offset = check_pos - 12;
    let sum: u32 = (0..check_pos)
        .rev()
        .map(|pos| {
            let weight = 2 + ((11 + weight_offset - pos) % 8) as u32;
            d[pos] * weight
        })
        .sum();
    match sum % 11 {
        0 | 1 => 0,
        rem => 11 - rem,
    }
}

/// Validate the two check digits of a 14-digit long national ID.
///
/// ```rust
/// use maskform_validation::checksum::is_valid_national_id_long;
///
/// assert!(is_valid_national_id_long("41.705.727/0001-51"));
/// assert!(!is_valid_national_id_long("41.705.727/0001-52"));
/// ```
pub fn is_valid_national_id_long(text: &str) -> bool {
    let Some(d) = digits::<NATIONAL_ID_LONG_DIGITS>(text) else {
        return false;
    };
    if all_identical(&d) {
        return false;
    }

    d[12] == long_check_digit(&d, 12) && d[13] == long_check_digit(&d, 13)
}

/// Minimal e-mail shape check.
///
/// Valid iff the text is not blank, contains a `.`, and contains exactly one
/// `@` that is not the first character. This is a syntactic sanity check, not
/// RFC 5322 validation: `"a@b."` and `"a.@b"` pass.
pub fn is_valid_email_shape(text: &str) -> bool {
    if text.trim().is_empty() || !text.contains('.') {
        return false;
    }

    let mut at_seen = false;
    for (i, c) in text.chars().enumerate() {
        if c != '@' {
            continue;
        }
        if i == 0 || at_seen {
            return false;
        }
        at_seen = true;
    }
    at_seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_known_values() {
        assert!(is_valid_national_id_short("100.202.149-95"));
        assert!(is_valid_national_id_short("10020214995"));
        assert!(!is_valid_national_id_short("123.456.789-01"));
    }

    #[test]
    fn short_id_repeated_digits_rejected() {
        for n in 0..=9 {
            let text = n.to_string().repeat(11);
            assert!(!is_valid_national_id_short(&text), "{text}");
        }
        assert!(!is_valid_national_id_short("000.000.000-00"));
    }

    #[test]
    fn short_id_wrong_digit_count() {
        assert!(!is_valid_national_id_short(""));
        assert!(!is_valid_national_id_short("100.202.149-9"));
        assert!(!is_valid_national_id_short("100.202.149-950"));
    }

    #[test]
    fn short_id_check_digits_mapped_to_zero() {
        // Both weighted sums land on 10 and 0 mod 11.
        assert!(is_valid_national_id_short("111.111.112-00"));
        assert!(!is_valid_national_id_short("111.111.112-10"));
    }

    #[test]
    fn long_id_known_values() {
        assert!(is_valid_national_id_long("41.705.727/0001-51"));
        assert!(is_valid_national_id_long("41705727000151"));
        assert!(!is_valid_national_id_long("12.345.678/9012.34"));
    }

    #[test]
    fn long_id_repeated_digits_rejected() {
        assert!(!is_valid_national_id_long("00.000.000/0000-00"));
        assert!(!is_valid_national_id_long("11.111.111/1111-11"));
    }

    #[test]
    fn long_id_check_digit_mutations() {
        assert!(!is_valid_national_id_long("41.705.727/0001-61"));
        assert!(!is_valid_national_id_long("41.705.727/0001-50"));
    }

    #[test]
    fn long_id_wrong_digit_count() {
        assert!(!is_valid_national_id_long("41.705.727/0001-5"));
        assert!(!is_valid_national_id_long("41.705.727/0001-511"));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email_shape("aaa@gmail.com"));
        assert!(!is_valid_email_shape("aaa@gmail"));
        assert!(!is_valid_email_shape("aaa.gmail"));
        assert!(!is_valid_email_shape("   "));
        assert!(!is_valid_email_shape(""));
    }

    #[test]
    fn email_at_rules() {
        assert!(!is_valid_email_shape("@gmail.com"));
        assert!(!is_valid_email_shape("@a@gmail.com"));
        assert!(!is_valid_email_shape("a@b@gmail.com"));
        assert!(is_valid_email_shape("a.b@c"));
    }
}
