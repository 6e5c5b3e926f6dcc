/// Strips everything but digits. Also the canonical form stored in the
/// `phone_digits` column and used for substring matching, so filter input and
/// stored values compare punctuation-free on both sides.
pub fn phone_digits(input: &str) -> String {
    input.chars().filter(|ch| ch.is_ascii_digit()).collect()
}

/// Renders Brazilian phone layouts from the digit count, truncating pasted
/// excess to eleven digits first:
///
/// - 11 digits: `(DD) DDDDD-DDDD` (mobile with area code)
/// - 10 digits: `(DD) DDDD-DDDD` (landline with area code)
/// - 9 digits: `DDDDD-DDDD` (mobile without area code)
/// - 8 digits: `DDDD-DDDD` (landline without area code)
///
/// Any other count is left to the caller unformatted.
pub fn normalize_phone(input: &str) -> Option<String> {
    let mut digits = phone_digits(input);
    digits.truncate(11);

    match digits.len() {
        11 => Some(format!(
            "({}) {}-{}",
            &digits[0..2],
            &digits[2..7],
            &digits[7..]
        )),
        10 => Some(format!(
            "({}) {}-{}",
            &digits[0..2],
            &digits[2..6],
            &digits[6..]
        )),
        9 => Some(format!("{}-{}", &digits[0..5], &digits[5..])),
        8 => Some(format!("{}-{}", &digits[0..4], &digits[4..])),
        _ => None,
    }
}

/// While typing, only an eleven-or-more digit value is reformatted. Ten
/// digits may be a landline or an unfinished mobile number, so that case
/// waits for focus loss.
pub fn autoformat_typing(input: &str) -> Option<String> {
    if phone_digits(input).len() < 11 {
        return None;
    }
    normalize_phone(input)
}

#[cfg(test)]
mod tests {
    use super::{autoformat_typing, normalize_phone, phone_digits};

    #[test]
    fn layouts_follow_the_digit_count() {
        assert_eq!(
            normalize_phone("11987654321").as_deref(),
            Some("(11) 98765-4321")
        );
        assert_eq!(
            normalize_phone("1187654321").as_deref(),
            Some("(11) 8765-4321")
        );
        assert_eq!(normalize_phone("987654321").as_deref(), Some("98765-4321"));
        assert_eq!(normalize_phone("87654321").as_deref(), Some("8765-4321"));
    }

    #[test]
    fn short_input_is_left_unformatted() {
        assert!(normalize_phone("1234567").is_none());
        assert!(normalize_phone("").is_none());
        assert!(normalize_phone("abc").is_none());
    }

    #[test]
    fn pasted_excess_is_truncated_to_eleven_digits() {
        assert_eq!(
            normalize_phone("11987654321999").as_deref(),
            Some("(11) 98765-4321")
        );
    }

    #[test]
    fn existing_punctuation_is_ignored() {
        assert_eq!(
            normalize_phone("(11) 98765-4321").as_deref(),
            Some("(11) 98765-4321")
        );
        assert_eq!(phone_digits("(11) 98765-4321"), "11987654321");
    }

    #[test]
    fn typing_reformat_waits_for_the_eleventh_digit() {
        assert!(autoformat_typing("1198765432").is_none());
        assert_eq!(
            autoformat_typing("11987654321").as_deref(),
            Some("(11) 98765-4321")
        );
    }
}
