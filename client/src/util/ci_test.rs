use super::*;

// =============================================================
// check_digit
// =============================================================

#[test]
fn check_digit_matches_known_ci() {
    // 1.234.567-2
    assert_eq!(check_digit(&[1, 2, 3, 4, 5, 6, 7]), 2);
}

#[test]
fn check_digit_zero_when_sum_divisible_by_ten() {
    // 2*5 = 10 -> (10 - 0) % 10 = 0
    assert_eq!(check_digit(&[5, 0, 0, 0, 0, 0, 0]), 0);
}

#[test]
fn check_digit_all_zeros() {
    assert_eq!(check_digit(&[0; 7]), 0);
}

// =============================================================
// normalize_ci
// =============================================================

#[test]
fn normalize_accepts_dotted_and_dashed_input() {
    assert_eq!(normalize_ci("1.234.567-2"), Ok("12345672".to_owned()));
}

#[test]
fn normalize_pads_seven_digit_input() {
    // 0.123.456 -> weights over 0,1,2,3,4,5,6: 9+16+21+24+15+24 = 109 -> 1
    assert_eq!(normalize_ci("123456-1"), Ok("01234561".to_owned()));
}

#[test]
fn normalize_rejects_wrong_check_digit() {
    assert_eq!(
        normalize_ci("1.234.567-3"),
        Err(CiError::CheckDigit { expected: 2, actual: 3 })
    );
}

#[test]
fn normalize_rejects_short_input() {
    assert_eq!(normalize_ci("12345"), Err(CiError::Length(5)));
}

#[test]
fn normalize_rejects_long_input() {
    assert_eq!(normalize_ci("123456789"), Err(CiError::Length(9)));
}

#[test]
fn normalize_rejects_input_without_digits() {
    assert_eq!(normalize_ci("abc"), Err(CiError::Length(0)));
}

#[test]
fn is_valid_ci_reports_result() {
    assert!(is_valid_ci("12345672"));
    assert!(!is_valid_ci("12345670"));
    assert!(!is_valid_ci(""));
}
