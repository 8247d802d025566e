use tradeflow_rs::format::{format_usd, format_usd_exact};

#[test]
fn compacts_millions_with_one_fractional_digit() {
    assert_eq!(format_usd(1_250_000.0), "$1.3M");
}

#[test]
fn zero_formats_as_zero_dollars() {
    assert_eq!(format_usd(0.0), "$0");
}

#[test]
fn trims_trailing_zero_fraction() {
    assert_eq!(format_usd(1_000_000.0), "$1M");
    assert_eq!(format_usd(2_000.0), "$2K");
}

#[test]
fn covers_all_magnitude_buckets() {
    assert_eq!(format_usd(12.0), "$12");
    assert_eq!(format_usd(999.0), "$999");
    assert_eq!(format_usd(12_500.0), "$12.5K");
    assert_eq!(format_usd(990_000.0), "$990K");
    assert_eq!(format_usd(3_400_000_000.0), "$3.4B");
    assert_eq!(format_usd(1_200_000_000_000.0), "$1.2T");
}

#[test]
fn negative_values_keep_the_sign_in_front() {
    assert_eq!(format_usd(-2_500_000_000.0), "-$2.5B");
    assert_eq!(format_usd(-12.0), "-$12");
}

#[test]
fn rounding_carries_into_the_next_magnitude() {
    assert_eq!(format_usd(999_950.0), "$1M");
    assert_eq!(format_usd(999.99), "$1K");
}

#[test]
fn sub_unit_values_round_to_one_digit() {
    assert_eq!(format_usd(12.34), "$12.3");
    assert_eq!(format_usd(0.04), "$0");
}

#[test]
fn exact_format_groups_thousands() {
    assert_eq!(format_usd_exact(1_250_000.0), "$1,250,000");
    assert_eq!(format_usd_exact(-999.6), "-$1,000");
    assert_eq!(format_usd_exact(0.0), "$0");
}
