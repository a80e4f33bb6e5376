//! Unit tests for summary rendering

use walletpoints::models::format_thousands;

#[test]
fn test_format_thousands() {
    assert_eq!(format_thousands(0.0, 2), "0.00");
    assert_eq!(format_thousands(999.999, 2), "1,000.00");
    assert_eq!(format_thousands(1234567.891, 4), "1,234,567.8910");
    assert_eq!(format_thousands(-1234.5, 2), "-1,234.50");
    assert_eq!(format_thousands(-0.001, 2), "0.00");
    assert_eq!(format_thousands(123.0, 0), "123");
}
