pub use std::time::Duration;

mod datetime;
mod str;
mod units;

pub use datetime::*;
pub use units::*;

pub use self::str::*;

pub fn ceil_frac(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        // do nothing on invalid input
        return 0;
    }
    let mut ceil = numerator / denominator;
    if numerator > 0 && numerator % denominator != 0 {
        ceil += 1;
    }
    ceil
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_frac() {
        let cases = [(0, 1, 0), (1, 12, 1), (12, 12, 1), (13, 12, 2), (7, 0, 0)];
        for (numerator, denominator, expected) in cases.iter() {
            assert_eq!(ceil_frac(*numerator, *denominator), *expected);
        }
    }
}
