use std::time::Duration;

pub const KIB: u64 = 1 << 10;
pub const MIB: u64 = 1 << 20;
pub const GIB: u64 = 1 << 30;

pub const MINUTE: u64 = 60;

const SIZE_UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

pub const fn seconds(n: u64) -> Duration {
    Duration::from_secs(n)
}

pub const fn minutes(n: u64) -> Duration {
    Duration::from_secs(MINUTE * n)
}

// Not `byte_unit`: it picks the next unit at the boundary where this keeps `1024 B`.
/// Renders a byte count as a truncated integer of the binary unit one step
/// below the first magnitude (KiB..EiB) that is not exceeded, e.g. 1536
/// renders as `1 KiB` and 1024 as `1024 B`.
pub fn format_binary_size(bytes: u64) -> String {
    let mut unit = SIZE_UNITS.len() - 1;
    for i in 0..SIZE_UNITS.len() - 1 {
        let magnitude = 1u128 << (10 * (i + 1));
        if bytes as u128 <= magnitude {
            unit = i;
            break;
        }
    }
    format!("{} {}", bytes >> (10 * unit), SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_binary_size() {
        let cases = [
            (0, "0 B"),
            (500, "500 B"),
            (KIB, "1024 B"),
            (1536, "1 KiB"),
            (MIB, "1024 KiB"),
            (42 * MIB + 7, "42 MiB"),
            (3 * GIB, "3 GiB"),
            (u64::MAX, "15 EiB"),
        ];
        for (bytes, expected) in cases.iter() {
            assert_eq!(format_binary_size(*bytes), *expected, "bytes: {}", bytes);
        }
    }
}
