//! Hex dumps for diagnostics.

use std::fmt::Write;

/// Formats up to `max` bytes of `octets` as space-separated hex.
///
/// Longer inputs are cut off and suffixed with the number of bytes omitted.
///
/// # Example
///
/// ```
/// use channel_buffers::print_octets;
///
/// assert_eq!(print_octets(&[0x01, 0x02, 0x0a, 0xff], 16), "01 02 0a ff");
/// assert_eq!(print_octets(&[1, 2, 3], 2), "01 02... (1 more)");
/// assert_eq!(print_octets(&[], 16), "");
/// ```
pub fn print_octets(octets: &[u8], max: usize) -> String {
    let mut result = String::with_capacity(octets.len().min(max) * 3);
    for (i, byte) in octets.iter().take(max).enumerate() {
        if i > 0 {
            result.push(' ');
        }
        let _ = write!(result, "{:02x}", byte);
    }
    if octets.len() > max {
        let _ = write!(result, "... ({} more)", octets.len() - max);
    }
    result
}

/// Formats the first 32 bytes, enough for a serialized header and the start
/// of its payload.
///
/// ```
/// use channel_buffers::print_octets_default;
///
/// assert_eq!(print_octets_default(&[0x01, 0x02]), "01 02");
/// ```
pub fn print_octets_default(octets: &[u8]) -> String {
    print_octets(octets, 32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_octets_single() {
        assert_eq!(print_octets(&[0x01], 16), "01");
    }

    #[test]
    fn test_print_octets_truncated() {
        let data: Vec<u8> = (0..20).collect();
        let result = print_octets(&data, 10);
        assert!(result.starts_with("00 01 02"));
        assert!(result.ends_with("09... (10 more)"));
    }

    #[test]
    fn test_print_octets_zero_max() {
        assert_eq!(print_octets(&[0xff, 0xee], 0), "... (2 more)");
    }
}
