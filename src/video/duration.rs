/// ISO-8601 media duration decoding (`P[nD][T[nH][nM][nS]]`)
use regex::Regex;
use std::sync::LazyLock;

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$")
        .expect("duration pattern is valid")
});

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Decode a duration string into total whole seconds.
///
/// The whole string must match; empty or malformed input (including
/// surrounding whitespace) decodes to `0`. This never fails.
pub fn decode(duration: &str) -> u64 {
    let Some(caps) = DURATION_PATTERN.captures(duration) else {
        return 0;
    };

    let part = |index: usize| -> u64 {
        caps.get(index)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };

    part(1)
        .saturating_mul(SECONDS_PER_DAY)
        .saturating_add(part(2).saturating_mul(SECONDS_PER_HOUR))
        .saturating_add(part(3).saturating_mul(SECONDS_PER_MINUTE))
        .saturating_add(part(4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_and_seconds() {
        assert_eq!(decode("PT1M30S"), 90);
        assert_eq!(decode("PT45S"), 45);
        assert_eq!(decode("PT1H30M45S"), 5445);
    }

    #[test]
    fn test_days_and_hours() {
        assert_eq!(decode("P1DT2H"), 93_600);
        assert_eq!(decode("P2D"), 172_800);
    }

    #[test]
    fn test_bare_designators() {
        assert_eq!(decode("P"), 0);
        assert_eq!(decode("PT"), 0);
        assert_eq!(decode("P0D"), 0);
    }

    #[test]
    fn test_malformed_input_is_zero() {
        assert_eq!(decode(""), 0);
        assert_eq!(decode("garbage"), 0);
        assert_eq!(decode("PT1M30Sx"), 0);
        assert_eq!(decode("1M30S"), 0);
        assert_eq!(decode("PT-5S"), 0);
    }

    #[test]
    fn test_surrounding_whitespace_is_malformed() {
        assert_eq!(decode(" PT1M30S "), 0);
        assert_eq!(decode("PT1M30S\n"), 0);
    }

    #[test]
    fn test_overflow_saturates() {
        assert_eq!(decode("PT99999999999999999999S"), 0);
        assert_eq!(decode("P999999999999999D"), u64::MAX);
    }
}
