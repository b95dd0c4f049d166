/// Converts an averaged PM2.5 concentration (µg/m³) to a US EPA AQI value.
///
/// The concentration is rounded to one decimal and then to a whole number
/// before the breakpoint lookup. Existing stored readings were produced this
/// way, so the second rounding stays even though it discards the decimal.
pub fn pm25_to_aqi(raw: f64) -> i32 {
    let x = ((raw * 10.0).round() / 10.0).round();

    let y = if x <= 15.4 {
        3.247 * x
    } else if x <= 65.4 {
        1.968 * (x - 15.5) + 51.0
    } else if x <= 150.4 {
        0.577 * (x - 65.5) + 151.0
    } else if x <= 250.4 {
        0.991 * (x - 150.5) + 201.0
    } else {
        0.796 * (x - 250.5) + 301.0
    };

    y.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_zero_is_zero() {
        assert_eq!(pm25_to_aqi(0.0), 0);
    }

    #[test]
    fn test_good_segment() {
        // 3.247 * 12 = 38.964
        assert_eq!(pm25_to_aqi(12.0), 39);
        assert_eq!(pm25_to_aqi(15.4), 49);
    }

    #[test]
    fn test_second_segment_uses_whole_concentration() {
        // 35.4 collapses to 35 before the lookup: 1.968 * 19.5 + 51 = 89.376
        assert_eq!(pm25_to_aqi(35.4), 89);
        assert_eq!(pm25_to_aqi(35.5), 91);
        assert_eq!(pm25_to_aqi(15.5), 52);
    }

    #[test]
    fn test_upper_segments() {
        assert_eq!(pm25_to_aqi(65.0), 148);
        assert_eq!(pm25_to_aqi(66.0), 151);
        assert_eq!(pm25_to_aqi(150.0), 200);
        assert_eq!(pm25_to_aqi(151.0), 201);
        assert_eq!(pm25_to_aqi(250.0), 300);
        assert_eq!(pm25_to_aqi(251.0), 301);
        assert_eq!(pm25_to_aqi(500.0), 500);
    }

    #[test]
    fn test_negative_input_is_not_rejected() {
        assert_eq!(pm25_to_aqi(-2.0), -6);
    }

    #[test]
    fn test_monotonic_over_integer_concentrations() {
        let mut last = pm25_to_aqi(0.0);
        for pm in 1..=600 {
            let aqi = pm25_to_aqi(pm as f64);
            assert!(aqi >= last, "AQI dropped at {}: {} < {}", pm, aqi, last);
            last = aqi;
        }
    }

    #[test]
    fn test_monotonic_sampled() {
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            let a: f64 = rng.gen_range(0.0..600.0);
            let b: f64 = rng.gen_range(a..=600.0);
            assert!(
                pm25_to_aqi(a) <= pm25_to_aqi(b),
                "pm25_to_aqi({}) > pm25_to_aqi({})",
                a,
                b
            );
        }
    }
}
