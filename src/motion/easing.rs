pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

pub fn ease_out_cubic(t: f64) -> f64 {
    let t = clamp01(t);
    1.0 - (1.0 - t).powi(3)
}

/// Piecewise-linear map from `input` stops to `output` stops, clamped at
/// both ends. Stops must be ascending and the slices the same length.
pub fn interpolate(value: f64, input: &[f64], output: &[f64]) -> f64 {
    let len = input.len().min(output.len());
    if len == 0 {
        return value;
    }
    if len == 1 || value <= input[0] {
        return output[0];
    }
    if value >= input[len - 1] {
        return output[len - 1];
    }

    for index in 1..len {
        let (lo, hi) = (input[index - 1], input[index]);
        if value <= hi {
            let span = hi - lo;
            let t = if span <= f64::EPSILON { 1.0 } else { (value - lo) / span };
            return lerp(output[index - 1], output[index], t);
        }
    }

    output[len - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_out_cubic_pins_its_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(-3.0), 0.0);
        assert_eq!(ease_out_cubic(7.0), 1.0);
    }

    #[test]
    fn interpolate_clamps_and_walks_segments() {
        let input = [0.0, 0.5, 1.0];
        let output = [0.8, 1.0, 1.0];

        assert_eq!(interpolate(-1.0, &input, &output), 0.8);
        assert!((interpolate(0.25, &input, &output) - 0.9).abs() < 1e-9);
        assert_eq!(interpolate(0.75, &input, &output), 1.0);
        assert_eq!(interpolate(4.0, &input, &output), 1.0);
    }

    #[test]
    fn clamp01_maps_nan_to_zero() {
        assert_eq!(clamp01(f64::NAN), 0.0);
    }
}
