use std::f64::consts::TAU;

/// Golden-ratio sequence mapped onto a full turn. Consecutive seeds land far
/// apart on the circle, which keeps a generated group from moving in lockstep.
pub fn golden_phase(seed: u32) -> f32 {
    let fraction = (seed as f64 * 0.618033988749895) % 1.0;
    (fraction * TAU) as f32
}

/// `amplitude * sin(time * frequency + phase)`, evaluated in f64 so long
/// running surfaces do not lose precision in the argument.
pub fn sine(time: f64, frequency: f32, phase: f32, amplitude: f32) -> f32 {
    (amplitude as f64 * (time * frequency as f64 + phase as f64).sin()) as f32
}

pub fn cosine(time: f64, frequency: f32, phase: f32, amplitude: f32) -> f32 {
    (amplitude as f64 * (time * frequency as f64 + phase as f64).cos()) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_phase_is_deterministic_and_spread() {
        assert_eq!(golden_phase(3), golden_phase(3));
        assert_eq!(golden_phase(0), 0.0);
        for seed in 1..16 {
            let a = golden_phase(seed);
            let b = golden_phase(seed + 1);
            assert!((0.0..std::f32::consts::TAU).contains(&a));
            assert!((a - b).abs() > 0.1, "seeds {} and {} too close", seed, seed + 1);
        }
    }

    #[test]
    fn sine_stays_within_amplitude() {
        for step in 0..1000 {
            let t = step as f64 * 0.37;
            let v = sine(t, 1.7, 0.4, 0.25);
            assert!(v.abs() <= 0.25 + 1e-6);
        }
    }
}
