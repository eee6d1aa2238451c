/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the surface started ticking
    pub time: f32,
    /// Seconds since the previous frame
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Deterministic frames at a fixed rate. The first frame has a zero delta,
/// like a surface that has just mounted.
#[derive(Debug, Clone)]
pub struct FixedStepFrames {
    frame_number: u64,
    step: f32,
}

impl FixedStepFrames {
    pub fn new(hz: f32) -> Self {
        Self {
            frame_number: 0,
            step: 1.0 / hz,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}

impl Iterator for FixedStepFrames {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        let number = self.frame_number;
        let delta = if number == 0 { 0.0 } else { self.step };
        self.frame_number += 1;
        Some(FrameInfo::new(number, number as f32 * self.step, delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_step_frames_start_at_rest() {
        let frames: Vec<FrameInfo> = FixedStepFrames::new(50.0).take(3).collect();
        assert_eq!(frames[0].delta, 0.0);
        assert_eq!(frames[1].delta, 0.02);
        assert!((frames[2].time - 0.04).abs() < 1e-6);
    }
}
