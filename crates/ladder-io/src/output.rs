//! Host output stage: gain, soft clip and 16-bit stereo conversion.

/// Gain applied to the engine's mono output before conversion.
pub const OUTPUT_GAIN: f32 = 0.35;

/// Magnitude above which samples pass through `tanh`.
pub const SOFT_CLIP_THRESHOLD: f32 = 0.9;

/// Most frames converted per [`OutputStage::process`] call.
pub const MAX_OUTPUT_FRAMES: usize = 256;

/// Soft-clip a sample: identity inside `±0.9`, `tanh` outside.
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    if x.abs() > SOFT_CLIP_THRESHOLD {
        x.tanh()
    } else {
        x
    }
}

/// Convert a float sample to 16-bit with truncation and saturation.
#[inline]
pub fn to_i16(x: f32) -> i16 {
    ((x * 32767.0) as i32).clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

/// Turns mono engine output into interleaved 16-bit stereo.
///
/// ```rust
/// use ladder_io::OutputStage;
///
/// let stage = OutputStage::new();
/// let mono = [0.0f32, 1.0, -1.0];
/// let mut stereo = [0i16; 6];
///
/// assert_eq!(stage.process(&mono, &mut stereo), 3);
/// assert_eq!(stereo[2], stereo[3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputStage {
    gain: f32,
}

impl Default for OutputStage {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputStage {
    /// Stage with the standard [`OUTPUT_GAIN`].
    pub fn new() -> Self {
        Self { gain: OUTPUT_GAIN }
    }

    /// Stage with a custom gain.
    pub fn with_gain(gain: f32) -> Self {
        Self { gain }
    }

    /// Output gain.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Convert one mono sample.
    #[inline]
    pub fn convert(&self, sample: f32) -> i16 {
        to_i16(soft_clip(sample * self.gain))
    }

    /// Write `mono` as interleaved L/R pairs into `stereo`.
    ///
    /// Converts at most [`MAX_OUTPUT_FRAMES`] frames, limited by both buffer
    /// sizes. Returns the number of frames written.
    pub fn process(&self, mono: &[f32], stereo: &mut [i16]) -> usize {
        let frames = mono.len().min(stereo.len() / 2).min(MAX_OUTPUT_FRAMES);
        for (&sample, pair) in mono[..frames].iter().zip(stereo.chunks_exact_mut(2)) {
            let value = self.convert(sample);
            pair[0] = value;
            pair[1] = value;
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_clip_threshold() {
        assert_eq!(soft_clip(0.5), 0.5);
        assert_eq!(soft_clip(-0.9), -0.9);
        assert!((soft_clip(2.0) - 2.0f32.tanh()).abs() < 1e-7);
        assert!(soft_clip(100.0) <= 1.0);
    }

    #[test]
    fn test_to_i16_truncates_and_saturates() {
        assert_eq!(to_i16(0.0), 0);
        assert_eq!(to_i16(1.0), 32767);
        assert_eq!(to_i16(-1.0), -32767);
        assert_eq!(to_i16(3.0), 32767);
        assert_eq!(to_i16(-3.0), -32768);
        // 0.5 * 32767 = 16383.5 truncates toward zero
        assert_eq!(to_i16(0.5), 16383);
        assert_eq!(to_i16(-0.5), -16383);
    }

    #[test]
    fn test_convert_applies_gain() {
        let stage = OutputStage::new();
        assert_eq!(stage.convert(1.0), to_i16(0.35));
        assert_eq!(stage.gain(), OUTPUT_GAIN);
    }

    #[test]
    fn test_loud_input_soft_clips() {
        let stage = OutputStage::new();
        // 4.0 * 0.35 = 1.4 passes through tanh
        assert_eq!(stage.convert(4.0), to_i16(1.4f32.tanh()));
        assert!(stage.convert(1000.0) > stage.convert(4.0));
    }

    #[test]
    fn test_process_duplicates_channels() {
        let stage = OutputStage::with_gain(1.0);
        let mono = [0.25f32, -0.25, 0.0];
        let mut stereo = [7i16; 8];
        assert_eq!(stage.process(&mono, &mut stereo), 3);
        assert_eq!(&stereo[..6], &[8191, 8191, -8191, -8191, 0, 0]);
        assert_eq!(&stereo[6..], &[7, 7], "tail untouched");
    }

    #[test]
    fn test_process_caps_frames() {
        let stage = OutputStage::new();
        let mono = vec![0.1f32; 1000];
        let mut stereo = vec![0i16; 2000];
        assert_eq!(stage.process(&mono, &mut stereo), MAX_OUTPUT_FRAMES);

        let mut short = [0i16; 5];
        assert_eq!(stage.process(&mono, &mut short), 2);
    }
}
