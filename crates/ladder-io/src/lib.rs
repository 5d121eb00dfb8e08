//! Audio output for the ladder synth.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`write_wav`], [`write_wav_i16`], [`read_wav`] and
//!   [`read_wav_info`]
//! - **Output stage**: [`OutputStage`] turns the engine's mono float output
//!   into the interleaved 16-bit stereo a host expects
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ladder_io::{OutputStage, write_wav_i16};
//!
//! let mono = vec![0.0f32; 256];
//! let mut stereo = vec![0i16; 512];
//! OutputStage::new().process(&mono, &mut stereo);
//! write_wav_i16("out.wav", &stereo, 2, 44100)?;
//! # Ok::<(), ladder_io::Error>(())
//! ```

mod output;
mod wav;

pub use output::{
    MAX_OUTPUT_FRAMES, OUTPUT_GAIN, OutputStage, SOFT_CLIP_THRESHOLD, soft_clip, to_i16,
};
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav, write_wav_i16};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
