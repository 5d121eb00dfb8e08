//! WAV files for rendered synth output.
//!
//! The engine renders mono `f32`. That goes to disk either as 32-bit float
//! or, after the [`OutputStage`](crate::OutputStage), as interleaved 16-bit
//! stereo. Reading is mostly for checking renders.

use crate::Result;
use hound::{SampleFormat, WavReader, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Sample encoding of a WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Integer PCM
    Pcm,
    /// 32-bit float
    IeeeFloat,
}

/// Channel layout, rate and bit depth of a WAV file.
///
/// A depth of 32 bits means float; anything else is integer PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Interleaved channels
    pub channels: u16,
    /// Frames per second
    pub sample_rate: u32,
    /// 16 or 32
    pub bits_per_sample: u16,
}

impl WavSpec {
    /// Mono 32-bit float, the engine's native output.
    pub fn mono_float(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: 32,
        }
    }

    /// Stereo 16-bit PCM, the output stage format.
    pub fn stereo_i16(sample_rate: u32) -> Self {
        Self {
            channels: 2,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// Encoding implied by the bit depth.
    pub fn format(&self) -> WavFormat {
        if self.bits_per_sample == 32 {
            WavFormat::IeeeFloat
        } else {
            WavFormat::Pcm
        }
    }

    fn to_hound(self) -> hound::WavSpec {
        hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: match self.format() {
                WavFormat::IeeeFloat => SampleFormat::Float,
                WavFormat::Pcm => SampleFormat::Int,
            },
        }
    }
}

impl Default for WavSpec {
    fn default() -> Self {
        Self::mono_float(44100)
    }
}

/// Header of a WAV file on disk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavInfo {
    /// Interleaved channels
    pub channels: u16,
    /// Frames per second
    pub sample_rate: u32,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Frames (samples per channel)
    pub num_frames: u64,
    /// Sample encoding
    pub format: WavFormat,
}

impl WavInfo {
    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.num_frames as f64 / f64::from(self.sample_rate.max(1))
    }
}

/// Read the header of a WAV file without decoding samples.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let header = reader.spec();
    Ok(WavInfo {
        channels: header.channels,
        sample_rate: header.sample_rate,
        bits_per_sample: header.bits_per_sample,
        num_frames: u64::from(reader.duration()),
        format: match header.sample_format {
            SampleFormat::Float => WavFormat::IeeeFloat,
            SampleFormat::Int => WavFormat::Pcm,
        },
    })
}

/// Full-scale value for an integer bit depth.
fn full_scale(bits: u16) -> f32 {
    (1i64 << (bits.clamp(1, 32) - 1)) as f32
}

/// Read a WAV file as mono `f32`.
///
/// Channels are averaged per frame. Integer samples are scaled to `[-1, 1)`.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let header = reader.spec();
    let spec = WavSpec {
        channels: header.channels,
        sample_rate: header.sample_rate,
        bits_per_sample: header.bits_per_sample,
    };

    let interleaved = match header.sample_format {
        SampleFormat::Float => reader.into_samples::<f32>().collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let scale = full_scale(header.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let channels = usize::from(spec.channels.max(1));
    if channels == 1 {
        return Ok((interleaved, spec));
    }
    let mono = interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect();
    Ok((mono, spec))
}

fn create(path: &Path, spec: WavSpec) -> Result<WavWriter<BufWriter<File>>> {
    Ok(WavWriter::create(path, spec.to_hound())?)
}

/// Write `f32` samples, interleaved when `spec.channels > 1`.
///
/// For integer depths the samples are scaled and clamped to full scale.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    let path = path.as_ref();
    let mut writer = create(path, spec)?;

    match spec.format() {
        WavFormat::IeeeFloat => {
            for &sample in samples {
                writer.write_sample(sample)?;
            }
        }
        WavFormat::Pcm => {
            let scale = full_scale(spec.bits_per_sample);
            for &sample in samples {
                writer.write_sample((sample * scale).clamp(-scale, scale - 1.0) as i32)?;
            }
        }
    }

    writer.finalize()?;
    tracing::debug!(path = %path.display(), samples = samples.len(), ?spec, "wrote WAV");
    Ok(())
}

/// Write interleaved `i16` samples unchanged.
pub fn write_wav_i16<P: AsRef<Path>>(
    path: P,
    samples: &[i16],
    channels: u16,
    sample_rate: u32,
) -> Result<()> {
    let path = path.as_ref();
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
    };
    let mut writer = create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    tracing::debug!(path = %path.display(), samples = samples.len(), channels, "wrote 16-bit WAV");
    Ok(())
}
