//! Integration tests for ladder-io: engine output through the output stage
//! and into WAV files.

use ladder_io::{
    MAX_OUTPUT_FRAMES, OutputStage, WavFormat, WavSpec, read_wav, read_wav_info, write_wav,
    write_wav_i16,
};
use ladder_synth::{Engine, MAX_BLOCK_SIZE};
use tempfile::NamedTempFile;

const SR: u32 = 44100;

/// Render `frames` of a held note through the output stage.
fn render_stereo(engine: &mut Engine, frames: usize) -> Vec<i16> {
    let stage = OutputStage::new();
    let mut mono = [0.0f32; MAX_BLOCK_SIZE];
    let mut stereo = [0i16; MAX_BLOCK_SIZE * 2];
    let mut out = Vec::with_capacity(frames * 2);

    while out.len() < frames * 2 {
        let n = (frames - out.len() / 2).min(MAX_BLOCK_SIZE);
        let rendered = engine.render(&mut mono[..n]);
        let converted = stage.process(&mono[..rendered], &mut stereo);
        out.extend_from_slice(&stereo[..converted * 2]);
    }
    out
}

#[test]
fn engine_block_fits_output_stage() {
    assert!(MAX_BLOCK_SIZE <= MAX_OUTPUT_FRAMES);
}

#[test]
fn stereo_render_is_dual_mono_and_audible() {
    let mut engine = Engine::new(SR as f32);
    engine.note_on(48, 1.0);
    let stereo = render_stereo(&mut engine, 8192);

    assert_eq!(stereo.len(), 8192 * 2);
    assert!(stereo.chunks_exact(2).all(|lr| lr[0] == lr[1]));
    assert!(stereo.iter().any(|&s| s.unsigned_abs() > 100));
}

#[test]
fn stereo_render_round_trips_through_wav() {
    let mut engine = Engine::new(SR as f32);
    engine.note_on(60, 0.8);
    let stereo = render_stereo(&mut engine, 4096);

    let file = NamedTempFile::new().unwrap();
    write_wav_i16(file.path(), &stereo, 2, SR).unwrap();

    let info = read_wav_info(file.path()).unwrap();
    assert_eq!(info.channels, 2);
    assert_eq!(info.sample_rate, SR);
    assert_eq!(info.bits_per_sample, 16);
    assert_eq!(info.num_frames, 4096);
    assert_eq!(info.format, WavFormat::Pcm);

    let (mono, _) = read_wav(file.path()).unwrap();
    for (frame, &sample) in stereo.chunks_exact(2).zip(&mono) {
        let expected = f32::from(frame[0]) / 32768.0;
        assert!((sample - expected).abs() < 1e-6);
    }
}

#[test]
fn mono_float_render_preserves_engine_output() {
    let mut engine = Engine::new(SR as f32);
    engine.note_on(55, 1.0);
    let mut samples = vec![0.0f32; 2048];
    for chunk in samples.chunks_mut(MAX_BLOCK_SIZE) {
        engine.render(chunk);
    }

    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &samples, WavSpec::mono_float(SR)).unwrap();

    let (loaded, spec) = read_wav(file.path()).unwrap();
    assert_eq!(spec, WavSpec::mono_float(SR));
    assert_eq!(loaded, samples);

    let info = read_wav_info(file.path()).unwrap();
    assert!((info.duration_secs() - 2048.0 / f64::from(SR)).abs() < 1e-9);
}

#[test]
fn write_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.wav");
    assert!(write_wav(&path, &[0.0], WavSpec::default()).is_err());
}
