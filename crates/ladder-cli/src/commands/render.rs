//! Offline rendering of note sequences.

use crate::patch_source::resolve_patch;
use anyhow::bail;
use clap::Args;
use ladder_io::{OutputStage, WavSpec, write_wav, write_wav_i16};
use ladder_synth::{Engine, MAX_BLOCK_SIZE, ParameterInfo};
use std::path::PathBuf;

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// MIDI notes to play in order (comma-separated, e.g., "48,55,60")
    #[arg(long, required = true, value_delimiter = ',', value_parser = clap::value_parser!(u8).range(0..=127))]
    notes: Vec<u8>,

    /// Length of each note in seconds
    #[arg(long, default_value = "0.5")]
    note_length: f32,

    /// Silence between notes in seconds
    #[arg(long, default_value = "0.0")]
    gap: f32,

    /// Time rendered after the last note-off in seconds
    #[arg(long, default_value = "1.0")]
    tail: f32,

    /// Hold each note until the next one starts
    #[arg(long)]
    legato: bool,

    /// Note velocity (0-1)
    #[arg(long, default_value = "1.0")]
    velocity: f32,

    /// Patch file or factory patch name
    #[arg(short, long)]
    patch: Option<String>,

    /// Parameter overrides (e.g., "cutoff=0.4"), applied after the patch
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, f32)>,

    /// Sample rate
    #[arg(long, default_value = "44100")]
    sample_rate: u32,

    /// Frames per render call (at most 256)
    #[arg(long, default_value = "256")]
    block_size: usize,

    /// Write 16-bit stereo through the output stage instead of mono float
    #[arg(long)]
    stereo: bool,
}

fn parse_key_val(s: &str) -> Result<(String, f32), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter format: '{s}' (expected key=value)"))?;
    let value = value
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("invalid value for '{key}': {e}"))?;
    Ok((key.trim().to_string(), value))
}

/// A timed note event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    On(u8),
    Off(u8),
}

/// Note events in playback order, with their start frame.
///
/// Returns the events and the frame of the last note-off.
fn schedule(notes: &[u8], note_frames: usize, gap_frames: usize, legato: bool) -> (Vec<(usize, Event)>, usize) {
    let step = note_frames + gap_frames;
    // Rank breaks ties at a shared frame; lower goes first.
    let mut ranked = Vec::with_capacity(notes.len() * 2);
    let mut end = 0;

    for (i, &note) in notes.iter().enumerate() {
        let start = i * step;
        ranked.push((start, u8::from(!legato), Event::On(note)));

        let next = notes.get(i + 1).copied();
        let (release, rank) = match next {
            // Release after the next key goes down so the gate never closes
            Some(next) if legato && next != note => ((i + 1) * step, 1),
            // Pressing a held key only moves it, so a repeat must release first
            Some(_) if legato => ((i + 1) * step, 0),
            _ => (start + note_frames, 0),
        };
        end = end.max(release);
        ranked.push((release, rank, Event::Off(note)));
    }

    // Stable: an Off pushed before the next On keeps its place on equal rank.
    ranked.sort_by_key(|&(frame, rank, _)| (frame, rank));
    let events = ranked.into_iter().map(|(frame, _, event)| (frame, event)).collect();
    (events, end)
}

/// Render `total` frames, applying events at their frames.
fn render_sequence(engine: &mut Engine, events: &[(usize, Event)], total: usize, block_size: usize, velocity: f32) -> Vec<f32> {
    let mut output = vec![0.0f32; total];
    let mut pos = 0;
    let mut pending = events.iter().peekable();

    while pos < total {
        while let Some(&&(frame, event)) = pending.peek() {
            if frame > pos {
                break;
            }
            match event {
                Event::On(note) => engine.note_on(note, velocity),
                Event::Off(note) => engine.note_off(note),
            }
            pending.next();
        }

        let next_event = pending.peek().map_or(total, |&&(frame, _)| frame.min(total));
        let end = (pos + block_size).min(next_event).max(pos + 1).min(total);
        pos += engine.render(&mut output[pos..end]);
    }

    output
}

fn seconds_to_frames(seconds: f32, sample_rate: u32) -> usize {
    (seconds.max(0.0) * sample_rate as f32).round() as usize
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    if args.sample_rate == 0 {
        bail!("sample rate must be positive");
    }
    if args.block_size == 0 {
        bail!("block size must be positive");
    }
    let block_size = args.block_size.min(MAX_BLOCK_SIZE);
    if block_size < args.block_size {
        tracing::warn!(requested = args.block_size, block_size, "block size capped");
    }

    let mut engine = Engine::new(args.sample_rate as f32);

    if let Some(source) = &args.patch {
        let patch = resolve_patch(source)?;
        patch.apply(&mut engine)?;
        println!("Patch: {}", patch.name);
    }

    for (key, value) in &args.param {
        let Some(index) = engine.find_param_by_key(key) else {
            bail!("unknown parameter '{key}' (see 'ladder params')");
        };
        engine.set_param(index, *value);
        tracing::debug!(key = %key, value = engine.get_param(index), "parameter set");
    }

    let note_frames = seconds_to_frames(args.note_length, args.sample_rate).max(1);
    let gap_frames = seconds_to_frames(args.gap, args.sample_rate);
    let tail_frames = seconds_to_frames(args.tail, args.sample_rate);
    let (events, last_off) = schedule(&args.notes, note_frames, gap_frames, args.legato);
    let total = last_off + tail_frames;

    println!(
        "Rendering {} notes, {:.2}s at {} Hz...",
        args.notes.len(),
        total as f32 / args.sample_rate as f32,
        args.sample_rate
    );

    let velocity = args.velocity.clamp(0.0, 1.0);
    let samples = render_sequence(&mut engine, &events, total, block_size, velocity);

    if args.stereo {
        let stage = OutputStage::new();
        let mut stereo = vec![0i16; samples.len() * 2];
        for (mono, out) in samples
            .chunks(MAX_BLOCK_SIZE)
            .zip(stereo.chunks_mut(MAX_BLOCK_SIZE * 2))
        {
            stage.process(mono, out);
        }
        write_wav_i16(&args.output, &stereo, 2, args.sample_rate)?;
    } else {
        write_wav(&args.output, &samples, WavSpec::mono_float(args.sample_rate))?;
    }

    let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    tracing::info!(peak, frames = samples.len(), "render finished");
    println!("Wrote {} frames to {}", samples.len(), args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(parse_key_val("cutoff=0.4"), Ok(("cutoff".to_string(), 0.4)));
        assert_eq!(parse_key_val(" osc1_range = -2 "), Ok(("osc1_range".to_string(), -2.0)));
        assert!(parse_key_val("cutoff").is_err());
        assert!(parse_key_val("cutoff=loud").is_err());
    }

    #[test]
    fn test_schedule_detached() {
        let (events, end) = schedule(&[60, 64], 100, 50, false);
        assert_eq!(
            events,
            vec![
                (0, Event::On(60)),
                (100, Event::Off(60)),
                (150, Event::On(64)),
                (250, Event::Off(64)),
            ]
        );
        assert_eq!(end, 250);
    }

    #[test]
    fn test_schedule_without_gap_releases_first() {
        let (events, _) = schedule(&[60, 64], 100, 0, false);
        assert_eq!(events[1], (100, Event::Off(60)));
        assert_eq!(events[2], (100, Event::On(64)));
    }

    #[test]
    fn test_schedule_legato_overlaps() {
        let (events, end) = schedule(&[60, 64, 67], 100, 0, true);
        assert_eq!(
            events,
            vec![
                (0, Event::On(60)),
                (100, Event::On(64)),
                (100, Event::Off(60)),
                (200, Event::On(67)),
                (200, Event::Off(64)),
                (300, Event::Off(67)),
            ]
        );
        assert_eq!(end, 300);
    }

    #[test]
    fn test_schedule_legato_repeated_note_retriggers() {
        let (events, end) = schedule(&[60, 60, 64], 1000, 0, true);
        assert_eq!(
            events,
            vec![
                (0, Event::On(60)),
                (1000, Event::Off(60)),
                (1000, Event::On(60)),
                (2000, Event::On(64)),
                (2000, Event::Off(60)),
                (3000, Event::Off(64)),
            ]
        );
        assert_eq!(end, 3000);

        let mut engine = Engine::new(44100.0);
        let _ = render_sequence(&mut engine, &events[..3], 1100, 64, 1.0);
        assert!(engine.voice().is_gated(), "repeated note must keep sounding");
        assert_eq!(engine.voice().current_note(), Some(60));
        assert!(engine.amp_envelope().counter() < 200.0, "repeat retriggers the envelope");
    }

    #[test]
    fn test_legato_sequence_triggers_once() {
        let mut engine = Engine::new(44100.0);
        let (events, end) = schedule(&[48, 52], 1000, 0, true);
        // Stop just after the second note-on
        let _ = render_sequence(&mut engine, &events[..3], 1001, 64, 1.0);
        assert!(engine.voice().is_gated());
        assert_eq!(engine.voice().current_note(), Some(52));
        assert!(engine.amp_envelope().counter() > 900.0, "envelope was not retriggered");
        assert_eq!(end, 2000);
    }

    #[test]
    fn test_render_sequence_length_and_release() {
        let mut engine = Engine::new(44100.0);
        let (events, end) = schedule(&[57], 2000, 0, false);
        let out = render_sequence(&mut engine, &events, end + 20000, 100, 1.0);
        assert_eq!(out.len(), end + 20000);
        assert!(out[..2000].iter().any(|&s| s != 0.0));
        assert!(!engine.voice().is_gated());
        assert!(!engine.is_sounding());
    }

    #[test]
    fn test_seconds_to_frames() {
        assert_eq!(seconds_to_frames(0.5, 44100), 22050);
        assert_eq!(seconds_to_frames(-1.0, 44100), 0);
    }
}
