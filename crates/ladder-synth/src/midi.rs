//! Raw MIDI channel-message decoding.
//!
//! Channel bits are ignored: the engine responds on every channel.

use crate::engine::Engine;

/// Controller number for the mod wheel.
pub const CC_MOD_WHEEL: u8 = 1;

/// Controller number for the sustain pedal.
pub const CC_SUSTAIN: u8 = 64;

/// Controller number for All Notes Off.
pub const CC_ALL_NOTES_OFF: u8 = 123;

const PITCH_BEND_CENTER: i32 = 8192;

/// A decoded channel message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MidiMessage {
    /// Key press. Velocity normalized to `(0, 1]`.
    NoteOn {
        /// MIDI note number
        note: u8,
        /// Normalized velocity
        velocity: f32,
    },
    /// Key release, including note-on with velocity zero.
    NoteOff {
        /// MIDI note number
        note: u8,
    },
    /// Control change with raw 7-bit value.
    ControlChange {
        /// Controller number
        controller: u8,
        /// Raw value, `0..=127`
        value: u8,
    },
    /// Pitch bend normalized to `[-1, 1)`.
    PitchBend(f32),
    /// Channel pressure. Decoded but not acted upon.
    ChannelPressure(u8),
}

impl MidiMessage {
    /// Decode a raw message.
    ///
    /// Returns `None` for messages shorter than two bytes and for status
    /// bytes this engine does not handle.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let (&status, rest) = bytes.split_first()?;
        let &d1 = rest.first()?;
        let d1 = d1 & 0x7F;
        let d2 = rest.get(1).map_or(0, |b| b & 0x7F);

        match status & 0xF0 {
            0x90 if d2 > 0 => Some(Self::NoteOn {
                note: d1,
                velocity: f32::from(d2) / 127.0,
            }),
            0x90 | 0x80 => Some(Self::NoteOff { note: d1 }),
            0xB0 => Some(Self::ControlChange {
                controller: d1,
                value: d2,
            }),
            0xE0 => {
                let raw = (i32::from(d2) << 7) | i32::from(d1);
                Some(Self::PitchBend(
                    (raw - PITCH_BEND_CENTER) as f32 / PITCH_BEND_CENTER as f32,
                ))
            }
            0xD0 => Some(Self::ChannelPressure(d1)),
            _ => None,
        }
    }
}

impl Engine {
    /// Apply a decoded MIDI message.
    pub fn apply_midi(&mut self, message: MidiMessage) {
        match message {
            MidiMessage::NoteOn { note, velocity } => self.note_on(note, velocity),
            MidiMessage::NoteOff { note } => self.note_off(note),
            MidiMessage::ControlChange { controller, value } => match controller {
                CC_MOD_WHEEL => self.mod_wheel(f32::from(value) / 127.0),
                CC_ALL_NOTES_OFF => self.all_notes_off(),
                // Sustain pedal is not implemented; hold keys instead.
                CC_SUSTAIN => {}
                _ => {}
            },
            MidiMessage::PitchBend(value) => self.pitch_bend(value),
            MidiMessage::ChannelPressure(_) => {}
        }
    }

    /// Decode and apply a raw MIDI message. Malformed or unsupported
    /// messages are ignored.
    pub fn handle_midi(&mut self, bytes: &[u8]) {
        if let Some(message) = MidiMessage::parse(bytes) {
            self.apply_midi(message);
        }
    }
}
