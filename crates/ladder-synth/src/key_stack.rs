//! Fixed-capacity stack of held keys for last-note priority.

/// Maximum number of simultaneously held keys.
pub const KEY_STACK_CAPACITY: usize = 16;

/// Held MIDI notes in press order.
///
/// The most recently pressed note is on top and is the one that sounds.
/// Each note appears at most once; removing a note keeps the remaining
/// notes in their original order.
///
/// # Example
///
/// ```rust
/// use ladder_synth::KeyStack;
///
/// let mut keys = KeyStack::new();
/// keys.push(60);
/// keys.push(64);
/// keys.push(67);
/// keys.remove(64);
/// assert_eq!(keys.as_slice(), &[60, 67]);
/// assert_eq!(keys.top(), Some(67));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct KeyStack {
    keys: [u8; KEY_STACK_CAPACITY],
    len: usize,
}

impl PartialEq for KeyStack {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for KeyStack {}

impl Default for KeyStack {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyStack {
    /// Create an empty stack.
    pub const fn new() -> Self {
        Self {
            keys: [0; KEY_STACK_CAPACITY],
            len: 0,
        }
    }

    /// Push a note on top.
    ///
    /// A note that is already held moves to the top. When the stack is full
    /// the oldest note is dropped to make room.
    pub fn push(&mut self, note: u8) {
        self.remove(note);
        if self.len == KEY_STACK_CAPACITY {
            self.keys.copy_within(1.., 0);
            self.len -= 1;
        }
        self.keys[self.len] = note;
        self.len += 1;
    }

    /// Remove a note wherever it sits. Returns `false` if it was not held.
    pub fn remove(&mut self, note: u8) -> bool {
        let Some(pos) = self.as_slice().iter().position(|&k| k == note) else {
            return false;
        };
        self.keys.copy_within(pos + 1..self.len, pos);
        self.len -= 1;
        true
    }

    /// The most recently pressed held note.
    pub fn top(&self) -> Option<u8> {
        self.as_slice().last().copied()
    }

    /// Drop every held note.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Returns `true` if `note` is held.
    pub fn contains(&self, note: u8) -> bool {
        self.as_slice().contains(&note)
    }

    /// Number of held notes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no notes are held.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Held notes, oldest first.
    pub fn as_slice(&self) -> &[u8] {
        &self.keys[..self.len]
    }
}
