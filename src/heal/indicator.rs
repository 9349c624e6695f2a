/// Source of activity indicator characters, one per redraw.
///
/// Implementations must never run dry for the lifetime of a session.
pub trait Indicator: Send {
    fn next_indicator(&mut self) -> char;
}

#[cfg(unix)]
const SPINNER_CHARS: &[char] = &['◐', '◓', '◑', '◒'];
#[cfg(not(unix))]
const SPINNER_CHARS: &[char] = &['|', '/', '-', '\\'];

#[derive(Clone, Debug, Default)]
pub struct Spinner {
    pos: usize,
}

impl Spinner {
    pub fn new() -> Spinner {
        Spinner::default()
    }
}

impl Indicator for Spinner {
    fn next_indicator(&mut self) -> char {
        let c = SPINNER_CHARS[self.pos];
        self.pos = (self.pos + 1) % SPINNER_CHARS.len();
        c
    }
}
