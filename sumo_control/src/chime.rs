//! Startup signal: a fixed ascending chime on the buzzer.

use std::time::Duration;

use sumo_common::consts::{NOTE_BASE_HOLD_MS, NOTE_GAP_MS};
use sumo_common::io::PinMap;
use sumo_hal::board::{Board, Pacer, PwmLine};
use sumo_hal::error::HalError;
use tracing::warn;

const NOTE_D5: u16 = 587;
const NOTE_E5: u16 = 659;
const NOTE_F5: u16 = 698;
const NOTE_G5: u16 = 784;
const NOTE_A5: u16 = 880;
const NOTE_B5: u16 = 988;
const NOTE_C6: u16 = 1047;
const NOTE_D6: u16 = 1175;

/// One chime note: frequency plus a duration divisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    /// Tone frequency.
    pub freq_hz: u16,
    /// Divisor: the note holds `500 / divisor` ms.
    pub divisor: u64,
}

/// The fixed eight-note ascending melody, D5 through D6, quarter notes.
pub const STARTUP_MELODY: [Note; 8] = [
    Note { freq_hz: NOTE_D5, divisor: 4 },
    Note { freq_hz: NOTE_E5, divisor: 4 },
    Note { freq_hz: NOTE_F5, divisor: 4 },
    Note { freq_hz: NOTE_G5, divisor: 4 },
    Note { freq_hz: NOTE_A5, divisor: 4 },
    Note { freq_hz: NOTE_B5, divisor: 4 },
    Note { freq_hz: NOTE_C6, divisor: 4 },
    Note { freq_hz: NOTE_D6, divisor: 4 },
];

/// Plays [`STARTUP_MELODY`] once, before the strategy loop starts.
///
/// Not re-entrant and not interruptible; no side effects beyond the buzzer
/// line and elapsed time.
pub struct StartupChime {
    buzzer: Box<dyn PwmLine>,
    pacer: Box<dyn Pacer>,
}

impl StartupChime {
    /// Claim the buzzer line.
    pub fn new(board: &mut dyn Board, pins: &PinMap) -> Result<Self, HalError> {
        Ok(Self {
            buzzer: board.claim_pwm(pins.buzzer)?,
            pacer: board.pacer(),
        })
    }

    /// Play the melody: each note held `500 / divisor` ms, then 50 ms of
    /// silence. Eight tone segments, eight gaps, deterministic.
    pub fn play(&mut self) {
        for note in &STARTUP_MELODY {
            if let Err(e) = self.buzzer.start_tone(note.freq_hz) {
                warn!(error = %e, freq_hz = note.freq_hz, "buzzer tone failed");
            }
            self.pacer
                .pause(Duration::from_millis(NOTE_BASE_HOLD_MS / note.divisor));
            if let Err(e) = self.buzzer.stop_tone() {
                warn!(error = %e, "buzzer silence failed");
            }
            self.pacer.pause(Duration::from_millis(NOTE_GAP_MS));
        }
    }
}
