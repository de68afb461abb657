//! Simulation board for development and testing without hardware.
//!
//! The board keeps a virtual clock: `Pacer::pause` advances it instead of
//! sleeping, so timed holds are observable instantly. Every output write,
//! duty change, tone edge, and pause lands in an event journal stamped with
//! the virtual time; tests script input levels and echo replies through a
//! [`SimHandle`] and assert on the journal afterwards.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use sumo_common::io::PinId;
use tracing::trace;

use crate::board::{Board, InputLine, OutputLine, Pacer, PwmLine};
use crate::error::HalError;

/// One observable side effect on the simulated board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    /// Digital output write.
    Write {
        /// Pin written.
        pin: PinId,
        /// Level driven.
        high: bool,
    },
    /// PWM duty change.
    Duty {
        /// Pin changed.
        pin: PinId,
        /// New duty level.
        duty: u8,
    },
    /// Tone started.
    ToneOn {
        /// Pin the tone plays on.
        pin: PinId,
        /// Tone frequency.
        freq_hz: u16,
    },
    /// Tone stopped.
    ToneOff {
        /// Pin silenced.
        pin: PinId,
    },
    /// Blocking pause on the virtual clock.
    Pause {
        /// Pause length.
        amount: Duration,
    },
}

/// A journal entry: an event plus the virtual time it happened at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedEvent {
    /// Virtual clock value when the event occurred.
    pub at: Duration,
    /// The event itself.
    pub event: SimEvent,
}

#[derive(Debug, Default)]
struct SimState {
    now: Duration,
    claimed: HashSet<PinId>,
    input_levels: HashMap<PinId, bool>,
    output_levels: HashMap<PinId, bool>,
    duties: HashMap<PinId, u8>,
    tones: HashMap<PinId, u16>,
    echoes: HashMap<PinId, VecDeque<Duration>>,
    failing_reads: HashSet<PinId>,
    failing_writes: HashSet<PinId>,
    journal: Vec<TimedEvent>,
}

impl SimState {
    fn record(&mut self, event: SimEvent) {
        self.journal.push(TimedEvent { at: self.now, event });
    }
}

type Shared = Arc<Mutex<SimState>>;

fn locked(shared: &Shared) -> MutexGuard<'_, SimState> {
    shared.lock().expect("simulation state poisoned")
}

// ─── Board ──────────────────────────────────────────────────────────

/// In-memory board.
pub struct SimBoard {
    state: Shared,
}

impl SimBoard {
    /// Create a fresh board: all inputs low, no pins claimed, clock at zero.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SimState::default())),
        }
    }

    /// Handle for scripting inputs and inspecting outcomes.
    pub fn handle(&self) -> SimHandle {
        SimHandle {
            state: self.state.clone(),
        }
    }

    fn claim(&self, pin: PinId) -> Result<(), HalError> {
        let mut state = locked(&self.state);
        if !state.claimed.insert(pin) {
            return Err(HalError::PinBusy(pin));
        }
        Ok(())
    }
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Factory for the board registry.
pub fn create_board() -> Result<Box<dyn Board>, HalError> {
    Ok(Box::new(SimBoard::new()))
}

impl Board for SimBoard {
    fn name(&self) -> &'static str {
        "simulation"
    }

    fn claim_input(&mut self, pin: PinId) -> Result<Box<dyn InputLine>, HalError> {
        self.claim(pin)?;
        Ok(Box::new(SimInput {
            pin,
            state: self.state.clone(),
        }))
    }

    fn claim_output(&mut self, pin: PinId) -> Result<Box<dyn OutputLine>, HalError> {
        self.claim(pin)?;
        Ok(Box::new(SimOutput {
            pin,
            state: self.state.clone(),
        }))
    }

    fn claim_pwm(&mut self, pin: PinId) -> Result<Box<dyn PwmLine>, HalError> {
        self.claim(pin)?;
        Ok(Box::new(SimPwm {
            pin,
            state: self.state.clone(),
        }))
    }

    fn pacer(&self) -> Box<dyn Pacer> {
        Box::new(SimPacer {
            state: self.state.clone(),
        })
    }
}

// ─── Lines ──────────────────────────────────────────────────────────

struct SimInput {
    pin: PinId,
    state: Shared,
}

impl InputLine for SimInput {
    fn read(&self) -> Result<bool, HalError> {
        let state = locked(&self.state);
        if state.failing_reads.contains(&self.pin) {
            return Err(HalError::ReadFailed {
                pin: self.pin,
                reason: "scripted read failure".into(),
            });
        }
        Ok(state.input_levels.get(&self.pin).copied().unwrap_or(false))
    }

    fn measure_pulse(
        &self,
        _level: bool,
        timeout: Duration,
    ) -> Result<Option<Duration>, HalError> {
        let mut state = locked(&self.state);
        if state.failing_reads.contains(&self.pin) {
            return Err(HalError::ReadFailed {
                pin: self.pin,
                reason: "scripted read failure".into(),
            });
        }
        let reply = state
            .echoes
            .get_mut(&self.pin)
            .and_then(VecDeque::pop_front);
        match reply {
            Some(width) if width <= timeout => {
                state.now += width;
                Ok(Some(width))
            }
            // Scripted pulse outlasts the bound, or nothing scripted at all:
            // the caller waits the full timeout and gets no reading.
            _ => {
                state.now += timeout;
                Ok(None)
            }
        }
    }
}

struct SimOutput {
    pin: PinId,
    state: Shared,
}

impl OutputLine for SimOutput {
    fn write(&mut self, high: bool) -> Result<(), HalError> {
        let mut state = locked(&self.state);
        if state.failing_writes.contains(&self.pin) {
            return Err(HalError::WriteFailed {
                pin: self.pin,
                reason: "scripted write failure".into(),
            });
        }
        trace!(pin = self.pin, high, "sim write");
        state.output_levels.insert(self.pin, high);
        state.record(SimEvent::Write {
            pin: self.pin,
            high,
        });
        Ok(())
    }
}

struct SimPwm {
    pin: PinId,
    state: Shared,
}

impl PwmLine for SimPwm {
    fn set_duty(&mut self, duty: u8) -> Result<(), HalError> {
        let mut state = locked(&self.state);
        if state.failing_writes.contains(&self.pin) {
            return Err(HalError::WriteFailed {
                pin: self.pin,
                reason: "scripted write failure".into(),
            });
        }
        trace!(pin = self.pin, duty, "sim duty");
        state.duties.insert(self.pin, duty);
        state.record(SimEvent::Duty {
            pin: self.pin,
            duty,
        });
        Ok(())
    }

    fn start_tone(&mut self, freq_hz: u16) -> Result<(), HalError> {
        let mut state = locked(&self.state);
        if state.failing_writes.contains(&self.pin) {
            return Err(HalError::WriteFailed {
                pin: self.pin,
                reason: "scripted write failure".into(),
            });
        }
        state.tones.insert(self.pin, freq_hz);
        state.record(SimEvent::ToneOn {
            pin: self.pin,
            freq_hz,
        });
        Ok(())
    }

    fn stop_tone(&mut self) -> Result<(), HalError> {
        let mut state = locked(&self.state);
        if state.failing_writes.contains(&self.pin) {
            return Err(HalError::WriteFailed {
                pin: self.pin,
                reason: "scripted write failure".into(),
            });
        }
        state.tones.remove(&self.pin);
        state.record(SimEvent::ToneOff { pin: self.pin });
        Ok(())
    }
}

struct SimPacer {
    state: Shared,
}

impl Pacer for SimPacer {
    fn pause(&self, amount: Duration) {
        let mut state = locked(&self.state);
        state.now += amount;
        state.record(SimEvent::Pause { amount });
    }
}

// ─── Handle ─────────────────────────────────────────────────────────

/// Scripting and inspection handle onto a [`SimBoard`].
///
/// Clones share the board's state; the handle stays valid after the board
/// has been boxed and moved into the control stack.
#[derive(Clone)]
pub struct SimHandle {
    state: Shared,
}

impl SimHandle {
    /// Script the level an input line reads.
    pub fn set_level(&self, pin: PinId, high: bool) {
        locked(&self.state).input_levels.insert(pin, high);
    }

    /// Queue one echo pulse width for `measure_pulse` on `pin`.
    ///
    /// An empty queue means the next measurement times out.
    pub fn queue_echo(&self, pin: PinId, width: Duration) {
        locked(&self.state)
            .echoes
            .entry(pin)
            .or_default()
            .push_back(width);
    }

    /// Make every read on `pin` fail from now on.
    pub fn fail_reads_on(&self, pin: PinId) {
        locked(&self.state).failing_reads.insert(pin);
    }

    /// Make every write on `pin` fail from now on.
    pub fn fail_writes_on(&self, pin: PinId) {
        locked(&self.state).failing_writes.insert(pin);
    }

    /// Last level written to an output line, if any.
    pub fn output_level(&self, pin: PinId) -> Option<bool> {
        locked(&self.state).output_levels.get(&pin).copied()
    }

    /// Last duty set on a PWM line, if any.
    pub fn duty(&self, pin: PinId) -> Option<u8> {
        locked(&self.state).duties.get(&pin).copied()
    }

    /// Frequency of the tone currently playing on `pin`, if any.
    pub fn active_tone(&self, pin: PinId) -> Option<u16> {
        locked(&self.state).tones.get(&pin).copied()
    }

    /// Current virtual clock value.
    pub fn elapsed(&self) -> Duration {
        locked(&self.state).now
    }

    /// Snapshot of the event journal.
    pub fn journal(&self) -> Vec<TimedEvent> {
        locked(&self.state).journal.clone()
    }

    /// Take the journal, leaving it empty.
    pub fn drain_journal(&self) -> Vec<TimedEvent> {
        std::mem::take(&mut locked(&self.state).journal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_claim_is_rejected() {
        let mut board = SimBoard::new();
        board.claim_output(3).unwrap();
        let err = board.claim_input(3).err().unwrap();
        assert!(matches!(err, HalError::PinBusy(3)));
    }

    #[test]
    fn outputs_land_in_journal_with_virtual_time() {
        let mut board = SimBoard::new();
        let handle = board.handle();
        let mut line = board.claim_output(5).unwrap();
        let pacer = board.pacer();

        line.write(true).unwrap();
        pacer.pause(Duration::from_millis(20));
        line.write(false).unwrap();

        assert_eq!(handle.output_level(5), Some(false));
        assert_eq!(handle.elapsed(), Duration::from_millis(20));

        let journal = handle.journal();
        assert_eq!(journal.len(), 3);
        assert_eq!(journal[0].at, Duration::ZERO);
        assert_eq!(
            journal[2],
            TimedEvent {
                at: Duration::from_millis(20),
                event: SimEvent::Write { pin: 5, high: false },
            }
        );
    }

    #[test]
    fn scripted_input_levels_are_read() {
        let mut board = SimBoard::new();
        let handle = board.handle();
        let line = board.claim_input(14).unwrap();

        assert!(!line.read().unwrap());
        handle.set_level(14, true);
        assert!(line.read().unwrap());
    }

    #[test]
    fn scripted_read_failure_surfaces() {
        let mut board = SimBoard::new();
        let handle = board.handle();
        let line = board.claim_input(14).unwrap();

        handle.fail_reads_on(14);
        assert!(matches!(
            line.read(),
            Err(HalError::ReadFailed { pin: 14, .. })
        ));
    }

    #[test]
    fn echo_script_drives_pulse_measurement() {
        let mut board = SimBoard::new();
        let handle = board.handle();
        let line = board.claim_input(8).unwrap();
        let timeout = Duration::from_millis(30);

        handle.queue_echo(8, Duration::from_micros(580));
        assert_eq!(
            line.measure_pulse(true, timeout).unwrap(),
            Some(Duration::from_micros(580))
        );
        assert_eq!(handle.elapsed(), Duration::from_micros(580));

        // Queue exhausted — the wait consumes the full bound and yields nothing.
        assert_eq!(line.measure_pulse(true, timeout).unwrap(), None);
        assert_eq!(
            handle.elapsed(),
            Duration::from_micros(580) + timeout
        );
    }

    #[test]
    fn overlong_pulse_counts_as_timeout() {
        let mut board = SimBoard::new();
        let handle = board.handle();
        let line = board.claim_input(8).unwrap();

        handle.queue_echo(8, Duration::from_secs(1));
        assert_eq!(
            line.measure_pulse(true, Duration::from_millis(30)).unwrap(),
            None
        );
    }

    #[test]
    fn tones_track_on_off() {
        let mut board = SimBoard::new();
        let handle = board.handle();
        let mut buzzer = board.claim_pwm(19).unwrap();

        buzzer.start_tone(587).unwrap();
        assert_eq!(handle.active_tone(19), Some(587));
        buzzer.stop_tone().unwrap();
        assert_eq!(handle.active_tone(19), None);
    }

    #[test]
    fn drain_journal_empties() {
        let mut board = SimBoard::new();
        let handle = board.handle();
        let mut line = board.claim_output(3).unwrap();

        line.write(true).unwrap();
        assert_eq!(handle.drain_journal().len(), 1);
        assert!(handle.journal().is_empty());
    }
}
