//! Raspberry Pi board backed by `rppal`.
//!
//! Direction and trigger lines are plain GPIO outputs; the speed and buzzer
//! lines use rppal's software PWM (the speed line at a fixed 1 kHz carrier,
//! the buzzer at the tone frequency with 50% duty). Pulse measurement is a
//! bounded busy-wait on the echo line.
//!
//! Compiled only with the `raspi` feature; creating the board off-target
//! fails at `Gpio::new()` with a descriptive error.

use std::time::{Duration, Instant};

use rppal::gpio::{Gpio, InputPin, OutputPin};
use sumo_common::io::PinId;

use crate::board::{Board, InputLine, OutputLine, Pacer, PwmLine, WallPacer};
use crate::error::HalError;

/// Software PWM carrier for the motor enable line [Hz].
const SPEED_PWM_HZ: f64 = 1000.0;

/// GPIO-backed board.
pub struct RaspiBoard {
    gpio: Gpio,
}

impl RaspiBoard {
    /// Open the GPIO character device.
    pub fn new() -> Result<Self, HalError> {
        let gpio = Gpio::new().map_err(|e| HalError::InitFailed(e.to_string()))?;
        Ok(Self { gpio })
    }
}

/// Factory for the board registry.
pub fn create_board() -> Result<Box<dyn Board>, HalError> {
    Ok(Box::new(RaspiBoard::new()?))
}

impl Board for RaspiBoard {
    fn name(&self) -> &'static str {
        "raspi"
    }

    fn claim_input(&mut self, pin: PinId) -> Result<Box<dyn InputLine>, HalError> {
        let line = self
            .gpio
            .get(pin)
            .map_err(|e| HalError::InitFailed(format!("pin {pin}: {e}")))?
            .into_input();
        Ok(Box::new(RaspiInput { line }))
    }

    fn claim_output(&mut self, pin: PinId) -> Result<Box<dyn OutputLine>, HalError> {
        let line = self
            .gpio
            .get(pin)
            .map_err(|e| HalError::InitFailed(format!("pin {pin}: {e}")))?
            .into_output_low();
        Ok(Box::new(RaspiOutput { line }))
    }

    fn claim_pwm(&mut self, pin: PinId) -> Result<Box<dyn PwmLine>, HalError> {
        let line = self
            .gpio
            .get(pin)
            .map_err(|e| HalError::InitFailed(format!("pin {pin}: {e}")))?
            .into_output_low();
        Ok(Box::new(RaspiPwm { pin, line }))
    }

    fn pacer(&self) -> Box<dyn Pacer> {
        Box::new(WallPacer)
    }
}

struct RaspiInput {
    line: InputPin,
}

impl InputLine for RaspiInput {
    fn read(&self) -> Result<bool, HalError> {
        Ok(self.line.is_high())
    }

    fn measure_pulse(&self, level: bool, timeout: Duration) -> Result<Option<Duration>, HalError> {
        let deadline = Instant::now() + timeout;

        // Wait for the pulse to start.
        while self.line.is_high() != level {
            if Instant::now() >= deadline {
                return Ok(None);
            }
            std::hint::spin_loop();
        }
        let rise = Instant::now();

        // Wait for it to end; the deadline bounds the whole measurement.
        while self.line.is_high() == level {
            if Instant::now() >= deadline {
                return Ok(None);
            }
            std::hint::spin_loop();
        }
        Ok(Some(rise.elapsed()))
    }
}

struct RaspiOutput {
    line: OutputPin,
}

impl OutputLine for RaspiOutput {
    fn write(&mut self, high: bool) -> Result<(), HalError> {
        if high {
            self.line.set_high();
        } else {
            self.line.set_low();
        }
        Ok(())
    }
}

struct RaspiPwm {
    pin: PinId,
    line: OutputPin,
}

impl RaspiPwm {
    fn clear(&mut self) -> Result<(), HalError> {
        self.line.clear_pwm().map_err(|e| HalError::WriteFailed {
            pin: self.pin,
            reason: e.to_string(),
        })?;
        self.line.set_low();
        Ok(())
    }
}

impl PwmLine for RaspiPwm {
    fn set_duty(&mut self, duty: u8) -> Result<(), HalError> {
        if duty == 0 {
            return self.clear();
        }
        self.line
            .set_pwm_frequency(SPEED_PWM_HZ, f64::from(duty) / 255.0)
            .map_err(|e| HalError::WriteFailed {
                pin: self.pin,
                reason: e.to_string(),
            })
    }

    fn start_tone(&mut self, freq_hz: u16) -> Result<(), HalError> {
        self.line
            .set_pwm_frequency(f64::from(freq_hz), 0.5)
            .map_err(|e| HalError::WriteFailed {
                pin: self.pin,
                reason: e.to_string(),
            })
    }

    fn stop_tone(&mut self) -> Result<(), HalError> {
        self.clear()
    }
}
