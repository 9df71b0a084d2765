//! Frequency/period readout for a channel.

use crate::period::{freq_to_midi, PeriodEstimate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Displayable summary of a period estimate.
///
/// Every field is `None` while the estimate is not confident, which renders
/// as `--`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Readout {
    /// Fundamental frequency in Hz
    pub frequency: Option<f64>,
    /// Period in milliseconds
    pub period_ms: Option<f64>,
    /// Nearest MIDI note and cents deviation (-50 to +50)
    pub note: Option<(u8, f64)>,
}

impl Readout {
    pub fn from_estimate(estimate: PeriodEstimate, sample_rate: f64) -> Self {
        match estimate.frequency(sample_rate) {
            Some(frequency) if frequency.is_finite() => Self {
                frequency: Some(frequency),
                period_ms: Some(estimate.period / sample_rate * 1000.0),
                note: Some(freq_to_midi(frequency)),
            },
            _ => Self::default(),
        }
    }

    /// Note name with sharp notation (e.g., "A4", "C#5")
    pub fn note_name(&self) -> Option<String> {
        self.note.map(|(note, _)| {
            const NAMES: [&str; 12] = [
                "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
            ];
            let name = NAMES[(note % 12) as usize];
            let octave = (note / 12) as i32 - 1;
            format!("{}{}", name, octave)
        })
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.frequency {
            Some(frequency) => writeln!(f, "frequency = {frequency:.1} Hz")?,
            None => writeln!(f, "frequency = --")?,
        }
        match self.period_ms {
            Some(period) => write!(f, "period = {period:.2} ms"),
            None => write!(f, "period = --"),
        }
    }
}
