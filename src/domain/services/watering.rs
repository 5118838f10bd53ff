#[cfg(test)]
#[path = "watering_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::domain::models::SessionError;

pub const DEFAULT_THRESHOLD: u8 = 50;
pub const DEFAULT_INTERVAL: f64 = 10.0;
/// One year, in minutes.
pub const MAX_SAMPLE_TIME: f64 = 525_600.0;

/// One moisture reading, `time` in minutes since the session started.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub percentage: f64,
}

/// Operator-adjustable watering parameters plus the readings collected so
/// far. Only operator actions mutate it, never the serial channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WateringSession {
    threshold: u8,
    watering: bool,
    interval: f64,
    samples: Vec<Sample>,
}

impl Default for WateringSession {
    fn default() -> WateringSession {
        return WateringSession {
            threshold: DEFAULT_THRESHOLD,
            watering: false,
            interval: DEFAULT_INTERVAL,
            samples: vec![],
        };
    }
}

impl WateringSession {
    pub fn new(threshold: i64, interval: f64) -> Result<WateringSession, SessionError> {
        let mut session = WateringSession::default();
        session.set_threshold(threshold)?;
        session.set_interval(interval)?;

        return Ok(session);
    }

    pub fn threshold(&self) -> u8 {
        return self.threshold;
    }

    pub fn is_watering(&self) -> bool {
        return self.watering;
    }

    pub fn interval(&self) -> f64 {
        return self.interval;
    }

    pub fn samples(&self) -> &[Sample] {
        return &self.samples;
    }

    pub fn latest(&self) -> Option<&Sample> {
        return self.samples.last();
    }

    pub fn set_threshold(&mut self, value: i64) -> Result<(), SessionError> {
        if !(0..=100).contains(&value) {
            return Err(SessionError::InvalidThreshold(value));
        }

        self.threshold = value as u8;
        return Ok(());
    }

    /// Moves the threshold by `delta`, saturating at 0 and 100.
    pub fn adjust_threshold(&mut self, delta: i64) -> u8 {
        self.threshold = (self.threshold as i64 + delta).clamp(0, 100) as u8;
        return self.threshold;
    }

    /// Flips the watering flag and returns the new state. Transmitting it is
    /// up to the caller.
    pub fn toggle_watering(&mut self) -> bool {
        self.watering = !self.watering;
        return self.watering;
    }

    pub fn set_interval(&mut self, value: f64) -> Result<(), SessionError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(SessionError::InvalidInterval(value));
        }

        self.interval = value;
        return Ok(());
    }

    /// Appends a reading. Times must be strictly increasing, the plot relies
    /// on it.
    pub fn record_sample(&mut self, time: f64, percentage: f64) -> Result<(), SessionError> {
        if !time.is_finite() || time < 0.0 {
            return Err(SessionError::InvalidSample(format!(
                "time must be a non-negative number of minutes, got {time}"
            )));
        }
        if time > MAX_SAMPLE_TIME {
            return Err(SessionError::InvalidSample(format!(
                "time must be at most {MAX_SAMPLE_TIME} minutes, got {time}"
            )));
        }
        if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
            return Err(SessionError::InvalidSample(format!(
                "percentage must be between 0 and 100, got {percentage}"
            )));
        }
        if let Some(last) = self.latest() {
            if time <= last.time {
                return Err(SessionError::OutOfOrderSample {
                    time,
                    last: last.time,
                });
            }
        }

        self.samples.push(Sample { time, percentage });
        return Ok(());
    }

    /// Copy of the session keeping only the latest sample.
    pub fn summary(&self) -> WateringSession {
        return WateringSession {
            samples: self.latest().into_iter().copied().collect(),
            ..self.clone()
        };
    }

    /// Re-applies every invariant to a session that came from outside, such
    /// as a file on disk.
    pub fn validated(self) -> Result<WateringSession, SessionError> {
        let mut session = WateringSession::new(self.threshold as i64, self.interval)?;
        session.watering = self.watering;
        for sample in self.samples {
            session.record_sample(sample.time, sample.percentage)?;
        }

        return Ok(session);
    }
}
