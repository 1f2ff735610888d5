//! Exponential moving average

/// Named EMA state; one field per smoothed signal in an evaluator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ema {
    alpha: f32,
    value: Option<f32>,
}

impl Ema {
    /// `alpha` is the weight given to each new sample
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            value: None,
        }
    }

    /// Feed a sample. Non-finite samples are ignored and the previous
    /// value is returned.
    pub fn update(&mut self, sample: f32) -> Option<f32> {
        if sample.is_finite() {
            self.value = Some(match self.value {
                None => sample,
                Some(prev) => self.alpha * sample + (1.0 - self.alpha) * prev,
            });
        }
        self.value
    }

    /// Overwrite the current value
    pub fn set(&mut self, value: f32) {
        self.value = Some(value);
    }

    pub fn value(&self) -> Option<f32> {
        self.value
    }
}
