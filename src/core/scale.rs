use serde::{Deserialize, Serialize};

/// Continuous linear mapping from a data domain onto a pixel range.
///
/// Degenerate inputs never fail: a zero-width domain maps every value to the
/// range start, and NaN flows through to NaN pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new((0.0, 1.0), (0.0, 1.0))
    }
}

impl LinearScale {
    #[must_use]
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn with_domain(mut self, start: f64, end: f64) -> Self {
        self.domain_start = start;
        self.domain_end = end;
        self
    }

    #[must_use]
    pub fn with_range(mut self, start: f64, end: f64) -> Self {
        self.range_start = start;
        self.range_end = end;
        self
    }

    /// Maps a domain value to a pixel.
    #[must_use]
    pub fn project(self, value: f64) -> f64 {
        let t = normalize(value, self.domain_start, self.domain_end);
        self.range_start + t * (self.range_end - self.range_start)
    }

    /// Maps a pixel back to a domain value.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let t = normalize(pixel, self.range_start, self.range_end);
        self.domain_start + t * (self.domain_end - self.domain_start)
    }

    /// Extends the domain outward to multiples of the tick step chosen for
    /// `count` ticks. Applied twice since the first pass can widen the span
    /// enough to select a larger step.
    #[must_use]
    pub fn nice(self, count: f64) -> Self {
        let mut scale = self;
        for _ in 0..2 {
            let Some(step) = tick_step(scale.domain_start, scale.domain_end, count) else {
                return scale;
            };
            let reversed = scale.domain_end < scale.domain_start;
            let (lo, hi) = if reversed {
                (scale.domain_end, scale.domain_start)
            } else {
                (scale.domain_start, scale.domain_end)
            };
            let lo = (lo / step).floor() * step;
            let hi = (hi / step).ceil() * step;
            (scale.domain_start, scale.domain_end) = if reversed { (hi, lo) } else { (lo, hi) };
        }
        scale
    }

    /// Round tick values covering the domain, ascending.
    #[must_use]
    pub fn ticks(self, count: f64) -> Vec<f64> {
        let Some(step) = tick_step(self.domain_start, self.domain_end, count) else {
            return Vec::new();
        };
        let lo = self.domain_start.min(self.domain_end);
        let hi = self.domain_start.max(self.domain_end);
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|k| k as f64 * step).collect()
    }

    /// Step between the ticks returned by [`LinearScale::ticks`].
    #[must_use]
    pub fn tick_step(self, count: f64) -> Option<f64> {
        tick_step(self.domain_start, self.domain_end, count)
    }
}

fn normalize(value: f64, start: f64, end: f64) -> f64 {
    let span = end - start;
    if span == 0.0 || span.is_nan() {
        0.0
    } else {
        (value - start) / span
    }
}

/// Picks a 1/2/5 x 10^k step so that roughly `count` ticks span the domain.
/// `count` may be fractional.
fn tick_step(start: f64, end: f64, count: f64) -> Option<f64> {
    let span = (end - start).abs();
    if !span.is_finite() || span <= 0.0 || !(count.is_finite() && count > 0.0) {
        return None;
    }

    let mut step = 10f64.powf((span / count).log10().floor());
    let err = count / span * step;
    if err <= 0.15 {
        step *= 10.0;
    } else if err <= 0.35 {
        step *= 5.0;
    } else if err <= 0.75 {
        step *= 2.0;
    }

    (step.is_finite() && step > 0.0).then_some(step)
}

/// Formats a tick with the fixed precision implied by `step`, grouping
/// thousands with commas ("1,250.5").
#[must_use]
pub fn format_tick(value: f64, step: f64) -> String {
    let precision = if step.is_finite() && step > 0.0 {
        (-(step.log10() + 0.01).floor()).max(0.0) as usize
    } else {
        0
    };
    group_thousands(&format!("{value:.precision$}"))
}

/// Integer-only tick label; non-integral values get no label.
#[must_use]
pub fn format_integer_tick(value: f64) -> Option<String> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    Some(format!("{}", value as i64))
}

fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3);
    grouped.push_str(sign);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}
