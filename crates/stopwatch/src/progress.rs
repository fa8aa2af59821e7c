//! Geometry of the progress bar drawn under a stopwatch.

/// Side of the track the fill is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub anchor: Anchor,
    /// Share of the track covered, `0.0..=100.0`.
    pub width_percent: f64,
}

impl Fill {
    /// Width as a CSS percentage with two decimals.
    pub fn css_width(&self) -> String {
        format!("{:.2}%", self.width_percent)
    }
}

/// Fill for `sec` seconds on a lap of `limit` seconds.
///
/// Even laps grow from the left edge; odd laps shrink towards the right edge,
/// so the bar sweeps back and forth without jumping.
pub fn fill(sec: u64, limit: u64) -> Fill {
    if limit == 0 {
        return Fill {
            anchor: Anchor::Left,
            width_percent: 0.0,
        };
    }
    let ratio = (sec % limit) as f64 / limit as f64;
    if (sec / limit) % 2 == 0 {
        Fill {
            anchor: Anchor::Left,
            width_percent: ratio * 100.0,
        }
    } else {
        Fill {
            anchor: Anchor::Right,
            width_percent: (1.0 - ratio) * 100.0,
        }
    }
}
