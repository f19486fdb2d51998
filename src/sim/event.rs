use crate::state::StateVector;

// ---------------------------------------------------------------------------
// Integration events
// ---------------------------------------------------------------------------

/// Kinds of integration events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// A component became NaN or infinite. Advisory: the run continues and the
    /// value propagates into the trajectory.
    Divergence { component: usize },
    /// Component reached a local maximum at the previous sample.
    Peak { component: usize, value: f64 },
    /// Component crossed `level` in the given direction.
    Threshold { component: usize, level: f64, rising: bool },
}

/// An event observed between samples `index - 1` and `index`.
#[derive(Debug, Clone)]
pub struct SimEvent {
    pub index: usize,
    pub x: f64,
    pub kind: EventKind,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive states and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &StateVector, current: &StateVector) -> Option<EventKind>;
}

/// Reports the first sample that contains a non-finite component.
#[derive(Debug, Default)]
pub struct DivergenceDetector {
    fired: bool,
}

impl DivergenceDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventDetector for DivergenceDetector {
    fn check(&mut self, _prev: &StateVector, current: &StateVector) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        let component = current.iter().position(|v| !v.is_finite())?;
        self.fired = true;
        Some(EventKind::Divergence { component })
    }
}

/// Detects local maxima of one component (rising then falling).
#[derive(Debug)]
pub struct PeakDetector {
    pub component: usize,
    rising: bool,
}

impl PeakDetector {
    pub fn new(component: usize) -> Self {
        Self { component, rising: false }
    }
}

impl EventDetector for PeakDetector {
    fn check(&mut self, prev: &StateVector, current: &StateVector) -> Option<EventKind> {
        let (a, b) = (*prev.get(self.component)?, *current.get(self.component)?);
        if b > a {
            self.rising = true;
        } else if b < a && self.rising {
            self.rising = false;
            return Some(EventKind::Peak { component: self.component, value: a });
        }
        None
    }
}

/// Detects when a component crosses a level (once).
#[derive(Debug)]
pub struct ThresholdDetector {
    pub component: usize,
    pub level: f64,
    pub rising: bool,
    fired: bool,
}

impl ThresholdDetector {
    pub fn new(component: usize, level: f64, rising: bool) -> Self {
        Self { component, level, rising, fired: false }
    }
}

impl EventDetector for ThresholdDetector {
    fn check(&mut self, prev: &StateVector, current: &StateVector) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        let (a, b) = (*prev.get(self.component)?, *current.get(self.component)?);
        let crossed = if self.rising {
            a < self.level && b >= self.level
        } else {
            a > self.level && b <= self.level
        };
        if crossed {
            self.fired = true;
            Some(EventKind::Threshold {
                component: self.component,
                level: self.level,
                rising: self.rising,
            })
        } else {
            None
        }
    }
}
