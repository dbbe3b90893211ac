//! Cue-sheet line counter

/// Counter handing out playlist line numbers 0, 1, 2, ...
///
/// Starts one below zero and increments before each read, so the first value
/// handed out is 0 and 0 never repeats. Never reset while the module lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCounter {
    current: i64,
}

impl LineCounter {
    /// Value before the first call
    pub const START: i64 = -1;

    pub fn new() -> Self {
        Self { current: Self::START }
    }

    /// Increment and return the new line number
    pub fn advance(&mut self) -> i64 {
        self.current += 1;
        self.current
    }

    /// Last handed-out line number, `None` before the first `advance`
    pub fn last(&self) -> Option<i64> {
        (self.current > Self::START).then_some(self.current)
    }
}

impl Default for LineCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_is_zero() {
        let mut counter = LineCounter::new();
        assert_eq!(counter.last(), None);
        assert_eq!(counter.advance(), 0);
        assert_eq!(counter.last(), Some(0));
    }

    #[test]
    fn test_strictly_increasing() {
        let mut counter = LineCounter::new();
        let values: Vec<i64> = (0..100).map(|_| counter.advance()).collect();

        assert_eq!(values[0], 0);
        assert!(values.windows(2).all(|w| w[1] == w[0] + 1));
        assert_eq!(values.iter().filter(|v| **v == 0).count(), 1);
    }

    #[test]
    fn test_independent_instances() {
        let mut a = LineCounter::new();
        let mut b = LineCounter::new();
        a.advance();
        a.advance();
        assert_eq!(b.advance(), 0);
        assert_eq!(a.advance(), 2);
    }
}
