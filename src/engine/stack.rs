// src/engine/stack.rs
// The shared operand stack. Callers are expected to hold the AppState
// mutex for the whole pop/compute/restore sequence.

/// Ordered sequence of operands; push and pop only at the top.
#[derive(Debug, Default)]
pub struct OperandStack {
    items: Vec<f64>,
}

impl OperandStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append all values to the top, in the given order. Always succeeds.
    pub fn push_all(&mut self, values: &[f64]) {
        self.items.extend_from_slice(values);
    }

    /// Remove and return the top `count` elements, most-recently-pushed
    /// first. Returns `None` without touching the stack when `count`
    /// exceeds the current size.
    pub fn pop_top(&mut self, count: usize) -> Option<Vec<f64>> {
        if count > self.items.len() {
            return None;
        }
        let mut popped = self.items.split_off(self.items.len() - count);
        popped.reverse();
        Some(popped)
    }

    /// Discard the top `count` elements and report the new size. A count
    /// of zero is a no-op. Returns `None` without touching the stack when
    /// `count` exceeds the current size.
    pub fn remove_top(&mut self, count: usize) -> Option<usize> {
        if count > self.items.len() {
            return None;
        }
        self.items.truncate(self.items.len() - count);
        Some(self.items.len())
    }

    /// Current contents, bottom first.
    pub fn snapshot(&self) -> &[f64] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_then_pop_is_most_recent_first() {
        let mut stack = OperandStack::new();
        stack.push_all(&[1.0, 2.0, 3.0]);
        assert_eq!(stack.pop_top(2), Some(vec![3.0, 2.0]));
        assert_eq!(stack.snapshot(), &[1.0]);
    }

    #[test]
    fn pop_beyond_size_leaves_stack_untouched() {
        let mut stack = OperandStack::new();
        stack.push_all(&[1.0, 2.0]);
        assert_eq!(stack.pop_top(3), None);
        assert_eq!(stack.snapshot(), &[1.0, 2.0]);
    }

    #[test]
    fn remove_top_reports_new_size() {
        let mut stack = OperandStack::new();
        stack.push_all(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(stack.remove_top(3), Some(1));
        assert_eq!(stack.snapshot(), &[1.0]);
    }

    #[test]
    fn remove_top_zero_is_a_noop() {
        let mut stack = OperandStack::new();
        stack.push_all(&[1.0, 2.0]);
        assert_eq!(stack.remove_top(0), Some(2));
        assert_eq!(stack.snapshot(), &[1.0, 2.0]);
    }

    #[test]
    fn remove_beyond_size_leaves_stack_untouched() {
        let mut stack = OperandStack::new();
        stack.push_all(&[1.0]);
        assert_eq!(stack.remove_top(2), None);
        assert_eq!(stack.snapshot(), &[1.0]);
    }

    #[test]
    fn failure_restore_round_trip_is_byte_identical() {
        let mut stack = OperandStack::new();
        stack.push_all(&[5.0, 0.0]);
        let mut popped = stack.pop_top(2).unwrap();
        popped.reverse(); // compute order: earliest-pushed first
        stack.push_all(&popped); // restore exactly as before the pop
        assert_eq!(stack.snapshot(), &[5.0, 0.0]);
    }
}
