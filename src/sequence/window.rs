use std::collections::VecDeque;

/// Token stored in window slots that have not seen a real opcode yet
///
/// It renders as an empty segment in n-gram keys, so the first keys of a
/// trace legitimately look like `"-X"` or `"--X"`.
pub const PLACEHOLDER: &str = "";

/// Fixed-capacity FIFO of the most recent opcodes at the current depth
///
/// The window always holds exactly `capacity` slots. Fresh and reset windows
/// are filled with [`PLACEHOLDER`]; pushing evicts the oldest slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    slots: VecDeque<String>,
    capacity: usize,
}

impl Window {
    /// Create a window of `capacity` placeholder slots
    pub fn new(capacity: usize) -> Self {
        let mut window = Self {
            slots: VecDeque::with_capacity(capacity),
            capacity,
        };
        window.reset();
        window
    }

    /// Refill every slot with the placeholder
    pub fn reset(&mut self) {
        self.slots.clear();
        self.slots
            .extend(std::iter::repeat_with(|| PLACEHOLDER.to_string()).take(self.capacity));
    }

    /// Append `opcode` as the newest slot, evicting the oldest
    pub fn push(&mut self, opcode: &str) {
        if self.capacity == 0 {
            return;
        }
        // Reuse the evicted allocation for the incoming token
        let mut slot = self.slots.pop_front().unwrap_or_default();
        slot.clear();
        slot.push_str(opcode);
        self.slots.push_back(slot);
    }

    /// Oldest-to-newest view of the slots
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_window_is_all_placeholders() {
        let window = Window::new(2);
        assert_eq!(window.len(), 2);
        assert!(window.iter().all(|slot| slot == PLACEHOLDER));
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut window = Window::new(2);
        window.push("PUSH1");
        window.push("PUSH2");
        window.push("ADD");

        let slots: Vec<_> = window.iter().collect();
        assert_eq!(slots, vec!["PUSH2", "ADD"]);
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn test_reset_restores_placeholders() {
        let mut window = Window::new(3);
        window.push("MSTORE");
        window.reset();

        assert_eq!(window.len(), 3);
        assert!(window.iter().all(|slot| slot.is_empty()));
    }

    #[test]
    fn test_empty_opcode_is_stored_like_any_other() {
        let mut window = Window::new(1);
        window.push("SLOAD");
        window.push("");

        assert_eq!(window.iter().collect::<Vec<_>>(), vec![""]);
    }
}
