use crate::auxiliary::constants::general::{MAX_COMMANDS, NO_RESULT};

/// Results of the commands of a chain, indexed by their position in it.
///
/// One register lives for the whole process run. Repeat passes write into
/// the same slots without clearing them first, so a command can observe a
/// slot written by the previous pass until its own pass overwrites it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRegister {
    slots: [i64; MAX_COMMANDS],
}

impl Default for ResultRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultRegister {
    pub fn new() -> Self {
        Self {
            slots: [NO_RESULT; MAX_COMMANDS],
        }
    }

    pub fn get(&self, index: usize) -> Option<i64> {
        self.slots.get(index).copied()
    }

    pub fn record(&mut self, position: usize, value: i64) {
        // the chain splitter never hands out a position past the capacity
        debug_assert!(position < MAX_COMMANDS);
        if let Some(slot) = self.slots.get_mut(position) {
            *slot = value;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.slots.iter().copied().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_every_slot_unwritten() {
        let register = ResultRegister::new();
        assert_eq!(register.iter().count(), 20);
        assert!(register.iter().all(|(_, value)| value == -1));
    }

    #[test]
    fn record_then_get() {
        let mut register = ResultRegister::new();
        register.record(2, 7);
        assert_eq!(register.get(2), Some(7));
        assert_eq!(register.get(1), Some(-1));
        assert_eq!(register.get(20), None);
    }
}
