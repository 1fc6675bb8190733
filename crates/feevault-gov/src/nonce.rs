/// Single replay-protection counter for all governed actions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NonceSequencer {
    current: u64,
}

impl NonceSequencer {
    pub fn new() -> Self {
        NonceSequencer { current: 0 }
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    /// Consume the current nonce. Call only after the action's effect has
    /// been applied.
    pub fn advance(&mut self) -> u64 {
        let used = self.current;
        self.current = self.current.wrapping_add(1);
        used
    }
}
