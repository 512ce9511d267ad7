use serde::{Deserialize, Serialize};

/// Monotonic ID generator for entities created during play.
///
/// Scenario records carry their own ids, so the generator is positioned past
/// the highest loaded id before any runtime entity is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn starting_from(start: u64) -> Self {
        Self { next: start }
    }

    /// Make sure the next id handed out is strictly greater than `id`.
    pub fn reserve(&mut self, id: u64) {
        if id >= self.next {
            self.next = id + 1;
        }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids() {
        let mut id_gen = IdGenerator::new();
        assert_eq!(id_gen.next_id(), 1);
        assert_eq!(id_gen.next_id(), 2);
        assert_eq!(id_gen.next_id(), 3);
    }

    #[test]
    fn starting_from() {
        let mut id_gen = IdGenerator::starting_from(100);
        assert_eq!(id_gen.next_id(), 100);
        assert_eq!(id_gen.next_id(), 101);
    }

    #[test]
    fn reserve_skips_loaded_ids() {
        let mut id_gen = IdGenerator::new();
        id_gen.reserve(41);
        assert_eq!(id_gen.next_id(), 42);

        // Reserving below the cursor never moves it backwards.
        id_gen.reserve(5);
        assert_eq!(id_gen.next_id(), 43);
    }
}
