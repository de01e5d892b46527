//! Slime domain: the bounded, weight-sorted bag a character carries.

/// Weight of a normal slime, the minimum class.
pub const NORMAL_WEIGHT: u32 = 1;
/// Weight of a golden slime, the maximum class.
pub const GOLDEN_WEIGHT: u32 = 5;
/// Default number of slimes a character can carry.
pub const DEFAULT_BAG_CAPACITY: usize = 5;

/// Visual class of a slime, used when it is dropped as a pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlimeClass {
    Normal,
    Golden,
}

impl SlimeClass {
    pub fn for_weight(weight: u32) -> Self {
        if weight >= GOLDEN_WEIGHT {
            SlimeClass::Golden
        } else {
            SlimeClass::Normal
        }
    }

    pub fn weight(self) -> u32 {
        match self {
            SlimeClass::Normal => NORMAL_WEIGHT,
            SlimeClass::Golden => GOLDEN_WEIGHT,
        }
    }
}

/// Result of [`SlimeBag::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The slime went into a free slot
    Added,
    /// The bag was full; a normal slime was evicted to make room for a golden one
    Replaced,
    /// The bag was full; the weight is handed back unchanged
    Rejected(u32),
}

/// Ordered sequence of slime weights, heaviest first.
///
/// `total_weight` always equals the sum of the items and the length never
/// exceeds the capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlimeBag {
    items: Vec<u32>,
    capacity: usize,
    total_weight: u32,
}

impl Default for SlimeBag {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_BAG_CAPACITY)
    }
}

impl SlimeBag {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            total_weight: 0,
        }
    }

    pub fn items(&self) -> &[u32] {
        &self.items
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn total_weight(&self) -> u32 {
        self.total_weight
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn add(&mut self, weight: u32) -> AddOutcome {
        if !self.is_full() {
            self.items.push(weight);
            self.total_weight += weight;
            self.sort();
            return AddOutcome::Added;
        }

        match self.items.last().copied() {
            Some(lightest) if weight == GOLDEN_WEIGHT && lightest == NORMAL_WEIGHT => {
                self.items.pop();
                self.total_weight -= lightest;
                self.items.push(weight);
                self.total_weight += weight;
                self.sort();
                AddOutcome::Replaced
            }
            _ => AddOutcome::Rejected(weight),
        }
    }

    /// Remove and return the heaviest slime.
    pub fn pop(&mut self) -> Option<u32> {
        if self.items.is_empty() {
            return None;
        }
        let weight = self.items.remove(0);
        self.total_weight -= weight;
        Some(weight)
    }

    /// Remove the first slime of exactly `weight`, keeping the bag compact.
    pub fn remove(&mut self, weight: u32) -> bool {
        let Some(index) = self.items.iter().position(|&w| w == weight) else {
            return false;
        };
        self.items.remove(index);
        self.total_weight -= weight;
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.total_weight = 0;
    }

    fn sort(&mut self) {
        self.items.sort_unstable_by(|a, b| b.cmp(a));
    }
}
