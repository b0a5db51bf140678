// src/core/walker.rs
//
// Issue range walk with consecutive-miss termination.
// The walker owns the miss counter; callers report each attempt back.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// Inclusive upper bound. Misses are counted but never stop the walk.
    Until(u32),
    /// No upper bound. Stop once `max_misses` consecutive misses are seen.
    OpenEnded { max_misses: u32 },
}

/// What an attempt meant for the miss counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attempt {
    Hit,
    Miss,
}

#[derive(Clone, Debug)]
pub struct RangeWalker {
    next: Option<u32>,
    bound: Bound,
    misses: u32,
}

impl RangeWalker {
    pub fn new(start: u32, end: Option<u32>, max_misses: u32) -> Self {
        let bound = match end {
            Some(end) => Bound::Until(end),
            // 0 and 1 both mean "first miss ends it"
            None => Bound::OpenEnded { max_misses: max_misses.max(1) },
        };
        Self { next: Some(start), bound, misses: 0 }
    }

    pub fn bound(&self) -> Bound {
        self.bound
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    /// Next issue to attempt, or `None` once the walk is over.
    pub fn next_issue(&mut self) -> Option<u32> {
        let n = self.next?;
        let done = match self.bound {
            Bound::Until(end) => n > end,
            Bound::OpenEnded { max_misses } => self.misses >= max_misses,
        };
        if done {
            self.next = None;
            return None;
        }
        self.next = n.checked_add(1);
        Some(n)
    }

    /// Feed back the outcome of the issue last returned by `next_issue`.
    pub fn record(&mut self, attempt: Attempt) {
        match attempt {
            Attempt::Hit => self.misses = 0,
            Attempt::Miss => self.misses = self.misses.saturating_add(1),
        }
    }

    /// True when the walk ended (or will end) because of misses.
    pub fn exhausted_by_misses(&self) -> bool {
        match self.bound {
            Bound::OpenEnded { max_misses } => self.misses >= max_misses,
            Bound::Until(_) => false,
        }
    }
}
