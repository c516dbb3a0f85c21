//! Freshness tokens for scheduled continuations.
//!
//! Work that completes later (animation completions, delayed actions)
//! captures a [`GenerationToken`] when it is scheduled. Anything that
//! supersedes that work advances the owning [`Generation`], and the
//! continuation checks [`Generation::is_current`] before touching state.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GenerationToken(u64);

impl GenerationToken {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct Generation {
    current: u64,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidates every outstanding token and returns the new current one.
    pub fn advance(&mut self) -> GenerationToken {
        self.current = self.current.wrapping_add(1);
        GenerationToken(self.current)
    }

    pub fn token(&self) -> GenerationToken {
        GenerationToken(self.current)
    }

    pub fn is_current(&self, token: GenerationToken) -> bool {
        token.0 == self.current
    }
}
