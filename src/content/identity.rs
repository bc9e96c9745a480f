//! Client identity selection for page requests
//!
//! Rotating the User-Agent keeps naive bot filters from blocking every
//! request the same way. It is not a security control.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Mutex;

/// Source of the User-Agent sent with each page request
pub trait IdentitySource: Send + Sync {
    /// Pick the identity for the next request
    fn next_identity(&self) -> String;
}

/// Uniform random choice from a fixed pool
pub struct UserAgentPool {
    agents: Vec<String>,
    seeded: Option<Mutex<StdRng>>,
}

impl UserAgentPool {
    /// Pool backed by the thread-local RNG
    pub fn new(agents: Vec<String>) -> Self {
        Self {
            agents,
            seeded: None,
        }
    }

    /// Pool with a deterministic, seeded RNG
    pub fn with_seed(agents: Vec<String>, seed: u64) -> Self {
        Self {
            agents,
            seeded: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    pub fn agents(&self) -> &[String] {
        &self.agents
    }
}

impl IdentitySource for UserAgentPool {
    fn next_identity(&self) -> String {
        let choice = match &self.seeded {
            Some(rng) => {
                let mut rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                self.agents.choose(&mut *rng).cloned()
            }
            None => self.agents.choose(&mut rand::thread_rng()).cloned(),
        };
        // Empty pool: the fetcher sends no User-Agent override
        choice.unwrap_or_default()
    }
}

/// Always the same identity
pub struct FixedUserAgent(pub String);

impl IdentitySource for FixedUserAgent {
    fn next_identity(&self) -> String {
        self.0.clone()
    }
}
