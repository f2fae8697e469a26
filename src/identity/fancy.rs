//! Random `adjective-noun-number` labels.

use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub(crate) const ADJECTIVES: [&str; 64] = [
    "autumn", "hidden", "bitter", "misty", "silent", "empty", "dry", "dark", "summer", "icy",
    "delicate", "quiet", "white", "cool", "spring", "winter", "patient", "twilight", "dawn",
    "crimson", "wispy", "weathered", "blue", "billowing", "broken", "cold", "damp", "falling",
    "frosty", "green", "long", "late", "lingering", "bold", "little", "morning", "muddy", "old",
    "red", "rough", "still", "small", "sparkling", "throbbing", "shy", "wandering", "withered",
    "wild", "black", "young", "holy", "solitary", "fragrant", "aged", "snowy", "proud", "floral",
    "restless", "divine", "polished", "ancient", "purple", "lively", "nameless",
];

pub(crate) const NOUNS: [&str; 64] = [
    "waterfall", "river", "breeze", "moon", "rain", "wind", "sea", "morning", "snow", "lake",
    "sunset", "pine", "shadow", "leaf", "dawn", "glitter", "forest", "hill", "cloud", "meadow",
    "sun", "glade", "bird", "brook", "butterfly", "bush", "dew", "dust", "field", "fire",
    "flower", "firefly", "feather", "grass", "haze", "mountain", "night", "pond", "darkness",
    "snowflake", "silence", "sound", "sky", "shape", "surf", "thunder", "violet", "water",
    "wildflower", "wave", "water", "resonance", "sun", "wood", "dream", "cherry", "tree", "fog",
    "frost", "voice", "paper", "frog", "smoke", "star",
];

/// Exclusive upper bound of the numeric suffix.
pub(crate) const MAX_SUFFIX: u32 = 9999;

/// Label generator with a single RNG seeded at construction.
pub struct FancyIdGenerator {
    rng: Mutex<StdRng>,
}

impl FancyIdGenerator {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Seed from the wall clock.
    pub fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(seed)
    }

    pub fn next_id(&self) -> String {
        // A poisoned lock still holds a usable RNG.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let adjective = ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())];
        let noun = NOUNS[rng.gen_range(0..NOUNS.len())];
        let number = rng.gen_range(0..MAX_SUFFIX);
        format!("{adjective}-{noun}-{number}")
    }
}

/// The process-wide generator, created and seeded on first use.
pub fn generator() -> &'static FancyIdGenerator {
    static GENERATOR: OnceLock<FancyIdGenerator> = OnceLock::new();
    GENERATOR.get_or_init(FancyIdGenerator::from_time)
}

/// Draw a fresh label from the process-wide generator.
pub fn fancy_id() -> String {
    generator().next_id()
}
