//! Response selection.
//!
//! Responses are drawn uniformly from the predicted intent's response list
//! with a caller-supplied random source. A fixed seed gives reproducible
//! conversations.
//!
//! # Examples
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! use palaver::corpus::{Intent, IntentCorpus};
//! use palaver::response::select_response;
//!
//! let corpus = IntentCorpus::new(vec![
//!     Intent::new("greeting", ["hi"], ["Hello!", "Hi there!"]),
//! ])
//! .unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let reply = select_response("greeting", &corpus, &mut rng).unwrap();
//! assert!(reply == "Hello!" || reply == "Hi there!");
//! assert!(select_response("weather", &corpus, &mut rng).is_err());
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::corpus::{Intent, IntentCorpus};
use crate::error::{PalaverError, Result};

/// Pick one response of `intent` uniformly at random.
///
/// Returns `None` only for an intent without responses, which a validated
/// corpus never contains.
pub fn choose_response<'a, R>(intent: &'a Intent, rng: &mut R) -> Option<&'a str>
where
    R: Rng + ?Sized,
{
    intent.responses.choose(rng).map(String::as_str)
}

/// Pick a response for `tag` from the corpus.
pub fn select_response<'a, R>(tag: &str, corpus: &'a IntentCorpus, rng: &mut R) -> Result<&'a str>
where
    R: Rng + ?Sized,
{
    let intent = corpus
        .intent(tag)
        .ok_or_else(|| PalaverError::unknown_intent(tag))?;
    choose_response(intent, rng)
        .ok_or_else(|| PalaverError::corpus(format!("intent '{tag}' has no responses")))
}

/// A random source that several threads can draw from.
///
/// Clones draw from the same generator.
#[derive(Debug, Clone)]
pub struct SharedRng {
    inner: Arc<Mutex<StdRng>>,
}

impl SharedRng {
    pub fn new(rng: StdRng) -> Self {
        Self {
            inner: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Seeded when `seed` is set, otherwise seeded from the operating system.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(StdRng::from_os_rng()),
        }
    }

    /// Run `f` with exclusive access to the generator.
    pub fn with<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.inner.lock();
        f(&mut rng)
    }

    /// Whether some caller is drawing from the generator right now.
    pub fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }
}
