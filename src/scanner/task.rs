/// A single unit of scan work: one candidate path segment probed under an
/// ancestor chain.
///
/// Tasks are created at seed time (depth 0, budget 0) or by a parent whose
/// verdict was continue (one child per wordlist entry), and are destroyed
/// once their request completes and the recursion verdict is resolved. The
/// scan origin is fixed for the run and lives in the configuration, not
/// here.
#[derive(Debug, Clone)]
pub struct ScanTask {
    /// Path segments already committed by ancestors, joined with `/`
    pub prefix: String,

    /// The candidate segment being probed at this step
    pub word: String,

    /// Directory-style variant; trailing-slash probes are leaves and never
    /// spawn a further level
    pub trailing_slash: bool,

    /// Levels below the seed, for diagnostics
    pub depth: u32,

    /// Consecutive non-200 responses along the ancestor chain; reset by any
    /// ancestor that answered 200
    pub error_budget: u32,
}

impl ScanTask {
    /// Creates a root-level task for a wordlist entry
    pub fn seed(word: String) -> Self {
        Self {
            prefix: String::new(),
            word,
            trailing_slash: false,
            depth: 0,
            error_budget: 0,
        }
    }

    /// Creates a child task one level below this one's hit
    pub fn child(&self, next_prefix: &str, word: String, error_budget: u32) -> Self {
        Self {
            prefix: next_prefix.to_string(),
            word,
            trailing_slash: false,
            depth: self.depth + 1,
            error_budget,
        }
    }
}
