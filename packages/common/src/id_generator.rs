/// Sequential ID generator for pages and blocks within an editing session
///
/// Ids look like `<seed>-<n>`. The seed makes ids from different sessions
/// distinct, the counter makes them distinct within one session.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    /// Generator seeded from a random UUID
    #[cfg(feature = "random-ids")]
    pub fn random() -> Self {
        Self::from_seed(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Next ID for which `taken` returns false
    pub fn new_id_avoiding(&mut self, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let id = self.new_id();
            if !taken(&id) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
