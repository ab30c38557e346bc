//! Repository batching
//!
//! Splits the requested repositories into batches, one batch per migration
//! job.

/// How repositories are grouped into migrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchMode {
    /// Every repository goes into a single migration
    #[default]
    Combined,
    /// One migration per repository
    PerRepository,
}

impl BatchMode {
    pub fn from_per_repository(per_repository: bool) -> Self {
        if per_repository {
            BatchMode::PerRepository
        } else {
            BatchMode::Combined
        }
    }
}

/// Non-empty, ordered list of repositories submitted as one migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    repositories: Vec<String>,
}

impl Batch {
    /// Creates a batch, or `None` if `repositories` is empty
    pub fn new(repositories: Vec<String>) -> Option<Self> {
        if repositories.is_empty() {
            None
        } else {
            Some(Self { repositories })
        }
    }

    pub fn repositories(&self) -> &[String] {
        &self.repositories
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    /// Always `false`; a batch holds at least one repository
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl std::fmt::Display for Batch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.repositories.join(", "))
    }
}

/// Splits `repositories` into batches according to `mode`
///
/// Input order is preserved. Duplicates are passed through untouched. An
/// empty input yields no batches; callers reject empty lists up front.
pub fn make_batches(repositories: &[String], mode: BatchMode) -> Vec<Batch> {
    match mode {
        BatchMode::Combined => Batch::new(repositories.to_vec()).into_iter().collect(),
        BatchMode::PerRepository => repositories
            .iter()
            .map(|repo| Batch {
                repositories: vec![repo.clone()],
            })
            .collect(),
    }
}
