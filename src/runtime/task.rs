/// A unit of traversal work: one claimed path waiting to be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub path: String,
    /// Hops from the start path. Only used for logging.
    pub depth: usize,
}

impl Task {
    pub fn root(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            depth: 0,
        }
    }

    pub fn child(&self, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            depth: self.depth + 1,
        }
    }
}
