/// One decoded resource: an optional message and the paths it links to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub message: Option<String>,
    pub successors: Vec<String>,
}

impl Node {
    pub fn new(message: Option<String>, successors: Vec<String>) -> Self {
        Self { message, successors }
    }

    /// The message this node adds to the result, if any.
    /// Absent and whitespace-only messages contribute nothing.
    pub fn contribution(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}
