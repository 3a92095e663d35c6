/// Identifier of a generated project, displayed as `project-{n}`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(u32);

impl ProjectId {
    pub fn new(n: u32) -> Self {
        ProjectId(n)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "project-{}", self.0)
    }
}
