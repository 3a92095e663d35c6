use foundation::{CellIndex, ProjectId, Rgb};
use serde::Serialize;

pub const DEFAULT_TEAM: &str = "Unknown Team";
pub const DEFAULT_DESCRIPTION: &str = "This project was created during the world's largest hackathon. No additional description available.";
pub const DEFAULT_LINK: &str = "#";

/// A submitted project occupying one world cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub position: CellIndex,
    pub color: Rgb,
    pub name: String,
    pub team: Option<String>,
    pub description: Option<String>,
    pub project_link: Option<String>,
}

impl Project {
    pub fn new(id: ProjectId, position: CellIndex, color: Rgb, name: impl Into<String>) -> Self {
        Self {
            id,
            position,
            color,
            name: name.into(),
            team: None,
            description: None,
            project_link: None,
        }
    }

    /// Display data for the detail popup, with placeholders for missing metadata.
    pub fn card(&self) -> ProjectCard {
        ProjectCard {
            id: self.id.to_string(),
            position: self.position.get(),
            color: self.color.to_css(),
            name: self.name.clone(),
            team: self.team.clone().unwrap_or_else(|| DEFAULT_TEAM.to_string()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            project_link: self
                .project_link
                .clone()
                .unwrap_or_else(|| DEFAULT_LINK.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    pub id: String,
    pub position: u32,
    pub color: String,
    pub name: String,
    pub team: String,
    pub description: String,
    pub project_link: String,
}
