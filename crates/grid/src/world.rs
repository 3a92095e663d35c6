use std::collections::HashMap;

use foundation::{CellIndex, PROJECT_PALETTE, ProjectId, WORLD_CELLS};
use rand::Rng;
use tracing::debug;

use crate::project::Project;

const PROJECT_NAMES: [&str; 10] = [
    "Blockchain Voting System",
    "AI Health Assistant",
    "Smart City Dashboard",
    "Eco Tracker",
    "Decentralized Exchange",
    "Neural Art Generator",
    "AR Navigation App",
    "ML Recommendation Engine",
    "IoT Home Network",
    "Virtual Reality Classroom",
];

const TEAM_NAMES: [&str; 10] = [
    "ByteBuilders",
    "CodeCrafters",
    "DevDynamos",
    "TechTitans",
    "QuantumQuants",
    "CyberSolutions",
    "AlgoAces",
    "CloudCommanders",
    "DataDreamers",
    "NetworkNinjas",
];

const DESCRIPTIONS: [&str; 5] = [
    "A platform that leverages cutting-edge technology to solve real-world problems.",
    "An innovative solution designed during the hackathon to address user needs efficiently.",
    "This project focuses on sustainable technology for a better future.",
    "We built this to make complex processes simple and accessible to everyone.",
    "Our hackathon project aims to transform how people interact with technology daily.",
];

/// Immutable set of projects plus the `index -> project` occupancy lookup.
///
/// Several projects may share a cell; the lookup keeps the last one inserted.
#[derive(Debug, Default, Clone)]
pub struct ProjectWorld {
    projects: Vec<Project>,
    occupancy: HashMap<CellIndex, usize>,
}

impl ProjectWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates `count` projects at uniformly random cells with uniformly random palette colors.
    pub fn generate<R: Rng>(count: usize, rng: &mut R) -> Self {
        let mut projects = Vec::with_capacity(count);
        for i in 0..count {
            let position = rng.gen_range(0..WORLD_CELLS);
            let color = PROJECT_PALETTE[rng.gen_range(0..PROJECT_PALETTE.len())];
            let name = format!(
                "{} {}",
                PROJECT_NAMES[i % PROJECT_NAMES.len()],
                i / PROJECT_NAMES.len() + 1
            );
            let team = format!(
                "{} {}",
                TEAM_NAMES[rng.gen_range(0..TEAM_NAMES.len())],
                rng.gen_range(0..100u32)
            );
            let description = DESCRIPTIONS[rng.gen_range(0..DESCRIPTIONS.len())];

            let Some(position) = CellIndex::new(position) else {
                continue;
            };
            let mut project = Project::new(ProjectId::new(i as u32), position, color, name);
            project.team = Some(team);
            project.description = Some(description.to_string());
            project.project_link = Some(format!("https://example.com/projects/{i}"));
            projects.push(project);
        }
        Self::from_projects(projects)
    }

    pub fn from_projects(projects: Vec<Project>) -> Self {
        let mut occupancy = HashMap::with_capacity(projects.len());
        for (slot, project) in projects.iter().enumerate() {
            occupancy.insert(project.position, slot);
        }
        debug!(
            projects = projects.len(),
            occupied = occupancy.len(),
            "built occupancy lookup"
        );
        Self {
            projects,
            occupancy,
        }
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Number of distinct cells holding at least one project.
    pub fn occupied_cells(&self) -> usize {
        self.occupancy.len()
    }

    pub fn project_at(&self, index: CellIndex) -> Option<&Project> {
        self.occupancy
            .get(&index)
            .and_then(|slot| self.projects.get(*slot))
    }

    pub fn project_at_raw(&self, index: u32) -> Option<&Project> {
        CellIndex::new(index).and_then(|i| self.project_at(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn project(id: u32, at: u32) -> Project {
        Project::new(
            ProjectId::new(id),
            CellIndex::new(at).unwrap(),
            PROJECT_PALETTE[0],
            format!("p{id}"),
        )
    }

    #[test]
    fn generate_places_every_project_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let world = ProjectWorld::generate(1_000, &mut rng);
        assert_eq!(world.len(), 1_000);
        for p in world.projects() {
            assert!(p.position.get() < WORLD_CELLS);
            assert!(PROJECT_PALETTE.contains(&p.color));
        }
        assert!(world.occupied_cells() <= 1_000);
    }

    #[test]
    fn generate_is_reproducible_for_a_seed() {
        let a = ProjectWorld::generate(50, &mut ChaCha8Rng::seed_from_u64(1));
        let b = ProjectWorld::generate(50, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(a.projects(), b.projects());
    }

    #[test]
    fn generated_metadata_follows_naming_scheme() {
        let world = ProjectWorld::generate(12, &mut ChaCha8Rng::seed_from_u64(3));
        let p = &world.projects()[11];
        assert_eq!(p.name, "AI Health Assistant 2");
        assert_eq!(
            p.project_link.as_deref(),
            Some("https://example.com/projects/11")
        );
        assert!(p.team.is_some());
    }

    #[test]
    fn collisions_resolve_last_write_wins() {
        let world = ProjectWorld::from_projects(vec![project(0, 5), project(1, 9), project(2, 5)]);
        assert_eq!(world.len(), 3);
        assert_eq!(world.occupied_cells(), 2);
        let at5 = world.project_at(CellIndex::new(5).unwrap()).unwrap();
        assert_eq!(at5.id, ProjectId::new(2));
        assert!(world.project_at_raw(6).is_none());
        assert!(world.project_at_raw(WORLD_CELLS + 1).is_none());
    }
}
