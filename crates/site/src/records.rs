use serde::{Deserialize, Serialize};
use store::{RecordStore, StoreError};
use tracing::debug;

pub const PROJECTS_TABLE: &str = "projects";

/// A submitted project as listed on the projects pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: u32,
    pub username: String,
    pub social_link: String,
    pub title: String,
    pub project_link: String,
    pub description: String,
    pub image_url: String,
    pub created_at_ms: u64,
}

const SAMPLES: [(&str, &str, &str, &str); 6] = [
    (
        "techgenius",
        "EcoTrack",
        "https://ecotrack.demo",
        "A sustainable living app that tracks your carbon footprint and suggests improvements.",
    ),
    (
        "codemaster",
        "MindMesh",
        "https://mindmesh.demo",
        "AI-powered mental health companion that offers personalized mindfulness exercises.",
    ),
    (
        "devdreamer",
        "CryptoSafe",
        "https://cryptosafe.demo",
        "Secure wallet for cryptocurrency that uses biometric authentication.",
    ),
    (
        "pixelwizard",
        "ARLens",
        "https://arlens.demo",
        "Augmented reality application that helps identify plants and provides care information.",
    ),
    (
        "datasculptor",
        "SoundScape",
        "https://soundscape.demo",
        "Audio visualization tool that creates stunning visuals from music in real-time.",
    ),
    (
        "webcrafter",
        "NutriScan",
        "https://nutriscan.demo",
        "Mobile app that scans food items and provides nutritional information instantly.",
    ),
];

const SAMPLE_IMAGES: [&str; 5] = ["blue", "purple", "pink", "green", "yellow"];

/// The built-in catalog shown while the record store has nothing. Ids start at 1.
pub fn sample_projects(created_at_ms: u64) -> Vec<ProjectRecord> {
    SAMPLES
        .iter()
        .enumerate()
        .map(|(i, (username, title, link, description))| ProjectRecord {
            id: i as u32 + 1,
            username: username.to_string(),
            social_link: format!("https://github.com/{username}"),
            title: title.to_string(),
            project_link: link.to_string(),
            description: description.to_string(),
            image_url: format!("/sample-{}.jpg", SAMPLE_IMAGES[i % SAMPLE_IMAGES.len()]),
            created_at_ms,
        })
        .collect()
}

/// Read side of the projects pages: asks the record store first, then falls
/// back to the sample catalog.
#[derive(Debug, Clone)]
pub struct ProjectDirectory {
    records: RecordStore,
    samples: Vec<ProjectRecord>,
}

impl ProjectDirectory {
    pub fn new(records: RecordStore, now_ms: u64) -> Self {
        Self {
            records,
            samples: sample_projects(now_ms),
        }
    }

    /// Newest first.
    pub fn list(&self, limit: usize) -> Result<Vec<ProjectRecord>, StoreError> {
        let stored: Vec<ProjectRecord> = self
            .records
            .from(PROJECTS_TABLE)
            .select("*")
            .limit(limit)
            .order_by("created_at", false)?;
        if !stored.is_empty() {
            return Ok(stored);
        }
        debug!(limit, "no stored projects, listing samples");
        Ok(self.samples.iter().take(limit).cloned().collect())
    }

    pub fn get(&self, id: u32) -> Result<Option<ProjectRecord>, StoreError> {
        let stored = self
            .records
            .from(PROJECTS_TABLE)
            .select("*")
            .eq("id", id)
            .fetch_one::<ProjectRecord>()?;
        Ok(stored.or_else(|| self.samples.iter().find(|p| p.id == id).cloned()))
    }

    /// Up to `n` other sample projects, for the "more projects" strip.
    pub fn related(&self, id: u32, n: usize) -> Vec<ProjectRecord> {
        self.samples
            .iter()
            .filter(|p| p.id != id)
            .take(n)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn directory() -> ProjectDirectory {
        ProjectDirectory::new(RecordStore::new(), 1_700_000_000_000)
    }

    #[test]
    fn samples_are_numbered_from_one() {
        let samples = sample_projects(0);
        let titles: Vec<&str> = samples.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            ["EcoTrack", "MindMesh", "CryptoSafe", "ARLens", "SoundScape", "NutriScan"]
        );
        assert_eq!(samples[5].id, 6);
        assert_eq!(samples[5].image_url, "/sample-blue.jpg");
        assert_eq!(samples[1].social_link, "https://github.com/codemaster");
    }

    #[test]
    fn empty_store_falls_back_to_samples() {
        let dir = directory();
        assert_eq!(dir.list(10).unwrap().len(), 6);
        assert_eq!(dir.list(2).unwrap().len(), 2);
        assert_eq!(dir.get(3).unwrap().unwrap().title, "CryptoSafe");
        assert!(dir.get(7).unwrap().is_none());
    }

    #[test]
    fn related_skips_current() {
        let related = directory().related(1, 3);
        let ids: Vec<u32> = related.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn record_serializes_with_snake_case_fields() {
        let json = serde_json::to_value(&sample_projects(5)[0]).unwrap();
        assert_eq!(json["project_link"], "https://ecotrack.demo");
        assert_eq!(json["created_at_ms"], 5);
    }
}
