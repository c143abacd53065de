//! Design records and the fixed project list.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Display name used when the prompt yields nothing.
pub const DEFAULT_DESIGN_NAME: &str = "New Design";
/// Characters of the prompt kept as the record name.
pub const NAME_PREFIX_CHARS: usize = 20;
/// Category of records saved from the generator.
pub const GENERATED_CATEGORY: &str = "component";
/// Project that generated records are filed under.
pub const DEFAULT_PROJECT_ID: &str = "p1";

const ID_LEN: usize = 9;
const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignStatus {
    Live,
    Draft,
    Testing,
}

impl DesignStatus {
    pub fn label(self) -> &'static str {
        match self {
            DesignStatus::Live => "live",
            DesignStatus::Draft => "draft",
            DesignStatus::Testing => "testing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub project_id: String,
    pub updated_at: DateTime<Utc>,
    pub status: DesignStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl DesignRecord {
    /// Builds the record saved from a generation result.
    pub fn from_generation(prompt: &str, code: String, now: DateTime<Utc>) -> Self {
        let prefix: String = prompt.chars().take(NAME_PREFIX_CHARS).collect();
        let name = if prefix.is_empty() {
            DEFAULT_DESIGN_NAME.to_string()
        } else {
            prefix
        };

        Self {
            id: generate_id(),
            name,
            category: GENERATED_CATEGORY.to_string(),
            project_id: DEFAULT_PROJECT_ID.to_string(),
            updated_at: now,
            status: DesignStatus::Draft,
            code: Some(code),
        }
    }

    pub fn has_code(&self) -> bool {
        self.code.is_some()
    }
}

/// A 9-character base-36 identifier. Not checked for collisions.
pub fn generate_id() -> String {
    let mut bits = uuid::Uuid::new_v4().as_u128();
    let mut id = String::with_capacity(ID_LEN);
    for _ in 0..ID_LEN {
        id.push(char::from(ID_ALPHABET[(bits % 36) as usize]));
        bits /= 36;
    }
    id
}

/// Short "time ago" marker shown in listings.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    if elapsed < Duration::minutes(1) {
        "Just now".to_string()
    } else if elapsed < Duration::hours(1) {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed < Duration::days(1) {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStage {
    Live,
    Dev,
}

impl ProjectStage {
    pub fn label(self) -> &'static str {
        match self {
            ProjectStage::Live => "live",
            ProjectStage::Dev => "dev",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: &'static str,
    pub name: &'static str,
    pub stage: ProjectStage,
    pub color: &'static str,
    pub tech: &'static [&'static str],
}

pub const PROJECTS: &[Project] = &[
    Project {
        id: "p1",
        name: "i.AM Mail",
        stage: ProjectStage::Live,
        color: "#ffffff",
        tech: &["React", "Firebase"],
    },
    Project {
        id: "p2",
        name: "Turbocharger",
        stage: ProjectStage::Dev,
        color: "#a1a1aa",
        tech: &["Next.js", "Supabase"],
    },
];

pub fn project(id: &str) -> Option<&'static Project> {
    PROJECTS.iter().find(|p| p.id == id)
}

/// Demo records a fresh workspace starts with, newest first.
pub fn seed_records(now: DateTime<Utc>) -> Vec<DesignRecord> {
    let seed = |id: &str, name: &str, category: &str, project_id: &str, age: Duration, status| {
        DesignRecord {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            project_id: project_id.to_string(),
            updated_at: now - age,
            status,
            code: None,
        }
    };

    vec![
        seed("d1", "Auth / Login V2", "card", "p1", Duration::hours(2), DesignStatus::Live),
        seed("d2", "Analytics Widget", "module", "p2", Duration::hours(5), DesignStatus::Draft),
        seed("d3", "Hero Section", "landing", "p3", Duration::days(1), DesignStatus::Testing),
        seed("d4", "Settings Panel", "page", "p1", Duration::days(2), DesignStatus::Live),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_nine_base36_chars() {
        for _ in 0..50 {
            let id = generate_id();
            assert_eq!(id.len(), 9);
            assert!(id.bytes().all(|b| ID_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn from_generation_uses_prompt_prefix_and_defaults() {
        let now = Utc::now();
        let record = DesignRecord::from_generation(
            "a glass pricing table with three tiers",
            "<div/>".to_string(),
            now,
        );
        assert_eq!(record.name, "a glass pricing tabl");
        assert_eq!(record.category, "component");
        assert_eq!(record.project_id, "p1");
        assert_eq!(record.status, DesignStatus::Draft);
        assert_eq!(record.code.as_deref(), Some("<div/>"));
        assert_eq!(relative_time(record.updated_at, now), "Just now");
    }

    #[test]
    fn from_generation_counts_characters_not_bytes() {
        let record = DesignRecord::from_generation(&"é".repeat(30), String::new(), Utc::now());
        assert_eq!(record.name.chars().count(), 20);
    }

    #[test]
    fn empty_prompt_gets_default_name() {
        let record = DesignRecord::from_generation("", String::new(), Utc::now());
        assert_eq!(record.name, DEFAULT_DESIGN_NAME);
    }

    #[test]
    fn relative_time_buckets() {
        let now = Utc::now();
        assert_eq!(relative_time(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(relative_time(now - Duration::hours(2), now), "2h ago");
        assert_eq!(relative_time(now - Duration::days(3), now), "3d ago");
    }

    #[test]
    fn seed_records_match_demo_listing() {
        let now = Utc::now();
        let seeds = seed_records(now);
        let names: Vec<_> = seeds.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            ["Auth / Login V2", "Analytics Widget", "Hero Section", "Settings Panel"]
        );
        assert_eq!(relative_time(seeds[0].updated_at, now), "2h ago");
        assert_eq!(relative_time(seeds[3].updated_at, now), "2d ago");
        assert!(seeds.iter().all(|r| !r.has_code()));
    }

    #[test]
    fn unknown_project_reference_resolves_to_none() {
        assert_eq!(project("p1").map(|p| p.name), Some("i.AM Mail"));
        assert!(project("p3").is_none());
    }
}
