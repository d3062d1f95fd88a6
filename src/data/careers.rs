use serde::{Deserialize, Serialize};

/// A promotion ladder. Levels are ordered; promotion moves to the next index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerTrack {
    pub id: String,
    pub name: String,
    pub levels: Vec<CareerLevel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerLevel {
    pub title: String,
    pub salary: i64,
    /// Years in the current job before this level can be reached.
    pub min_tenure: u32,
    /// Performance review floor for this level.
    pub min_performance: i32,
}

impl CareerTrack {
    pub fn level(&self, index: u32) -> Option<&CareerLevel> {
        self.levels.get(index as usize)
    }
}

pub fn find_track<'a>(tracks: &'a [CareerTrack], id: &str) -> Option<&'a CareerTrack> {
    tracks.iter().find(|track| track.id == id)
}

pub fn career_tracks() -> Vec<CareerTrack> {
    vec![
        track(
            "office",
            "Corporate",
            vec![
                level("Junior Clerk", 32_000, 0, 0),
                level("Clerk", 40_000, 2, 45),
                level("Team Lead", 55_000, 3, 55),
                level("Manager", 78_000, 4, 65),
                level("Director", 120_000, 5, 75),
                level("Vice President", 190_000, 6, 85),
            ],
        ),
        track(
            "retail",
            "Retail",
            vec![
                level("Retail Clerk", 22_000, 0, 0),
                level("Shift Supervisor", 28_000, 2, 40),
                level("Store Manager", 42_000, 4, 60),
                level("Regional Manager", 70_000, 5, 75),
            ],
        ),
        track(
            "medicine",
            "Medicine",
            vec![
                level("Medical Intern", 45_000, 0, 0),
                level("Resident", 60_000, 2, 55),
                level("Attending Physician", 150_000, 4, 70),
                level("Chief of Medicine", 250_000, 6, 85),
            ],
        ),
        track(
            "trades",
            "Trades",
            vec![
                level("Apprentice", 26_000, 0, 0),
                level("Journeyman", 42_000, 3, 50),
                level("Master Tradesman", 68_000, 5, 65),
                level("Contractor", 95_000, 5, 75),
            ],
        ),
        track(
            "arts",
            "Arts",
            vec![
                level("Struggling Artist", 14_000, 0, 0),
                level("Working Artist", 30_000, 3, 50),
                level("Established Artist", 75_000, 5, 70),
                level("Celebrated Artist", 160_000, 6, 85),
            ],
        ),
    ]
}

fn track(id: &str, name: &str, levels: Vec<CareerLevel>) -> CareerTrack {
    CareerTrack {
        id: id.to_string(),
        name: name.to_string(),
        levels,
    }
}

fn level(title: &str, salary: i64, min_tenure: u32, min_performance: i32) -> CareerLevel {
    CareerLevel {
        title: title.to_string(),
        salary,
        min_tenure,
        min_performance,
    }
}
