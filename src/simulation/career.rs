use crate::components::career::Employment;
use crate::components::stats::{clamp_stat, CoreStats};
use crate::core::rng::SimRng;
use crate::data::careers::{find_track, CareerTrack};

/// Annual review score: a weighted blend of who you are and how long you have
/// been at it, with a symmetric ±10 perturbation.
pub fn performance_score(
    stats: &CoreStats,
    tenure_years: u32,
    relationship_avg: i32,
    rng: &mut SimRng,
) -> i32 {
    let tenure_component = (tenure_years.min(10) * 10) as i32;
    let weighted = stats.smarts * 30 / 100
        + stats.health * 15 / 100
        + stats.happiness * 20 / 100
        + tenure_component * 20 / 100
        + relationship_avg * 15 / 100;
    clamp_stat(weighted + rng.jitter(10))
}

/// One year of employment: refresh the review, bump tenure, then try for the
/// next rung of the ladder.
pub fn tick_career(
    employment: &mut Employment,
    stats: &CoreStats,
    relationship_avg: i32,
    tracks: &[CareerTrack],
    rng: &mut SimRng,
    log: &mut Vec<String>,
) {
    let Some(job) = employment.job.as_mut() else {
        return;
    };

    job.performance = performance_score(stats, job.tenure_years, relationship_avg, rng);
    job.tenure_years += 1;

    let Some(track) = job
        .track_id
        .as_deref()
        .and_then(|id| find_track(tracks, id))
    else {
        return;
    };
    let Some(next) = track.level(job.level + 1) else {
        return;
    };

    if job.tenure_years < next.min_tenure || job.performance < next.min_performance {
        return;
    }

    // Base odds, boosted by excess performance, excess tenure, and goodwill.
    let excess_perf = job.performance - next.min_performance;
    let excess_tenure = (job.tenure_years - next.min_tenure) as i32;
    let odds = (40 + excess_perf + excess_tenure * 5 + relationship_avg / 10).clamp(0, 95);
    if !rng.chance(odds as u32) {
        return;
    }

    job.level += 1;
    job.title = next.title.clone();
    job.salary = next.salary;
    job.tenure_years = 0;
    log.push(format!("Promoted to {}.", job.title));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::career::Job;
    use crate::data::careers::career_tracks;

    fn stats() -> CoreStats {
        CoreStats {
            health: 80,
            happiness: 70,
            smarts: 90,
            looks: 50,
        }
    }

    fn office_job(tenure: u32) -> Employment {
        Employment {
            job: Some(Job {
                track_id: Some("office".to_string()),
                title: "Junior Clerk".to_string(),
                salary: 32_000,
                level: 0,
                tenure_years: tenure,
                performance: 50,
            }),
        }
    }

    #[test]
    fn performance_stays_bounded() {
        let mut rng = SimRng::new(4);
        for _ in 0..200 {
            let score = performance_score(&stats(), 5, 80, &mut rng);
            assert!((0..=100).contains(&score));
        }
    }

    #[test]
    fn no_promotion_below_tenure_gate() {
        let tracks = career_tracks();
        let mut rng = SimRng::new(9);
        let mut log = Vec::new();
        let mut employment = office_job(0);
        tick_career(&mut employment, &stats(), 80, &tracks, &mut rng, &mut log);
        let job = employment.job.unwrap();
        assert_eq!(job.level, 0);
        assert!(log.is_empty());
    }

    #[test]
    fn strong_candidate_eventually_promotes() {
        let tracks = career_tracks();
        let mut rng = SimRng::new(21);
        let mut employment = office_job(1);
        let mut log = Vec::new();
        for _ in 0..20 {
            tick_career(&mut employment, &stats(), 90, &tracks, &mut rng, &mut log);
        }
        let job = employment.job.unwrap();
        assert!(job.level >= 1, "expected at least one promotion");
        assert!(!log.is_empty());
    }

    #[test]
    fn unemployed_tick_is_a_no_op() {
        let tracks = career_tracks();
        let mut rng = SimRng::new(1);
        let mut log = Vec::new();
        let mut employment = Employment::default();
        tick_career(&mut employment, &stats(), 50, &tracks, &mut rng, &mut log);
        assert!(employment.job.is_none());
        assert!(log.is_empty());
    }
}
