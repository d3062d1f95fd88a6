use crate::components::career::{CriminalRecord, Education, Employment, Job};
use crate::components::stats::{clamp_stat, CoreStats, Fame, Finances};
use crate::data::events::ChoiceOutcome;

/// Apply a choice outcome to the character's mutable state.
///
/// Bounded stats are clamped at the write; wealth follows the balance-floor
/// convention in [`Finances`]. Absent fields are no-ops and nothing here can
/// fail. Returns human-readable lines describing what changed.
pub fn apply_outcome(
    outcome: &ChoiceOutcome,
    stats: &mut CoreStats,
    fame: &mut Fame,
    finances: &mut Finances,
    employment: &mut Employment,
    education: &mut Education,
    record: &mut CriminalRecord,
) -> Vec<String> {
    let mut applied = Vec::new();

    if let Some(delta) = outcome.health {
        stats.adjust_health(delta);
        applied.push(format!("health {:+}", delta));
    }
    if let Some(delta) = outcome.happiness {
        stats.adjust_happiness(delta);
        applied.push(format!("happiness {:+}", delta));
    }
    if let Some(delta) = outcome.smarts {
        stats.adjust_smarts(delta);
        applied.push(format!("smarts {:+}", delta));
    }
    if let Some(delta) = outcome.looks {
        stats.adjust_looks(delta);
        applied.push(format!("looks {:+}", delta));
    }
    if let Some(delta) = outcome.fame {
        fame.0 = clamp_stat(fame.0 + delta);
        applied.push(format!("fame {:+}", delta));
    }
    if let Some(delta) = outcome.wealth {
        finances.apply_delta(delta);
        applied.push(format!("wealth {:+}", delta));
    }
    if let Some(grant) = &outcome.job {
        employment.job = Some(Job {
            track_id: grant.track_id.clone(),
            title: grant.title.clone(),
            salary: grant.salary,
            level: 0,
            tenure_years: 0,
            performance: 50,
        });
        applied.push(format!("hired as {}", grant.title));
    }
    if let Some(stage) = outcome.education {
        education.stage = stage;
        applied.push(format!("education -> {:?}", stage));
    }
    if let Some(offense) = &outcome.conviction {
        record.convictions.push(offense.clone());
        applied.push(format!("convicted of {}", offense));
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::events::JobGrant;

    fn character() -> (CoreStats, Fame, Finances, Employment, Education, CriminalRecord) {
        (
            CoreStats {
                health: 50,
                happiness: 50,
                smarts: 50,
                looks: 50,
            },
            Fame(0),
            Finances {
                balance: 10,
                debts: 0,
            },
            Employment::default(),
            Education::default(),
            CriminalRecord::default(),
        )
    }

    #[test]
    fn empty_outcome_is_a_no_op() {
        let (mut stats, mut fame, mut finances, mut emp, mut edu, mut rec) = character();
        let applied = apply_outcome(
            &ChoiceOutcome::default(),
            &mut stats,
            &mut fame,
            &mut finances,
            &mut emp,
            &mut edu,
            &mut rec,
        );
        assert!(applied.is_empty());
        assert_eq!(stats.health, 50);
        assert_eq!(finances.balance, 10);
    }

    #[test]
    fn deltas_clamp_at_both_bounds() {
        let (mut stats, mut fame, mut finances, mut emp, mut edu, mut rec) = character();
        let outcome = ChoiceOutcome {
            health: Some(200),
            happiness: Some(-200),
            ..Default::default()
        };
        apply_outcome(
            &outcome, &mut stats, &mut fame, &mut finances, &mut emp, &mut edu, &mut rec,
        );
        assert_eq!(stats.health, 100);
        assert_eq!(stats.happiness, 0);
    }

    #[test]
    fn wealth_shortfall_goes_to_debts() {
        let (mut stats, mut fame, mut finances, mut emp, mut edu, mut rec) = character();
        let outcome = ChoiceOutcome {
            wealth: Some(-50),
            ..Default::default()
        };
        apply_outcome(
            &outcome, &mut stats, &mut fame, &mut finances, &mut emp, &mut edu, &mut rec,
        );
        assert_eq!(finances.balance, 0);
        assert_eq!(finances.debts, 40);
    }

    #[test]
    fn job_grant_replaces_employment() {
        let (mut stats, mut fame, mut finances, mut emp, mut edu, mut rec) = character();
        let outcome = ChoiceOutcome {
            job: Some(JobGrant {
                title: "Junior Clerk".to_string(),
                salary: 32_000,
                track_id: Some("office".to_string()),
            }),
            ..Default::default()
        };
        apply_outcome(
            &outcome, &mut stats, &mut fame, &mut finances, &mut emp, &mut edu, &mut rec,
        );
        let job = emp.job.expect("job granted");
        assert_eq!(job.title, "Junior Clerk");
        assert_eq!(job.tenure_years, 0);
    }
}
