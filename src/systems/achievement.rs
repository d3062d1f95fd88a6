use bevy_ecs::prelude::*;

use crate::components::career::{Education, Employment};
use crate::components::identity::{Age, Player};
use crate::components::stats::{clamp_stat, net_worth, AssetPortfolio, CoreStats, Fame, Finances};
use crate::simulation::achievements::{
    check_achievements, AchievementLibrary, AchievementState, AchievementView,
};
use crate::simulation::log::YearLog;
use crate::simulation::relationships::RelationshipSummary;

/// System: tests still-locked achievements and applies rewards on unlock.
/// Deliberately not gated on game over so "lived to 100" can land.
pub fn achievement_system(
    catalog: Res<AchievementLibrary>,
    mut state: ResMut<AchievementState>,
    relationships: Res<RelationshipSummary>,
    mut log: ResMut<YearLog>,
    mut query: Query<
        (
            &Age,
            &mut CoreStats,
            &mut Fame,
            &mut Finances,
            &AssetPortfolio,
            &Employment,
            &Education,
        ),
        With<Player>,
    >,
) {
    let Ok((age, mut stats, mut fame, mut finances, portfolio, employment, education)) =
        query.get_single_mut()
    else {
        return;
    };

    let view = AchievementView {
        age: age.0,
        wealth: finances.balance,
        net_worth: net_worth(&finances, portfolio),
        salary: employment.job.as_ref().map(|job| job.salary).unwrap_or(0),
        fame: fame.0,
        employed: employment.job.is_some(),
        education: education.stage,
        living_family: relationships.living_members,
    };

    for unlocked in check_achievements(&catalog.0, &view, &mut state) {
        stats.adjust_happiness(unlocked.reward.happiness);
        fame.0 = clamp_stat(fame.0 + unlocked.reward.fame);
        finances.apply_delta(unlocked.reward.wealth);
        log.0
            .push(format!("Achievement unlocked: {}.", unlocked.name));
    }
}
