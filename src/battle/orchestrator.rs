//! Battle orchestrator: owns everything one encounter needs
//!
//! Tick order: every living player unit, death processing, then the stage
//! pass (enemies, deaths, end conditions). Each unit is ticked once per frame.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::battle::ai::Action;
use crate::battle::events::{BattleObserver, NullObserver};
use crate::battle::execution::{self, CombatEnv};
use crate::battle::result::BattleResult;
use crate::core::{BattleConfig, Faction, UnitId};
use crate::player::PlayerProfile;
use crate::skills::SkillRegistry;
use crate::stages::{Stage, StageConfig};
use crate::units::{Bestiary, Roster, Unit};

pub struct Battle<O: BattleObserver = NullObserver> {
    config: BattleConfig,
    skills: SkillRegistry,
    bestiary: Bestiary,
    rng: ChaCha8Rng,
    observer: O,
    roster: Roster,
    stage: Stage,
    player: Option<UnitId>,
    profile: Option<PlayerProfile>,
    result: Option<BattleResult>,
    ticks: u64,
}

/// Split a battle into the roster, the stage and a combat env over the rest
macro_rules! split_env {
    ($battle:expr, $roster:ident, $stage:ident, $env:ident) => {
        let Battle {
            config,
            skills,
            bestiary,
            rng,
            observer,
            roster: $roster,
            stage: $stage,
            ..
        } = &mut *$battle;
        let mut $env = CombatEnv {
            config,
            skills,
            bestiary,
            rng,
            observer,
        };
    };
}

impl Battle<NullObserver> {
    /// New battle with the builtin skill and species tables
    pub fn new(config: BattleConfig, stage: StageConfig, seed: u64) -> Self {
        Self {
            config,
            skills: SkillRegistry::builtin(),
            bestiary: Bestiary::builtin(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            observer: NullObserver,
            roster: Roster::new(),
            stage: Stage::new(stage),
            player: None,
            profile: None,
            result: None,
            ticks: 0,
        }
    }
}

impl<O: BattleObserver> Battle<O> {
    pub fn with_observer<P: BattleObserver>(self, observer: P) -> Battle<P> {
        Battle {
            config: self.config,
            skills: self.skills,
            bestiary: self.bestiary,
            rng: self.rng,
            observer,
            roster: self.roster,
            stage: self.stage,
            player: self.player,
            profile: self.profile,
            result: self.result,
            ticks: self.ticks,
        }
    }

    pub fn with_skills(mut self, skills: SkillRegistry) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_bestiary(mut self, bestiary: Bestiary) -> Self {
        self.bestiary = bestiary;
        self
    }

    /// Put the player unit on the field; only the first deploy counts
    pub fn deploy_player(&mut self, unit: Unit) -> UnitId {
        if let Some(existing) = self.player {
            tracing::warn!(unit = %unit.name, "Player already deployed");
            return existing;
        }
        let id = self.roster.spawn(unit);
        self.player = Some(id);
        id
    }

    /// Deploy the unit built from `profile` and keep the profile for rewards
    pub fn deploy_profile(&mut self, profile: PlayerProfile) -> UnitId {
        let unit = profile.build_unit(&self.config, &self.skills);
        self.profile = Some(profile);
        self.deploy_player(unit)
    }

    /// Spawn the stage's enemies and begin; false without a deployed player
    pub fn start(&mut self) -> bool {
        let Some(player) = self.player else {
            tracing::warn!(stage = %self.stage.id(), "Battle started without a player");
            return false;
        };
        {
            split_env!(self, roster, stage, env);
            stage.initialize(player, roster, &mut env);
        }
        self.stage.start()
    }

    /// Advance the whole battle by one frame
    ///
    /// Returns the result once the battle is over; later calls change nothing.
    pub fn tick(&mut self, delta_ms: f32) -> Option<&BattleResult> {
        if self.result.is_none() {
            self.ticks += 1;
            {
                split_env!(self, roster, stage, env);
                for id in roster.living_ids(Some(Faction::Player)) {
                    execution::tick_unit(roster, id, delta_ms, &mut env);
                }
                stage.process_deaths(roster, &mut env);
            }
            self.tick_stage(delta_ms);
        }
        self.result.as_ref()
    }

    /// Advance a single unit, outside the normal frame order
    pub fn tick_unit(&mut self, id: UnitId, delta_ms: f32) -> Option<Action> {
        if self.result.is_some() {
            return None;
        }
        split_env!(self, roster, stage, env);
        let action = execution::tick_unit(roster, id, delta_ms, &mut env);
        stage.process_deaths(roster, &mut env);
        action
    }

    /// Run the stage pass only; finishes the battle if it turned terminal
    pub fn tick_stage(&mut self, delta_ms: f32) -> Option<&BattleResult> {
        if self.result.is_none() {
            let outcome = {
                split_env!(self, roster, stage, env);
                stage.update(delta_ms, roster, &mut env)
            };
            if let Some(result) = outcome {
                self.finish(result);
            }
        }
        self.result.as_ref()
    }

    /// Tick until the battle ends or `max_ticks` frames have run
    pub fn run_until_finished(&mut self, delta_ms: f32, max_ticks: u64) -> Option<&BattleResult> {
        while self.result.is_none() && self.ticks < max_ticks {
            self.tick(delta_ms);
        }
        if self.result.is_none() {
            tracing::warn!(stage = %self.stage.id(), ticks = self.ticks, "Battle hit the tick limit");
        }
        self.result.as_ref()
    }

    fn finish(&mut self, result: BattleResult) {
        if result.victory {
            if let Some(unit) = self.player.and_then(|id| self.roster.get_mut(id)) {
                unit.add_experience(result.exp, &self.skills, &mut self.observer);
            }
            if let Some(profile) = self.profile.as_mut() {
                profile.apply_result(&result, &self.config);
            }
        }

        self.observer.on_battle_ended(&result);
        tracing::info!(
            stage = %self.stage.id(),
            victory = result.victory,
            exp = result.exp,
            gold = result.gold,
            ticks = self.ticks,
            "Battle ended"
        );
        self.result = Some(result);
    }

    pub fn living_units(&self, faction: Option<Faction>) -> Vec<&Unit> {
        self.roster.living(faction).collect()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn player_id(&self) -> Option<UnitId> {
        self.player
    }

    pub fn player_unit(&self) -> Option<&Unit> {
        self.player.and_then(|id| self.roster.get(id))
    }

    /// Mutable access for scripted setups, e.g. swapping a unit's behavior
    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.roster.get_mut(id)
    }

    pub fn result(&self) -> Option<&BattleResult> {
        self.result.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn profile(&self) -> Option<&PlayerProfile> {
        self.profile.as_ref()
    }

    pub fn into_profile(self) -> Option<PlayerProfile> {
        self.profile
    }

    /// Reset the stage and destroy every unit
    pub fn cleanup(&mut self) {
        self.stage.cleanup();
        self.roster.clear();
        self.player = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::events::{BattleEvent, EventLog};
    use crate::core::Position;
    use crate::stages::{EnemySpawn, StageCatalog};
    use crate::stats::StatBlock;

    fn hero(config: &BattleConfig) -> Unit {
        Unit::new("Hero", Faction::Player, StatBlock::new(100.0, 10.0, 5.0, 2.0), config)
            .at(Position::new(200.0, 300.0))
    }

    fn duel(seed: u64) -> Battle<EventLog> {
        let config = BattleConfig::default();
        let stage = StageConfig::new("duel", "Duel", 1)
            .with_enemy(EnemySpawn::new("goblin", 1).at(400.0, 300.0).without_skills())
            .with_rewards(50, 30, &[]);
        let mut battle = Battle::new(config.clone(), stage, seed).with_observer(EventLog::new());
        battle.deploy_player(hero(&config));
        battle
    }

    #[test]
    fn test_start_requires_player() {
        let stage = StageCatalog::builtin().get_or_default("1-1").cloned().unwrap();
        let mut battle = Battle::new(BattleConfig::default(), stage, 1);
        assert!(!battle.start());
        assert!(battle.tick(16.0).is_none());
        assert_eq!(battle.ticks(), 1);
    }

    #[test]
    fn test_duel_ends_once() {
        let mut battle = duel(7);
        assert!(battle.start());
        let result = battle.run_until_finished(16.0, 20_000).cloned().unwrap();

        assert!(result.victory);
        assert_eq!(result.gold, 30);
        assert!(result.exp > 50);
        assert!(battle.living_units(Some(Faction::Enemy)).is_empty());

        let ticks = battle.ticks();
        battle.tick(16.0);
        battle.tick(16.0);
        assert_eq!(battle.ticks(), ticks);
        assert_eq!(
            battle
                .observer()
                .count(|e| matches!(e, BattleEvent::BattleEnded { .. })),
            1
        );
    }

    #[test]
    fn test_same_seed_same_battle() {
        let mut first = duel(99);
        let mut second = duel(99);
        first.start();
        second.start();
        first.run_until_finished(16.0, 20_000);
        second.run_until_finished(16.0, 20_000);

        assert_eq!(first.ticks(), second.ticks());
        assert_eq!(first.observer().events(), second.observer().events());
    }

    #[test]
    fn test_victory_feeds_profile() {
        let config = BattleConfig::default();
        let stage = StageCatalog::builtin().get_or_default("1-1").cloned().unwrap();
        let mut battle = Battle::new(config, stage, 3);
        battle.deploy_profile(PlayerProfile::default());
        battle.start();
        let result = battle.run_until_finished(16.0, 20_000).cloned().unwrap();

        assert!(result.victory);
        let profile = battle.into_profile().unwrap();
        assert_eq!(profile.gold, 100 + result.gold);
        assert_eq!(profile.progression.experience, result.exp);
    }

    #[test]
    fn test_cleanup_destroys_units() {
        let mut battle = duel(5);
        battle.start();
        battle.cleanup();
        assert!(battle.roster().is_empty());
        assert!(battle.player_id().is_none());
    }
}
