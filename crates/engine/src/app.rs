//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::auth::JwtService;
use crate::infrastructure::neo4j::Neo4jRepositories;
use crate::infrastructure::ports::{
    CharacterRepo, ClockPort, CompletionRepo, EnemyTemplateRepo, HabitRepo, HealthPort,
    SystemClock, UserRepo,
};
use crate::use_cases::{
    AdventureOps, AuthOps, CharacterOps, CompletionOps, EnemyOps, HabitOps,
};

/// Main application state.
///
/// Holds the use cases and the health probe. Passed to HTTP handlers via
/// Axum state.
pub struct App {
    pub use_cases: UseCases,
    pub health: Arc<dyn HealthPort>,
}

/// Container for all use cases.
pub struct UseCases {
    pub auth: AuthOps,
    pub characters: CharacterOps,
    pub habits: HabitOps,
    pub completions: CompletionOps,
    pub adventure: AdventureOps,
    pub enemies: EnemyOps,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(repos: Neo4jRepositories, jwt: JwtService) -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
        let jwt = Arc::new(jwt);

        // Port traits injected directly into the use cases.
        let user_repo: Arc<dyn UserRepo> = repos.user.clone();
        let character_repo: Arc<dyn CharacterRepo> = repos.character.clone();
        let habit_repo: Arc<dyn HabitRepo> = repos.habit.clone();
        let completion_repo: Arc<dyn CompletionRepo> = repos.completion.clone();
        let enemy_repo: Arc<dyn EnemyTemplateRepo> = repos.enemy.clone();

        let use_cases = UseCases {
            auth: AuthOps::new(user_repo.clone(), jwt, clock.clone()),
            characters: CharacterOps::new(character_repo.clone(), user_repo.clone()),
            habits: HabitOps::new(habit_repo.clone(), user_repo.clone()),
            completions: CompletionOps::new(
                completion_repo,
                habit_repo,
                user_repo.clone(),
                clock,
            ),
            adventure: AdventureOps::new(character_repo, user_repo),
            enemies: EnemyOps::new(enemy_repo),
        };

        Self {
            use_cases,
            health: repos.health,
        }
    }
}
