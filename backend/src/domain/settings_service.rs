//! Settings domain logic: the monthly profit goal and favorite templates.
//!
//! Both values live in the per-user settings store with merge semantics, so
//! writing one never clobbers the other. Goal notices are computed here as
//! plain values for the presentation layer to render (a notification queue,
//! not imperative side effects).

use anyhow::{anyhow, Result};
use log::info;
use shared::{Favorite, GoalNotice, MonthlyGoalResponse, ToggleFavoriteResponse};
use std::sync::Arc;

use crate::storage::file::{FileConnection, SettingsRepository};
use crate::storage::traits::SettingsStorage;

#[derive(Clone)]
pub struct SettingsService {
    settings_repository: SettingsRepository,
}

impl SettingsService {
    pub fn new(connection: Arc<FileConnection>, username: &str) -> Self {
        let settings_repository = SettingsRepository::new((*connection).clone(), username);
        Self { settings_repository }
    }

    pub async fn monthly_goal(&self) -> Result<f64> {
        self.settings_repository.get_monthly_goal().await
    }

    pub async fn set_monthly_goal(&self, goal: f64) -> Result<MonthlyGoalResponse> {
        if !goal.is_finite() || goal < 0.0 {
            return Err(anyhow!("Monthly goal must be a non-negative number"));
        }
        self.settings_repository.set_monthly_goal(goal).await?;
        info!("Monthly goal set to {:.2}", goal);
        Ok(MonthlyGoalResponse { monthly_goal: goal })
    }

    pub async fn favorites(&self) -> Result<Vec<Favorite>> {
        self.settings_repository.get_favorites().await
    }

    /// Add or remove a favorite. Two favorites with the same
    /// `(description, category)` pair are the same template, so toggling an
    /// existing pair removes it regardless of amount or type.
    pub async fn toggle_favorite(&self, favorite: Favorite) -> Result<ToggleFavoriteResponse> {
        if favorite.description.trim().is_empty() {
            return Err(anyhow!("Favorite description cannot be empty"));
        }

        let mut favorites = self.settings_repository.get_favorites().await?;
        let existed = favorites.iter().any(|f| f.same_template(&favorite));

        if existed {
            favorites.retain(|f| !f.same_template(&favorite));
            info!("Removed favorite '{}'", favorite.description);
        } else {
            favorites.push(favorite.clone());
            info!("Added favorite '{}'", favorite.description);
        }

        self.settings_repository.set_favorites(&favorites).await?;
        Ok(ToggleFavoriteResponse { added: !existed, favorites })
    }
}

/// Goal notice for a month-balance change. Celebrate when the balance
/// crosses the goal from below; warn when the loss exceeds twice the goal.
/// No goal (zero) means no notices.
pub fn evaluate_goal_notice(
    previous_balance: f64,
    new_balance: f64,
    goal: f64,
) -> Option<GoalNotice> {
    if goal <= 0.0 {
        return None;
    }
    if new_balance >= goal && previous_balance < goal {
        return Some(GoalNotice::GoalAchieved { balance: new_balance, goal });
    }
    if new_balance < -(goal * 2.0) {
        return Some(GoalNotice::LossWarning { balance: new_balance, goal });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::TransactionType;
    use tempfile::TempDir;

    async fn create_test_service() -> (SettingsService, TempDir) {
        let dir = TempDir::new().unwrap();
        let connection = Arc::new(FileConnection::new(dir.path()).unwrap());
        (SettingsService::new(connection, "somchai"), dir)
    }

    fn favorite(description: &str, category: &str) -> Favorite {
        Favorite {
            description: description.to_string(),
            amount: 500.0,
            category: category.to_string(),
            transaction_type: TransactionType::Expense,
        }
    }

    #[tokio::test]
    async fn test_monthly_goal_roundtrip() {
        let (service, _dir) = create_test_service().await;
        assert_eq!(service.monthly_goal().await.unwrap(), 0.0);

        service.set_monthly_goal(15000.0).await.unwrap();
        assert_eq!(service.monthly_goal().await.unwrap(), 15000.0);

        assert!(service.set_monthly_goal(-1.0).await.is_err());
        assert!(service.set_monthly_goal(f64::NAN).await.is_err());
    }

    #[tokio::test]
    async fn test_toggle_favorite_adds_then_removes() {
        let (service, _dir) = create_test_service().await;

        let added = service
            .toggle_favorite(favorite("ค่าส่งของ", "ค่าขนส่ง"))
            .await
            .unwrap();
        assert!(added.added);
        assert_eq!(added.favorites.len(), 1);

        // Same (description, category) pair with a different amount is the
        // same template, so the toggle removes it
        let mut same_template = favorite("ค่าส่งของ", "ค่าขนส่ง");
        same_template.amount = 999.0;
        let removed = service.toggle_favorite(same_template).await.unwrap();
        assert!(!removed.added);
        assert!(removed.favorites.is_empty());
    }

    #[tokio::test]
    async fn test_goal_write_does_not_clobber_favorites() {
        let (service, _dir) = create_test_service().await;

        service
            .toggle_favorite(favorite("ค่าส่งของ", "ค่าขนส่ง"))
            .await
            .unwrap();
        service.set_monthly_goal(5000.0).await.unwrap();

        assert_eq!(service.favorites().await.unwrap().len(), 1);
        assert_eq!(service.monthly_goal().await.unwrap(), 5000.0);
    }

    #[test]
    fn test_evaluate_goal_notice() {
        // No goal, no notices
        assert_eq!(evaluate_goal_notice(0.0, 10_000.0, 0.0), None);

        // Crossing the goal from below
        assert_eq!(
            evaluate_goal_notice(900.0, 1_100.0, 1_000.0),
            Some(GoalNotice::GoalAchieved { balance: 1_100.0, goal: 1_000.0 })
        );

        // Already above, no repeat
        assert_eq!(evaluate_goal_notice(1_100.0, 1_200.0, 1_000.0), None);

        // Loss beyond twice the goal
        assert_eq!(
            evaluate_goal_notice(-1_900.0, -2_100.0, 1_000.0),
            Some(GoalNotice::LossWarning { balance: -2_100.0, goal: 1_000.0 })
        );

        // Loss within tolerance
        assert_eq!(evaluate_goal_notice(0.0, -1_999.0, 1_000.0), None);
    }
}
