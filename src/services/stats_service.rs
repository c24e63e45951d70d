use sea_orm::*;
use rust_decimal::Decimal;
use crate::models::entry;
use crate::models::dto::{ChartPoint, Summary};

pub struct StatsService;

impl StatsService {
    /// Statistiques agrégées d'un utilisateur (compte, profit net, profit
    /// moyen, ROI). Aucune session => résumé à zéro, jamais une erreur.
    pub async fn summary(db: &DatabaseConnection, user_id: i32) -> Result<Summary, DbErr> {
        let entries = entry::Entity::find()
            .filter(entry::Column::UserId.eq(user_id))
            .all(db)
            .await?;

        Ok(Self::summarize(&entries))
    }

    /// Courbe de profit cumulé, ordonnée par date de session croissante
    pub async fn chart(db: &DatabaseConnection, user_id: i32) -> Result<Vec<ChartPoint>, DbErr> {
        let entries = entry::Entity::find()
            .filter(entry::Column::UserId.eq(user_id))
            .order_by_asc(entry::Column::EventTime)
            .order_by_asc(entry::Column::Id)
            .all(db)
            .await?;

        Ok(Self::cumulative_series(&entries))
    }

    /// Calcule le résumé à partir des sessions chargées.
    /// avg_profit et roi retombent à 0 quand leur dénominateur est nul
    /// (aucune session / somme des buy-ins nulle, ex. que des freerolls).
    pub fn summarize(entries: &[entry::Model]) -> Summary {
        if entries.is_empty() {
            return Summary::zero();
        }

        let net_profit: Decimal = entries.iter().map(|e| e.profit()).sum();
        let total_buy_in: Decimal = entries.iter().map(|e| e.buy_in).sum();
        let total_events = entries.len() as i64;

        let avg_profit = net_profit / Decimal::from(total_events);
        let roi = if total_buy_in.is_zero() {
            Decimal::ZERO
        } else {
            net_profit / total_buy_in
        };

        Summary {
            total_events,
            net_profit,
            avg_profit,
            roi,
        }
    }

    /// Un point par session, dans l'ordre reçu (l'appelant garantit le tri
    /// par (event_time, id) croissant). Le cumul démarre à 0.
    pub fn cumulative_series(entries: &[entry::Model]) -> Vec<ChartPoint> {
        let mut cumulative = Decimal::ZERO;

        entries
            .iter()
            .map(|e| {
                cumulative += e.profit();
                ChartPoint {
                    at: e.event_time.clone(),
                    cumulative,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: i32, buy_in: i64, cash_out: i64, event_time: &str) -> entry::Model {
        entry::Model {
            id,
            user_id: 1,
            name: format!("session {}", id),
            buy_in: Decimal::from(buy_in),
            cash_out: Decimal::from(cash_out),
            notes: None,
            event_time: event_time.to_string(),
            created_at: "2025-06-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_summary_worked_example() {
        // (1000 -> 1500) et (500 -> 300): net 300, moyenne 150, roi 0.2
        let entries = vec![
            session(1, 1000, 1500, "2025-06-01T20:00:00+08:00"),
            session(2, 500, 300, "2025-06-08T20:00:00+08:00"),
        ];

        let summary = StatsService::summarize(&entries);
        assert_eq!(summary.total_events, 2);
        assert_eq!(summary.net_profit, Decimal::from(300));
        assert_eq!(summary.avg_profit, Decimal::from(150));
        assert_eq!(summary.roi, Decimal::from(300) / Decimal::from(1500));
    }

    #[test]
    fn test_summary_empty_is_zero() {
        assert_eq!(StatsService::summarize(&[]), Summary::zero());
    }

    #[test]
    fn test_summary_freerolls_only() {
        // Somme des buy-ins nulle: roi vaut 0, pas une division par zéro
        let entries = vec![session(1, 0, 200, "2025-06-01T20:00:00+08:00")];

        let summary = StatsService::summarize(&entries);
        assert_eq!(summary.net_profit, Decimal::from(200));
        assert_eq!(summary.roi, Decimal::ZERO);
    }

    #[test]
    fn test_summary_net_loss() {
        let entries = vec![
            session(1, 1000, 0, "2025-06-01T20:00:00+08:00"),
            session(2, 500, 800, "2025-06-02T20:00:00+08:00"),
        ];

        let summary = StatsService::summarize(&entries);
        assert_eq!(summary.net_profit, Decimal::from(-700));
        assert_eq!(summary.avg_profit, Decimal::from(-350));
    }

    #[test]
    fn test_chart_cumulative_matches_net_profit() {
        let entries = vec![
            session(1, 1000, 1500, "2025-06-01T20:00:00+08:00"),
            session(2, 500, 300, "2025-06-08T20:00:00+08:00"),
            session(3, 200, 900, "2025-06-15T20:00:00+08:00"),
        ];

        let chart = StatsService::cumulative_series(&entries);
        assert_eq!(chart.len(), entries.len());
        assert_eq!(chart[0].cumulative, Decimal::from(500));
        assert_eq!(chart[1].cumulative, Decimal::from(300));
        assert_eq!(chart[2].cumulative, Decimal::from(1000));

        let summary = StatsService::summarize(&entries);
        assert_eq!(chart.last().unwrap().cumulative, summary.net_profit);
    }

    #[test]
    fn test_chart_points_carry_event_time() {
        let entries = vec![session(1, 100, 250, "2025-06-01T20:00:00+08:00")];

        let chart = StatsService::cumulative_series(&entries);
        assert_eq!(chart[0].at, "2025-06-01T20:00:00+08:00");
    }

    #[test]
    fn test_chart_empty() {
        assert!(StatsService::cumulative_series(&[]).is_empty());
    }
}
