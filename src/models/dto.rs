//DTOs pour les requêtes/réponses de l'API
//Le JSON est en camelCase; la conversion snake_case <-> camelCase
//se fait ici, à la frontière, jamais dans les services.
use chrono::DateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::entry;

// Requête de création/mise à jour d'une session de tournoi.
// La même forme sert aux deux opérations: l'update réécrit tous les
// champs modifiables.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EntryRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(custom(function = validate_non_negative))]
    pub buy_in: Decimal,
    #[validate(custom(function = validate_non_negative))]
    pub cash_out: Decimal,
    #[validate(length(max = 500, message = "notes must be at most 500 characters"))]
    pub notes: Option<String>,
    #[validate(custom(function = validate_event_time))]
    pub event_time: String,
}

fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        return Err(ValidationError::new("negative_amount"));
    }
    Ok(())
}

fn validate_event_time(value: &str) -> Result<(), ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_event_time"))
}

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    pub query: Option<String>,
}

// 1 ligne tournament_entries, exposée en camelCase
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub buy_in: Decimal,
    pub cash_out: Decimal,
    pub notes: Option<String>,
    pub event_time: String,
    pub created_at: String,
}

impl From<entry::Model> for EntryResponse {
    fn from(m: entry::Model) -> Self {
        EntryResponse {
            id: m.id,
            user_id: m.user_id,
            name: m.name,
            buy_in: m.buy_in,
            cash_out: m.cash_out,
            notes: m.notes,
            event_time: m.event_time,
            created_at: m.created_at,
        }
    }
}

/// Statistiques agrégées d'un utilisateur, recalculées à chaque lecture.
/// Un utilisateur sans sessions obtient le résumé à zéro, pas une erreur.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_events: i64,
    pub net_profit: Decimal,
    pub avg_profit: Decimal,
    pub roi: Decimal,
}

impl Summary {
    pub fn zero() -> Self {
        Summary {
            total_events: 0,
            net_profit: Decimal::ZERO,
            avg_profit: Decimal::ZERO,
            roi: Decimal::ZERO,
        }
    }
}

/// 1 point de la courbe de profit cumulé
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub at: String,
    pub cumulative: Decimal,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub entries: Vec<EntryResponse>,
    pub chart: Vec<ChartPoint>,
    pub summary: Summary,
}

#[derive(Debug, Serialize)]
pub struct CreateEntryResponse {
    pub entry: EntryResponse,
    pub chart: Vec<ChartPoint>,
    pub summary: Summary,
}

#[derive(Debug, Serialize)]
pub struct UpdateEntryResponse {
    pub entry: EntryResponse,
    pub entries: Vec<EntryResponse>,
    pub chart: Vec<ChartPoint>,
    pub summary: Summary,
}

#[derive(Debug, Serialize)]
pub struct DeleteEntryResponse {
    pub entries: Vec<EntryResponse>,
    pub chart: Vec<ChartPoint>,
    pub summary: Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> EntryRequest {
        EntryRequest {
            name: "CTP 台中崇德".to_string(),
            buy_in: Decimal::from(1000),
            cash_out: Decimal::from(1500),
            notes: None,
            event_time: "2025-06-01T19:30:00+08:00".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut req = valid_request();
        req.name = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_negative_buy_in_rejected() {
        let mut req = valid_request();
        req.buy_in = Decimal::from(-1);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_oversized_notes_rejected() {
        let mut req = valid_request();
        req.notes = Some("x".repeat(501));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_bad_event_time_rejected() {
        let mut req = valid_request();
        req.event_time = "demain soir".to_string();
        assert!(req.validate().is_err());
    }
}
