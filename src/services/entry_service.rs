use sea_orm::*;
use sea_orm::sea_query::OnConflict;
use chrono::{DateTime, Utc};
use crate::models::{entry, name_history};
use crate::models::dto::EntryRequest;

/// Normalise un event_time RFC 3339 en UTC avant stockage. Tous les
/// timestamps persistés partagent ainsi le même décalage, donc l'ordre
/// lexicographique de la colonne TEXT suit l'ordre chronologique
/// (un "+08:00" et un "Z" bruts ne se comparent pas correctement).
fn normalize_event_time(raw: &str) -> Result<String, DbErr> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).to_rfc3339())
        .map_err(|e| DbErr::Custom(format!("Invalid event_time '{}': {}", raw, e)))
}

pub struct EntryService;

impl EntryService {
    /// Liste toutes les sessions d'un utilisateur, la plus récente d'abord.
    /// L'id départage les sessions partageant le même event_time.
    pub async fn list_entries(
        db: &DatabaseConnection,
        user_id: i32,
    ) -> Result<Vec<entry::Model>, DbErr> {
        entry::Entity::find()
            .filter(entry::Column::UserId.eq(user_id))
            .order_by_desc(entry::Column::EventTime)
            .order_by_desc(entry::Column::Id)
            .all(db)
            .await
    }

    /// Crée une session et enregistre son nom dans l'historique de suggestions
    pub async fn create_entry(
        db: &DatabaseConnection,
        user_id: i32,
        request: EntryRequest,
    ) -> Result<entry::Model, DbErr> {
        let new_entry = entry::ActiveModel {
            user_id: Set(user_id),
            name: Set(request.name.clone()),
            buy_in: Set(request.buy_in),
            cash_out: Set(request.cash_out),
            notes: Set(request.notes),
            event_time: Set(normalize_event_time(&request.event_time)?),
            created_at: Set(Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let created = new_entry.insert(db).await?;

        Self::save_tournament_name(db, user_id, &created.name).await?;

        Ok(created)
    }

    /// Réécrit tous les champs modifiables d'une session.
    /// Retourne None si la session n'existe pas ou appartient à un autre
    /// utilisateur (les deux cas sont indistinguables pour l'appelant).
    pub async fn update_entry(
        db: &DatabaseConnection,
        user_id: i32,
        entry_id: i32,
        request: EntryRequest,
    ) -> Result<Option<entry::Model>, DbErr> {
        let existing = entry::Entity::find_by_id(entry_id)
            .filter(entry::Column::UserId.eq(user_id))
            .one(db)
            .await?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let mut active: entry::ActiveModel = model.into();
        active.name = Set(request.name.clone());
        active.buy_in = Set(request.buy_in);
        active.cash_out = Set(request.cash_out);
        active.notes = Set(request.notes);
        active.event_time = Set(normalize_event_time(&request.event_time)?);
        // created_at n'est jamais réécrit

        let updated = active.update(db).await?;

        Self::save_tournament_name(db, user_id, &updated.name).await?;

        Ok(Some(updated))
    }

    /// Supprime une session. Retourne false si aucune ligne ne correspond
    /// au couple (id, user_id) — l'appelant en fait un 404.
    pub async fn delete_entry(
        db: &DatabaseConnection,
        user_id: i32,
        entry_id: i32,
    ) -> Result<bool, DbErr> {
        let result = entry::Entity::delete_many()
            .filter(entry::Column::Id.eq(entry_id))
            .filter(entry::Column::UserId.eq(user_id))
            .exec(db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Ajoute un nom à l'historique de l'utilisateur (insert-if-absent).
    /// Les noms vides après trim sont ignorés silencieusement.
    pub async fn save_tournament_name(
        db: &DatabaseConnection,
        user_id: i32,
        raw_name: &str,
    ) -> Result<(), DbErr> {
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        let row = name_history::ActiveModel {
            user_id: Set(user_id),
            name: Set(trimmed.to_string()),
            created_at: Set(Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let insert = name_history::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    name_history::Column::UserId,
                    name_history::Column::Name,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec(db)
            .await;

        match insert {
            Ok(_) => Ok(()),
            // Conflit (user_id, name): le nom est déjà dans l'historique
            Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn request(event_time: &str) -> EntryRequest {
        EntryRequest {
            name: "CTP 台中崇德".to_string(),
            buy_in: Decimal::from(1000),
            cash_out: Decimal::from(1500),
            notes: None,
            event_time: event_time.to_string(),
        }
    }

    #[test]
    fn test_event_time_normalized_to_utc() {
        let shifted = normalize_event_time("2025-06-01T20:00:00+08:00").unwrap();
        assert_eq!(shifted, "2025-06-01T12:00:00+00:00");

        let zulu = normalize_event_time("2025-06-01T13:00:00Z").unwrap();
        assert_eq!(zulu, "2025-06-01T13:00:00+00:00");
    }

    #[test]
    fn test_normalized_text_order_is_chronological() {
        // Bruts, "13:00Z" < "20:00+08:00" lexicographiquement alors que
        // 20:00+08:00 (12:00 UTC) précède 13:00 UTC. Normalisés, l'ordre
        // du TEXT en BD redevient l'ordre chronologique.
        let earlier = normalize_event_time("2025-06-01T20:00:00+08:00").unwrap();
        let later = normalize_event_time("2025-06-01T13:00:00Z").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_unparseable_event_time_rejected() {
        assert!(normalize_event_time("demain soir").is_err());
    }

    #[tokio::test]
    async fn test_update_entry_not_owned_reports_not_found() {
        // La recherche scopée (id, user_id) ne voit pas la session d'un
        // autre utilisateur: update répond None, rien n'est écrit
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entry::Model>::new()])
            .into_connection();

        let updated = EntryService::update_entry(&db, 2, 7, request("2025-06-01T20:00:00+08:00"))
            .await
            .unwrap();
        assert!(updated.is_none());

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("user_id"));
    }

    #[tokio::test]
    async fn test_delete_entry_not_owned_reports_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let deleted = EntryService::delete_entry(&db, 2, 7).await.unwrap();
        assert!(!deleted);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("user_id"));
    }
}
