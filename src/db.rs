// connexion BD + bootstrap du schéma

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr};
use std::env;

pub async fn establish_connection() -> Result<DatabaseConnection, DbErr> {
    let database_url = env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set in .env file");

    Database::connect(&database_url).await
}

/// Crée les tables si elles n'existent pas (idempotent, exécuté à chaque
/// démarrage). Les timestamps sont stockés en TEXT ISO-8601 normalisé en
/// UTC à l'écriture: à décalage constant, l'ordre lexicographique du TEXT
/// suit l'ordre chronologique, donc ORDER BY event_time est correct.
pub async fn init_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS tournament_entries (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            buy_in NUMERIC NOT NULL,
            cash_out NUMERIC NOT NULL,
            notes TEXT,
            event_time TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
        // L'index couvre la requête dominante: "toutes les sessions d'un
        // utilisateur, triées par date d'événement"
        r#"
        CREATE INDEX IF NOT EXISTS idx_entries_user_time
            ON tournament_entries (user_id, event_time)
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS user_tournament_names (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE (user_id, name)
        )
        "#,
    ];

    for statement in statements {
        db.execute_unprepared(statement).await?;
    }

    Ok(())
}
