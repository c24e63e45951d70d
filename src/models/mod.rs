// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Description:
//   Point d'entrée pour tous les modèles de données.
//   Chaque modèle correspond à une table PostgreSQL avec SeaORM.
//
// Liste des modules:
//   - health : Health check API
//   - users : Utilisateurs (auth username/password + JWT)
//   - entry : Sessions de tournoi (buy-in / cash-out)
//   - name_history : Noms de tournois déjà saisis (pour les suggestions)
//   - dto : Data Transfer Objects pour les requêtes/réponses API
//
// Points d'attention:
//   - Tous les modèles utilisent SeaORM (pas de SQL brut, sauf le bootstrap
//     du schéma dans db.rs)
//   - Les montants sont des Decimal (jamais de flottants)
//   - Le profit (cash_out - buy_in) est dérivé, jamais stocké
//
// ============================================================================

pub mod health;
pub mod users;
pub mod entry;
pub mod name_history;
pub mod dto;
