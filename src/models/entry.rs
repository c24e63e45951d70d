use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tournament_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub buy_in: Decimal,
    pub cash_out: Decimal,
    pub notes: Option<String>,

    // Timestamps ISO-8601 (RFC 3339), stockés en texte.
    // event_time: date de la session, normalisée en UTC à l'écriture
    // created_at: assigné par le serveur à l'insertion
    pub event_time: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Profit d'une session = cash-out - buy-in (jamais stocké en BD)
    pub fn profit(&self) -> Decimal {
        self.cash_out - self.buy_in
    }
}
