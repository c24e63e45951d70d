use actix_web::{web, HttpResponse, Responder, get, put, delete};
use sea_orm::{DatabaseConnection, DbErr};
use validator::Validate;

use crate::middleware::AuthUser;
use crate::models::dto::{
    ChartPoint, CreateEntryResponse, DashboardResponse, DeleteEntryResponse, EntryRequest,
    EntryResponse, SuggestionQuery, Summary, UpdateEntryResponse,
};
use crate::services::entry_service::EntryService;
use crate::services::stats_service::StatsService;
use crate::services::suggestion_service::SuggestionService;

/// Recalcule la courbe et le résumé après chaque lecture/écriture:
/// la BD est la seule source de vérité, jamais les deltas du client
async fn aggregates(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<(Vec<ChartPoint>, Summary), DbErr> {
    let chart = StatsService::chart(db, user_id).await?;
    let summary = StatsService::summary(db, user_id).await?;
    Ok((chart, summary))
}

fn server_error(e: DbErr) -> HttpResponse {
    HttpResponse::InternalServerError().json(serde_json::json!({
        "error": format!("Database error: {}", e)
    }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "Tournament entry not found"
    }))
}

#[get("/dashboard")]
pub async fn dashboard(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
) -> impl Responder {
    let entries = match EntryService::list_entries(&db, auth_user.user_id).await {
        Ok(entries) => entries,
        Err(e) => return server_error(e),
    };

    match aggregates(&db, auth_user.user_id).await {
        Ok((chart, summary)) => HttpResponse::Ok().json(DashboardResponse {
            entries: entries.into_iter().map(EntryResponse::from).collect(),
            chart,
            summary,
        }),
        Err(e) => server_error(e),
    }
}

pub async fn create_entry(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    request: web::Json<EntryRequest>,
) -> impl Responder {
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest().json(errors);
    }

    let entry = match EntryService::create_entry(&db, auth_user.user_id, request.into_inner()).await
    {
        Ok(entry) => entry,
        Err(e) => return server_error(e),
    };

    match aggregates(&db, auth_user.user_id).await {
        Ok((chart, summary)) => HttpResponse::Created().json(CreateEntryResponse {
            entry: entry.into(),
            chart,
            summary,
        }),
        Err(e) => server_error(e),
    }
}

#[put("/{id}")]
pub async fn update_entry(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    path: web::Path<i32>,
    request: web::Json<EntryRequest>,
) -> impl Responder {
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest().json(errors);
    }

    let entry_id = path.into_inner();

    let updated =
        match EntryService::update_entry(&db, auth_user.user_id, entry_id, request.into_inner())
            .await
        {
            Ok(Some(entry)) => entry,
            // Inexistant ou possédé par un autre utilisateur: même réponse
            Ok(None) => return not_found(),
            Err(e) => return server_error(e),
        };

    let entries = match EntryService::list_entries(&db, auth_user.user_id).await {
        Ok(entries) => entries,
        Err(e) => return server_error(e),
    };

    match aggregates(&db, auth_user.user_id).await {
        Ok((chart, summary)) => HttpResponse::Ok().json(UpdateEntryResponse {
            entry: updated.into(),
            entries: entries.into_iter().map(EntryResponse::from).collect(),
            chart,
            summary,
        }),
        Err(e) => server_error(e),
    }
}

#[delete("/{id}")]
pub async fn delete_entry(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    path: web::Path<i32>,
) -> impl Responder {
    match EntryService::delete_entry(&db, auth_user.user_id, path.into_inner()).await {
        Ok(true) => {}
        Ok(false) => return not_found(),
        Err(e) => return server_error(e),
    }

    let entries = match EntryService::list_entries(&db, auth_user.user_id).await {
        Ok(entries) => entries,
        Err(e) => return server_error(e),
    };

    match aggregates(&db, auth_user.user_id).await {
        Ok((chart, summary)) => HttpResponse::Ok().json(DeleteEntryResponse {
            entries: entries.into_iter().map(EntryResponse::from).collect(),
            chart,
            summary,
        }),
        Err(e) => server_error(e),
    }
}

#[get("/suggestions")]
pub async fn suggest_names(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    query: web::Query<SuggestionQuery>,
) -> impl Responder {
    let query = query.into_inner().query.unwrap_or_default();

    match SuggestionService::search(&db, auth_user.user_id, &query).await {
        Ok(suggestions) => HttpResponse::Ok().json(suggestions),
        Err(e) => server_error(e),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(dashboard).service(
        web::scope("/entries")
            .route("", web::post().to(create_entry))
            .service(suggest_names)
            .service(update_entry)
            .service(delete_entry),
    );
}
