use actix_web::{post, get, web, HttpResponse};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryFilter, ColumnTrait, Set};
use sea_orm::sea_query::OnConflict;
use serde::{Deserialize, Serialize};

use crate::models::users::{Entity as Users, Column as UserColumn, ActiveModel as UserActiveModel};
use crate::utils::{password, jwt};
use crate::middleware::AuthUser;

// DTO pour l'inscription et la connexion (même forme)
#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

// Réponse après login/register
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i32,
    pub username: String,
}

// Réponse pour /auth/me
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: i32,
    pub username: String,
}

/// POST /auth/register - Créer un compte (PUBLIC)
#[post("/register")]
pub async fn register(
    body: web::Json<CredentialsRequest>,
    db: web::Data<DatabaseConnection>,
) -> HttpResponse {
    let username = body.username.trim();
    if username.is_empty() || body.password.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Username and password are required"
        }));
    }

    // 1. Vérifier si l'utilisateur existe déjà
    match Users::find()
        .filter(UserColumn::Username.eq(username))
        .one(db.get_ref())
        .await
    {
        Ok(Some(_)) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "Username already exists"
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {}", e)
            }));
        }
        _ => {}
    }

    // 2. Hash le mot de passe
    let password_hash = match password::hash_password(&body.password) {
        Ok(hash) => hash,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to hash password: {}", e)
            }));
        }
    };

    // 3. Créer l'utilisateur. La vérification du point 1 peut perdre une
    // course contre un register concurrent du même nom: l'insert lui-même
    // est ON CONFLICT DO NOTHING, et un conflit se solde en 409, pas en 500
    let new_user = UserActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(password_hash),
        ..Default::default()
    };

    let user = match Users::insert(new_user)
        .on_conflict(OnConflict::column(UserColumn::Username).do_nothing().to_owned())
        .exec_with_returning(db.get_ref())
        .await
    {
        Ok(user) => user,
        Err(DbErr::RecordNotInserted) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "Username already exists"
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to create user: {}", e)
            }));
        }
    };

    // 4. Générer le JWT et répondre
    match jwt::generate_token(user.id, &user.username) {
        Ok(token) => HttpResponse::Created().json(AuthResponse {
            token,
            user_id: user.id,
            username: user.username,
        }),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to generate token: {}", e)
        })),
    }
}

/// POST /auth/login - Se connecter (PUBLIC)
#[post("/login")]
pub async fn login(
    body: web::Json<CredentialsRequest>,
    db: web::Data<DatabaseConnection>,
) -> HttpResponse {
    // 1. Trouver l'utilisateur
    let user = match Users::find()
        .filter(UserColumn::Username.eq(body.username.trim()))
        .one(db.get_ref())
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "Invalid username or password"
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {}", e)
            }));
        }
    };

    // 2. Vérifier le mot de passe
    match password::verify_password(&body.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            return HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "Invalid username or password"
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Password verification error: {}", e)
            }));
        }
    }

    // 3. Générer le JWT et répondre
    match jwt::generate_token(user.id, &user.username) {
        Ok(token) => HttpResponse::Ok().json(AuthResponse {
            token,
            user_id: user.id,
            username: user.username,
        }),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to generate token: {}", e)
        })),
    }
}

/// GET /auth/me - Vérifier le token (PROTÉGÉE)
#[get("/me")]
pub async fn me(auth_user: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse {
        user_id: auth_user.user_id,
        username: auth_user.username,
    })
}

pub fn auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(register)
            .service(login)
            .service(me)
    );
}
