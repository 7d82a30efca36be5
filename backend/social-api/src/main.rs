use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use anyhow::{anyhow, Context, Result};
use auth_core::{SystemClock, TokenCodec};
use social_api::db::{PgCommentStore, PgPostStore, PgSessionStore, PgUserStore};
use social_api::handlers::{self, AppState};
use social_api::services::{
    AuthService, CommentService, PostService, UnconfiguredGateway, UserService,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = social_api::Config::from_env()
        .map_err(|e| anyhow!("Configuration loading failed: {}", e))?;

    tracing::info!("Starting social-api v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Database pool + migrations
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    // Store and core wiring. The signing secret is loaded once here; the
    // codec never changes it at runtime.
    let users = Arc::new(PgUserStore::new(pool.clone()));
    let sessions = Arc::new(PgSessionStore::new(pool.clone()));
    let posts = Arc::new(PgPostStore::new(pool.clone()));
    let comments = Arc::new(PgCommentStore::new(pool.clone()));

    let codec = Arc::new(TokenCodec::new(
        config.auth.token_secret.as_bytes(),
        config.auth.token_ttl_secs,
    ));
    let clock = Arc::new(SystemClock);

    let state = AppState {
        auth: AuthService::new(users.clone(), sessions, codec, clock),
        posts: PostService::new(posts.clone(), users.clone()),
        comments: CommentService::new(comments, posts, users.clone()),
        users: UserService::new(users, Arc::new(UnconfiguredGateway)),
    };

    let bind_addr = (config.app.host.clone(), config.app.port);
    tracing::info!("Listening on {}:{}", bind_addr.0, bind_addr.1);

    let allowed_origins = config.cors.allowed_origins.clone();
    HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/health", web::get().to(health))
            .service(
                web::scope("/auth")
                    .route("/signup", web::post().to(handlers::auth::signup))
                    .route("/login", web::post().to(handlers::auth::login))
                    .route("/logout", web::post().to(handlers::auth::logout))
                    .route("/logout_all", web::post().to(handlers::auth::logout_all)),
            )
            .service(
                web::scope("/users")
                    .route("", web::get().to(handlers::users::list_users))
                    .route("/followed", web::get().to(handlers::users::followed_users))
                    .route("/follow/{id}", web::post().to(handlers::users::follow_user))
                    .route(
                        "/unfollow/{id}",
                        web::post().to(handlers::users::unfollow_user),
                    )
                    .route("/payment", web::post().to(handlers::users::purchase_upgrade))
                    .route("/{id}", web::get().to(handlers::users::get_user)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::get().to(handlers::posts::list_posts))
                    .route("", web::post().to(handlers::posts::create_post))
                    .route("/feed", web::get().to(handlers::posts::feed))
                    .route(
                        "/user/{id}",
                        web::get().to(handlers::posts::list_posts_by_user),
                    )
                    .route("/like/{id}", web::post().to(handlers::posts::like_post))
                    .route("/unlike/{id}", web::post().to(handlers::posts::unlike_post))
                    .route("/{id}", web::get().to(handlers::posts::get_post))
                    .route("/{id}", web::patch().to(handlers::posts::update_post))
                    .route("/{id}", web::delete().to(handlers::posts::delete_post)),
            )
            .service(
                web::scope("/comments")
                    .route("", web::post().to(handlers::comments::create_comment))
                    .route("/reply", web::post().to(handlers::comments::create_reply))
                    .route(
                        "/replies/{comment_id}",
                        web::get().to(handlers::comments::list_comment_replies),
                    )
                    .route(
                        "/{post_id}",
                        web::get().to(handlers::comments::list_post_comments),
                    )
                    .route(
                        "/{comment_id}",
                        web::delete().to(handlers::comments::delete_comment),
                    ),
            )
    })
    .bind(bind_addr.clone())
    .with_context(|| format!("Failed to bind {}:{}", bind_addr.0, bind_addr.1))?
    .run()
    .await?;

    Ok(())
}
