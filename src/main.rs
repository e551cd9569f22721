use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, middleware, web};

use gympro::api::ApiClient;
use gympro::auth;
use gympro::auth::rate_limit::LoginThrottle;
use gympro::config::AppConfig;
use gympro::handlers;
use gympro::mailer::ContactMailer;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();
    let secret_key = config.session_key();

    let api = web::Data::new(ApiClient::new(config.api_base_url.clone()));
    let throttle = web::Data::new(LoginThrottle::new(
        config.login_max_attempts,
        config.login_window,
    ));
    let mailer = web::Data::new(ContactMailer::new(config.emailjs.clone()));
    if !mailer.is_configured() {
        log::warn!("EmailJS not configured, contact form submissions will fail");
    }

    let bind_addr = config.bind_addr.clone();
    let cookie_secure = config.cookie_secure;
    let config = web::Data::new(config);

    log::info!("Using backend at {}", api.base_url());
    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(api.clone())
            .app_data(config.clone())
            .app_data(throttle.clone())
            .app_data(mailer.clone())
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            // Public pages
            .route("/", web::get().to(handlers::pages::home))
            .route("/memberships", web::get().to(handlers::pages::memberships))
            .route("/contact", web::get().to(handlers::contact_handlers::form))
            .route("/contact", web::post().to(handlers::contact_handlers::submit))
            .route("/login", web::get().to(handlers::auth_handlers::login_page))
            .route("/login", web::post().to(handlers::auth_handlers::login_submit))
            .route("/register", web::get().to(handlers::auth_handlers::register_page))
            .route("/register", web::post().to(handlers::auth_handlers::register_submit))
            .route("/logout", web::post().to(handlers::auth_handlers::logout))
            // Admin
            .service(
                web::scope("/dashboard")
                    .wrap(middleware::from_fn(auth::middleware::require_admin))
                    .route("", web::get().to(handlers::dashboard::index)),
            )
            .service(
                web::scope("/members")
                    .wrap(middleware::from_fn(auth::middleware::require_admin))
                    .route("", web::get().to(handlers::member_handlers::list))
                    .route("", web::post().to(handlers::member_handlers::create))
                    .route("/new", web::get().to(handlers::member_handlers::new_form))
                    .route("/{id}/edit", web::get().to(handlers::member_handlers::edit_form))
                    .route("/{id}", web::post().to(handlers::member_handlers::update))
                    .route("/{id}/delete", web::post().to(handlers::member_handlers::delete)),
            )
            // Members
            .service(
                web::scope("/attendance")
                    .wrap(middleware::from_fn(auth::middleware::require_member))
                    .route("", web::get().to(handlers::attendance_handlers::page))
                    .route("/mark", web::post().to(handlers::attendance_handlers::mark)),
            )
            // Any signed-in user
            .service(
                web::scope("/payment")
                    .wrap(middleware::from_fn(auth::middleware::require_signed_in))
                    .route("", web::get().to(handlers::payment_handlers::page))
                    .route("", web::post().to(handlers::payment_handlers::create_order))
                    .route("/complete", web::get().to(handlers::payment_handlers::complete)),
            )
            .service(
                web::scope("/profile")
                    .wrap(middleware::from_fn(auth::middleware::require_signed_in))
                    .route("", web::post().to(handlers::account_handlers::update_profile)),
            )
            // Default 404 handler (must be registered last)
            .default_service(web::to(handlers::pages::not_found))
    })
    .bind(bind_addr)?
    .run()
    .await
}
