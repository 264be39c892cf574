//! API 스타터 백엔드 메인 애플리케이션
//!
//! 설정을 읽고 데이터베이스와 서비스 레지스트리를 구성한 뒤
//! Actix-web HTTP 서버를 구동합니다.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use api_starter_backend::config::{AppSettings, CorsSettings, RateLimitSettings};
use api_starter_backend::core::registry::ServiceRegistry;
use api_starter_backend::db::Database;
use api_starter_backend::handlers::docs;
use api_starter_backend::middlewares::RequestTelemetry;
use api_starter_backend::routes;
use api_starter_backend::services::auth::TokenService;
use api_starter_backend::utils::display_terminal::print_boxed_title;

/// 이름 붙은 정책으로 Governor 설정을 만듭니다.
macro_rules! rate_limiter {
    ($settings:expr, $name:expr) => {{
        let policy = $settings.policy($name);
        info!(
            "🛡️ Rate Limiting [{}]: 초당 {}요청, 버스트 {}개",
            $name, policy.per_second, policy.burst_size
        );
        GovernorConfigBuilder::default()
            .requests_per_second(policy.per_second)
            .burst_size(policy.burst_size)
            .use_headers()
            .finish()
            .ok_or_else(|| startup_error(format!("잘못된 Rate Limiting 정책 `{}`: {:?}", $name, policy)))
    }};
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 API 스타터 백엔드 시작중...");

    let settings = AppSettings::from_env().map_err(startup_error)?;
    info!("환경: {:?}", settings.environment);

    let database = initialize_database(&settings).await?;
    let registry = build_registry(&settings, database);

    info!("✅ 모든 서비스가 성공적으로 등록되었습니다!");

    start_http_server(settings, registry).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 미들웨어는 바깥쪽부터 경로 정규화, 요청 텔레메트리, CORS, 압축,
/// 전역 Rate Limiting 순으로 적용됩니다. 토큰 발급 스코프에는 `auth` 정책이
/// 추가로 적용됩니다.
///
/// # Errors
///
/// * `std::io::Error` - 잘못된 Rate Limiting 정책, 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(
    settings: AppSettings,
    registry: web::Data<ServiceRegistry>,
) -> io::Result<()> {
    let bind_address = settings.server.bind_address();
    let docs_enabled = settings.api_docs_enabled;

    let global_limiter = rate_limiter!(settings.rate_limits, RateLimitSettings::GLOBAL)?;
    let auth_limiter = rate_limiter!(settings.rate_limits, RateLimitSettings::AUTH)?;
    let cors_settings = settings.cors.clone();

    print_boxed_title(&format!("{} v{}", settings.app_name, env!("CARGO_PKG_VERSION")));
    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    if docs_enabled {
        info!("📍 API Docs: http://{}/swagger/", bind_address);
    }

    HttpServer::new(move || {
        App::new()
            .app_data(registry.clone())
            .wrap(Governor::new(&global_limiter))
            .wrap(middleware::Compress::default())
            .wrap(configure_cors(&cors_settings))
            .wrap(RequestTelemetry)
            .wrap(middleware::NormalizePath::trim())
            .service(routes::auth_scope().wrap(Governor::new(&auth_limiter)))
            .configure(routes::configure_all_routes)
            .configure(|cfg| {
                if docs_enabled {
                    docs::configure(cfg);
                }
            })
    })
    .bind(&bind_address)?
    .workers(settings.server.workers)
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
///
/// ```bash
/// PROFILE=prod cargo run
/// ```
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 결과는 표준 출력으로 남깁니다.
    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => println!("[{}] .env.prod 파일 로드 됨", profile),
            Err(e) => eprintln!("[{}] .env.prod 파일 로드 실패: {}", profile, e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => println!("[{}] .env.dev 파일 로드 됨", profile),
            Err(e) => eprintln!("[{}] .env.dev 파일 로드 실패: {}", profile, e),
        },
        _ => {
            dotenv().ok();
            println!("[{}] 기본 .env 파일 로드", profile);
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// RUST_LOG=api_starter_backend::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// 데이터베이스에 연결하고 필요하면 스키마를 생성합니다
async fn initialize_database(settings: &AppSettings) -> io::Result<Database> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::connect(&settings.database)
        .await
        .map_err(startup_error)?;

    if settings.database.auto_migrate {
        database.ensure_schema().await.map_err(startup_error)?;
    }

    info!("✅ 데이터베이스 연결 성공");
    Ok(database)
}

/// 싱글톤을 등록하고 `inventory`로 수집된 컴포넌트를 발견합니다
fn build_registry(settings: &AppSettings, database: Database) -> web::Data<ServiceRegistry> {
    let mut builder = ServiceRegistry::builder();
    builder
        .singleton(Arc::new(settings.clone()))
        .singleton(Arc::new(database))
        .singleton(Arc::new(TokenService::new(settings.jwt.clone())))
        .discover();

    let registry = builder.build();
    registry.print_summary();
    web::Data::new(registry)
}

/// 설정된 Origin만 허용하는 CORS 미들웨어
fn configure_cors(settings: &CorsSettings) -> Cors {
    settings
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .expose_headers(vec![header::LOCATION])
        .supports_credentials()
        .max_age(settings.max_age)
}

fn startup_error(e: impl std::fmt::Display) -> io::Error {
    error!("❌ 시작 실패: {}", e);
    io::Error::other(e.to_string())
}
