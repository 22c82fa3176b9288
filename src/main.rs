//! Humance API server.

use std::error::Error;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use humance::adapters::ai::{DisabledFeedbackGenerator, OpenAiFeedbackGenerator};
use humance::adapters::auth::{JwtSessionValidator, MockSessionValidator};
use humance::adapters::http::{api_router, ApiPorts, RouterSettings};
use humance::adapters::postgres::{
    run_migrations, PostgresBonusParametersStore, PostgresDashboardSettingsStore,
    PostgresKpiAssessmentRepository, PostgresKpiModelRepository, PostgresObservationRepository,
    PostgresOrgDirectory, PostgresReviewRepository, PostgresTemplateRepository,
};
use humance::adapters::{DirectorySeed, InMemoryStore, LoggingEventPublisher};
use humance::config::{AppConfig, DatabaseConfig, LogFormat, ServerConfig, StorageBackend};
use humance::domain::foundation::AuthenticatedUser;
use humance::ports::{EventPublisher, ReviewFeedbackGenerator, SessionValidator};

type BoxError = Box<dyn Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let seed = load_seed(&config.database)?;
    let session_validator = session_validator(&config, &seed)?;
    let feedback_generator: Arc<dyn ReviewFeedbackGenerator> =
        match config.feedback.client_config() {
            Some(client) => Arc::new(OpenAiFeedbackGenerator::new(client)?),
            None => {
                tracing::info!("feedback generation disabled");
                Arc::new(DisabledFeedbackGenerator)
            }
        };
    let event_publisher: Arc<dyn EventPublisher> = Arc::new(LoggingEventPublisher::new());

    let ports = match config.database.backend {
        StorageBackend::Memory => ApiPorts::in_memory(
            Arc::new(InMemoryStore::with_directory(seed)),
            event_publisher,
            feedback_generator,
            session_validator,
        ),
        StorageBackend::Postgres => {
            postgres_ports(
                &config.database,
                event_publisher,
                feedback_generator,
                session_validator,
            )
            .await?
        }
    };

    let settings = RouterSettings {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins_list(),
    };
    let app = api_router(ports, settings);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        backend = ?config.database.backend,
        environment = ?config.server.environment,
        "humance listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(server.log_level.clone()));

    let registry = tracing_subscriber::registry().with(filter);
    match server.log_format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}

fn load_seed(database: &DatabaseConfig) -> Result<DirectorySeed, BoxError> {
    let Some(path) = &database.seed_file else {
        return Ok(DirectorySeed::default());
    };
    let raw = std::fs::read_to_string(path)?;
    let seed: DirectorySeed = serde_json::from_str(&raw)?;
    tracing::info!(
        path = %path.display(),
        employees = seed.employees.len(),
        departments = seed.departments.len(),
        "loaded directory seed"
    );
    Ok(seed)
}

/// JWT validation when a secret is set, else `dev-<user id>` tokens for
/// every seeded employee.
fn session_validator(
    config: &AppConfig,
    seed: &DirectorySeed,
) -> Result<Arc<dyn SessionValidator>, BoxError> {
    if let Some(jwt) = config.auth.jwt_config() {
        return Ok(Arc::new(JwtSessionValidator::new(jwt)));
    }

    let validator = MockSessionValidator::new();
    for employee in &seed.employees {
        validator.add_token(
            format!("dev-{}", employee.id),
            AuthenticatedUser::new(
                employee.id.clone(),
                employee.email.clone(),
                Some(employee.name.clone()),
                employee.role,
            ),
        );
    }
    tracing::warn!(
        tokens = validator.token_count(),
        "using development tokens; do not expose this server"
    );
    Ok(Arc::new(validator))
}

async fn postgres_ports(
    database: &DatabaseConfig,
    event_publisher: Arc<dyn EventPublisher>,
    feedback_generator: Arc<dyn ReviewFeedbackGenerator>,
    session_validator: Arc<dyn SessionValidator>,
) -> Result<ApiPorts, BoxError> {
    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .idle_timeout(database.idle_timeout())
        .max_lifetime(database.max_lifetime())
        .connect(&database.url)
        .await?;

    if database.run_migrations {
        run_migrations(&pool).await?;
        tracing::info!("migrations applied");
    }

    Ok(ApiPorts {
        reviews: Arc::new(PostgresReviewRepository::new(pool.clone())),
        templates: Arc::new(PostgresTemplateRepository::new(pool.clone())),
        observations: Arc::new(PostgresObservationRepository::new(pool.clone())),
        kpi_models: Arc::new(PostgresKpiModelRepository::new(pool.clone())),
        kpi_assessments: Arc::new(PostgresKpiAssessmentRepository::new(pool.clone())),
        bonus: Arc::new(PostgresBonusParametersStore::new(pool.clone())),
        dashboard: Arc::new(PostgresDashboardSettingsStore::new(pool.clone())),
        directory: Arc::new(PostgresOrgDirectory::new(pool)),
        event_publisher,
        feedback_generator,
        session_validator,
    })
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
