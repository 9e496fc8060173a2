use super::parsing::{
    env_optional, env_or_default, parse_bool, parse_cors_origins, parse_environment,
    parse_route_path, parse_u16, parse_u64,
};
use super::secret::load_or_create_secret_key;
use super::types::{
    AdminSettings, ApiSettings, ConfigError, CorsSettings, DatabaseSettings, RoutesSettings,
    RuntimeSettings, SecuritySettings, ServerHost, ServerPort, ServerSettings, Settings,
    TelemetrySettings,
};

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let host = env_or_default("INTERNDESK_HOST", "0.0.0.0");
        let port = env_or_default("INTERNDESK_PORT", "8000");

        let environment = parse_environment(
            env_optional("INTERNDESK_ENV").or_else(|| env_optional("ENVIRONMENT")),
        );
        let strict_config = env_optional("INTERNDESK_STRICT_CONFIG")
            .map(|value| parse_bool(&value))
            .unwrap_or(false)
            || environment.is_production();

        let project_name = env_or_default("PROJECT_NAME", "InternDesk API");
        let version = env_or_default("VERSION", env!("CARGO_PKG_VERSION"));
        let api_v1_str = env_or_default("API_V1_STR", "/api/v1");

        let secret_key = match env_optional("SECRET_KEY") {
            Some(value) => value,
            None => load_or_create_secret_key(),
        };

        let access_token_expire_minutes = parse_u64(
            "ACCESS_TOKEN_EXPIRE_MINUTES",
            env_or_default("ACCESS_TOKEN_EXPIRE_MINUTES", "10080"),
        )?;
        let algorithm = env_or_default("ALGORITHM", "HS256");

        let cors_origins = parse_cors_origins(env_optional("BACKEND_CORS_ORIGINS"))?;

        let postgres_server = env_or_default("POSTGRES_SERVER", "localhost");
        let postgres_port = parse_u16("POSTGRES_PORT", env_or_default("POSTGRES_PORT", "5432"))?;
        let postgres_user = env_or_default("POSTGRES_USER", "interndesk");
        let postgres_password = env_or_default("POSTGRES_PASSWORD", "");
        let postgres_db = env_or_default("POSTGRES_DB", "interndesk_db");
        let database_url = env_optional("DATABASE_URL");

        // The delivery store shares the Postgres server by default but always
        // lives in its own database.
        let delivery_db = env_or_default("POSTGRES_DELIVERY_DB", "interndesk_delivery_db");
        let delivery_database_url = env_optional("DELIVERY_DATABASE_URL");

        let first_superuser_username = env_or_default("FIRST_SUPERUSER_USERNAME", "admin");
        let first_superuser_password = env_or_default("FIRST_SUPERUSER_PASSWORD", "");

        let ppt_viewer_path =
            parse_route_path("PPT_VIEWER_PATH", env_or_default("PPT_VIEWER_PATH", "/view-ppt"))?;
        let pdf_viewer_path = parse_route_path(
            "PDF_VIEWER_PATH",
            env_or_default("PDF_VIEWER_PATH", "/view-pdf-secure"),
        )?;
        let assignments_base =
            parse_route_path("ASSIGNMENTS_BASE", env_or_default("ASSIGNMENTS_BASE", "/courses"))?;
        let practice_base =
            parse_route_path("PRACTICE_BASE", env_or_default("PRACTICE_BASE", "/practice"))?;

        let log_level = env_or_default("INTERNDESK_LOG_LEVEL", "info");
        let json = env_optional("INTERNDESK_LOG_JSON")
            .map(|value| parse_bool(&value))
            .unwrap_or(false);
        let prometheus_enabled = env_optional("PROMETHEUS_ENABLED")
            .map(|value| parse_bool(&value))
            .unwrap_or(false);

        let settings = Self {
            server: ServerSettings {
                host: ServerHost::parse(host)?,
                port: ServerPort::parse(port)?,
            },
            runtime: RuntimeSettings { environment, strict_config },
            api: ApiSettings { project_name, version, api_v1_str },
            security: SecuritySettings { secret_key, access_token_expire_minutes, algorithm },
            cors: CorsSettings { origins: cors_origins },
            database: DatabaseSettings {
                postgres_server: postgres_server.clone(),
                postgres_port,
                postgres_user: postgres_user.clone(),
                postgres_password: postgres_password.clone(),
                postgres_db,
                database_url,
            },
            delivery_database: DatabaseSettings {
                postgres_server,
                postgres_port,
                postgres_user,
                postgres_password,
                postgres_db: delivery_db,
                database_url: delivery_database_url,
            },
            admin: AdminSettings { first_superuser_username, first_superuser_password },
            routes: RoutesSettings {
                ppt_viewer_path,
                pdf_viewer_path,
                assignments_base,
                practice_base,
            },
            telemetry: TelemetrySettings { log_level, json, prometheus_enabled },
        };

        settings.validate()?;
        Ok(settings)
    }

    pub(crate) fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host.0, self.server.port.0)
    }

    pub(crate) fn server_host(&self) -> &str {
        &self.server.host.0
    }

    pub(crate) fn server_port(&self) -> u16 {
        self.server.port.0
    }

    pub(crate) fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub(crate) fn security(&self) -> &SecuritySettings {
        &self.security
    }

    pub(crate) fn cors(&self) -> &CorsSettings {
        &self.cors
    }

    pub(crate) fn database(&self) -> &DatabaseSettings {
        &self.database
    }

    pub(crate) fn delivery_database(&self) -> &DatabaseSettings {
        &self.delivery_database
    }

    pub(crate) fn admin(&self) -> &AdminSettings {
        &self.admin
    }

    pub(crate) fn routes(&self) -> &RoutesSettings {
        &self.routes
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.runtime.strict_config || self.runtime.environment.is_production()) {
            return Ok(());
        }

        if self.database.database_url.is_none() && self.database.postgres_password.is_empty() {
            return Err(ConfigError::MissingSecret("POSTGRES_PASSWORD"));
        }
        if self.admin.first_superuser_password.is_empty() {
            return Err(ConfigError::MissingSecret("FIRST_SUPERUSER_PASSWORD"));
        }

        Ok(())
    }
}
