pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod utils;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use secrecy::{ExposeSecret, Secret};
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{http_trace_layer, request_id_middleware},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ProvisioningConfig;
use crate::middleware::API_KEY_HEADER;
use crate::services::{
    ContextStore, HttpMistConnector, MistConnector, RedisContextStore, SessionRepository,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::status,
        handlers::health_check,
        handlers::readiness,
        handlers::org::resolve_self,
        handlers::context::get_context,
        handlers::context::delete_context,
        handlers::sites::create_site,
        handlers::sites::list_sites,
        handlers::inventory::assign_devices,
        handlers::inventory::claim_devices,
        handlers::inventory::list_devices,
        handlers::inventory::get_device,
        handlers::wan::create_application,
        handlers::wan::create_hub_profile,
        handlers::wan::create_gateway_template,
        handlers::wan::list_applications,
        handlers::wan::list_gateway_templates,
        handlers::wan::create_traffic_steering,
        handlers::wired::create_network,
        handlers::wired::create_switch_template,
        handlers::wired::list_networks,
        handlers::wired::list_switch_templates,
        handlers::wired::create_port_profile,
        handlers::wireless::create_rf_template,
        handlers::wireless::create_wlan_template,
        handlers::wireless::create_wlan,
        handlers::wireless::create_label,
        handlers::wireless::create_wxrule,
        handlers::wireless::create_org_psk,
        handlers::wireless::list_rf_templates,
        handlers::wireless::list_wlan_templates,
        handlers::wireless::list_wlans,
        handlers::wireless::list_labels,
        handlers::wireless::list_org_psks,
        handlers::assurance::get_site_health,
        handlers::assurance::list_sites_health,
        handlers::assurance::get_device_health,
        handlers::assurance::list_clients,
        handlers::assurance::get_client,
        handlers::assurance::list_alerts,
        handlers::assurance::get_alert,
        handlers::assurance::acknowledge_alerts,
        handlers::assurance::get_sle_report,
        handlers::assurance::get_category_sle,
        handlers::assurance::query_marvis,
        handlers::assurance::get_marvis_actions,
        handlers::assurance::get_marvis_insights,
    ),
    components(
        schemas(
            dtos::ErrorResponse,
            dtos::NotImplementedResponse,
            dtos::PolicyAction,
            dtos::org::SelfRequest,
            dtos::org::ContextResponse,
            dtos::org::ContextDeletedResponse,
            services::SessionContext,
            dtos::sites::SiteCreateRequest,
            dtos::sites::SiteResponse,
            dtos::sites::SiteListResponse,
            dtos::inventory::DeviceAssignment,
            dtos::inventory::ClaimDevice,
            dtos::wan::ApplicationCreate,
            dtos::wan::HubProfileCreate,
            dtos::wan::GatewayTemplateCreate,
            dtos::wan::TrafficSteeringCreate,
            dtos::wired::NetworkCreate,
            dtos::wired::SwitchTemplateCreate,
            dtos::wired::PortMode,
            dtos::wired::PortProfileCreate,
            dtos::wireless::RfTemplateCreate,
            dtos::wireless::TemplateScope,
            dtos::wireless::WlanTemplateCreate,
            dtos::wireless::AuthType,
            dtos::wireless::WlanBand,
            dtos::wireless::WlanCreate,
            dtos::wireless::LabelType,
            dtos::wireless::LabelCreate,
            dtos::wireless::WxRuleCreate,
            dtos::wireless::PskUsage,
            dtos::wireless::OrgPskCreate,
            dtos::assurance::Severity,
            dtos::assurance::AlertAcknowledge,
            dtos::assurance::TimeRange,
            dtos::assurance::SleCategory,
            dtos::assurance::MarvisQuery,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Day 0 - Identity", description = "Credential identity and session context"),
        (name = "Day 0 - Sites", description = "Site provisioning"),
        (name = "Day 0 - Inventory", description = "Device claim and assignment"),
        (name = "Day 1 - WAN", description = "Applications, hubs and gateway templates"),
        (name = "Day 1 - Wired", description = "Networks, switch templates and port profiles"),
        (name = "Day 1 - Wireless", description = "RF templates, WLANs, labels, rules and PSKs"),
        (name = "Day 2 - Assurance", description = "Health, alerts, SLEs and Marvis"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "mist_api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-Mist-API-Key"))),
            );
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub environment: String,
}

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionRepository,
    pub mist: Arc<dyn MistConnector>,
    /// Host used when `POST /org/self` names none
    pub default_api_host: String,
    /// Operator credential for requests without `X-Mist-API-Key`
    pub fallback_api_key: Option<Secret<String>>,
    pub service: ServiceInfo,
}

impl AppState {
    pub fn new(
        config: &ProvisioningConfig,
        store: Arc<dyn ContextStore>,
        mist: Arc<dyn MistConnector>,
    ) -> Self {
        Self {
            sessions: SessionRepository::new(
                store,
                config.context.key_prefix.clone(),
                config.context.ttl_seconds,
            ),
            mist,
            default_api_host: config.mist.default_api_host.clone(),
            fallback_api_key: config
                .mist
                .fallback_key()
                .map(|key| Secret::new(key.to_string())),
            service: ServiceInfo {
                name: config.service_name.clone(),
                version: config.service_version.clone(),
                environment: format!("{:?}", config.environment).to_lowercase(),
            },
        }
    }
}

pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let identity = Router::new()
        .route("/org/self", post(handlers::org::resolve_self))
        .route(
            "/context/",
            get(handlers::context::get_context)
                .delete(handlers::context::delete_context),
        )
        .route(
            "/context",
            get(handlers::context::get_context)
                .delete(handlers::context::delete_context),
        );

    let sites = Router::new()
        .route(
            "/sites/",
            get(handlers::sites::list_sites)
                .post(handlers::sites::create_site),
        )
        .route(
            "/sites",
            get(handlers::sites::list_sites)
                .post(handlers::sites::create_site),
        );

    let inventory = Router::new()
        .route(
            "/inventory/assign",
            post(handlers::inventory::assign_devices),
        )
        .route("/inventory/claim", post(handlers::inventory::claim_devices))
        .route("/inventory/devices", get(handlers::inventory::list_devices))
        .route(
            "/inventory/devices/:serial",
            get(handlers::inventory::get_device),
        );

    let wan = Router::new()
        .route(
            "/wan/applications",
            get(handlers::wan::list_applications)
                .post(handlers::wan::create_application),
        )
        .route("/wan/hub-profiles", post(handlers::wan::create_hub_profile))
        .route(
            "/wan/gateway-templates",
            get(handlers::wan::list_gateway_templates)
                .post(handlers::wan::create_gateway_template),
        )
        .route(
            "/wan/traffic-steering",
            post(handlers::wan::create_traffic_steering),
        );

    let wired = Router::new()
        .route(
            "/wired/networks",
            get(handlers::wired::list_networks)
                .post(handlers::wired::create_network),
        )
        .route(
            "/wired/templates",
            get(handlers::wired::list_switch_templates)
                .post(handlers::wired::create_switch_template),
        )
        .route(
            "/wired/port-profiles",
            post(handlers::wired::create_port_profile),
        );

    let wireless = Router::new()
        .route(
            "/wireless/rf-templates",
            get(handlers::wireless::list_rf_templates)
                .post(handlers::wireless::create_rf_template),
        )
        .route(
            "/wireless/wlan-templates",
            get(handlers::wireless::list_wlan_templates)
                .post(handlers::wireless::create_wlan_template),
        )
        .route(
            "/wireless/wlans",
            get(handlers::wireless::list_wlans)
                .post(handlers::wireless::create_wlan),
        )
        .route(
            "/wireless/labels",
            get(handlers::wireless::list_labels)
                .post(handlers::wireless::create_label),
        )
        .route("/wireless/wxrules", post(handlers::wireless::create_wxrule))
        .route(
            "/wireless/org-psks",
            get(handlers::wireless::list_org_psks)
                .post(handlers::wireless::create_org_psk),
        );

    let assurance = Router::new()
        .route(
            "/assurance/health/sites",
            get(handlers::assurance::list_sites_health),
        )
        .route(
            "/assurance/health/sites/:site_id",
            get(handlers::assurance::get_site_health),
        )
        .route(
            "/assurance/health/devices/:device_id",
            get(handlers::assurance::get_device_health),
        )
        .route(
            "/assurance/clients/:site_id",
            get(handlers::assurance::list_clients),
        )
        .route(
            "/assurance/clients/:site_id/:client_mac",
            get(handlers::assurance::get_client),
        )
        .route("/assurance/alerts", get(handlers::assurance::list_alerts))
        .route(
            "/assurance/alerts/acknowledge",
            post(handlers::assurance::acknowledge_alerts),
        )
        .route(
            "/assurance/alerts/:alert_id",
            get(handlers::assurance::get_alert),
        )
        .route(
            "/assurance/sle/:site_id",
            get(handlers::assurance::get_sle_report),
        )
        .route(
            "/assurance/sle/:category/:site_id",
            get(handlers::assurance::get_category_sle),
        )
        .route(
            "/assurance/marvis/query",
            post(handlers::assurance::query_marvis),
        )
        .route(
            "/assurance/marvis/actions",
            get(handlers::assurance::get_marvis_actions),
        )
        .route(
            "/assurance/marvis/insights",
            get(handlers::assurance::get_marvis_insights),
        );

    Router::new()
        .route("/", get(handlers::root))
        .route("/status", get(handlers::status))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness))
        .route("/metrics", get(handlers::metrics))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(identity)
        .merge(sites)
        .merge(inventory)
        .merge(wan)
        .merge(wired)
        .merge(wireless)
        .merge(assurance)
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(http_trace_layer())
        .layer(from_fn(request_id_middleware))
        .layer(cors_layer(allowed_origins))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(allowed_origins.iter().filter_map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(API_KEY_HEADER),
            HeaderName::from_static("x-request-id"),
        ])
}

pub struct Application {
    port: u16,
    router: Router,
}

impl Application {
    pub async fn build(config: ProvisioningConfig) -> anyhow::Result<Self> {
        let store = RedisContextStore::new(config.redis.url.expose_secret())?;
        let timeout = Duration::from_secs(config.mist.request_timeout_seconds);
        let mist = HttpMistConnector::new(timeout)?;

        let state = AppState::new(&config, Arc::new(store), Arc::new(mist));
        let router = build_router(state, &config.security.allowed_origins);

        Ok(Self {
            port: config.common.port,
            router,
        })
    }

    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        tracing::info!("Listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
