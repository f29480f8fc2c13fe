//! # orgsyncd — orgsync daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env var overrides)
//! - Initialize tracing
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the member-mapping delegate from the silo mode: the
//!   database-backed service in `monolith`/`control` mode, the reqwest
//!   proxy in `region` mode
//! - Construct application services, injecting adapters via port traits
//! - Build the axum router, bind, and serve with graceful shutdown
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use anyhow::Context;

use orgsync_adapter_http_axum::state::AppState;
use orgsync_adapter_rpc_reqwest::RpcMemberMappingClient;
use orgsync_adapter_storage_sqlite_sqlx::{
    Config as DbConfig, SqliteAccessGroupRepository, SqliteMemberMappingRepository,
    SqliteOrganizationMemberRepository, SqliteOrganizationRepository, SqliteTeamRepository,
};
use orgsync_app::delegation::MemberMappingDelegate;
use orgsync_app::services::access_group_service::AccessGroupService;
use orgsync_app::services::member_mapping_service::DatabaseMemberMappingService;
use orgsync_app::services::organization_member_service::OrganizationMemberService;

type Delegate = MemberMappingDelegate<
    DatabaseMemberMappingService<SqliteMemberMappingRepository>,
    RpcMemberMappingClient,
>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = DbConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Member-mapping delegate, selected once from the silo mode. The member
    // service carries its own instance so both it and the RPC endpoints can
    // dispatch without sharing.
    let make_delegate = || -> anyhow::Result<Delegate> {
        if Delegate::runs_locally(config.silo.mode) {
            Ok(MemberMappingDelegate::Local(
                DatabaseMemberMappingService::new(SqliteMemberMappingRepository::new(pool.clone())),
            ))
        } else {
            let control_url = config
                .silo
                .control_url
                .as_deref()
                .context("silo.control_url is required in region mode")?;
            Ok(MemberMappingDelegate::Remote(RpcMemberMappingClient::new(
                control_url,
            )))
        }
    };

    // Services
    let mapping_service = make_delegate()?;
    let member_service = OrganizationMemberService::new(
        SqliteOrganizationRepository::new(pool.clone()),
        SqliteOrganizationMemberRepository::new(pool.clone()),
        make_delegate()?,
    );
    let access_group_service = AccessGroupService::new(
        SqliteTeamRepository::new(pool.clone()),
        SqliteAccessGroupRepository::new(pool),
    );

    // HTTP
    let state = AppState::new(mapping_service, member_service, access_group_service);
    let app = orgsync_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(addr = %bind_addr, mode = %config.silo.mode, "orgsyncd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install sigterm handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
