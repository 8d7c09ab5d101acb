pub mod api; // REST client + the HospitalApi seam
pub mod config;
pub mod models;
pub mod receipt; // payment receipt rendering + export
pub mod session; // explicit login/logout session context
pub mod workflow; // appointment / bed / billing / dashboard orchestration

use tracing_subscriber::EnvFilter;

/// Initialize tracing for binaries and integration harnesses embedding
/// this crate. Honors `RUST_LOG`, defaults to `wardflow=info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("wardflow starting v{}", config::APP_VERSION);
}
