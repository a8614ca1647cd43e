use little_lemon::app_system::{setup_tracing, AppConfig, LemonSystem};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = AppConfig::from_env();
    info!(database = %config.database_path.display(), "Starting Little Lemon");

    let system = LemonSystem::start(config).await.map_err(|e| e.to_string())?;
    let vm = &system.view_model;

    let onboarding = vm.onboarding().state();
    info!(logged_in = onboarding.logged_in, "Loaded user preferences");

    // Refresh failures are logged inside; the cached menu is still served
    if let Err(e) = vm.refresh_menu_items().await {
        warn!(error = %e, "Refresh task did not complete");
    }

    let menu = vm.menu_items().current();
    info!(item_count = menu.len(), categories = ?vm.categories(), "Menu ready");

    for item in &menu {
        info!(item_id = item.id, title = %item.title, price = item.price, category = %item.category, "Menu item");
    }

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
