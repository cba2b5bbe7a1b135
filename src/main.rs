//! End-to-end demo: register an account, track a few products, resolve a
//! duplicate, and read the dashboard.

use product_tracker::auth::{self, SignUpForm};
use product_tracker::config::TrackerConfig;
use product_tracker::lifecycle::{setup_tracing, TrackerSystem};
use product_tracker::model::{ProductDraft, ProductStatus};
use product_tracker::repository::{ReconcileChoice, SubmitOutcome};
use product_tracker::view;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting product tracker demo");

    let system = TrackerSystem::new(TrackerConfig::default());

    let span = tracing::info_span!("account_setup");
    async {
        let form = SignUpForm {
            name: "Avery Quinn".to_string(),
            email: "avery@example.com".to_string(),
            password: "hunter42".to_string(),
            repeat_password: "hunter42".to_string(),
        };
        auth::sign_up(system.identity.as_ref(), &form)
            .await
            .map_err(|e| e.to_string())?;
        auth::sign_in(system.identity.as_ref(), "avery@example.com", "hunter42")
            .await
            .map_err(|e| e.to_string())?;
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    // Track a few purchases
    let lamp = system
        .repository
        .create(ProductDraft::new("Vintage Lamp", 45.0, 12.0))
        .await
        .map_err(|e| e.to_string())?;
    system
        .repository
        .create(ProductDraft {
            status: ProductStatus::Delivered,
            quantity: Some(2),
            ..ProductDraft::new("Walnut Desk", 250.0, 180.0)
        })
        .await
        .map_err(|e| e.to_string())?;
    let clock = system
        .repository
        .create(ProductDraft {
            status: ProductStatus::Returned,
            ..ProductDraft::new("Brass Clock", 80.0, 35.0)
        })
        .await
        .map_err(|e| e.to_string())?;
    system.idle.touch();

    // Submitting the clock again collides with the returned entry
    let span = tracing::info_span!("duplicate_resolution");
    async {
        let outcome = system
            .repository
            .submit(ProductDraft::new("brass clock", 95.0, 40.0))
            .await
            .map_err(|e| e.to_string())?;
        match outcome {
            SubmitOutcome::DuplicateFound { existing, draft } => {
                info!(id = %existing.id, "Collision found, marking the original sold");
                system
                    .repository
                    .resolve(existing.id, draft, ReconcileChoice::MarkAsSold)
                    .await
                    .map_err(|e| e.to_string())?;
            }
            SubmitOutcome::Created(product) => {
                warn!(id = %product.id, "Expected a collision, created instead")
            }
        }
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    // A pending or delivered name collision is rejected outright
    if let Err(e) = system
        .repository
        .submit(ProductDraft::new("Walnut Desk", 300.0, 200.0))
        .await
    {
        info!(reason = %e, "Duplicate submission rejected as expected");
    }

    // Dashboard
    let products = system.repository.list().await.map_err(|e| e.to_string())?;
    let stats = view::summarize(&products);
    info!(
        total = stats.total,
        delivered = stats.delivered,
        spent = stats.total_spent,
        revenue = stats.total_revenue,
        "Dashboard totals"
    );
    for product in view::filter_products(&products, "clock", None) {
        info!(
            name = %product.name,
            status = %product.status,
            profit = product.profit(),
            "Search hit"
        );
    }

    // Sell the lamp, then drop it from the list
    system
        .repository
        .mark_as_sold(lamp.id)
        .await
        .map_err(|e| e.to_string())?;
    system
        .repository
        .delete(clock.id)
        .await
        .map_err(|e| e.to_string())?;

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
