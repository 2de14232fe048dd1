mod common;

use axum::extract::State;
use coffee_shop_api::routes::health::health_check;

#[tokio::test]
async fn health_check_reports_unreachable_database() -> anyhow::Result<()> {
    let state = common::offline_state()?;
    let response = health_check(State(state)).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.database, "unavailable");
    Ok(())
}

#[tokio::test]
async fn health_check_reaches_configured_database() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let data = health_check(State(state)).await.0.data.expect("health data");
    assert_eq!(data.database, "ok");
    Ok(())
}
