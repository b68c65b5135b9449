use account_store::{config::AppConfig, telemetry, AccountStore};
use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init(&config.log)?;

    let store = AccountStore::from_config(&config)
        .await
        .context("open account store")?;
    tracing::debug!(path = %store.path().display(), "store ready");

    let demo = (
        std::env::var("DEMO_USERNAME"),
        std::env::var("DEMO_PASSWORD"),
        std::env::var("DEMO_EMAIL"),
    );
    let (Ok(username), Ok(password), Ok(email)) = demo else {
        tracing::info!("DEMO_USERNAME, DEMO_PASSWORD and DEMO_EMAIL not all set; nothing to do");
        store.close().await;
        return Ok(());
    };

    match store.create(&username, &password, &email).await {
        Ok(id) => tracing::info!(user_id = %id, "demo user registered"),
        Err(e) if e.is_duplicate() => tracing::info!(error = %e, "demo user exists"),
        Err(e) => return Err(e).context("create demo user"),
    }

    let Some(id) = store.authenticate(&username, &password).await? else {
        store.close().await;
        anyhow::bail!("demo credentials rejected");
    };

    let user = store
        .get_by_id(id)
        .await?
        .context("authenticated user vanished")?;
    println!("{}", serde_json::to_string_pretty(&user)?);

    store.close().await;
    Ok(())
}
