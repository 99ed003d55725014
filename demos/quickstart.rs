use std::sync::Arc;

use gym_api_gateway::types::Credentials;
use gym_api_gateway::{ApiClient, Config, FileSessionStore};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional: enable basic logging for the example
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    // GYM_API_URL is required, everything else has a default
    let cfg = Config::from_env()?;
    let store = Arc::new(FileSessionStore::open("session.json")?);
    let client = ApiClient::builder(cfg).session_store(store).build()?;

    if !client.is_authenticated() {
        let username = std::env::var("GYM_USER")?;
        let password = std::env::var("GYM_PASSWORD")?;
        client.login(&Credentials::new(username, password)).await?;
    }

    let gyms: serde_json::Value = client.gyms().list().await?.into_json()?;
    println!("{}", serde_json::to_string_pretty(&gyms)?);

    let upcoming = client.bookings().upcoming().await?;
    println!("{}", upcoming.body);
    Ok(())
}
