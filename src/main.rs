//! Demo binary.
//!
//! - `aaio` logs the balance and, when a shop ID is configured, the payment methods
//! - `aaio store` saves the `AAIO_*` credentials from the environment to the keychain
//! - `aaio forget` removes them from the keychain

use aaio::credentials::{Keychain, populate_env_from_keychain};
use aaio::{AaioClient, AaioError, fetch_config};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), AaioError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match std::env::args().nth(1).as_deref() {
        Some("store") => store(),
        Some("forget") => forget(),
        Some(other) => Err(AaioError::Config(format!(
            "unknown command {other:?}, expected store or forget"
        ))),
        None => {
            // Must run before the runtime starts its worker threads.
            populate_env_from_keychain();

            let runtime = tokio::runtime::Runtime::new()
                .map_err(|e| AaioError::Config(format!("failed to start tokio runtime: {e}")))?;
            runtime.block_on(run())
        }
    }
}

fn store() -> Result<(), AaioError> {
    let stored = Keychain::default().store_config(&fetch_config()?)?;
    if stored.is_empty() {
        return Err(AaioError::Config(
            "none of AAIO_API_KEY, AAIO_SHOP_ID, AAIO_SECRET_KEY is set".to_string(),
        ));
    }
    info!(count = stored.len(), "credentials stored");
    Ok(())
}

fn forget() -> Result<(), AaioError> {
    let removed = Keychain::default().clear()?;
    info!(count = removed.len(), "credentials removed");
    Ok(())
}

async fn run() -> Result<(), AaioError> {
    let client = AaioClient::new(fetch_config()?)?;

    let balance = client.get_balance().await?;
    info!(
        available = %balance.balance,
        hold = %balance.hold,
        referral = %balance.referral,
        "balance"
    );

    if client.config().shop_id.is_some() {
        for (name, method) in client.order_methods().await? {
            info!(
                method = %name,
                min_rub = %method.min.rub,
                max_rub = %method.max.rub,
                commission_percent = %method.commission_percent,
                "payment method"
            );
        }
    }

    Ok(())
}
