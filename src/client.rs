//! Async client for the aaio API.
//!
//! [`AaioClient`] exposes one method per API operation. Remote calls are
//! independent request/response round trips; the only local operation is
//! [`AaioClient::generate_payment_url`], which signs a link without touching
//! the network.

use std::collections::BTreeMap;

use reqwest::Method;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::info;
use url::Url;

use crate::auth::{API_KEY_HEADER, sign};
use crate::config::AaioConfig;
use crate::models::{
    Balance, ExternalId, MethodList, Order, OrderMethodInfo, PaymentLink, Validate, Withdrawal,
    WithdrawalInfo, WithdrawalMethodInfo, WithdrawalRequest, decode,
};
use crate::params::Params;
use crate::tls::build_tls_config;
use crate::transport::HttpTransport;
use crate::{AaioError, Result};

const PAY_PATH: &str = "/merchant/pay";
const BALANCE_PATH: &str = "/api/balance";
const ORDER_INFO_PATH: &str = "/api/info-pay";
const ORDER_METHODS_PATH: &str = "/api/methods-pay";
const WITHDRAWAL_METHODS_PATH: &str = "/api/methods-payoff";
const WITHDRAWAL_INFO_PATH: &str = "/api/info-payoff";
const CREATE_WITHDRAWAL_PATH: &str = "/api/create-payoff";

/// Client for the aaio merchant API.
///
/// Cheap to share behind an `Arc`; concurrent calls do not interact.
#[derive(Debug)]
pub struct AaioClient {
    config: AaioConfig,
    base_url: Url,
    transport: HttpTransport,
}

impl AaioClient {
    /// Creates a client from `config`.
    ///
    /// Credentials are not checked here; each operation checks the ones it
    /// needs.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the TLS configuration
    /// cannot be built.
    pub fn new(config: AaioConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let tls_config = build_tls_config(config.ca_file.as_deref())?;
        let transport = HttpTransport::new(tls_config)?;

        Ok(Self {
            config,
            base_url,
            transport,
        })
    }

    /// Returns the client's configuration.
    #[must_use]
    pub fn config(&self) -> &AaioConfig {
        &self.config
    }

    /// Builds a signed payment link.
    ///
    /// Runs locally. The `amount` and `order_id` strings placed in the link
    /// are the exact strings that are signed.
    ///
    /// # Errors
    ///
    /// Returns [`AaioError::Config`] if the secret key or shop ID is not set,
    /// and [`AaioError::Validation`] if the order ID is blank.
    pub fn generate_payment_url(&self, link: &PaymentLink) -> Result<String> {
        let secret_key = self.config.require_secret_key()?;
        let shop_id = self.config.require_shop_id()?;

        let order_id = link.order_id();
        if order_id.is_empty() {
            return Err(AaioError::Validation("order ID must not be empty".to_string()));
        }

        let amount = link.amount().to_string();
        let signature = sign(shop_id, &amount, link.currency(), secret_key, &order_id);

        let mut url = self.base_url.join(PAY_PATH)?;
        url.query_pairs_mut()
            .extend_pairs(link.params(shop_id).as_slice())
            .append_pair("sign", &signature);

        Ok(url.into())
    }

    /// Fetches the available, held and referral balances.
    ///
    /// # Errors
    ///
    /// Returns [`AaioError::Config`] if the API key is not set, or any
    /// transport, remote or validation error.
    pub async fn get_balance(&self) -> Result<Balance> {
        self.call(BALANCE_PATH, None).await
    }

    /// Looks up an order by the identifier used in the payment link.
    ///
    /// # Errors
    ///
    /// Returns [`AaioError::Config`] if the shop ID or API key is not set,
    /// or any transport, remote or validation error.
    pub async fn get_order_info(&self, order_id: impl Into<ExternalId>) -> Result<Order> {
        let shop_id = self.config.require_shop_id()?;
        let order_id: ExternalId = order_id.into();
        let params = Params::new()
            .with("merchant_id", shop_id)
            .with("order_id", order_id);

        self.call(ORDER_INFO_PATH, Some(params)).await
    }

    /// Lists the payoff methods and their limits, keyed by method code.
    ///
    /// # Errors
    ///
    /// Returns [`AaioError::Config`] if the API key is not set, or any
    /// transport, remote or validation error.
    pub async fn withdrawal_methods(&self) -> Result<BTreeMap<String, WithdrawalMethodInfo>> {
        let methods: MethodList<WithdrawalMethodInfo> =
            self.call(WITHDRAWAL_METHODS_PATH, None).await?;
        Ok(methods.list)
    }

    /// Returns the limits of a single payoff method.
    ///
    /// # Errors
    ///
    /// Returns [`AaioError::MethodNotFound`] if `method` is not offered, plus
    /// the errors of [`Self::withdrawal_methods`].
    pub async fn withdrawal_method(&self, method: &str) -> Result<WithdrawalMethodInfo> {
        let mut methods = self.withdrawal_methods().await?;
        methods
            .remove(method)
            .ok_or_else(|| AaioError::MethodNotFound(method.to_string()))
    }

    /// Lists the payment methods available to the shop, keyed by method code.
    ///
    /// # Errors
    ///
    /// Returns [`AaioError::Config`] if the shop ID or API key is not set,
    /// or any transport, remote or validation error.
    pub async fn order_methods(&self) -> Result<BTreeMap<String, OrderMethodInfo>> {
        let shop_id = self.config.require_shop_id()?;
        let params = Params::new().with("merchant_id", shop_id);

        let methods: MethodList<OrderMethodInfo> =
            self.call(ORDER_METHODS_PATH, Some(params)).await?;
        Ok(methods.list)
    }

    /// Returns the limits of a single payment method.
    ///
    /// # Errors
    ///
    /// Returns [`AaioError::MethodNotFound`] if `method` is not offered, plus
    /// the errors of [`Self::order_methods`].
    pub async fn order_method(&self, method: &str) -> Result<OrderMethodInfo> {
        let mut methods = self.order_methods().await?;
        methods
            .remove(method)
            .ok_or_else(|| AaioError::MethodNotFound(method.to_string()))
    }

    /// Looks up a withdrawal by the caller's identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AaioError::Config`] if the API key is not set, or any
    /// transport, remote or validation error.
    pub async fn get_withdrawal_info(&self, my_id: impl Into<ExternalId>) -> Result<WithdrawalInfo> {
        let my_id: ExternalId = my_id.into();
        let params = Params::new().with("my_id", my_id);
        self.call(WITHDRAWAL_INFO_PATH, Some(params)).await
    }

    /// Creates a withdrawal.
    ///
    /// # Errors
    ///
    /// Returns [`AaioError::Config`] if the API key is not set, or any
    /// transport, remote or validation error. Limits and balance are
    /// enforced by the server and surface as [`AaioError::Remote`].
    pub async fn create_withdrawal(&self, request: &WithdrawalRequest) -> Result<Withdrawal> {
        let withdrawal: Withdrawal = self
            .call(CREATE_WITHDRAWAL_PATH, Some(request.params()))
            .await?;

        info!(
            id = %withdrawal.id,
            my_id = %withdrawal.my_id,
            status = %withdrawal.status,
            "withdrawal created"
        );
        Ok(withdrawal)
    }

    /// Performs an authenticated POST and maps the payload onto `T`.
    async fn call<T>(&self, path: &str, params: Option<Params>) -> Result<T>
    where
        T: DeserializeOwned + Validate,
    {
        let headers = self.auth_headers()?;
        let url = self.base_url.join(path)?;
        let payload = self
            .transport
            .request(Method::POST, url, params.as_ref(), headers)
            .await?;

        decode(payload)
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let api_key = self.config.require_api_key()?;
        let mut api_key = HeaderValue::from_str(api_key)
            .map_err(|_| AaioError::Config("API key is not a valid header value".to_string()))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, api_key);
        Ok(headers)
    }
}
