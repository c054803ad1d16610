use anyhow::{anyhow, Context, Result};
use serde_json::{json, Value};
use thiserror::Error;

/// User-visible failure modes of the balance lookup.
///
/// The `Display` strings are shown to the user verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// The endpoint answered, but the payload carried no usable balance field.
    #[error("잔액 정보 없음")]
    Unavailable,
    /// The request itself failed (transport error, bad status, non-JSON body).
    #[error("잔액 조회 실패")]
    Fetch,
}

/// Client for the wallet backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Resolve an address to its opaque wallet id, if one is registered.
    pub async fn find_wallet_id(&self, address: &str) -> Result<Option<String>> {
        let url = format!("{}/api/wallet/findWalletIdByAddress", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "account": address }))
            .send()
            .await
            .context("wallet id request failed")?;
        if !response.status().is_success() {
            return Err(anyhow!("wallet id lookup returned {}", response.status()));
        }
        let payload: Value = response
            .json()
            .await
            .context("wallet id response was not JSON")?;
        Ok(wallet_id_from_payload(&payload))
    }

    /// Fetch the password records registered to a wallet.
    pub async fn get_passwords(&self, wallet_id: &str) -> Result<Vec<Value>> {
        let url = format!("{}/api/password/getPasswords", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "walletAccountId": wallet_id }))
            .send()
            .await
            .context("password list request failed")?;
        if !response.status().is_success() {
            return Err(anyhow!("password lookup returned {}", response.status()));
        }
        let payload: Value = response
            .json()
            .await
            .context("password list response was not JSON")?;
        match payload {
            Value::Array(records) => Ok(records),
            other => Err(anyhow!("password list response was not an array: {other}")),
        }
    }

    /// Number of passwords registered for an address.
    ///
    /// Any failure along the way (missing wallet id included) degrades to 0,
    /// which routes the user to first-time registration.
    pub async fn password_count(&self, address: &str) -> usize {
        match self.try_password_count(address).await {
            Ok(count) => count,
            Err(err) => {
                log::warn!("password count lookup failed for {address}: {err:#}");
                0
            }
        }
    }

    async fn try_password_count(&self, address: &str) -> Result<usize> {
        let Some(wallet_id) = self.find_wallet_id(address).await? else {
            return Ok(0);
        };
        Ok(self.get_passwords(&wallet_id).await?.len())
    }

    /// On-chain balance of an address in satoshis.
    pub async fn balance(&self, address: &str) -> Result<u64, BalanceError> {
        let url = format!("{}/api/proxy-balance", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("address", address.trim())])
            .send()
            .await
            .map_err(|_| BalanceError::Fetch)?;
        if !response.status().is_success() {
            return Err(BalanceError::Fetch);
        }
        let payload: Value = response.json().await.map_err(|_| BalanceError::Fetch)?;
        balance_from_payload(&payload)
    }
}

/// A falsy payload (null, false, empty string, zero) means no wallet.
pub fn wallet_id_from_payload(payload: &Value) -> Option<String> {
    match payload {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) if id.as_u64() != Some(0) && id.as_i64() != Some(0) => {
            Some(id.to_string())
        }
        _ => None,
    }
}

/// The balance lives at `txHistory.balanceSat` and must be a number.
pub fn balance_from_payload(payload: &Value) -> Result<u64, BalanceError> {
    payload
        .get("txHistory")
        .and_then(|tx| tx.get("balanceSat"))
        .and_then(Value::as_u64)
        .ok_or(BalanceError::Unavailable)
}
