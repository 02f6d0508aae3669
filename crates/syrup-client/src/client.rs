//! Network collaborators: account lookup and transaction submission.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chain_sol::{pubkey_to_string, Pubkey};
use clap::ValueEnum;
use log::{debug, info};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use crate::error::SyrupError;

/// Everything the commands need from the cluster.
#[allow(async_fn_in_trait)]
pub trait ChainClient {
    /// A recent blockhash to anchor the transaction.
    async fn latest_blockhash(&self) -> Result<[u8; 32], SyrupError>;

    /// Whether any account is stored at `address`.
    async fn account_exists(&self, address: &Pubkey) -> Result<bool, SyrupError>;

    /// Submit signed wire bytes and return the Base58 signature.
    async fn send_transaction(&self, wire: &[u8]) -> Result<String, SyrupError>;
}

/// Commitment level for queries and preflight simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
struct BlockhashValue {
    blockhash: String,
}

/// Solana JSON-RPC client over HTTP.
pub struct RpcClient {
    http: Client,
    url: Url,
    commitment: Commitment,
}

impl RpcClient {
    pub fn new(url: Url, commitment: Commitment) -> Result<Self, SyrupError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| SyrupError::Rpc(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            url,
            commitment,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, RpcFailure> {
        debug!("rpc {method} -> {}", self.url);
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response: RpcResponse<T> = self
            .http
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| RpcFailure(format!("{method}: {e}")))?
            .json()
            .await
            .map_err(|e| RpcFailure(format!("{method}: malformed response: {e}")))?;

        match (response.result, response.error) {
            (_, Some(err)) => Err(RpcFailure(format!(
                "{method}: {} (code {})",
                err.message, err.code
            ))),
            (Some(result), None) => Ok(result),
            (None, None) => Err(RpcFailure(format!("{method}: empty response"))),
        }
    }
}

/// Transport or server error, mapped to a [`SyrupError`] by the caller.
struct RpcFailure(String);

impl ChainClient for RpcClient {
    async fn latest_blockhash(&self) -> Result<[u8; 32], SyrupError> {
        let response: WithContext<BlockhashValue> = self
            .call(
                "getLatestBlockhash",
                json!([{ "commitment": self.commitment.as_str() }]),
            )
            .await
            .map_err(|RpcFailure(msg)| SyrupError::Rpc(msg))?;

        let bytes = bs58::decode(&response.value.blockhash)
            .into_vec()
            .map_err(|e| SyrupError::Rpc(format!("blockhash is not base58: {e}")))?;
        bytes.try_into().map_err(|v: Vec<u8>| {
            SyrupError::Rpc(format!("blockhash is {} bytes, expected 32", v.len()))
        })
    }

    async fn account_exists(&self, address: &Pubkey) -> Result<bool, SyrupError> {
        // `value` is null for an empty address.
        let response: WithContext<Option<Value>> = self
            .call(
                "getAccountInfo",
                json!([
                    pubkey_to_string(address),
                    { "encoding": "base64", "commitment": self.commitment.as_str() }
                ]),
            )
            .await
            .map_err(|RpcFailure(msg)| SyrupError::Rpc(msg))?;

        Ok(response.value.is_some())
    }

    async fn send_transaction(&self, wire: &[u8]) -> Result<String, SyrupError> {
        let signature: String = self
            .call(
                "sendTransaction",
                json!([
                    STANDARD.encode(wire),
                    {
                        "encoding": "base64",
                        "skipPreflight": false,
                        "preflightCommitment": self.commitment.as_str(),
                    }
                ]),
            )
            .await
            .map_err(|RpcFailure(msg)| SyrupError::SubmissionFailure(msg))?;

        info!("submitted transaction {signature}");
        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commitment_names() {
        assert_eq!(Commitment::Processed.as_str(), "processed");
        assert_eq!(Commitment::default().as_str(), "confirmed");
        assert_eq!(Commitment::Finalized.as_str(), "finalized");
    }

    #[test]
    fn parses_error_response() {
        let raw = r#"{"jsonrpc":"2.0","error":{"code":-32002,"message":"Transaction simulation failed"},"id":1}"#;
        let response: RpcResponse<String> = serde_json::from_str(raw).unwrap();
        assert!(response.result.is_none());
        let err = response.error.unwrap();
        assert_eq!(err.code, -32002);
        assert_eq!(err.message, "Transaction simulation failed");
    }

    #[test]
    fn parses_missing_account() {
        let raw = r#"{"jsonrpc":"2.0","result":{"context":{"slot":1},"value":null},"id":1}"#;
        let response: RpcResponse<WithContext<Option<Value>>> = serde_json::from_str(raw).unwrap();
        assert!(response.result.unwrap().value.is_none());
    }

    #[test]
    fn parses_blockhash() {
        let raw = r#"{"jsonrpc":"2.0","result":{"context":{"slot":1},"value":{"blockhash":"11111111111111111111111111111111","lastValidBlockHeight":10}},"id":1}"#;
        let response: RpcResponse<WithContext<BlockhashValue>> = serde_json::from_str(raw).unwrap();
        assert_eq!(
            response.result.unwrap().value.blockhash,
            "11111111111111111111111111111111"
        );
    }
}
