use alloy::network::ReceiptResponse;
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;
use alloy::transports::http::reqwest::Url;
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::{CallOptions, CallReceipt, ClientError, ContractCall, ContractClient, ContractHandle};
use crate::keys::Keyring;

sol! {
    #[sol(rpc)]
    contract TwoStepOwnable {
        function owner() external view returns (address);
        function pendingOwner() external view returns (address);
        function setPendingOwner(address pendingOwner_) external;
        function acceptOwnership() external;
    }
}

/// JSON-RPC client signing with the keys held by a [`Keyring`]
#[derive(Clone)]
pub struct AlloyContractClient {
    provider: DynProvider,
    signers: HashSet<Address>,
    rpc_url: String,
}

impl std::fmt::Debug for AlloyContractClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlloyContractClient")
            .field("rpc_url", &self.rpc_url)
            .field("signers", &self.signers)
            .finish_non_exhaustive()
    }
}

impl AlloyContractClient {
    pub fn connect(rpc_url: &str, keyring: &Keyring) -> Result<Self, ClientError> {
        let url = parse_endpoint(rpc_url)?;
        let wallet = keyring.wallet().map_err(|e| ClientError::Signing {
            message: e.to_string(),
        })?;

        let provider = ProviderBuilder::new().wallet(wallet).connect_http(url).erased();
        info!(rpc_url = %rpc_url, signers = keyring.len(), "Connected contract client");

        Ok(Self {
            provider,
            signers: keyring.addresses().into_iter().collect(),
            rpc_url: rpc_url.to_string(),
        })
    }

    /// Client without keys. Reads work, every submit fails with `UnknownSigner`.
    pub fn read_only(rpc_url: &str) -> Result<Self, ClientError> {
        let url = parse_endpoint(rpc_url)?;
        let provider = ProviderBuilder::new().connect_http(url).erased();
        info!(rpc_url = %rpc_url, "Connected read-only contract client");

        Ok(Self {
            provider,
            signers: HashSet::new(),
            rpc_url: rpc_url.to_string(),
        })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Base fee headroom from the node's estimate, plus our own tip
    async fn max_fee_per_gas(&self, tip: u128) -> Result<u128, ClientError> {
        let estimate = self
            .provider
            .estimate_eip1559_fees()
            .await
            .map_err(|e| transport_error(&e))?;
        let base = estimate
            .max_fee_per_gas
            .saturating_sub(estimate.max_priority_fee_per_gas);
        Ok(base.saturating_add(tip))
    }

    fn instance(&self, contract: &ContractHandle) -> TwoStepOwnable::TwoStepOwnableInstance<DynProvider> {
        TwoStepOwnable::new(contract.address(), self.provider.clone())
    }
}

#[async_trait]
impl ContractClient for AlloyContractClient {
    async fn at(&self, address: Address) -> Result<ContractHandle, ClientError> {
        let code = self
            .provider
            .get_code_at(address)
            .await
            .map_err(|e| transport_error(&e))?;
        if code.is_empty() {
            return Err(ClientError::NoCode { address });
        }
        debug!(%address, code_len = code.len(), "Resolved contract");
        Ok(ContractHandle::new(address))
    }

    async fn submit(
        &self,
        contract: &ContractHandle,
        call: &ContractCall,
        options: &CallOptions,
    ) -> Result<CallReceipt, ClientError> {
        let from = options.sender.address();
        if !self.signers.contains(&from) {
            return Err(ClientError::UnknownSigner { address: from });
        }

        let method = call.method();
        let instance = self.instance(contract);
        let tip = options.priority_fee.wei();
        let max_fee = self.max_fee_per_gas(tip).await?;

        let pending = match call {
            ContractCall::SetPendingOwner { pending_owner } => {
                instance
                    .setPendingOwner(*pending_owner)
                    .from(from)
                    .max_fee_per_gas(max_fee)
                    .max_priority_fee_per_gas(tip)
                    .send()
                    .await
            }
            ContractCall::AcceptOwnership => {
                instance
                    .acceptOwnership()
                    .from(from)
                    .max_fee_per_gas(max_fee)
                    .max_priority_fee_per_gas(tip)
                    .send()
                    .await
            }
        }
        .map_err(|e| ClientError::Rejected {
            method: method.to_string(),
            message: e.to_string(),
        })?;

        let tx_hash = *pending.tx_hash();
        info!(method, %from, %tx_hash, "Submitted call, waiting for receipt");

        let receipt = pending.get_receipt().await.map_err(|e| ClientError::Transport {
            message: format!("waiting for {method} receipt {tx_hash}: {e}"),
        })?;

        if !receipt.status() {
            warn!(method, %tx_hash, "Call reverted");
            return Err(ClientError::reverted(
                method,
                Some(tx_hash),
                "transaction receipt reports failure",
            ));
        }

        Ok(CallReceipt {
            method: method.to_string(),
            tx_hash,
            block_number: receipt.block_number(),
        })
    }

    async fn owner(&self, contract: &ContractHandle) -> Result<Address, ClientError> {
        self.instance(contract)
            .owner()
            .call()
            .await
            .map_err(|e| view_error("owner", e))
    }

    async fn pending_owner(&self, contract: &ContractHandle) -> Result<Address, ClientError> {
        self.instance(contract)
            .pendingOwner()
            .call()
            .await
            .map_err(|e| view_error("pendingOwner", e))
    }
}

fn parse_endpoint(rpc_url: &str) -> Result<Url, ClientError> {
    rpc_url
        .parse::<Url>()
        .map_err(|e| ClientError::InvalidEndpoint {
            url: rpc_url.to_string(),
            message: e.to_string(),
        })
}

/// Node-level failures are transport errors; an RPC error response means the call was refused
fn view_error(method: &str, err: alloy::contract::Error) -> ClientError {
    match &err {
        alloy::contract::Error::TransportError(e) if !e.is_error_resp() => transport_error(&err),
        _ => ClientError::Rejected {
            method: method.to_string(),
            message: err.to_string(),
        },
    }
}

fn transport_error(err: &impl std::fmt::Display) -> ClientError {
    ClientError::Transport {
        message: err.to_string(),
    }
}
