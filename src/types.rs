//! JSON transaction description types
//!
//! Mirrors the JSON files wallets feed to the signing flow: a hex chain id
//! plus the transaction body with its action list. Action `data` is kept as
//! raw JSON here and deserialized into the per-action parameter structs by
//! the action encoder once the action name is known.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level signing request: chain id + transaction body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignRequest {
    /// Chain id as a 64-char hex string (32 bytes)
    pub chain_id: String,
    pub transaction: TransactionBody,
}

/// The transaction body as described by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionBody {
    /// ISO-8601 timestamp, `%Y-%m-%dT%H:%M:%S`, interpreted as UTC
    pub expiration: String,
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    pub net_usage_words: u8,
    pub max_cpu_usage_ms: u8,
    pub delay_sec: u8,
    #[serde(default)]
    pub context_free_actions: Vec<Value>,
    pub actions: Vec<ActionDescription>,
    #[serde(default)]
    pub transaction_extensions: Vec<Value>,
}

/// One action: contract account, action name, authorizations, parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDescription {
    pub account: String,
    pub name: String,
    pub authorization: Vec<PermissionLevel>,
    pub data: Value,
}

/// (actor, permission) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionLevel {
    pub actor: String,
    pub permission: String,
}

/// Authority block used by updateauth / newaccount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Authority {
    pub threshold: u32,
    #[serde(default)]
    pub keys: Vec<KeyWeight>,
    #[serde(default)]
    pub accounts: Vec<AccountWeight>,
    #[serde(default)]
    pub waits: Vec<WaitWeight>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyWeight {
    /// "EOS..." textual public key
    pub key: String,
    pub weight: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountWeight {
    pub authorization: PermissionLevel,
    pub weight: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitWeight {
    /// Seconds to wait
    pub wait: u32,
    pub weight: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transfer_request() {
        let json = r#"{
            "chain_id": "9999999999999999999999999999999999999999999999999999999999999999",
            "transaction": {
                "expiration": "2018-06-11T12:00:00",
                "ref_block_num": 100,
                "ref_block_prefix": 1,
                "net_usage_words": 0,
                "max_cpu_usage_ms": 0,
                "delay_sec": 0,
                "context_free_actions": [],
                "actions": [{
                    "account": "eosio.token",
                    "name": "transfer",
                    "authorization": [{"actor": "alice", "permission": "active"}],
                    "data": {"from": "alice", "to": "bob", "quantity": "1.0000 EOS", "memo": "hi"}
                }],
                "transaction_extensions": []
            }
        }"#;

        let req: SignRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.transaction.actions.len(), 1);
        assert_eq!(req.transaction.actions[0].name, "transfer");
        assert_eq!(req.transaction.actions[0].authorization[0].actor, "alice");
    }

    #[test]
    fn test_defaults_for_empty_lists() {
        let json = r#"{
            "chain_id": "00",
            "transaction": {
                "expiration": "2018-06-11T12:00:00",
                "ref_block_num": 0,
                "ref_block_prefix": 0,
                "net_usage_words": 0,
                "max_cpu_usage_ms": 0,
                "delay_sec": 0,
                "actions": []
            }
        }"#;

        let req: SignRequest = serde_json::from_str(json).unwrap();
        assert!(req.transaction.context_free_actions.is_empty());
        assert!(req.transaction.transaction_extensions.is_empty());
    }
}
