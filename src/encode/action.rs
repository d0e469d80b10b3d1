//! Per-action parameter encoding
//!
//! The action kind is resolved once from the textual action name into a
//! closed enum; anything unrecognized falls back to `Unknown`, which
//! serializes its data payload verbatim (repeated, deliberately
//! oversized) instead of failing — nonstandard contract actions must
//! still reach the device. The shared wrapper (account, name,
//! authorization list, varint-prefixed payload) is identical for every
//! kind.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::encode::asset::encode_asset;
use crate::encode::name::encode_name;
use crate::encode::varint::encode_varint;
use crate::encode::writer::TxWriter;
use crate::error::{EosError, EosResult};
use crate::types::{ActionDescription, Authority};

/// How many times the unknown-action payload is repeated. Inherited from
/// the device test corpus: the oversized blob probes the on-device
/// streaming parser.
const UNKNOWN_ACTION_REPEAT: usize = 1000;

#[derive(Debug, Clone, Deserialize)]
pub struct TransferParams {
    pub from: String,
    pub to: String,
    pub quantity: String,
    pub memo: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoteProducerParams {
    pub account: String,
    pub proxy: String,
    pub producers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuyRamParams {
    pub buyer: String,
    pub receiver: String,
    pub tokens: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuyRamBytesParams {
    pub buyer: String,
    pub receiver: String,
    pub bytes: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SellRamParams {
    pub receiver: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAuthParams {
    pub account: String,
    pub permission: String,
    pub parent: String,
    pub auth: Authority,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteAuthParams {
    pub account: String,
    pub permission: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefundParams {
    pub account: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkAuthParams {
    pub account: String,
    pub contract: String,
    pub action: String,
    pub permission: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnlinkAuthParams {
    pub account: String,
    pub contract: String,
    pub action: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAccountParams {
    pub creator: String,
    pub newact: String,
    pub owner: Authority,
    pub active: Authority,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DelegateBandwidthParams {
    pub from: String,
    pub to: String,
    pub stake_net_quantity: String,
    pub stake_cpu_quantity: String,
    pub transfer: bool,
}

/// Action parameters, resolved from the action name at construction
#[derive(Debug, Clone)]
pub enum ActionData {
    Transfer(TransferParams),
    VoteProducer(VoteProducerParams),
    BuyRam(BuyRamParams),
    BuyRamBytes(BuyRamBytesParams),
    SellRam(SellRamParams),
    UpdateAuth(UpdateAuthParams),
    DeleteAuth(DeleteAuthParams),
    Refund(RefundParams),
    LinkAuth(LinkAuthParams),
    UnlinkAuth(UnlinkAuthParams),
    NewAccount(NewAccountParams),
    DelegateBandwidth(DelegateBandwidthParams),
    /// Unrecognized action name: the raw data payload is carried as-is
    Unknown(String),
}

fn params<T: DeserializeOwned>(name: &str, data: &Value) -> EosResult<T> {
    serde_json::from_value(data.clone()).map_err(|e| {
        EosError::encoding_error(format!("bad {} action data: {}", name, e))
    })
}

impl ActionData {
    /// Resolve the action kind from its textual name
    pub fn from_description(name: &str, data: &Value) -> EosResult<Self> {
        Ok(match name {
            "transfer" => Self::Transfer(params(name, data)?),
            "voteproducer" => Self::VoteProducer(params(name, data)?),
            "buyram" => Self::BuyRam(params(name, data)?),
            "buyrambytes" => Self::BuyRamBytes(params(name, data)?),
            "sellram" => Self::SellRam(params(name, data)?),
            "updateauth" => Self::UpdateAuth(params(name, data)?),
            "deleteauth" => Self::DeleteAuth(params(name, data)?),
            "refund" => Self::Refund(params(name, data)?),
            "linkauth" => Self::LinkAuth(params(name, data)?),
            "unlinkauth" => Self::UnlinkAuth(params(name, data)?),
            "newaccount" => Self::NewAccount(params(name, data)?),
            "delegatebw" => Self::DelegateBandwidth(params(name, data)?),
            _ => Self::Unknown(match data.as_str() {
                Some(s) => s.to_owned(),
                None => data.to_string(),
            }),
        })
    }

    /// Produce the variant-specific parameter payload
    pub fn encode_parameters(&self) -> EosResult<Vec<u8>> {
        let mut out = Vec::new();
        match self {
            Self::Transfer(p) => {
                out.extend_from_slice(&encode_name(&p.from));
                out.extend_from_slice(&encode_name(&p.to));
                out.extend_from_slice(&encode_asset(&p.quantity)?);
                out.extend_from_slice(&encode_varint(p.memo.len() as u64));
                out.extend_from_slice(p.memo.as_bytes());
            }
            Self::VoteProducer(p) => {
                out.extend_from_slice(&encode_name(&p.account));
                out.extend_from_slice(&encode_name(&p.proxy));
                out.extend_from_slice(&encode_varint(p.producers.len() as u64));
                for producer in &p.producers {
                    out.extend_from_slice(&encode_name(producer));
                }
            }
            Self::BuyRam(p) => {
                out.extend_from_slice(&encode_name(&p.buyer));
                out.extend_from_slice(&encode_name(&p.receiver));
                out.extend_from_slice(&encode_asset(&p.tokens)?);
            }
            Self::BuyRamBytes(p) => {
                out.extend_from_slice(&encode_name(&p.buyer));
                out.extend_from_slice(&encode_name(&p.receiver));
                out.extend_from_slice(&p.bytes.to_le_bytes());
            }
            Self::SellRam(p) => {
                out.extend_from_slice(&encode_name(&p.receiver));
                out.extend_from_slice(&p.bytes.to_le_bytes());
            }
            Self::UpdateAuth(p) => {
                out.extend_from_slice(&encode_name(&p.account));
                out.extend_from_slice(&encode_name(&p.permission));
                out.extend_from_slice(&encode_name(&p.parent));
                out.extend_from_slice(&encode_authority(&p.auth)?);
            }
            Self::DeleteAuth(p) => {
                out.extend_from_slice(&encode_name(&p.account));
                out.extend_from_slice(&encode_name(&p.permission));
            }
            Self::Refund(p) => {
                out.extend_from_slice(&encode_name(&p.account));
            }
            Self::LinkAuth(p) => {
                out.extend_from_slice(&encode_name(&p.account));
                out.extend_from_slice(&encode_name(&p.contract));
                out.extend_from_slice(&encode_name(&p.action));
                out.extend_from_slice(&encode_name(&p.permission));
            }
            Self::UnlinkAuth(p) => {
                out.extend_from_slice(&encode_name(&p.account));
                out.extend_from_slice(&encode_name(&p.contract));
                out.extend_from_slice(&encode_name(&p.action));
            }
            Self::NewAccount(p) => {
                out.extend_from_slice(&encode_name(&p.creator));
                out.extend_from_slice(&encode_name(&p.newact));
                out.extend_from_slice(&encode_authority(&p.owner)?);
                out.extend_from_slice(&encode_authority(&p.active)?);
            }
            Self::DelegateBandwidth(p) => {
                out.extend_from_slice(&encode_name(&p.from));
                out.extend_from_slice(&encode_name(&p.to));
                out.extend_from_slice(&encode_asset(&p.stake_net_quantity)?);
                out.extend_from_slice(&encode_asset(&p.stake_cpu_quantity)?);
                out.push(if p.transfer { 0x01 } else { 0x00 });
            }
            Self::Unknown(data) => {
                out.reserve(data.len() * UNKNOWN_ACTION_REPEAT);
                for _ in 0..UNKNOWN_ACTION_REPEAT {
                    out.extend_from_slice(data.as_bytes());
                }
            }
        }
        Ok(out)
    }
}

/// Decode a textual "EOS..." public key into its wire form:
/// one type byte (0x00, K1) followed by the 33 compressed-point bytes
fn encode_public_key(text: &str) -> EosResult<Vec<u8>> {
    let body = text
        .strip_prefix("EOS")
        .ok_or_else(|| EosError::encoding_error(format!("public key missing EOS prefix: {}", text)))?;

    let decoded = bs58::decode(body)
        .into_vec()
        .map_err(|e| EosError::encoding_error(format!("bad public key base58: {}", e)))?;
    if decoded.len() != 37 {
        return Err(EosError::encoding_error(format!(
            "bad public key length: {}",
            decoded.len()
        )));
    }

    let mut out = Vec::with_capacity(34);
    out.push(0x00);
    out.extend_from_slice(&decoded[..33]); // trailing 4 checksum bytes dropped
    Ok(out)
}

fn list_len(len: usize, what: &str) -> EosResult<u8> {
    len.try_into()
        .map_err(|_| EosError::encoding_error(format!("too many {}: {}", what, len)))
}

/// Encode an authority block: threshold, keys, accounts, waits,
/// each list prefixed by a single count byte
fn encode_authority(auth: &Authority) -> EosResult<Vec<u8>> {
    let mut out = Vec::new();
    out.extend_from_slice(&auth.threshold.to_le_bytes());

    out.push(list_len(auth.keys.len(), "authority keys")?);
    for key in &auth.keys {
        out.extend_from_slice(&encode_public_key(&key.key)?);
        out.extend_from_slice(&key.weight.to_le_bytes());
    }

    out.push(list_len(auth.accounts.len(), "authority accounts")?);
    for account in &auth.accounts {
        out.extend_from_slice(&encode_name(&account.authorization.actor));
        out.extend_from_slice(&encode_name(&account.authorization.permission));
        out.extend_from_slice(&account.weight.to_le_bytes());
    }

    out.push(list_len(auth.waits.len(), "authority waits")?);
    for wait in &auth.waits {
        out.extend_from_slice(&wait.wait.to_le_bytes());
        out.extend_from_slice(&wait.weight.to_le_bytes());
    }

    Ok(out)
}

/// Append one action (wrapper + parameter payload) to the transaction stream
pub fn encode_action(action: &ActionDescription, writer: &mut TxWriter) -> EosResult<()> {
    writer.push(&encode_name(&action.account));
    writer.push(&encode_name(&action.name));

    writer.push(&[list_len(action.authorization.len(), "authorizations")?]);
    for auth in &action.authorization {
        writer.push(&encode_name(&auth.actor));
        writer.push(&encode_name(&auth.permission));
    }

    let data = ActionData::from_description(&action.name, &action.data)?;
    let parameters = data.encode_parameters()?;
    writer.push(&encode_varint(parameters.len() as u64));
    writer.push(&parameters);

    Ok(())
}
