//! Decoding of the base64 XDR `ScVal`s that `getEvents` returns for event
//! topics and values.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use stellar_xdr::curr::{Limits, PublicKey, ReadXdr, ScAddress, ScVal};

use crate::errors::{IndexerError, Result};

/// Decode one base64 XDR `ScVal`.
pub fn decode(b64: &str) -> Result<ScVal> {
    let bytes = STANDARD
        .decode(b64.trim())
        .map_err(|e| IndexerError::Xdr(format!("invalid base64: {e}")))?;
    ScVal::from_xdr(bytes, Limits::none()).map_err(|e| IndexerError::Xdr(e.to_string()))
}

pub fn symbol(val: &ScVal) -> Option<String> {
    match val {
        ScVal::Symbol(s) => Some(String::from_utf8_lossy(s.0.as_slice()).into_owned()),
        _ => None,
    }
}

/// Look up a field of a `#[contracttype]` struct, which is encoded as a map
/// keyed by field-name symbols.
pub fn field<'a>(val: &'a ScVal, name: &str) -> Option<&'a ScVal> {
    let ScVal::Map(Some(map)) = val else {
        return None;
    };
    map.0
        .iter()
        .find(|entry| symbol(&entry.key).as_deref() == Some(name))
        .map(|entry| &entry.val)
}

/// Render a scalar as the string stored in the events table.
///
/// Addresses become strkeys, integers decimal strings, bytes lowercase hex.
pub fn render(val: &ScVal) -> Option<String> {
    match val {
        ScVal::Address(addr) => Some(address(addr)),
        ScVal::I128(parts) => Some((((parts.hi as i128) << 64) | parts.lo as i128).to_string()),
        ScVal::U128(parts) => Some((((parts.hi as u128) << 64) | parts.lo as u128).to_string()),
        ScVal::I64(v) => Some(v.to_string()),
        ScVal::U64(v) => Some(v.to_string()),
        ScVal::I32(v) => Some(v.to_string()),
        ScVal::U32(v) => Some(v.to_string()),
        ScVal::Bool(b) => Some(b.to_string()),
        ScVal::Symbol(_) => symbol(val),
        ScVal::String(s) => Some(String::from_utf8_lossy(s.0.as_slice()).into_owned()),
        ScVal::Bytes(b) => Some(hex::encode(b.0.as_slice())),
        // Unit enum variants such as `Role::Admin` arrive as `[Symbol]`.
        ScVal::Vec(Some(items)) => items.0.first().and_then(render),
        _ => None,
    }
}

fn address(addr: &ScAddress) -> String {
    match addr {
        ScAddress::Account(account) => {
            let PublicKey::PublicKeyTypeEd25519(key) = &account.0;
            stellar_strkey::ed25519::PublicKey(key.0).to_string()
        }
        ScAddress::Contract(hash) => stellar_strkey::Contract(hash.0).to_string(),
    }
}
