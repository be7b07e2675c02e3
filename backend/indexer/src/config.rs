//! Application configuration loaded from environment variables.

use crate::errors::{IndexerError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Soroban RPC endpoint (e.g. https://soroban-testnet.stellar.org)
    pub rpc_url: String,
    /// Registry, oracle and pool contract addresses (Strkey format)
    pub contract_ids: Vec<String>,
    /// Path to the SQLite database file
    pub database_url: String,
    /// Port for the REST API server
    pub api_port: u16,
    /// How often (in seconds) to poll the RPC for new events
    pub poll_interval_secs: u64,
    /// Maximum number of events to fetch per RPC request
    pub events_per_page: u32,
    /// Ledger to start from if no cursor is saved
    pub start_ledger: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let contract_ids = parse_contract_ids(&env_var("CONTRACT_IDS").map_err(|_| {
            IndexerError::Config("CONTRACT_IDS environment variable is required".to_string())
        })?)?;

        Ok(Config {
            rpc_url: env_var("RPC_URL")
                .unwrap_or_else(|_| "https://soroban-testnet.stellar.org".to_string()),
            contract_ids,
            database_url: env_var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:./ina_events.db".to_string()),
            api_port: parse_or("API_PORT", "3001")?,
            poll_interval_secs: parse_or("POLL_INTERVAL_SECS", "5")?,
            events_per_page: parse_or("EVENTS_PER_PAGE", "100")?,
            start_ledger: parse_or("START_LEDGER", "0")?,
        })
    }
}

/// Contract ids one `getEvents` filter may carry.
pub const IDS_PER_FILTER: usize = 5;
/// Filters one `getEvents` request may carry.
pub const MAX_FILTERS: usize = 5;

/// Split a comma-separated contract list, dropping blanks and duplicates.
///
/// The list is spread over several `getEvents` filters, so up to
/// `IDS_PER_FILTER * MAX_FILTERS` contracts can be watched.
pub fn parse_contract_ids(raw: &str) -> Result<Vec<String>> {
    let mut ids: Vec<String> = Vec::new();
    for id in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_string());
        }
    }
    if ids.is_empty() {
        return Err(IndexerError::Config("CONTRACT_IDS is empty".to_string()));
    }
    let max = IDS_PER_FILTER * MAX_FILTERS;
    if ids.len() > max {
        return Err(IndexerError::Config(format!(
            "CONTRACT_IDS lists {} contracts; at most {max} are supported",
            ids.len()
        )));
    }
    Ok(ids)
}

fn parse_or<T: std::str::FromStr>(key: &str, default: &str) -> Result<T> {
    env_var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| IndexerError::Config(format!("Invalid {key}")))
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| IndexerError::Config(format!("Missing env var: {key}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_ids_trimmed_and_deduplicated() {
        let ids = parse_contract_ids(" CREG , CPOOL1,,CPOOL1 ").unwrap();
        assert_eq!(ids, vec!["CREG".to_string(), "CPOOL1".to_string()]);
    }

    #[test]
    fn empty_contract_ids_rejected() {
        assert!(matches!(
            parse_contract_ids(" , "),
            Err(IndexerError::Config(_))
        ));
    }

    fn id_list(n: usize) -> String {
        (0..n).map(|i| format!("C{i}")).collect::<Vec<_>>().join(",")
    }

    #[test]
    fn registry_oracle_and_many_pools_accepted() {
        assert_eq!(parse_contract_ids(&id_list(7)).unwrap().len(), 7);
        assert_eq!(parse_contract_ids(&id_list(25)).unwrap().len(), 25);
    }

    #[test]
    fn too_many_contract_ids_rejected() {
        assert!(matches!(
            parse_contract_ids(&id_list(26)),
            Err(IndexerError::Config(_))
        ));
    }
}
