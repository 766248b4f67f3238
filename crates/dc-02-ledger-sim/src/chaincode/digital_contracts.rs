//! The digital-contracts chaincode.
//!
//! | Function      | Args         | Effect                                   |
//! |---------------|--------------|------------------------------------------|
//! | `initLedger`  | none         | stores the genesis contract under `"0"`  |
//! | `addContract` | key, value   | stores `value` under a new `key`         |
//! | `getContract` | key          | returns the stored value                 |

use super::{Chaincode, TxSimulator};
use crate::domain::{Contract, LedgerError};
use chrono::Utc;
use tracing::debug;

/// Key of the genesis contract.
pub const GENESIS_KEY: &str = "0";

#[derive(Debug, Default, Clone, Copy)]
pub struct DigitalContractsChaincode;

impl DigitalContractsChaincode {
    fn init_ledger(&self, stub: &mut TxSimulator) -> Result<Vec<u8>, LedgerError> {
        if stub.get_state(GENESIS_KEY).is_some() {
            return Err(LedgerError::AlreadyInitialized);
        }
        let contract = Contract::genesis(Utc::now());
        let bytes = serde_json::to_vec(&contract)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;
        stub.put_state(GENESIS_KEY, bytes.clone());
        debug!(heading = %contract.contract_heading, "Genesis contract staged");
        Ok(bytes)
    }

    fn add_contract(&self, stub: &mut TxSimulator, args: &[String]) -> Result<Vec<u8>, LedgerError> {
        let [key, value] = args else {
            return Err(LedgerError::ExpectedKeyAndValue);
        };
        if stub.get_state(key).is_some() {
            return Err(LedgerError::AssetExists(key.clone()));
        }
        stub.put_state(key, value.as_bytes().to_vec());
        Ok(value.as_bytes().to_vec())
    }

    fn get_contract(&self, stub: &mut TxSimulator, args: &[String]) -> Result<Vec<u8>, LedgerError> {
        let Some(key) = args.first() else {
            return Err(LedgerError::ExpectedKey(args.len()));
        };
        stub.get_state(key)
            .ok_or_else(|| LedgerError::AssetNotFound(key.clone()))
    }
}

impl Chaincode for DigitalContractsChaincode {
    fn invoke(
        &self,
        stub: &mut TxSimulator,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, LedgerError> {
        match function {
            "initLedger" => self.init_ledger(stub),
            "addContract" => self.add_contract(stub, args),
            "getContract" => self.get_contract(stub, args),
            other => Err(LedgerError::UnknownFunction(other.to_string())),
        }
    }
}
