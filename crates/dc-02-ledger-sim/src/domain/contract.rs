//! Digital contract model.
//!
//! Stored in the world state as JSON with PascalCase field names. Enum
//! discriminants are encoded as integers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

/// Legal entity party to a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Signatory {
    pub business_name: String,
    pub head_quarters: String,
    pub holder: String,
    /// SIRET number.
    pub registration_number: String,
}

impl Signatory {
    /// Hex SHA-256 of the registration number.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(self.registration_number.as_bytes()))
    }
}

/// Side of the contract a signatory is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatoryStatus {
    Client = 0,
    Contractor = 1,
}

/// Lifecycle phase of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractStateHeading {
    WaitingForSignature = 0,
    Signed = 1,
    WaitingForPayment = 2,
    InOrder = 3,
}

impl ContractStateHeading {
    fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::WaitingForSignature),
            1 => Some(Self::Signed),
            2 => Some(Self::WaitingForPayment),
            3 => Some(Self::InOrder),
            _ => None,
        }
    }
}

impl fmt::Display for ContractStateHeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::WaitingForSignature => "waiting for signature",
            Self::Signed => "signed",
            Self::WaitingForPayment => "waiting for payment",
            Self::InOrder => "in order",
        };
        f.write_str(name)
    }
}

impl Serialize for ContractStateHeading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for ContractStateHeading {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown contract state {code}")))
    }
}

impl Serialize for SignatoryStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for SignatoryStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(Self::Client),
            1 => Ok(Self::Contractor),
            code => Err(serde::de::Error::custom(format!(
                "unknown signatory status {code}"
            ))),
        }
    }
}

/// One entry of a contract's state history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContractState {
    pub heading: ContractStateHeading,
    pub starting_date: DateTime<Utc>,
    /// `None` for the current state.
    pub ending_date: Option<DateTime<Utc>>,
}

/// A signature given by one party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContractSignature {
    pub signatory_ref: Signatory,
    pub status_of_signatory: SignatoryStatus,
    pub date_of_signature: DateTime<Utc>,
    pub signature_digest: String,
}

impl ContractSignature {
    pub fn new(signatory: Signatory, status: SignatoryStatus, at: DateTime<Utc>) -> Self {
        Self {
            signature_digest: signatory.digest(),
            signatory_ref: signatory,
            status_of_signatory: status,
            date_of_signature: at,
        }
    }
}

/// A payment issued under a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Payment {
    /// Amount in euros.
    pub amount: f64,
    pub date_of_issuance: DateTime<Utc>,
    pub issuer: Signatory,
}

/// Contract stored as a ledger value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contract {
    pub signatures: Vec<ContractSignature>,
    pub contract_heading: String,
    pub starting_date: DateTime<Utc>,
    pub ending_date: Option<DateTime<Utc>>,
    pub state_records: Vec<ContractState>,
    pub payment_records: Vec<Payment>,
}

impl Contract {
    /// The contract stored by `initLedger` under key `"0"`.
    pub fn genesis(now: DateTime<Utc>) -> Self {
        let client = Signatory {
            business_name: "Ville de Montpellier".to_string(),
            head_quarters: "1, Place Georges Frêche, 34000 Montpellier".to_string(),
            holder: "Philippe Saurel".to_string(),
            registration_number: "213 401 722".to_string(),
        };
        let contractor = Signatory {
            business_name: "Berger-Levrault".to_string(),
            head_quarters: "892, Rue Yves Kermen, 92100 Boulogne-Billancourt".to_string(),
            holder: "Antoine Rouillard".to_string(),
            registration_number: "755 800 646".to_string(),
        };

        Self {
            signatures: vec![
                ContractSignature::new(client, SignatoryStatus::Client, now),
                ContractSignature::new(contractor, SignatoryStatus::Contractor, now),
            ],
            contract_heading: "Maintenance gestion des ressources humaines et gestion financière"
                .to_string(),
            starting_date: now,
            ending_date: None,
            state_records: vec![ContractState {
                heading: ContractStateHeading::WaitingForSignature,
                starting_date: now,
                ending_date: None,
            }],
            payment_records: Vec::new(),
        }
    }

    /// Most recent state record.
    pub fn current_state(&self) -> Option<&ContractState> {
        self.state_records.last()
    }
}
