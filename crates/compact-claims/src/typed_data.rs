//! # Typed-Data Message
//!
//! The structured payload handed to an external typed-data hashing and
//! signing primitive. This crate never hashes it; its only obligation is
//! that message field names, order and types match the declared schema.
//!
//! ## Value Encoding
//!
//! | Solidity type | JSON value |
//! |---|---|
//! | `uint256` | decimal string |
//! | `address` | checksummed `0x` hex string |
//! | `bytes32`, `bytes` | lowercase `0x` hex string |
//! | `string` | string |
//! | struct | object with fields in declared order |
//! | `T[]` | array |

use std::collections::{BTreeMap, BTreeSet};

use alloy_primitives::{hex, Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use compact_core::Component;

/// Default domain name of the verifying contract.
pub const DEFAULT_DOMAIN_NAME: &str = "The Compact";

/// Default domain version of the verifying contract.
pub const DEFAULT_DOMAIN_VERSION: &str = "1";

/// Named struct definitions, keyed by type name.
pub type TypeSchema = BTreeMap<String, Vec<TypedDataField>>;

/// The signing domain that binds a message to one contract on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDataDomain {
    /// Contract name.
    pub name: String,
    /// Contract version.
    pub version: String,
    /// Chain the contract is deployed on.
    pub chain_id: u64,
    /// Contract address.
    pub verifying_contract: Address,
}

impl TypedDataDomain {
    /// A domain with the default name and version.
    pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: DEFAULT_DOMAIN_NAME.to_string(),
            version: DEFAULT_DOMAIN_VERSION.to_string(),
            chain_id,
            verifying_contract,
        }
    }
}

impl Default for TypedDataDomain {
    fn default() -> Self {
        Self::new(1, Address::ZERO)
    }
}

/// One `(name, type)` member of a struct definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedDataField {
    /// Member name.
    pub name: String,
    /// Solidity type, e.g. `uint256` or `Component[]`.
    #[serde(rename = "type")]
    pub ty: String,
}

impl TypedDataField {
    /// Create a field definition.
    pub fn new(name: &str, ty: &str) -> Self {
        Self {
            name: name.to_string(),
            ty: ty.to_string(),
        }
    }
}

/// A complete typed-data payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedData {
    /// Signing domain.
    pub domain: TypedDataDomain,
    /// Struct definitions referenced by the primary type, including itself.
    pub types: TypeSchema,
    /// Name of the top-level struct.
    pub primary_type: String,
    /// Field values of the primary type, in schema order.
    pub message: Map<String, Value>,
}

impl TypedData {
    /// The declared fields of the primary type.
    pub fn primary_fields(&self) -> &[TypedDataField] {
        self.types
            .get(&self.primary_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The encoded type string of the primary type.
    pub fn type_string(&self) -> String {
        encode_type(&self.primary_type, &self.types)
    }
}

/// Encode a struct type and its dependencies as a single type string.
///
/// The primary type comes first; referenced struct types follow in
/// alphabetical order, e.g.
/// `Claim(...,Component[] claimants)Component(uint256 claimant,uint256 amount)`.
pub fn encode_type(primary: &str, types: &TypeSchema) -> String {
    let mut deps = BTreeSet::new();
    collect_dependencies(primary, types, &mut deps);
    deps.remove(primary);

    std::iter::once(primary)
        .chain(deps.iter().map(String::as_str))
        .map(|name| encode_struct(name, types))
        .collect()
}

fn collect_dependencies(name: &str, types: &TypeSchema, out: &mut BTreeSet<String>) {
    let Some(fields) = types.get(name) else {
        return;
    };
    if !out.insert(name.to_string()) {
        return;
    }
    for field in fields {
        let base = field.ty.trim_end_matches("[]");
        if types.contains_key(base) {
            collect_dependencies(base, types, out);
        }
    }
}

fn encode_struct(name: &str, types: &TypeSchema) -> String {
    let members: Vec<String> = types
        .get(name)
        .map(|fields| {
            fields
                .iter()
                .map(|f| format!("{} {}", f.ty, f.name))
                .collect()
        })
        .unwrap_or_default();
    format!("{name}({})", members.join(","))
}

// ─── Value Encoding ──────────────────────────────────────────────────

pub(crate) fn uint_value(value: U256) -> Value {
    Value::String(value.to_string())
}

pub(crate) fn address_value(value: Address) -> Value {
    Value::String(value.to_checksum(None))
}

pub(crate) fn bytes32_value(value: B256) -> Value {
    Value::String(hex::encode_prefixed(value))
}

pub(crate) fn bytes_value(value: &Bytes) -> Value {
    Value::String(hex::encode_prefixed(value))
}

pub(crate) fn component_value(component: &Component) -> Value {
    let mut object = Map::new();
    object.insert("claimant".to_string(), uint_value(component.claimant));
    object.insert("amount".to_string(), uint_value(component.amount));
    Value::Object(object)
}

pub(crate) fn components_value(components: &[Component]) -> Value {
    Value::Array(components.iter().map(component_value).collect())
}
