use crate::util::{format_fixed_point, parse_fixed_point};
use anyhow::{anyhow, ensure, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const HEADER: [&str; 4] = ["type", "client", "tx", "amount"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowType {
    Deposit,
    Withdrawal,
    Dispute,
    Resolve,
    Chargeback,
}

impl RowType {
    pub const ALL: [RowType; 5] = [
        RowType::Deposit,
        RowType::Withdrawal,
        RowType::Dispute,
        RowType::Resolve,
        RowType::Chargeback,
    ];

    /// Deposits and withdrawals allocate a new tx id and carry an amount;
    /// the dispute family only references one.
    pub fn creates_tx(self) -> bool {
        matches!(self, RowType::Deposit | RowType::Withdrawal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "type")]
    pub row_type: RowType,
    pub client: u16,
    pub tx: u32,
    #[serde(
        serialize_with = "serialize_fixed_point",
        deserialize_with = "deserialize_fixed_point"
    )]
    pub amount: Option<i64>,
}

impl Row {
    pub fn new_movement(row_type: RowType, client: u16, tx: u32, amount: i64) -> Result<Self> {
        ensure!(
            row_type.creates_tx(),
            anyhow!("{row_type:?} can't carry an amount")
        );
        Ok(Self {
            row_type,
            client,
            tx,
            amount: Some(amount),
        })
    }

    pub fn new_reference(row_type: RowType, client: u16, tx: u32) -> Result<Self> {
        ensure!(
            !row_type.creates_tx(),
            anyhow!("{row_type:?} found without amount")
        );
        Ok(Self {
            row_type,
            client,
            tx,
            amount: None,
        })
    }

    pub fn validate(&self) -> Result<()> {
        match (self.row_type.creates_tx(), self.amount) {
            (true, None) => Err(anyhow!(
                "{:?} found without amount - tx: {}",
                self.row_type,
                self.tx
            )),
            (false, Some(_)) => Err(anyhow!(
                "{:?} found with amount - tx: {}",
                self.row_type,
                self.tx
            )),
            _ => Ok(()),
        }
    }
}

fn serialize_fixed_point<S>(amount: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match amount {
        Some(value) => serializer.serialize_some(&format_fixed_point(*value)),
        None => serializer.serialize_none(),
    }
}

fn deserialize_fixed_point<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let f_string: Option<String> = Deserialize::deserialize(deserializer)?;
    f_string
        .map(|f| {
            parse_fixed_point(&f).map_err(|e| {
                serde::de::Error::custom(format!(
                    "Failed to parse amount into fixed point representation: {e}"
                ))
            })
        })
        .transpose()
}
