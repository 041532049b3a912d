use crate::row::{Row, RowType};
use anyhow::{anyhow, ensure, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Exclusive upper bound for a randomly drawn client count.
pub const MAX_CLIENT_COUNT: u16 = 1_000;

/// Amounts are drawn from `[-1_000_000.0000, 1_000_000.0000)` in ten-thousandths.
pub const AMOUNT_BOUND: i64 = 1_000_000 * 10_000;

/// Relative weights of each row type. Deposits and withdrawals are 3.5x as
/// likely as each dispute family type.
pub const TX_TYPE_WEIGHTS: [(RowType, u32); 5] = [
    (RowType::Deposit, 35),
    (RowType::Withdrawal, 35),
    (RowType::Dispute, 10),
    (RowType::Resolve, 10),
    (RowType::Chargeback, 10),
];

const TOTAL_WEIGHT: u32 = {
    let mut total = 0;
    let mut i = 0;
    while i < TX_TYPE_WEIGHTS.len() {
        total += TX_TYPE_WEIGHTS[i].1;
        i += 1;
    }
    total
};

/// Picks a row type by walking the cumulative weight table with a uniform draw.
pub fn pick_row_type<R: Rng>(rng: &mut R) -> RowType {
    let draw = rng.random_range(0..TOTAL_WEIGHT);
    row_type_for_draw(draw)
}

fn row_type_for_draw(draw: u32) -> RowType {
    let mut cumulative = 0;
    for (row_type, weight) in TX_TYPE_WEIGHTS {
        cumulative += weight;
        if draw < cumulative {
            return row_type;
        }
    }
    // draw < TOTAL_WEIGHT always lands inside the table
    TX_TYPE_WEIGHTS[TX_TYPE_WEIGHTS.len() - 1].0
}

/// Exclusive upper bound for client ids in a run. Clients are drawn from
/// `[1, count)`, so the count is at least 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientCount(u16);

impl ClientCount {
    pub fn new(count: u16) -> Result<Self> {
        ensure!(
            count >= 2,
            anyhow!("Client count must be at least 2, got {count}")
        );
        Ok(Self(count))
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self(rng.random_range(2..MAX_CLIENT_COUNT))
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub rows: u64,
    pub per_type: BTreeMap<&'static str, u64>,
    pub last_tx_id: u32,
    pub client_count: u16,
}

pub struct RowGenerator<R> {
    rng: R,
    client_count: ClientCount,
    /// Last tx id handed to a deposit or withdrawal; 0 before the first one.
    tx_counter: u32,
}

impl RowGenerator<StdRng> {
    pub fn from_seed(seed: u64, client_count: Option<ClientCount>) -> Self {
        Self::new(StdRng::seed_from_u64(seed), client_count)
    }

    pub fn from_os_rng(client_count: Option<ClientCount>) -> Self {
        Self::new(StdRng::from_os_rng(), client_count)
    }
}

impl<R: Rng> RowGenerator<R> {
    /// Without an explicit client count one is drawn from the rng before any
    /// row is generated.
    pub fn new(mut rng: R, client_count: Option<ClientCount>) -> Self {
        let client_count = client_count.unwrap_or_else(|| ClientCount::random(&mut rng));
        Self {
            rng,
            client_count,
            tx_counter: 0,
        }
    }

    pub fn client_count(&self) -> ClientCount {
        self.client_count
    }

    pub fn generate_row(&mut self) -> Result<Row> {
        let row_type = pick_row_type(&mut self.rng);
        let client = self.rng.random_range(1..self.client_count.get());

        if row_type.creates_tx() {
            self.tx_counter = self
                .tx_counter
                .checked_add(1)
                .ok_or(anyhow!("Ran out of transaction ids after {}", u32::MAX))?;
            let amount = self.rng.random_range(-AMOUNT_BOUND..AMOUNT_BOUND);
            Row::new_movement(row_type, client, self.tx_counter, amount)
        } else {
            // May point past the last assigned id on purpose, so consumers
            // see references to transactions that don't exist yet.
            let upper = u64::from(self.tx_counter) + 2;
            let tx = self.rng.random_range(1..upper);
            let tx = u32::try_from(tx)
                .map_err(|_| anyhow!("Referenced tx {tx} is outside the id space"))?;
            Row::new_reference(row_type, client, tx)
        }
    }

    pub fn generate(&mut self, rowcount: u64) -> Result<(Vec<Row>, GenerationSummary)> {
        let capacity = usize::try_from(rowcount)
            .map_err(|_| anyhow!("Row count {rowcount} doesn't fit in memory"))?;
        let mut rows = Vec::new();
        rows.try_reserve_exact(capacity)
            .map_err(|e| anyhow!("Row count {rowcount} doesn't fit in memory: {e}"))?;
        let mut summary = GenerationSummary {
            client_count: self.client_count.get(),
            per_type: RowType::ALL.into_iter().map(|t| (type_name(t), 0)).collect(),
            ..GenerationSummary::default()
        };

        for i in 0..rowcount {
            let row = self.generate_row()?;
            *summary.per_type.entry(type_name(row.row_type)).or_default() += 1;
            rows.push(row);

            if (i + 1) % 100_000 == 0 {
                debug!("Generated {} rows", i + 1);
            }
        }

        summary.rows = rowcount;
        summary.last_tx_id = self.tx_counter;
        info!(
            "Generated {} rows for {} clients, last tx id {}: {:?}",
            summary.rows, summary.client_count, summary.last_tx_id, summary.per_type
        );

        Ok((rows, summary))
    }
}

fn type_name(row_type: RowType) -> &'static str {
    match row_type {
        RowType::Deposit => "deposit",
        RowType::Withdrawal => "withdrawal",
        RowType::Dispute => "dispute",
        RowType::Resolve => "resolve",
        RowType::Chargeback => "chargeback",
    }
}
