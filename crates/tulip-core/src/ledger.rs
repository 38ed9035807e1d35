//! Value-transfer channel and in-memory ledger.
//!
//! Provides the [`ValueTransfer`] trait the engine pays out through, and the
//! [`MemoryLedger`] implementation used by tests and simulations. The
//! production channel is supplied by the hosting environment.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TransferError;
use crate::types::{Amount, Identity};

/// A single outgoing payment from the engine's escrow.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub to: Identity,
    pub amount: Amount,
}

impl Transfer {
    pub fn new(to: Identity, amount: Amount) -> Self {
        Self { to, amount }
    }
}

/// Channel moving value out of the engine.
///
/// A batch is atomic: either every transfer in it is applied, or none is and
/// an error is returned. The engine relies on this to keep a rejected
/// settlement free of partial payouts.
pub trait ValueTransfer: Send {
    /// Apply all of `batch` or nothing.
    ///
    /// # Errors
    ///
    /// - [`TransferError::Rejected`] if a recipient refuses the value
    /// - [`TransferError::BalanceOverflow`] if a recipient balance would wrap
    fn settle(&mut self, batch: &[Transfer]) -> Result<(), TransferError>;
}

/// In-memory ledger of credited balances.
///
/// Credits are applied one by one with an undo log. A failure part-way
/// through a batch reverts the credits already applied, so the batch is
/// atomic as seen from outside.
#[derive(Debug, Default, Clone)]
pub struct MemoryLedger {
    /// Identity → total value received.
    balances: HashMap<Identity, Amount>,
    /// Identities that refuse incoming value.
    rejecting: HashSet<Identity>,
    /// Every transfer of every successfully settled batch, in order.
    history: Vec<Transfer>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total value credited to `who`.
    pub fn balance_of(&self, who: &Identity) -> Amount {
        self.balances.get(who).copied().unwrap_or(0)
    }

    /// Make `who` refuse all future incoming transfers.
    pub fn reject_incoming(&mut self, who: Identity) {
        self.rejecting.insert(who);
    }

    /// Undo [`reject_incoming`](Self::reject_incoming).
    pub fn accept_incoming(&mut self, who: &Identity) {
        self.rejecting.remove(who);
    }

    pub fn history(&self) -> &[Transfer] {
        &self.history
    }

    /// Sum of all balances.
    pub fn total_credited(&self) -> u128 {
        self.balances.values().map(|&v| v as u128).sum()
    }

    fn credit(&mut self, transfer: &Transfer) -> Result<(), TransferError> {
        if self.rejecting.contains(&transfer.to) {
            return Err(TransferError::Rejected {
                recipient: transfer.to,
                amount: transfer.amount,
            });
        }
        let balance = self.balances.entry(transfer.to).or_insert(0);
        *balance = balance
            .checked_add(transfer.amount)
            .ok_or(TransferError::BalanceOverflow { recipient: transfer.to })?;
        Ok(())
    }

    fn revert(&mut self, applied: &[Transfer]) {
        for transfer in applied.iter().rev() {
            if let Some(balance) = self.balances.get_mut(&transfer.to) {
                *balance -= transfer.amount;
                if *balance == 0 {
                    self.balances.remove(&transfer.to);
                }
            }
        }
    }
}

impl ValueTransfer for MemoryLedger {
    fn settle(&mut self, batch: &[Transfer]) -> Result<(), TransferError> {
        for (applied, transfer) in batch.iter().enumerate() {
            if let Err(e) = self.credit(transfer) {
                debug!(applied, "reverting partially applied batch: {e}");
                self.revert(&batch[..applied]);
                return Err(e);
            }
        }
        self.history.extend_from_slice(batch);
        Ok(())
    }
}
