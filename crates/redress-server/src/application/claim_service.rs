//! Claim Application Service (Use Case)
//!
//! The admin query/action surface: pending work listings and manual status
//! transitions. Approval is the only path that creates payout entries here,
//! mirroring the automatic approval path in the triage engine.

use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use redress::{
    ClaimRepository, ClaimStatus, DomainError, Escalation, EscalationRepository, EscalationStatus,
    PayoutEntry, PayoutRepository, PayoutStatus, RefundRequest, TransactionRepository,
    TransactionStatus,
};

use crate::models::{ClaimView, EscalationView, PayoutView, PendingWorkResponse};
use crate::services::events::EventBroadcaster;

/// Application service for admin claim management
pub struct ClaimService<R, P, E, T>
where
    R: ClaimRepository,
    P: PayoutRepository,
    E: EscalationRepository,
    T: TransactionRepository,
{
    claims: Arc<R>,
    payouts: Arc<P>,
    escalations: Arc<E>,
    transactions: Arc<T>,
    events: EventBroadcaster,
}

impl<R, P, E, T> ClaimService<R, P, E, T>
where
    R: ClaimRepository,
    P: PayoutRepository,
    E: EscalationRepository,
    T: TransactionRepository,
{
    pub fn new(
        claims: Arc<R>,
        payouts: Arc<P>,
        escalations: Arc<E>,
        transactions: Arc<T>,
        events: EventBroadcaster,
    ) -> Self {
        Self {
            claims,
            payouts,
            escalations,
            transactions,
            events,
        }
    }

    /// Everything awaiting human attention for one company: pending refund
    /// requests, open escalations (scoped via their transaction), and entries
    /// ready for payout. Payouts and escalations are enriched with the
    /// transcript/evidence of the linked refund request.
    pub async fn pending_work(&self, company_id: Uuid) -> Result<PendingWorkResponse, DomainError> {
        let pending = self
            .claims
            .list_by_status(company_id, ClaimStatus::Pending)
            .await?;

        // Escalations carry no company reference; scope through the transaction
        let mut escalations = Vec::new();
        for escalation in self.escalations.list_open().await? {
            if let Some(tid) = escalation.transaction_id {
                if let Some(tx) = self.transactions.find_by_id(tid).await? {
                    if tx.company_id == company_id {
                        escalations.push(escalation);
                    }
                }
            }
        }

        let payouts = self.payouts.list_ready(company_id).await?;

        let mut tx_ids: Vec<Uuid> = payouts
            .iter()
            .map(|p| p.transaction_id)
            .chain(escalations.iter().filter_map(|e| e.transaction_id))
            .collect();
        tx_ids.sort();
        tx_ids.dedup();

        let related = self.claims.find_by_transactions(&tx_ids).await?;
        let claim_map: HashMap<Uuid, &RefundRequest> =
            related.iter().map(|c| (c.transaction_id, c)).collect();

        let mut refund_requests = Vec::with_capacity(pending.len());
        for claim in pending {
            let order_ref = self
                .transactions
                .find_by_id(claim.transaction_id)
                .await?
                .map(|tx| tx.order_ref);
            refund_requests.push(ClaimView::from_claim(claim, order_ref));
        }

        let escalations = escalations
            .into_iter()
            .map(|escalation| {
                let related = escalation
                    .transaction_id
                    .and_then(|tid| claim_map.get(&tid));
                EscalationView::from_escalation(
                    escalation,
                    related.and_then(|c| c.transcript.clone()),
                    related.and_then(|c| c.evidence_ref.clone()),
                )
            })
            .collect();

        let payout_queue = payouts
            .into_iter()
            .map(|entry| {
                let related = claim_map.get(&entry.transaction_id);
                PayoutView::from_entry(
                    entry,
                    related.and_then(|c| c.transcript.clone()),
                    related.and_then(|c| c.analysis.as_ref().map(|a| a.reason.clone())),
                    related.and_then(|c| c.evidence_ref.clone()),
                )
            })
            .collect();

        Ok(PendingWorkResponse {
            refund_requests,
            escalations,
            payout_queue,
        })
    }

    /// Manually transition a refund request. Approval creates the payout
    /// entry and marks the transaction refunded.
    pub async fn resolve_claim(
        &self,
        id: Uuid,
        target: ClaimStatus,
        clear_context: bool,
    ) -> Result<RefundRequest, DomainError> {
        let claim = self
            .claims
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("RefundRequest", id))?;

        if !claim.status.can_transition_to(target) {
            return Err(DomainError::invalid_transition(claim.status, target));
        }

        let updated = self.claims.update_status(id, target).await?;

        if target == ClaimStatus::Approved {
            let tx = self
                .transactions
                .find_by_id(claim.transaction_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Transaction", claim.transaction_id))?;

            self.payouts
                .insert(&PayoutEntry::new(tx.id, tx.company_id, tx.amount))
                .await?;
            self.transactions
                .update_status(tx.id, TransactionStatus::Refunded)
                .await?;

            self.events
                .event("receipt_long", "REFUND", "Approved by human review");
        }

        if clear_context {
            self.claims
                .redact_by_transaction(claim.transaction_id)
                .await?;
        }

        tracing::info!("Claim {} -> {}", id, target);
        Ok(updated)
    }

    /// Manually transition an escalation.
    pub async fn update_escalation(
        &self,
        id: Uuid,
        target: EscalationStatus,
    ) -> Result<Escalation, DomainError> {
        let escalation = self
            .escalations
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Escalation", id))?;

        if !escalation.status.can_transition_to(target) {
            return Err(DomainError::invalid_transition(escalation.status, target));
        }

        let updated = self.escalations.update_status(id, target).await?;
        tracing::info!("Escalation {} -> {}", id, target);
        Ok(updated)
    }

    /// Mark a payout entry processed (the only legal move).
    pub async fn process_payout(
        &self,
        id: Uuid,
        target: PayoutStatus,
        clear_context: bool,
    ) -> Result<PayoutEntry, DomainError> {
        let entry = self
            .payouts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("PayoutEntry", id))?;

        if !entry.status.can_transition_to(target) {
            return Err(DomainError::invalid_transition(entry.status, target));
        }

        let updated = self.payouts.update_status(id, target).await?;

        if clear_context {
            self.claims
                .redact_by_transaction(entry.transaction_id)
                .await?;
        }

        tracing::info!("Payout {} -> {}", id, target);
        Ok(updated)
    }
}
