//! Chat/Claim Triage Engine
//!
//! Takes a customer message (plus rolling history and optional image
//! analysis), assembles the policy-bearing prompt, invokes the LLM provider
//! and applies whatever structured decision comes back: refund, escalation
//! or rejection. All persistence runs through the repository ports.

use std::sync::{Arc, OnceLock};
use std::time::Instant;

use regex::Regex;
use serde::Deserialize;
use uuid::Uuid;

use redress::{
    AiAnalysis, ChatMessage, ClaimRepository, Company, CompanyRepository, CompletionOptions,
    DecisionAction, DomainError, Escalation, EscalationRepository, LlmProvider, PayoutEntry,
    PayoutRepository, RefundRequest, TransactionRepository, TransactionStatus,
};

use crate::models::ChatTurn;
use crate::services::events::EventBroadcaster;
use crate::services::stats::StatsManager;

/// Fixed triage instructions. The tenant's return policy is appended per
/// request and is the only part that varies between companies.
pub const BASE_SYSTEM_PROMPT: &str = r#"You are an advanced Support Assistance Bot named "Support Assistant".

WORKFLOW:
1. **Analyze Image**: Verify proof of damage. REJECT if fake/screenshot.
2. **Verify Transaction**: Ask for "Order Reference" or "Transaction ID".
3. **Check Status**: Verify ID in system.
    - Not Found -> Ask again.
    - Found + Existing Claim -> Inform status.
    - Found + No Claim -> Proceed.
4. **Judgment**: Based on **Company Policy**, decide to [REFUND], [ESCALATE], or [REJECT].
    - **CRITICAL**: If the claim is valid according to policy (e.g. damage is real and within terms), issue a [REFUND] immediately. Do NOT escalate valid claims unless the policy EXPLICITLY requires human review for every single case.
    - If unsure or policy is vague, [ESCALATE].
    - If invalid (fake proof, wrong item), [REJECT].

JSON ACTION FORMAT:
You MUST append a raw JSON block at the very end of your response for any final decision.
Use Markdown code blocks for the JSON.

```json
{
    "action": "REFUND",
    "reason": "Valid claim (Damage verified)",
    "transaction_id": "UUID"
}
```"#;

/// Prompt used for evidence image inspection before the chat turn.
pub const IMAGE_ANALYSIS_PROMPT: &str = "Analyze this image. 1. Is it REAL? If not, say 'Verification Failed'. 2. If real, describe the damage.";

/// Reply sent when the provider fails or returns nothing usable.
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble reaching our support brain right now. Please try again in a moment.";

/// One triage invocation.
pub struct TriageRequest {
    pub company_id: Uuid,
    pub message: String,
    pub history: Vec<ChatTurn>,
    pub image_analysis: Option<String>,
    pub evidence_ref: Option<String>,
    pub customer_ref: Option<String>,
}

/// What the caller gets back.
#[derive(Debug)]
pub struct TriageOutcome {
    pub reply: String,
    pub action: Option<DecisionAction>,
}

/// Decision block the AI appends to its reply.
#[derive(Debug, Deserialize)]
pub struct ParsedDecision {
    pub action: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub confidence: Option<f32>,
}

/// The chat/claim intake engine.
pub struct TriageService<C, T, R, P, E>
where
    C: CompanyRepository,
    T: TransactionRepository,
    R: ClaimRepository,
    P: PayoutRepository,
    E: EscalationRepository,
{
    companies: Arc<C>,
    transactions: Arc<T>,
    claims: Arc<R>,
    payouts: Arc<P>,
    escalations: Arc<E>,
    provider: Arc<dyn LlmProvider>,
    events: EventBroadcaster,
    stats: Arc<StatsManager>,
}

impl<C, T, R, P, E> TriageService<C, T, R, P, E>
where
    C: CompanyRepository,
    T: TransactionRepository,
    R: ClaimRepository,
    P: PayoutRepository,
    E: EscalationRepository,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        companies: Arc<C>,
        transactions: Arc<T>,
        claims: Arc<R>,
        payouts: Arc<P>,
        escalations: Arc<E>,
        provider: Arc<dyn LlmProvider>,
        events: EventBroadcaster,
        stats: Arc<StatsManager>,
    ) -> Self {
        Self {
            companies,
            transactions,
            claims,
            payouts,
            escalations,
            provider,
            events,
            stats,
        }
    }

    /// Run one chat turn: prompt, LLM call, decision handling, side effects.
    ///
    /// Provider failures degrade to a generic reply without touching any
    /// state; repository failures propagate to the caller.
    pub async fn chat(&self, request: TriageRequest) -> Result<TriageOutcome, DomainError> {
        let started = Instant::now();

        let company = self
            .companies
            .find_by_id(request.company_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Company", request.company_id))?;

        let system_note = self
            .verify_order_reference(&company, &request.message)
            .await?;

        let messages = build_messages(&company, &request, &system_note);

        let response = match self
            .provider
            .complete(&messages, &CompletionOptions::default())
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("LLM call failed, degrading to generic reply: {}", e);
                return Ok(TriageOutcome {
                    reply: FALLBACK_REPLY.to_string(),
                    action: None,
                });
            }
        };

        let reply = response.content.trim().to_string();
        let transcript =
            flatten_transcript(&request.history, &request.message, &clean_reply(&reply));

        let mut action_taken = None;
        if let Some((action, parsed)) = extract_decision(&reply) {
            action_taken = Some(action);
            let reason = parsed
                .reason
                .clone()
                .unwrap_or_else(|| default_reason(action).to_string());

            self.apply_decision(&company, action, &parsed, &request, transcript)
                .await?;

            self.events.event("receipt_long", action.to_string(), reason);
        }

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        self.stats.record(elapsed_ms, action_taken);
        self.events.stats(self.stats.snapshot());

        Ok(TriageOutcome {
            reply,
            action: action_taken,
        })
    }

    /// Scan the message for an order reference, verify it against the
    /// company's transactions and produce a `[SYSTEM]` note for the prompt.
    async fn verify_order_reference(
        &self,
        company: &Company,
        message: &str,
    ) -> Result<String, DomainError> {
        let candidates = order_ref_candidates(message);

        for candidate in &candidates {
            if let Some(tx) = self
                .transactions
                .find_by_order_ref(Some(company.id), candidate)
                .await?
            {
                let note = match self.claims.find_by_transaction(tx.id).await? {
                    Some(existing) => format!(
                        "\n[SYSTEM]: Tx {} verified. Claim EXISTS: {}.",
                        candidate, existing.status
                    ),
                    None => format!(
                        "\n[SYSTEM]: Tx {} verified. Valid for claim. UUID: {}.",
                        candidate, tx.id
                    ),
                };
                return Ok(note);
            }
        }

        if mentions_order(message) {
            // Prefer the candidate that actually looks like a reference
            let quoted = candidates
                .iter()
                .find(|c| c.chars().any(|ch| ch.is_ascii_digit()))
                .or(candidates.first());
            if let Some(candidate) = quoted {
                return Ok(format!("\n[SYSTEM]: Tx {} NOT FOUND.", candidate));
            }
        }

        Ok(String::new())
    }

    /// Persist the side effects of a decision. A transaction that cannot be
    /// resolved, belongs to another tenant or already carries a claim is
    /// skipped: the reply still reaches the customer, nothing is written.
    async fn apply_decision(
        &self,
        company: &Company,
        action: DecisionAction,
        parsed: &ParsedDecision,
        request: &TriageRequest,
        transcript: String,
    ) -> Result<(), DomainError> {
        let Some(tid_raw) = &parsed.transaction_id else {
            tracing::warn!("Decision {} without transaction_id; nothing persisted", action);
            return Ok(());
        };

        // The model sometimes echoes the order reference instead of the UUID
        let tx = match Uuid::parse_str(tid_raw) {
            Ok(id) => self.transactions.find_by_id(id).await?,
            Err(_) => {
                self.transactions
                    .find_by_order_ref(Some(company.id), tid_raw)
                    .await?
            }
        };

        let Some(tx) = tx else {
            tracing::warn!("Decision {} references unknown transaction '{}'", action, tid_raw);
            return Ok(());
        };

        if tx.company_id != company.id {
            tracing::warn!(
                "Decision {} references transaction {} of another tenant",
                action,
                tx.id
            );
            return Ok(());
        }

        if self.claims.find_by_transaction(tx.id).await?.is_some() {
            tracing::info!(
                "Transaction {} already has a claim; decision not re-applied",
                tx.id
            );
            return Ok(());
        }

        let reason = parsed
            .reason
            .clone()
            .unwrap_or_else(|| default_reason(action).to_string());
        let analysis = AiAnalysis {
            action,
            reason: reason.clone(),
            confidence: parsed.confidence,
        };
        let claim = RefundRequest::new(
            tx.id,
            company.id,
            action.claim_status(),
            Some(analysis),
            Some(transcript),
            request.evidence_ref.clone(),
        );

        match action {
            DecisionAction::Refund => {
                self.payouts
                    .insert(&PayoutEntry::new(tx.id, tx.company_id, tx.amount))
                    .await?;
                self.claims.insert(&claim).await?;
                self.transactions
                    .update_status(tx.id, TransactionStatus::Refunded)
                    .await?;
            }
            DecisionAction::Escalate => {
                self.claims.insert(&claim).await?;
                self.escalations
                    .insert(&Escalation::new(
                        Some(tx.id),
                        request.customer_ref.clone(),
                        reason,
                    ))
                    .await?;
            }
            DecisionAction::Reject => {
                self.claims.insert(&claim).await?;
            }
        }

        Ok(())
    }
}

// ============================================
// Prompt assembly
// ============================================

fn build_system_prompt(policy: &str) -> String {
    format!("{}\n\nCURRENT POLICY:\n{}", BASE_SYSTEM_PROMPT, policy)
}

fn build_messages(company: &Company, request: &TriageRequest, system_note: &str) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(build_system_prompt(
        &company.return_policy,
    ))];

    for turn in &request.history {
        if turn.role == "user" {
            messages.push(ChatMessage::user(&turn.content));
        } else {
            messages.push(ChatMessage::assistant(&turn.content));
        }
    }

    let mut content = request.message.clone();
    if let Some(analysis) = &request.image_analysis {
        content.push_str(&format!("\n\n[IMAGE ANALYSIS]: {}", analysis));
    }
    content.push_str(system_note);
    messages.push(ChatMessage::user(content));

    messages
}

fn default_reason(action: DecisionAction) -> &'static str {
    match action {
        DecisionAction::Refund => "Approved by AI",
        DecisionAction::Escalate => "Escalated by AI",
        DecisionAction::Reject => "Rejected by AI",
    }
}

// ============================================
// Reply parsing
// ============================================

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)```json\s*(\{.*?\})\s*```").unwrap())
}

fn fence_strip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)```json.*?```").unwrap())
}

fn bare_json_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?s)\{.*"action".*\}"#).unwrap())
}

fn order_ref_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:#|\border\s+id\s*[:#]?\s*)?([A-Za-z0-9][A-Za-z0-9-]{3,})").unwrap()
    })
}

/// Tokens in the message that could be an order reference, in order.
fn order_ref_candidates(message: &str) -> Vec<String> {
    order_ref_re()
        .captures_iter(message)
        .take(8)
        .map(|c| c[1].to_string())
        .collect()
}

fn mentions_order(message: &str) -> bool {
    message.to_lowercase().contains("order") || message.contains('#')
}

/// Pull the structured decision out of the reply: a fenced ```json block, or
/// a bare trailing object when the model forgot the fence. Malformed JSON or
/// an unknown action yields no decision.
fn extract_decision(reply: &str) -> Option<(DecisionAction, ParsedDecision)> {
    let raw = match fence_re().captures(reply) {
        Some(captures) => captures[1].to_string(),
        None if !reply.contains("```") => bare_json_re().find(reply)?.as_str().to_string(),
        None => return None,
    };

    let parsed: ParsedDecision = serde_json::from_str(&raw).ok()?;
    let action = parsed.action.parse::<DecisionAction>().ok()?;
    Some((action, parsed))
}

/// Strip the decision block so transcripts read as plain conversation.
fn clean_reply(reply: &str) -> String {
    let cleaned = fence_strip_re().replace_all(reply, "");
    let cleaned = if !reply.contains("```") {
        bare_json_re().replace_all(&cleaned, "").into_owned()
    } else {
        cleaned.into_owned()
    };
    cleaned.trim().to_string()
}

/// Last three history turns plus the current exchange, one line per turn.
fn flatten_transcript(history: &[ChatTurn], message: &str, clean_reply: &str) -> String {
    let mut lines: Vec<String> = history
        .iter()
        .rev()
        .take(3)
        .rev()
        .map(|turn| format!("{}: {}", turn.role, turn.content))
        .collect();
    lines.push(format!("User: {}", message));
    lines.push(format!("AI: {}", clean_reply));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DashboardMessage;
    use crate::testutil::{
        seed_company, seed_transaction, MemClaimRepository, MemCompanyRepository,
        MemEscalationRepository, MemPayoutRepository, MemTransactionRepository, ScriptedProvider,
    };
    use redress::{ClaimStatus, MessageRole};

    // ----- pure helpers -----

    #[test]
    fn test_order_ref_candidates() {
        let candidates = order_ref_candidates("my order #ORD-1042 arrived broken");
        assert!(candidates.contains(&"ORD-1042".to_string()));
        assert!(order_ref_candidates("hi").is_empty());
    }

    #[test]
    fn test_extract_decision_fenced() {
        let reply = "All set!\n```json\n{\"action\": \"REFUND\", \"reason\": \"Damage verified\", \"transaction_id\": \"ORD-1\"}\n```";
        let (action, parsed) = extract_decision(reply).unwrap();
        assert_eq!(action, DecisionAction::Refund);
        assert_eq!(parsed.reason.as_deref(), Some("Damage verified"));
        assert_eq!(parsed.transaction_id.as_deref(), Some("ORD-1"));
    }

    #[test]
    fn test_extract_decision_bare_json() {
        let reply = "Escalating this to a human.\n{\"action\": \"ESCALATE\", \"reason\": \"Policy unclear\"}";
        let (action, _) = extract_decision(reply).unwrap();
        assert_eq!(action, DecisionAction::Escalate);
    }

    #[test]
    fn test_extract_decision_rejects_garbage() {
        assert!(extract_decision("no decision here").is_none());
        assert!(extract_decision("```json\n{not json}\n```").is_none());
        assert!(
            extract_decision("```json\n{\"action\": \"PARTY\"}\n```").is_none(),
            "unknown action must be treated as no decision"
        );
    }

    #[test]
    fn test_clean_reply_strips_fenced_block() {
        let reply = "Refund issued.\n```json\n{\"action\": \"REFUND\"}\n```";
        assert_eq!(clean_reply(reply), "Refund issued.");
    }

    #[test]
    fn test_clean_reply_strips_bare_block() {
        let reply = "Refund issued.\n{\"action\": \"REFUND\", \"reason\": \"ok\"}";
        assert_eq!(clean_reply(reply), "Refund issued.");
    }

    #[test]
    fn test_flatten_transcript_keeps_last_three_turns() {
        let history: Vec<ChatTurn> = (0..5)
            .map(|i| ChatTurn {
                role: "user".to_string(),
                content: format!("turn {}", i),
            })
            .collect();
        let transcript = flatten_transcript(&history, "latest", "reply");
        assert!(!transcript.contains("turn 0"));
        assert!(!transcript.contains("turn 1"));
        assert!(transcript.contains("turn 2"));
        assert!(transcript.contains("turn 4"));
        assert!(transcript.ends_with("User: latest\nAI: reply"));
    }

    // ----- engine -----

    struct Fixture {
        companies: Arc<MemCompanyRepository>,
        transactions: Arc<MemTransactionRepository>,
        claims: Arc<MemClaimRepository>,
        payouts: Arc<MemPayoutRepository>,
        escalations: Arc<MemEscalationRepository>,
        provider: Arc<ScriptedProvider>,
        events: EventBroadcaster,
        service: TriageService<
            MemCompanyRepository,
            MemTransactionRepository,
            MemClaimRepository,
            MemPayoutRepository,
            MemEscalationRepository,
        >,
    }

    fn fixture() -> Fixture {
        let companies = Arc::new(MemCompanyRepository::new());
        let transactions = Arc::new(MemTransactionRepository::new());
        let claims = Arc::new(MemClaimRepository::new());
        let payouts = Arc::new(MemPayoutRepository::new());
        let escalations = Arc::new(MemEscalationRepository::new());
        let provider = Arc::new(ScriptedProvider::new());
        let events = EventBroadcaster::new();
        let stats = Arc::new(StatsManager::new());

        let service = TriageService::new(
            companies.clone(),
            transactions.clone(),
            claims.clone(),
            payouts.clone(),
            escalations.clone(),
            provider.clone(),
            events.clone(),
            stats,
        );

        Fixture {
            companies,
            transactions,
            claims,
            payouts,
            escalations,
            provider,
            events,
            service,
        }
    }

    fn request(company_id: Uuid, message: &str) -> TriageRequest {
        TriageRequest {
            company_id,
            message: message.to_string(),
            history: vec![],
            image_analysis: None,
            evidence_ref: None,
            customer_ref: None,
        }
    }

    fn decision_reply(action: &str, transaction_id: &str) -> String {
        format!(
            "Understood, handling that for you.\n```json\n{{\"action\": \"{}\", \"reason\": \"Damage verified\", \"transaction_id\": \"{}\"}}\n```",
            action, transaction_id
        )
    }

    #[tokio::test]
    async fn test_unknown_tenant_is_rejected() {
        let f = fixture();
        let err = f
            .service
            .chat(request(Uuid::new_v4(), "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_refund_decision_creates_payout_claim_and_refunds_tx() {
        let f = fixture();
        let company = seed_company(&f.companies, "cozywear", "Lenient: refund any damage").await;
        let tx = seed_transaction(&f.transactions, company.id, "ORD-1042", 59.90).await;

        let mut rx = f.events.subscribe();
        f.provider
            .push_reply(decision_reply("REFUND", &tx.id.to_string()));

        let outcome = f
            .service
            .chat(request(company.id, "my sweater ripped, order #ORD-1042"))
            .await
            .unwrap();

        assert_eq!(outcome.action, Some(DecisionAction::Refund));
        assert!(!outcome.reply.is_empty());

        let claims = f.claims.all();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].status, ClaimStatus::Approved);
        assert!(claims[0].transcript.as_deref().unwrap().contains("User:"));

        let payouts = f.payouts.all();
        assert_eq!(payouts.len(), 1);
        assert_eq!(payouts[0].amount, 59.90);
        assert_eq!(payouts[0].transaction_id, tx.id);

        let tx = f.transactions.find_by_id(tx.id).await.unwrap().unwrap();
        assert_eq!(tx.status, TransactionStatus::Refunded);

        // Exactly one activity event followed by a stats push
        let first = rx.recv().await.unwrap();
        assert!(matches!(
            first,
            DashboardMessage::Event { ref title, .. } if title == "REFUND"
        ));
        assert!(matches!(rx.recv().await.unwrap(), DashboardMessage::Stats { .. }));
    }

    #[tokio::test]
    async fn test_policies_steer_identical_claims_apart() {
        // Same claim text; the lenient tenant's model approves, the strict
        // tenant's model rejects. Each outcome lands on the right records.
        let f = fixture();
        let lenient = seed_company(&f.companies, "cozywear", "Lenient: refund any damage").await;
        let strict =
            seed_company(&f.companies, "technova", "Strict: only sealed returns within 7 days")
                .await;
        let lenient_tx = seed_transaction(&f.transactions, lenient.id, "ORD-1", 20.0).await;
        let strict_tx = seed_transaction(&f.transactions, strict.id, "ORD-1", 20.0).await;

        f.provider
            .push_reply(decision_reply("REFUND", &lenient_tx.id.to_string()));
        let lenient_outcome = f
            .service
            .chat(request(lenient.id, "my order ORD-1 arrived scratched"))
            .await
            .unwrap();
        assert_eq!(lenient_outcome.action, Some(DecisionAction::Refund));

        // The prompt the provider saw must carry the lenient policy verbatim
        let prompt = f.provider.last_prompt().unwrap();
        assert_eq!(prompt[0].role, MessageRole::System);
        assert!(prompt[0].content.contains("Lenient: refund any damage"));

        f.provider
            .push_reply(decision_reply("REJECT", &strict_tx.id.to_string()));
        let strict_outcome = f
            .service
            .chat(request(strict.id, "my order ORD-1 arrived scratched"))
            .await
            .unwrap();
        assert_eq!(strict_outcome.action, Some(DecisionAction::Reject));

        let prompt = f.provider.last_prompt().unwrap();
        assert!(prompt[0].content.contains("Strict: only sealed returns"));

        // One approved claim + payout for the lenient tenant, one rejected
        // claim and no payout for the strict tenant
        let claims = f.claims.all();
        assert_eq!(claims.len(), 2);
        assert!(f
            .claims
            .all()
            .iter()
            .any(|c| c.company_id == lenient.id && c.status == ClaimStatus::Approved));
        assert!(claims
            .iter()
            .any(|c| c.company_id == strict.id && c.status == ClaimStatus::Rejected));
        assert_eq!(f.payouts.all().len(), 1);
        assert_eq!(f.payouts.all()[0].company_id, lenient.id);
    }

    #[tokio::test]
    async fn test_escalation_creates_claim_and_escalation_rows() {
        let f = fixture();
        let company = seed_company(&f.companies, "technova", "Vague policy").await;
        let tx = seed_transaction(&f.transactions, company.id, "ORD-9", 10.0).await;

        f.provider.push_reply(format!(
            "Let me hand this to a colleague.\n```json\n{{\"action\": \"ESCALATE\", \"reason\": \"Policy unclear\", \"transaction_id\": \"{}\"}}\n```",
            tx.id
        ));

        let outcome = f
            .service
            .chat(TriageRequest {
                customer_ref: Some("cust-7".to_string()),
                ..request(company.id, "I want a human")
            })
            .await
            .unwrap();

        assert_eq!(outcome.action, Some(DecisionAction::Escalate));

        let claims = f.claims.all();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].status, ClaimStatus::Escalated);

        let escalations = f.escalations.all();
        assert_eq!(escalations.len(), 1);
        assert_eq!(escalations[0].reason, "Policy unclear");
        assert_eq!(escalations[0].customer_ref.as_deref(), Some("cust-7"));
        assert!(f.payouts.all().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_degrades_without_mutation() {
        let f = fixture();
        let company = seed_company(&f.companies, "cozywear", "Lenient").await;
        seed_transaction(&f.transactions, company.id, "ORD-1", 20.0).await;

        f.provider.push_error("connection reset");

        let outcome = f
            .service
            .chat(request(company.id, "my order ORD-1 broke"))
            .await
            .unwrap();

        assert_eq!(outcome.reply, FALLBACK_REPLY);
        assert_eq!(outcome.action, None);
        assert!(f.claims.all().is_empty());
        assert!(f.payouts.all().is_empty());
        assert!(f.escalations.all().is_empty());
    }

    #[tokio::test]
    async fn test_plain_chat_mutates_nothing() {
        let f = fixture();
        let company = seed_company(&f.companies, "cozywear", "Lenient").await;

        f.provider
            .push_reply("Hi! How can I help you today?".to_string());

        let outcome = f.service.chat(request(company.id, "hello")).await.unwrap();
        assert_eq!(outcome.reply, "Hi! How can I help you today?");
        assert_eq!(outcome.action, None);
        assert!(f.claims.all().is_empty());
    }

    #[tokio::test]
    async fn test_existing_claim_blocks_second_automatic_decision() {
        let f = fixture();
        let company = seed_company(&f.companies, "cozywear", "Lenient").await;
        let tx = seed_transaction(&f.transactions, company.id, "ORD-1", 20.0).await;

        f.provider
            .push_reply(decision_reply("REFUND", &tx.id.to_string()));
        f.service
            .chat(request(company.id, "ORD-1 broke"))
            .await
            .unwrap();
        assert_eq!(f.claims.all().len(), 1);

        // Second refund decision for the same transaction must be a no-op
        f.provider
            .push_reply(decision_reply("REFUND", &tx.id.to_string()));
        f.service
            .chat(request(company.id, "ORD-1 broke again"))
            .await
            .unwrap();

        assert_eq!(f.claims.all().len(), 1);
        assert_eq!(f.payouts.all().len(), 1);
    }

    #[tokio::test]
    async fn test_decision_resolves_order_ref_to_transaction() {
        let f = fixture();
        let company = seed_company(&f.companies, "cozywear", "Lenient").await;
        let tx = seed_transaction(&f.transactions, company.id, "ORD-1042", 33.0).await;

        // Model echoed the order reference instead of the UUID
        f.provider.push_reply(decision_reply("REFUND", "ORD-1042"));
        f.service
            .chat(request(company.id, "refund ORD-1042 please"))
            .await
            .unwrap();

        let claims = f.claims.all();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].transaction_id, tx.id);
    }

    #[tokio::test]
    async fn test_system_note_reports_verified_transaction() {
        let f = fixture();
        let company = seed_company(&f.companies, "cozywear", "Lenient").await;
        let tx = seed_transaction(&f.transactions, company.id, "ORD-1042", 33.0).await;

        f.provider.push_reply("Could you confirm the damage?");
        f.service
            .chat(request(company.id, "my order #ORD-1042 arrived broken"))
            .await
            .unwrap();

        let prompt = f.provider.last_prompt().unwrap();
        let user_turn = &prompt.last().unwrap().content;
        assert!(user_turn.contains("[SYSTEM]: Tx ORD-1042 verified"));
        assert!(user_turn.contains(&tx.id.to_string()));
    }

    #[tokio::test]
    async fn test_system_note_reports_missing_transaction() {
        let f = fixture();
        let company = seed_company(&f.companies, "cozywear", "Lenient").await;

        f.provider.push_reply("I can't find that order.");
        f.service
            .chat(request(company.id, "my order #ZZZ-404 vanished"))
            .await
            .unwrap();

        let prompt = f.provider.last_prompt().unwrap();
        assert!(prompt
            .last()
            .unwrap()
            .content
            .contains("[SYSTEM]: Tx ZZZ-404 NOT FOUND"));
    }
}
