//! In-memory port implementations for unit tests.
//!
//! Everything here mirrors the Postgres adapters closely enough that the
//! services under test cannot tell the difference.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use redress::{
    ChatMessage, ClaimRepository, ClaimStatus, Company, CompanyRepository, CompletionOptions,
    CompletionResponse, DomainError, Escalation, EscalationRepository, EscalationStatus,
    ImageData, LlmProvider, PayoutEntry, PayoutRepository, PayoutStatus, RefundRequest,
    TokenUsage, Transaction, TransactionRepository, TransactionStatus,
};

// ============================================
// Repositories
// ============================================

pub struct MemCompanyRepository {
    rows: Mutex<Vec<Company>>,
}

impl MemCompanyRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(vec![]),
        }
    }
}

#[async_trait]
impl CompanyRepository for MemCompanyRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_tagline(&self, tagline: &str) -> Result<Option<Company>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.tagline == tagline)
            .cloned())
    }

    async fn insert(&self, company: &Company) -> Result<Company, DomainError> {
        self.rows.lock().unwrap().push(company.clone());
        Ok(company.clone())
    }

    async fn update_policy(&self, id: Uuid, policy: &str) -> Result<Company, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let company = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::not_found("Company", id))?;
        company.return_policy = policy.to_string();
        Ok(company.clone())
    }
}

pub struct MemTransactionRepository {
    rows: Mutex<Vec<Transaction>>,
}

impl MemTransactionRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(vec![]),
        }
    }
}

#[async_trait]
impl TransactionRepository for MemTransactionRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_order_ref(
        &self,
        company_id: Option<Uuid>,
        order_ref: &str,
    ) -> Result<Option<Transaction>, DomainError> {
        let clean_ref = order_ref.trim().trim_start_matches('#').to_lowercase();
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|t| {
                t.order_ref.to_lowercase() == clean_ref
                    && company_id.map(|cid| t.company_id == cid).unwrap_or(true)
            })
            .cloned())
    }

    async fn insert(&self, transaction: &Transaction) -> Result<Transaction, DomainError> {
        self.rows.lock().unwrap().push(transaction.clone());
        Ok(transaction.clone())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: TransactionStatus,
    ) -> Result<Transaction, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let tx = rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| DomainError::not_found("Transaction", id))?;
        tx.status = status;
        Ok(tx.clone())
    }
}

pub struct MemClaimRepository {
    rows: Mutex<Vec<RefundRequest>>,
}

impl MemClaimRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(vec![]),
        }
    }

    pub fn all(&self) -> Vec<RefundRequest> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClaimRepository for MemClaimRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefundRequest>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_transaction(
        &self,
        transaction_id: Uuid,
    ) -> Result<Option<RefundRequest>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.transaction_id == transaction_id)
            .cloned())
    }

    async fn find_by_transactions(
        &self,
        transaction_ids: &[Uuid],
    ) -> Result<Vec<RefundRequest>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| transaction_ids.contains(&c.transaction_id))
            .cloned()
            .collect())
    }

    async fn list_by_status(
        &self,
        company_id: Uuid,
        status: ClaimStatus,
    ) -> Result<Vec<RefundRequest>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.company_id == company_id && c.status == status)
            .cloned()
            .collect())
    }

    async fn insert(&self, claim: &RefundRequest) -> Result<RefundRequest, DomainError> {
        self.rows.lock().unwrap().push(claim.clone());
        Ok(claim.clone())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ClaimStatus,
    ) -> Result<RefundRequest, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let claim = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::not_found("RefundRequest", id))?;
        claim.status = status;
        claim.updated_at = chrono::Utc::now();
        Ok(claim.clone())
    }

    async fn redact_by_transaction(&self, transaction_id: Uuid) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        for claim in rows.iter_mut().filter(|c| c.transaction_id == transaction_id) {
            claim.transcript = None;
            claim.evidence_ref = None;
        }
        Ok(())
    }
}

pub struct MemPayoutRepository {
    rows: Mutex<Vec<PayoutEntry>>,
}

impl MemPayoutRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(vec![]),
        }
    }

    pub fn all(&self) -> Vec<PayoutEntry> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl PayoutRepository for MemPayoutRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PayoutEntry>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn list_ready(&self, company_id: Uuid) -> Result<Vec<PayoutEntry>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.company_id == company_id && p.status == PayoutStatus::ReadyForPayout)
            .cloned()
            .collect())
    }

    async fn insert(&self, entry: &PayoutEntry) -> Result<PayoutEntry, DomainError> {
        self.rows.lock().unwrap().push(entry.clone());
        Ok(entry.clone())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: PayoutStatus,
    ) -> Result<PayoutEntry, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let entry = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::not_found("PayoutEntry", id))?;
        entry.status = status;
        Ok(entry.clone())
    }
}

pub struct MemEscalationRepository {
    rows: Mutex<Vec<Escalation>>,
}

impl MemEscalationRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(vec![]),
        }
    }

    pub fn all(&self) -> Vec<Escalation> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl EscalationRepository for MemEscalationRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Escalation>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn list_open(&self) -> Result<Vec<Escalation>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.status == EscalationStatus::Open)
            .cloned()
            .collect())
    }

    async fn insert(&self, escalation: &Escalation) -> Result<Escalation, DomainError> {
        self.rows.lock().unwrap().push(escalation.clone());
        Ok(escalation.clone())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: EscalationStatus,
    ) -> Result<Escalation, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let escalation = rows
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| DomainError::not_found("Escalation", id))?;
        escalation.status = status;
        Ok(escalation.clone())
    }
}

// ============================================
// Scripted LLM provider
// ============================================

enum ScriptedReply {
    Text(String),
    Error(String),
}

/// Provider that pops pre-scripted replies and records the prompts it saw.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<ScriptedReply>>,
    captured: Mutex<Vec<Vec<ChatMessage>>>,
    image_analysis: String,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            captured: Mutex::new(vec![]),
            image_analysis: "Image is REAL. Visible crack across the screen.".to_string(),
        }
    }

    pub fn push_reply(&self, text: impl Into<String>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Text(text.into()));
    }

    pub fn push_error(&self, message: impl Into<String>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Error(message.into()));
    }

    /// The messages of the most recent `complete` call.
    pub fn last_prompt(&self) -> Option<Vec<ChatMessage>> {
        self.captured.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        self.captured.lock().unwrap().push(messages.to_vec());

        match self.replies.lock().unwrap().pop_front() {
            Some(ScriptedReply::Text(content)) => Ok(CompletionResponse {
                content,
                model: "scripted".to_string(),
                usage: TokenUsage::default(),
            }),
            Some(ScriptedReply::Error(message)) => Err(DomainError::ExternalService(message)),
            None => Err(DomainError::ExternalService(
                "no scripted reply queued".to_string(),
            )),
        }
    }

    async fn describe_image(
        &self,
        _image: &ImageData,
        _prompt: &str,
    ) -> Result<String, DomainError> {
        Ok(self.image_analysis.clone())
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        "scripted"
    }
}

// ============================================
// Seed helpers
// ============================================

pub async fn seed_company(
    repo: &Arc<MemCompanyRepository>,
    tagline: &str,
    policy: &str,
) -> Company {
    let company = Company::new(
        tagline.to_string(),
        tagline.to_string(),
        None,
        Some("#4A90D9".to_string()),
        None,
        None,
        policy.to_string(),
        "admin_00000".to_string(),
        "not-a-real-hash".to_string(),
    );
    repo.insert(&company).await.unwrap()
}

pub async fn seed_transaction(
    repo: &Arc<MemTransactionRepository>,
    company_id: Uuid,
    order_ref: &str,
    amount: f64,
) -> Transaction {
    let tx = Transaction::new(
        company_id,
        None,
        order_ref.to_string(),
        amount,
        "USD".to_string(),
        None,
        None,
    );
    repo.insert(&tx).await.unwrap()
}
