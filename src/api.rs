//! Dashboard API: the operation set behind the list, view, create and edit
//! pages
//!
//! Every write goes through the same pipeline: the raw JSON submission is
//! filtered and validated against the entity's rules, turned into a typed
//! draft or patch, checked for dangling references and then persisted.
//! Relations are loaded eagerly and only when a query asks for them.
//!
//! Reference checks and cascading deletes span several service calls, so
//! they run under a shared gate: transaction writes hold it for reading and
//! cascades hold it exclusively. A transaction can never be stored against
//! a user or influencer that a concurrent delete is removing.

use crate::core::entity::{Data, Entity};
use crate::core::error::{DashError, DashResult};
use crate::core::query::{FilterContract, GetQuery, ListQuery, Page, RelationRequest};
use crate::core::service::DataService;
use crate::core::validation::{Submission, ValidatableEntity};
use crate::entities::{
    CreditTransaction, CreditTransactionDraft, CreditTransactionFilter, CreditTransactionPatch,
    Influencer, InfluencerDraft, InfluencerFilter, InfluencerPatch, User, UserDraft, UserFilter,
    UserPatch,
};
use crate::entities::credit_transaction::CreditTransactionCount;
use crate::entities::influencer::InfluencerCount;
use crate::entities::user::UserCount;
use crate::storage::InMemoryDataService;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Validate and filter a submission, then deserialize it into its typed form
fn parse_submission<T, D>(submission: Submission, payload: Value) -> DashResult<D>
where
    T: ValidatableEntity,
    D: DeserializeOwned,
{
    let filtered = T::validation_config(submission).validate_and_filter(payload)?;
    Ok(serde_json::from_value(filtered)?)
}

/// Parse relation names and reject any the entity does not declare
fn relation_requests<T: Entity>(query: &GetQuery) -> DashResult<Vec<RelationRequest>> {
    let schema = T::schema();
    query
        .relation_requests()
        .into_iter()
        .map(|request| match schema.relation(&request.name) {
            Some(relation) if !request.count_only || relation.is_countable() => Ok(request),
            _ => Err(unknown_relation::<T>(&request)),
        })
        .collect()
}

fn unknown_relation<T: Entity>(request: &RelationRequest) -> DashError {
    let relation = if request.count_only {
        format!("{}.count", request.name)
    } else {
        request.name.clone()
    };
    DashError::UnknownRelation {
        entity: T::resource_name_singular(),
        relation,
    }
}

async fn require<T: Data>(service: &dyn DataService<T>, id: &Uuid) -> DashResult<T> {
    service.get(id).await?.ok_or_else(|| DashError::NotFound {
        entity: T::resource_name_singular(),
        id: *id,
    })
}

/// Entry point for every dashboard data operation
#[derive(Clone)]
pub struct DashboardApi {
    users: Arc<dyn DataService<User>>,
    influencers: Arc<dyn DataService<Influencer>>,
    transactions: Arc<dyn DataService<CreditTransaction>>,
    references: Arc<RwLock<()>>,
}

impl DashboardApi {
    pub fn new(
        users: Arc<dyn DataService<User>>,
        influencers: Arc<dyn DataService<Influencer>>,
        transactions: Arc<dyn DataService<CreditTransaction>>,
    ) -> Self {
        Self {
            users,
            influencers,
            transactions,
            references: Arc::new(RwLock::new(())),
        }
    }

    /// An API backed by fresh in-memory stores
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryDataService::<User>::new()),
            Arc::new(InMemoryDataService::<Influencer>::new()),
            Arc::new(InMemoryDataService::<CreditTransaction>::new()),
        )
    }

    // === Influencers ===

    pub async fn get_influencers(
        &self,
        query: &ListQuery<InfluencerFilter>,
    ) -> DashResult<Page<Influencer>> {
        let requests = relation_requests::<Influencer>(&query.base)?;
        let mut page = self
            .influencers
            .list(&query.base, &query.filter.conditions())
            .await?;
        for influencer in &mut page.data {
            self.load_influencer_relations(influencer, &requests).await?;
        }
        Ok(page)
    }

    pub async fn get_influencer_by_id(&self, id: &Uuid, query: &GetQuery) -> DashResult<Influencer> {
        let requests = relation_requests::<Influencer>(query)?;
        let mut influencer = require(&*self.influencers, id).await?;
        self.load_influencer_relations(&mut influencer, &requests).await?;
        Ok(influencer)
    }

    pub async fn create_influencer(&self, payload: Value) -> DashResult<Influencer> {
        let draft: InfluencerDraft = parse_submission::<Influencer, _>(Submission::Create, payload)?;
        let influencer = self
            .influencers
            .create(Influencer::from_draft(draft)?)
            .await?;
        tracing::info!(id = %influencer.id, name = %influencer.name, "influencer created");
        Ok(influencer)
    }

    pub async fn update_influencer_by_id(&self, id: &Uuid, payload: Value) -> DashResult<Influencer> {
        let patch: InfluencerPatch = parse_submission::<Influencer, _>(Submission::Update, payload)?;
        let mut influencer = require(&*self.influencers, id).await?;
        patch.apply(&mut influencer)?;
        let influencer = self.influencers.update(id, influencer).await?;
        tracing::info!(id = %id, "influencer updated");
        Ok(influencer)
    }

    /// Delete an influencer together with the transactions spent on it
    pub async fn delete_influencer_by_id(&self, id: &Uuid) -> DashResult<Influencer> {
        let _cascade = self.references.write().await;
        let influencer = require(&*self.influencers, id).await?;
        let removed = self
            .transactions
            .delete_by("influencer_id", &id.to_string())
            .await?;
        self.influencers.delete(id).await?;
        tracing::info!(id = %id, transactions = removed, "influencer deleted");
        Ok(influencer)
    }

    async fn load_influencer_relations(
        &self,
        influencer: &mut Influencer,
        requests: &[RelationRequest],
    ) -> DashResult<()> {
        for request in requests {
            match request.name.as_str() {
                "credit_transaction" => {
                    let key = influencer.id.to_string();
                    if request.count_only {
                        let count = self.transactions.count_by("influencer_id", &key).await?;
                        influencer
                            .count
                            .get_or_insert_with(InfluencerCount::default)
                            .credit_transaction = Some(count);
                    } else {
                        let related = self.transactions.find_by("influencer_id", &key).await?;
                        influencer.credit_transaction = Some(related);
                    }
                }
                _ => return Err(unknown_relation::<Influencer>(request)),
            }
        }
        Ok(())
    }

    // === Credit transactions ===

    pub async fn get_credit_transactions(
        &self,
        query: &ListQuery<CreditTransactionFilter>,
    ) -> DashResult<Page<CreditTransaction>> {
        let requests = relation_requests::<CreditTransaction>(&query.base)?;
        let mut page = self
            .transactions
            .list(&query.base, &query.filter.conditions())
            .await?;
        for transaction in &mut page.data {
            self.load_transaction_relations(transaction, &requests).await?;
        }
        Ok(page)
    }

    pub async fn get_credit_transaction_by_id(
        &self,
        id: &Uuid,
        query: &GetQuery,
    ) -> DashResult<CreditTransaction> {
        let requests = relation_requests::<CreditTransaction>(query)?;
        let mut transaction = require(&*self.transactions, id).await?;
        self.load_transaction_relations(&mut transaction, &requests)
            .await?;
        Ok(transaction)
    }

    /// Record a transaction; both references must resolve
    pub async fn create_credit_transaction(&self, payload: Value) -> DashResult<CreditTransaction> {
        let draft: CreditTransactionDraft =
            parse_submission::<CreditTransaction, _>(Submission::Create, payload)?;
        let _references = self.references.read().await;
        self.check_user_reference(draft.user_id).await?;
        self.check_influencer_reference(draft.influencer_id).await?;

        let transaction = self
            .transactions
            .create(CreditTransaction::from_draft(draft)?)
            .await?;
        tracing::info!(
            id = %transaction.id,
            user_id = %transaction.user_id,
            influencer_id = %transaction.influencer_id,
            credits = transaction.credits_spent,
            "credit transaction created"
        );
        Ok(transaction)
    }

    pub async fn update_credit_transaction_by_id(
        &self,
        id: &Uuid,
        payload: Value,
    ) -> DashResult<CreditTransaction> {
        let patch: CreditTransactionPatch =
            parse_submission::<CreditTransaction, _>(Submission::Update, payload)?;
        let _references = self.references.read().await;
        let mut transaction = require(&*self.transactions, id).await?;

        if let Some(user_id) = patch.user_id.filter(|u| *u != transaction.user_id) {
            self.check_user_reference(user_id).await?;
        }
        if let Some(influencer_id) = patch
            .influencer_id
            .filter(|i| *i != transaction.influencer_id)
        {
            self.check_influencer_reference(influencer_id).await?;
        }

        patch.apply(&mut transaction)?;
        let transaction = self.transactions.update(id, transaction).await?;
        tracing::info!(id = %id, "credit transaction updated");
        Ok(transaction)
    }

    pub async fn delete_credit_transaction_by_id(&self, id: &Uuid) -> DashResult<CreditTransaction> {
        let transaction = require(&*self.transactions, id).await?;
        self.transactions.delete(id).await?;
        tracing::info!(id = %id, "credit transaction deleted");
        Ok(transaction)
    }

    async fn check_user_reference(&self, user_id: Uuid) -> DashResult<()> {
        if self.users.exists(&user_id).await? {
            Ok(())
        } else {
            Err(DashError::ReferenceMissing {
                entity: CreditTransaction::resource_name_singular(),
                field: "user_id",
                id: user_id,
            })
        }
    }

    async fn check_influencer_reference(&self, influencer_id: Uuid) -> DashResult<()> {
        if self.influencers.exists(&influencer_id).await? {
            Ok(())
        } else {
            Err(DashError::ReferenceMissing {
                entity: CreditTransaction::resource_name_singular(),
                field: "influencer_id",
                id: influencer_id,
            })
        }
    }

    async fn load_transaction_relations(
        &self,
        transaction: &mut CreditTransaction,
        requests: &[RelationRequest],
    ) -> DashResult<()> {
        for request in requests {
            match request.name.as_str() {
                "user" => {
                    let user = require(&*self.users, &transaction.user_id).await?;
                    transaction.user = Some(Box::new(user));
                }
                "influencer" => {
                    let influencer =
                        require(&*self.influencers, &transaction.influencer_id).await?;
                    transaction.influencer = Some(Box::new(influencer));
                }
                _ => return Err(unknown_relation::<CreditTransaction>(request)),
            }
        }
        if !requests.is_empty() {
            transaction.count.get_or_insert(CreditTransactionCount {});
        }
        Ok(())
    }

    // === Users ===

    pub async fn get_users(&self, query: &ListQuery<UserFilter>) -> DashResult<Page<User>> {
        let requests = relation_requests::<User>(&query.base)?;
        let mut page = self
            .users
            .list(&query.base, &query.filter.conditions())
            .await?;
        for user in &mut page.data {
            self.load_user_relations(user, &requests).await?;
        }
        Ok(page)
    }

    pub async fn get_user_by_id(&self, id: &Uuid, query: &GetQuery) -> DashResult<User> {
        let requests = relation_requests::<User>(query)?;
        let mut user = require(&*self.users, id).await?;
        self.load_user_relations(&mut user, &requests).await?;
        Ok(user)
    }

    pub async fn create_user(&self, payload: Value) -> DashResult<User> {
        let draft: UserDraft = parse_submission::<User, _>(Submission::Create, payload)?;
        let user = self.users.create(User::from_draft(draft)?).await?;
        tracing::info!(id = %user.id, tenant_id = %user.tenant_id, "user created");
        Ok(user)
    }

    pub async fn update_user_by_id(&self, id: &Uuid, payload: Value) -> DashResult<User> {
        let patch: UserPatch = parse_submission::<User, _>(Submission::Update, payload)?;
        let mut user = require(&*self.users, id).await?;
        patch.apply(&mut user)?;
        let user = self.users.update(id, user).await?;
        tracing::info!(id = %id, "user updated");
        Ok(user)
    }

    /// Delete a user together with their transactions
    pub async fn delete_user_by_id(&self, id: &Uuid) -> DashResult<User> {
        let _cascade = self.references.write().await;
        let user = require(&*self.users, id).await?;
        let removed = self
            .transactions
            .delete_by("user_id", &id.to_string())
            .await?;
        self.users.delete(id).await?;
        tracing::info!(id = %id, transactions = removed, "user deleted");
        Ok(user)
    }

    async fn load_user_relations(&self, user: &mut User, requests: &[RelationRequest]) -> DashResult<()> {
        for request in requests {
            match request.name.as_str() {
                "credit_transaction" => {
                    let key = user.id.to_string();
                    if request.count_only {
                        let count = self.transactions.count_by("user_id", &key).await?;
                        user.count.get_or_insert_with(UserCount::default).credit_transaction =
                            Some(count);
                    } else {
                        let related = self.transactions.find_by("user_id", &key).await?;
                        user.credit_transaction = Some(related);
                    }
                }
                _ => return Err(unknown_relation::<User>(request)),
            }
        }
        Ok(())
    }
}
