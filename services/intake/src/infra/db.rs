use std::sync::Arc;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, FromQueryResult, QueryFilter, QueryOrder, SqlErr, Statement, TransactionError,
    TransactionTrait,
};
use serde_json::{Map, Value};
use uuid::Uuid;

use passystem_intake_schema::{application_attachments, applications, users};

use crate::domain::attachment::Attachment;
use crate::domain::repository::{ApplicationRepository, UserRepository};
use crate::domain::types::{ApplicantFields, Application, ApplicationDraft, UpsertOutcome, User};
use crate::error::IntakeServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: Arc<DatabaseConnection>,
}

impl UserRepository for DbUserRepository {
    async fn list(&self) -> Result<Vec<User>, IntakeServiceError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, IntakeServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn upsert(&self, candidate: &User) -> Result<UpsertOutcome, IntakeServiceError> {
        // One conditional write; `xmax = 0` separates a fresh insert from a
        // conflict-path update so the handler can pick 201 vs 200.
        let sql = r#"
            INSERT INTO users (id, email, name, role, photo_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            ON CONFLICT (email) DO UPDATE SET
                name = EXCLUDED.name,
                role = EXCLUDED.role,
                photo_url = EXCLUDED.photo_url,
                updated_at = EXCLUDED.updated_at
            RETURNING id, email, name, role, photo_url, created_at, updated_at,
                (xmax = 0) AS inserted
        "#;

        let row = UpsertedUserRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            [
                candidate.id.into(),
                candidate.email.clone().into(),
                candidate.name.clone().into(),
                candidate.role.clone().into(),
                candidate.photo_url.clone().into(),
                candidate.updated_at.into(),
            ],
        ))
        .one(self.db.as_ref())
        .await
        .context("upsert user")?
        .ok_or_else(|| anyhow::anyhow!("upsert user returned no row"))?;

        Ok(UpsertOutcome {
            created: row.inserted,
            user: User {
                id: row.id,
                email: row.email,
                name: row.name,
                role: row.role,
                photo_url: row.photo_url,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        })
    }
}

#[derive(Debug, FromQueryResult)]
struct UpsertedUserRow {
    id: Uuid,
    email: String,
    name: String,
    role: String,
    photo_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    inserted: bool,
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        name: model.name,
        role: model.role,
        photo_url: model.photo_url,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Application repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbApplicationRepository {
    pub db: Arc<DatabaseConnection>,
}

impl ApplicationRepository for DbApplicationRepository {
    async fn list(&self) -> Result<Vec<Application>, IntakeServiceError> {
        let models = applications::Entity::find()
            .order_by_asc(applications::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .context("list applications")?;

        let mut results = Vec::with_capacity(models.len());
        for model in models {
            let rows = application_attachments::Entity::find()
                .filter(application_attachments::Column::ApplicationId.eq(model.id))
                .all(self.db.as_ref())
                .await
                .context("list application attachments")?;
            let attachments = rows.into_iter().map(attachment_from_model).collect();
            results.push(application_from_model(model, attachments));
        }
        Ok(results)
    }

    async fn create(
        &self,
        application_id: &str,
        draft: &ApplicationDraft,
        now: DateTime<Utc>,
    ) -> Result<Uuid, IntakeServiceError> {
        let record_id = Uuid::now_v7();
        let application_id = application_id.to_owned();
        let draft = draft.clone();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    applications::ActiveModel {
                        id: Set(record_id),
                        application_id: Set(application_id),
                        passport_type: Set(draft.fields.passport_type),
                        online_registration_number: Set(draft.fields.online_registration_number),
                        full_name: Set(draft.fields.full_name),
                        date_of_birth: Set(draft.fields.date_of_birth),
                        mobile_number: Set(draft.fields.mobile_number),
                        extra: Set(Value::Object(draft.extra)),
                        created_at: Set(now),
                        updated_at: Set(now),
                    }
                    .insert(txn)
                    .await?;

                    for attachment in draft.attachments {
                        application_attachments::ActiveModel {
                            id: Set(Uuid::now_v7()),
                            application_id: Set(record_id),
                            category: Set(attachment.category),
                            file_name: Set(attachment.name),
                            data: Set(attachment.data),
                            content_type: Set(attachment.content_type),
                        }
                        .insert(txn)
                        .await?;
                    }
                    Ok(())
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Transaction(db_err)
                    if matches!(db_err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
                {
                    IntakeServiceError::ApplicationIdConflict
                }
                e => IntakeServiceError::Internal(
                    anyhow::Error::new(e).context("create application"),
                ),
            })?;
        Ok(record_id)
    }
}

fn attachment_from_model(model: application_attachments::Model) -> Attachment {
    Attachment {
        category: model.category,
        name: model.file_name,
        data: model.data,
        content_type: model.content_type,
    }
}

fn application_from_model(model: applications::Model, attachments: Vec<Attachment>) -> Application {
    let extra = match model.extra {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    Application {
        id: model.id,
        application_id: model.application_id,
        fields: ApplicantFields {
            passport_type: model.passport_type,
            online_registration_number: model.online_registration_number,
            full_name: model.full_name,
            date_of_birth: model.date_of_birth,
            mobile_number: model.mobile_number,
        },
        extra,
        attachments,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
