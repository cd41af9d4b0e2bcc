use sea_orm::entity::prelude::*;

/// Submitted passport application. The columns cover the subset of
/// applicant fields the encoded submission variant requires; everything
/// else the applicant sent lives in `extra` as-is. Rows are insert-only.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub application_id: String,
    pub passport_type: Option<String>,
    pub online_registration_number: Option<String>,
    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub mobile_number: Option<String>,
    pub extra: Json,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::application_attachments::Entity")]
    ApplicationAttachments,
}

impl Related<super::application_attachments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApplicationAttachments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
