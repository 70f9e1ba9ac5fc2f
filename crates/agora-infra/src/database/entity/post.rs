//! Post entity for SeaORM.
//!
//! The owner snapshot, comments and likes are embedded `jsonb` documents
//! whose identifier is stored as `_id`.

use chrono::{DateTime, Utc};
use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub owner: OwnerDocument,
    #[sea_orm(column_type = "JsonBinary")]
    pub comments: CommentDocuments,
    #[sea_orm(column_type = "JsonBinary")]
    pub likes: LikeDocuments,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Embedded user snapshot, used for post owners, comment owners and likes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct OwnerDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub avatar: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub body: String,
    pub owner: OwnerDocument,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct CommentDocuments(pub Vec<CommentDocument>);

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct LikeDocuments(pub Vec<OwnerDocument>);
