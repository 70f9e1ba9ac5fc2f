//! PostgreSQL data source implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use agora_core::domain::{
    NewUser, Post, PostComment, PostLikeOwner, PostOwner, User, UserProfile, UserProfileUpdate,
    UserUpdate,
};
use agora_core::error::RepoError;
use agora_core::ports::{PostDataSource, UserDataSource};

use super::entity::post::{self, CommentDocument, Entity as PostEntity, OwnerDocument};
use super::entity::user::{self, Entity as UserEntity};
use super::mapper::{append_payload, like_probe};
use super::postgres_base::{PostgresDataSource, map_db_err};

/// PostgreSQL user data source.
pub type PostgresUserDataSource = PostgresDataSource<UserEntity>;

/// PostgreSQL post data source.
pub type PostgresPostDataSource = PostgresDataSource<PostEntity>;

#[async_trait]
impl UserDataSource for PostgresUserDataSource {
    async fn create_user(&self, new_user: NewUser) -> Result<User, RepoError> {
        let active_model: user::ActiveModel = User::new(new_user).into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        tracing::debug!(user_id = %model.id, "User row inserted");
        Ok(model.into())
    }

    async fn get_user_by_id(&self, user_id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.find_model(user_id).await?.map(Into::into))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn get_user_profile_by_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserProfile>, RepoError> {
        Ok(self.find_model(user_id).await?.map(Into::into))
    }

    async fn update_user_by_id(
        &self,
        user_id: Uuid,
        update: UserUpdate,
    ) -> Result<Option<User>, RepoError> {
        let mut query = UserEntity::update_many()
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(user_id));

        if let Some(token) = update.token {
            query = query.col_expr(user::Column::Token, Expr::value(token));
        }
        if let Some(name) = update.name {
            query = query.col_expr(user::Column::Name, Expr::value(name));
        }
        if let Some(surname) = update.surname {
            query = query.col_expr(user::Column::Surname, Expr::value(surname));
        }
        if let Some(avatar) = update.avatar {
            query = query.col_expr(user::Column::Avatar, Expr::value(avatar));
        }

        let updated = query
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(updated.into_iter().next().map(Into::into))
    }

    async fn update_user_profile_by_id(
        &self,
        user_id: Uuid,
        update: UserProfileUpdate,
    ) -> Result<Option<UserProfile>, RepoError> {
        let user = self.update_user_by_id(user_id, update.into()).await?;
        Ok(user.map(|u| u.profile()))
    }
}

#[async_trait]
impl PostDataSource for PostgresPostDataSource {
    async fn create_post(&self, owner: PostOwner, body: String) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = Post::new(owner, body).into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn get_posts(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn get_post_by_id(&self, post_id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.find_model(post_id).await?.map(Into::into))
    }

    async fn like_post(
        &self,
        post_id: Uuid,
        like_owner: PostLikeOwner,
    ) -> Result<Option<Post>, RepoError> {
        let probe = like_probe(&like_owner);
        let payload = append_payload(OwnerDocument::from(like_owner))?;

        // Conditional append: a row already holding this liker is left alone.
        let updated = PostEntity::update_many()
            .col_expr(
                post::Column::Likes,
                Expr::cust_with_values("\"likes\" || $1", [payload]),
            )
            .col_expr(post::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(post::Column::Id.eq(post_id))
            .filter(Expr::cust_with_values("NOT (\"likes\" @> $1)", [probe]))
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        match updated.into_iter().next() {
            Some(model) => Ok(Some(model.into())),
            None => {
                tracing::debug!(%post_id, "Like skipped, post missing or already liked");
                self.get_post_by_id(post_id).await
            }
        }
    }

    async fn comment_post(
        &self,
        post_id: Uuid,
        comment: PostComment,
    ) -> Result<Option<Post>, RepoError> {
        let payload = append_payload(CommentDocument::from(comment))?;

        let updated = PostEntity::update_many()
            .col_expr(
                post::Column::Comments,
                Expr::cust_with_values("\"comments\" || $1", [payload]),
            )
            .col_expr(post::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(post::Column::Id.eq(post_id))
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(updated.into_iter().next().map(Into::into))
    }
}
