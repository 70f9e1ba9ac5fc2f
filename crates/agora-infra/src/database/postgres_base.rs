use std::marker::PhantomData;

use sea_orm::{DbConn, DbErr, EntityTrait, PrimaryKeyTrait};

use agora_core::error::RepoError;

/// Generic PostgreSQL data source over one SeaORM entity.
///
/// Holds its own clone of the connection handle; dropping the data source
/// never closes the pool.
pub struct PostgresDataSource<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresDataSource<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Find a row by primary key, `None` when absent.
    pub(crate) async fn find_model(
        &self,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> Result<Option<E::Model>, RepoError> {
        E::find_by_id(id).one(&self.db).await.map_err(map_db_err)
    }
}

/// Classify a SeaORM error for the service layer.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        DbErr::RecordNotFound(_) => RepoError::NotFound,
        other => {
            let err_str = other.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint(err_str)
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_is_constraint() {
        let err = DbErr::Custom(
            "duplicate key value violates unique constraint \"users_username_key\"".to_string(),
        );
        assert!(matches!(map_db_err(err), RepoError::Constraint(_)));
    }

    #[test]
    fn test_other_errors_are_query_failures() {
        let err = DbErr::Custom("syntax error".to_string());
        assert!(matches!(map_db_err(err), RepoError::Query(_)));
    }

    #[test]
    fn test_record_not_found() {
        let err = DbErr::RecordNotFound("users".to_string());
        assert!(matches!(map_db_err(err), RepoError::NotFound));
    }
}
