#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("song not added")]
    NotAdded,

    #[error("song not deleted")]
    NotDeleted,

    #[error("song not updated")]
    NotUpdated,

    #[error("song not found")]
    NotFound,

    #[error("verse number out of range. total verses: {total_verses}")]
    OutOfRange { total_verses: usize },

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type Result<T> = std::result::Result<T, DbError>;
