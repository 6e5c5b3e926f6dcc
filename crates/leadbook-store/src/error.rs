use leadbook_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("erro de leitura/escrita: {0}")]
    Io(#[from] std::io::Error),
    #[error("erro no banco de dados: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("contato não encontrado: {0}")]
    NotFound(i64),
}

pub type Result<T> = std::result::Result<T, StoreError>;
