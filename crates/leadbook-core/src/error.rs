use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("o nome é obrigatório")]
    EmptyName,
    #[error("data da visita inválida: {0}")]
    InvalidVisitDate(String),
    #[error("valor de mensalidade inválido: {0}")]
    InvalidMonthlyFee(String),
    #[error("curso desconhecido: {0}")]
    UnknownCourse(String),
}
