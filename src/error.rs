use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No nearby points found for snapping")]
    NoPointsFound,
    #[error("Invalid node index")]
    InvalidNodeIndex,
    #[error("Solar data unavailable for the queried point and time")]
    DataUnavailable,
    #[error("Origin and destination are not connected in the road network")]
    DisconnectedGraph,
    #[error("Invalid route: {0}")]
    InvalidRoute(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Search step budget exhausted before any route was found")]
    BudgetExhausted,
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}
