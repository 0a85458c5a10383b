use thiserror::Error;

use crate::charts::ChartError;
use crate::stats::NoData;

/// Everything a data endpoint can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    NoData(#[from] NoData),
    #[error(transparent)]
    Render(#[from] ChartError),
    #[error("render worker failed: {0}")]
    Worker(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_surface_the_cause() {
        assert_eq!(AppError::from(NoData).to_string(), "No data after processing");
        assert_eq!(
            AppError::from(ChartError::Buffer(2, 2)).to_string(),
            "pixel buffer does not fit a 2x2 image"
        );
        assert_eq!(
            AppError::from(sqlx::Error::PoolTimedOut).to_string(),
            sqlx::Error::PoolTimedOut.to_string()
        );
    }
}
