use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] horoscope_cache::CacheError),
}
