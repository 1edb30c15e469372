pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown body part: {identifier}")]
    UnknownBodyPart { identifier: String },

    #[error("Invalid body-map config JSON: {message}")]
    InvalidConfigJson { message: String },

    #[error("Invalid conditions JSON: {message}")]
    InvalidConditionsJson { message: String },
}
