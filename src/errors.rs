use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventcraftError {
    #[error("configuration error: {0}")] Configuration(String),
    #[error("generation failed: {0}")] Generation(String),
    #[error("storage write failed: {0}")] StorageWrite(String),
}
