use std::{fmt, time::SystemTime};

#[derive(Debug)]
pub enum DictError {
    Config { message: String },
    KeyNotFound { key: String },
    Store { message: String },
}

impl fmt::Display for DictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictError::Config { message } => {
                write!(f, "configuration error: {}", message)
            }
            DictError::KeyNotFound { key } => {
                write!(f, "no object with key: {}", key)
            }
            DictError::Store { message } => {
                write!(f, "store error: {}", message)
            }
        }
    }
}

impl std::error::Error for DictError {}

#[derive(Clone, Debug)]
pub struct ObjectMeta {
    pub key: String,
    pub size: i64,
    pub modified_time: SystemTime,
}
