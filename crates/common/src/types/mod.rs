use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

impl Health {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// JSON body returned by handlers when a request fails.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self { error: error.into(), code }
    }
}
