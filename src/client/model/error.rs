/// Failed backend call as seen by the web client.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiError {
    /// HTTP status, or 500 when the request never completed.
    pub status: u64,
    pub message: String,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
