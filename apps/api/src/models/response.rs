use serde::Serialize;

/// Success envelope shared by the JSON endpoints: `{"success": true, "data": ...}`.
/// Failures use the `AppError` body instead.
#[derive(Debug, Serialize)]
pub struct ApiSuccess<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiSuccess<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
