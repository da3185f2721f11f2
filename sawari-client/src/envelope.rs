use serde::Deserialize;

use sawari_core::{GatewayError, GatewayResult};

/// The backend's uniform response wrapper: `{success, message, data}`.
///
/// `message` and `data` are each optional depending on the endpoint.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Business rejection (`success: false`) becomes `Rejected` with the
    /// server's message, matching how request failures are shown.
    pub fn into_result(self) -> GatewayResult<(Option<T>, String)> {
        let message = self.message.unwrap_or_default();
        if self.success {
            Ok((self.data, message))
        } else {
            Err(GatewayError::Rejected(message))
        }
    }

    /// For list endpoints: absent data is an empty list, never an error.
    pub fn into_data_or_default(self) -> GatewayResult<T>
    where
        T: Default,
    {
        let (data, _) = self.into_result()?;
        Ok(data.unwrap_or_default())
    }

    /// For mutation endpoints: only the confirmation message is used.
    pub fn into_message(self) -> GatewayResult<String> {
        let (_, message) = self.into_result()?;
        Ok(message)
    }
}
