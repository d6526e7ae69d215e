use super::error::ApiError;
use serde::Deserialize;

/// Standard backend response wrapper: `{ success, data, message? }`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, turning `success: false` into an error carrying
    /// the backend's message.
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            let message = self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "request was not successful".to_string());
            return Err(ApiError::Rejected { message });
        }
        self.data.ok_or(ApiError::EmptyEnvelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_envelope_yields_data() {
        let env: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{ "success": true, "data": [1, 2] }"#).unwrap();
        assert_eq!(env.into_result().unwrap(), vec![1, 2]);
    }

    #[test]
    fn failure_carries_message() {
        let env: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{ "success": false, "message": "Invalid period" }"#).unwrap();
        match env.into_result() {
            Err(ApiError::Rejected { message }) => assert_eq!(message, "Invalid period"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn failure_without_message_is_generic() {
        let env: Envelope<Vec<u32>> = serde_json::from_str(r#"{ "success": false }"#).unwrap();
        let err = env.into_result().unwrap_err();
        assert_eq!(err.to_string(), "request was not successful");
    }

    #[test]
    fn success_without_data_is_an_error() {
        let env: Envelope<Vec<u32>> = serde_json::from_str(r#"{ "success": true }"#).unwrap();
        assert!(matches!(env.into_result(), Err(ApiError::EmptyEnvelope)));
    }
}
