use gloo::net::http::Request;
use shared::{
    HealthResponse, Meeting, MeetingsResponse, NextMeetingResponse, SearchMeetingsRequest,
    SearchMeetingsResponse,
};
use thiserror::Error;

/// The locally-run research backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Everything that can go wrong with a single fetch. No retries happen at
/// this layer; a failure is terminal for the selection that caused it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The backend answered with a non-2xx status
    #[error("status: {0}")]
    HttpStatus(u16),
    /// The request never completed
    #[error("network error: {0}")]
    Network(String),
    /// The body was not the JSON we expected
    #[error("could not parse backend response")]
    Parse,
}

/// API client for the meeting research backend
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Backend liveness probe, used for the startup connection check
    pub async fn health(&self) -> Result<HealthResponse, FetchError> {
        let url = format!("{}/health", self.base_url);
        let (status, body) = self.get_text(&url).await?;
        decode_health(status, &body)
    }

    /// Fetch the researched meetings for one calendar day. The date string
    /// is already `YYYY-MM-DD`; it is sent verbatim, never shifted to UTC.
    pub async fn meetings_for_date(&self, date: &str) -> Result<Vec<Meeting>, FetchError> {
        let url = format!("{}/meetings/{}", self.base_url, date);
        let (status, body) = self.get_text(&url).await?;
        decode_meetings(status, &body)
    }

    /// Fetch full research detail for a single meeting
    pub async fn meeting_detail(&self, meeting_id: &str) -> Result<Meeting, FetchError> {
        let url = format!("{}/meeting/{}", self.base_url, meeting_id);
        let (status, body) = self.get_text(&url).await?;
        decode_meeting_detail(status, &body)
    }

    /// The next upcoming meeting, if the backend knows of one
    pub async fn next_meeting(&self) -> Result<Option<Meeting>, FetchError> {
        let url = format!("{}/next-meeting", self.base_url);
        let (status, body) = self.get_text(&url).await?;
        decode_next_meeting(status, &body)
    }

    /// Keyword search across calendar meetings
    pub async fn search_meetings(&self, keyword: &str) -> Result<Vec<Meeting>, FetchError> {
        let url = format!("{}/search-meetings", self.base_url);
        let request = SearchMeetingsRequest {
            keyword: keyword.to_string(),
        };

        let response = Request::post(&url)
            .json(&request)
            .map_err(|e| FetchError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        decode_search(status, &body)
    }

    async fn get_text(&self, url: &str) -> Result<(u16, String), FetchError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok((status, body))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn check_status(status: u16) -> Result<(), FetchError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(FetchError::HttpStatus(status))
    }
}

fn decode_meetings(status: u16, body: &str) -> Result<Vec<Meeting>, FetchError> {
    check_status(status)?;
    let parsed: MeetingsResponse = serde_json::from_str(body).map_err(|_| FetchError::Parse)?;
    Ok(parsed.meetings)
}

fn decode_meeting_detail(status: u16, body: &str) -> Result<Meeting, FetchError> {
    check_status(status)?;
    serde_json::from_str(body).map_err(|_| FetchError::Parse)
}

fn decode_next_meeting(status: u16, body: &str) -> Result<Option<Meeting>, FetchError> {
    check_status(status)?;
    let parsed: NextMeetingResponse = serde_json::from_str(body).map_err(|_| FetchError::Parse)?;
    Ok(parsed.meeting)
}

fn decode_search(status: u16, body: &str) -> Result<Vec<Meeting>, FetchError> {
    check_status(status)?;
    let parsed: SearchMeetingsResponse =
        serde_json::from_str(body).map_err(|_| FetchError::Parse)?;
    Ok(parsed.meetings)
}

fn decode_health(status: u16, body: &str) -> Result<HealthResponse, FetchError> {
    check_status(status)?;
    serde_json::from_str(body).map_err(|_| FetchError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_meetings_success() {
        let body = r#"{"date":"2024-03-15","meetings":[{"title":"Sync","start_time":"2024-03-15T14:00:00Z","attendees":[{"name":"A"}]}],"count":1}"#;
        let meetings = decode_meetings(200, body).unwrap();
        assert_eq!(meetings.len(), 1);
        assert_eq!(meetings[0].title, "Sync");
    }

    #[wasm_bindgen_test]
    fn test_decode_meetings_empty_list_is_ok() {
        let body = r#"{"date":"2024-03-16","meetings":[],"count":0}"#;
        let meetings = decode_meetings(200, body).unwrap();
        assert!(meetings.is_empty());
    }

    #[wasm_bindgen_test]
    fn test_decode_meetings_http_error() {
        let err = decode_meetings(500, "backend exploded").unwrap_err();
        assert_eq!(err, FetchError::HttpStatus(500));
        assert_eq!(err.to_string(), "status: 500");
    }

    #[wasm_bindgen_test]
    fn test_decode_meetings_bad_json() {
        let err = decode_meetings(200, "<html>not json</html>").unwrap_err();
        assert_eq!(err, FetchError::Parse);
    }

    #[wasm_bindgen_test]
    fn test_decode_next_meeting_absent() {
        let body = r#"{"message":"No upcoming meetings found","meeting":null}"#;
        assert_eq!(decode_next_meeting(200, body).unwrap(), None);
    }

    #[wasm_bindgen_test]
    fn test_decode_search_unwraps_envelope() {
        let body = r#"{"keyword":"interview","meetings":[{"title":"Panel interview"}],"count":1}"#;
        let meetings = decode_search(200, body).unwrap();
        assert_eq!(meetings[0].title, "Panel interview");
    }
}
