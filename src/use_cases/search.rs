use serde_json::Value;

use crate::domain::entities::SearchMode;
use crate::domain::errors::ApiError;
use crate::interface_adapters::clients::ApiClient;
use crate::interface_adapters::protocol::{MultimodalSearchRequest, SearchResults};

// Raw input from the search form. Any combination of the three sources is allowed.
#[derive(Clone, Debug, Default)]
pub struct SearchInput {
    pub text: String,
    pub images: Vec<String>,
    pub pinterest_url: String,
    pub mode: SearchMode,
    pub filters: Option<Value>,
    pub limit: Option<u32>,
}

pub struct MultimodalSearch {
    client: ApiClient,
}

impl MultimodalSearch {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn execute(&self, input: SearchInput) -> Result<SearchResults, ApiError> {
        let request = prepare(input)?;
        tracing::debug!(
            mode = ?request.mode,
            images = request.images.len(),
            has_text = request.text.is_some(),
            "running multimodal search"
        );
        self.client.search().multimodal(&request).await
    }
}

/// Validates form input and turns it into the wire request.
///
/// Blank text and blank links are dropped; at least one source must remain.
pub fn prepare(input: SearchInput) -> Result<MultimodalSearchRequest, ApiError> {
    let text = non_blank(input.text);
    let pinterest_url = non_blank(input.pinterest_url);
    let images: Vec<String> = input
        .images
        .into_iter()
        .filter(|image| !image.trim().is_empty())
        .collect();

    if text.is_none() && images.is_empty() && pinterest_url.is_none() {
        return Err(ApiError::InvalidInput(
            "enter text, upload images, or provide a Pinterest link".to_string(),
        ));
    }

    Ok(MultimodalSearchRequest {
        text,
        images,
        pinterest_url,
        mode: input.mode,
        filters: input.filters,
        limit: input.limit,
    })
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface_adapters::mocks;
    use crate::use_cases::test_support::{RecordingRedirect, RecordingSessionStore, offline_client};

    #[test]
    fn when_all_sources_are_blank_then_prepare_rejects_input() {
        let input = SearchInput {
            text: "   ".to_string(),
            images: vec![String::new()],
            pinterest_url: "\t".to_string(),
            ..Default::default()
        };

        assert!(matches!(prepare(input), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn when_only_link_is_given_then_text_is_omitted() {
        let input = SearchInput {
            pinterest_url: " https://pin.it/abc ".to_string(),
            mode: SearchMode::Pinterest,
            ..Default::default()
        };

        let request = prepare(input).expect("expected a valid request");

        assert_eq!(request.text, None);
        assert_eq!(request.pinterest_url.as_deref(), Some("https://pin.it/abc"));
        assert_eq!(request.mode, SearchMode::Pinterest);
    }

    #[tokio::test]
    async fn when_input_is_empty_then_no_call_is_made() {
        let search = MultimodalSearch::new(offline_client(
            &RecordingSessionStore::new(),
            &RecordingRedirect::default(),
            true,
        ));

        let result = search.execute(SearchInput::default()).await;

        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn when_api_is_offline_then_mock_hits_are_returned() {
        let search = MultimodalSearch::new(offline_client(
            &RecordingSessionStore::new(),
            &RecordingRedirect::default(),
            true,
        ));

        let results = search
            .execute(SearchInput {
                text: "oversized blazer".to_string(),
                ..Default::default()
            })
            .await
            .expect("expected mock results");

        assert_eq!(results, mocks::multimodal_results());
    }
}
