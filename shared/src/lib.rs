use serde::{Deserialize, Serialize};

/// Body of `POST /api/message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// One exchange's reply: the conversational answer plus a ranked list of
/// candidates. The list may be absent entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

/// A single ranked movie candidate. The server sends whatever fields it
/// has; every one of them is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: Option<String>,
    /// Pipe-delimited category list, e.g. "Action|Drama".
    pub genres: Option<String>,
    pub language: Option<String>,
    /// Minutes.
    pub runtime: Option<u32>,
    pub release_year: Option<i32>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub similarity_score: Option<f64>,
    pub final_score: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(ChatRequest {
            text: "something upbeat".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "text": "something upbeat" }));
    }

    #[test]
    fn response_without_recommendations() {
        let resp: ChatResponse = serde_json::from_str(r#"{"reply":"hi"}"#).unwrap();
        assert_eq!(resp.reply, "hi");
        assert!(resp.recommendations.is_empty());
    }

    #[test]
    fn recommendation_fields_are_all_optional() {
        let rec: Recommendation = serde_json::from_str("{}").unwrap();
        assert!(rec.title.is_none());
        assert!(rec.genres.is_none());
        assert!(rec.runtime.is_none());
        assert!(rec.final_score.is_none());
    }

    #[test]
    fn extra_response_fields_are_ignored() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{
                "reply": "Try these.",
                "recommendations": [
                    {"title": "Up", "overview": "balloons", "final_score": 0.9}
                ],
                "session": "abc"
            }"#,
        )
        .unwrap();
        assert_eq!(resp.recommendations.len(), 1);
        assert_eq!(resp.recommendations[0].title.as_deref(), Some("Up"));
        assert_eq!(resp.recommendations[0].final_score, Some(0.9));
    }
}
