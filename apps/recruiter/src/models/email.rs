use serde::{Deserialize, Serialize};

use crate::models::shortlist::ShortlistMember;
use crate::outreach::tone::Tone;

/// Full payload of one draft request. The backend keeps no draft state, so
/// every request carries the complete roster and every parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftEmailRequest {
    pub recipients: Vec<ShortlistMember>,
    pub job_title: String,
    pub tone: Tone,
    pub custom_subject: String,
    pub custom_closing: String,
}

/// Generated outreach email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailDraft {
    pub subject: String,
    pub text: String,
    #[serde(default)]
    pub recipient_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlPreviewRequest {
    pub subject: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HtmlPreview {
    pub html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_request_uses_backend_field_names() {
        let request = DraftEmailRequest {
            recipients: vec![],
            job_title: "Software Developer".to_string(),
            tone: Tone::Professional,
            custom_subject: String::new(),
            custom_closing: "Cheers".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["jobTitle"], "Software Developer");
        assert_eq!(value["tone"], "professional");
        assert_eq!(value["customSubject"], "");
        assert_eq!(value["customClosing"], "Cheers");
        assert!(value["recipients"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_email_draft_defaults_recipient_count() {
        let draft: EmailDraft =
            serde_json::from_str(r#"{"subject": "Hi", "text": "Body"}"#).unwrap();
        assert_eq!(draft.recipient_count, 0);
    }
}
