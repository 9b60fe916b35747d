//! Metadata records stored alongside each index, one JSON object per line.
//!
//! Every field is optional on disk. Missing, `null` and wrong-typed fields all
//! take the `Default` value, so any JSON object yields a record and the
//! record list stays aligned with the vectors.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a field, mapping `null` or a value of the wrong JSON type to the default.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Episode identifier as written by the ingestion tooling: a number or a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EpisodeRef {
    Number(serde_json::Number),
    Label(String),
}

/// One subtitle line (the "match" index).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineRecord {
    #[serde(deserialize_with = "lenient")]
    pub text: String,
    #[serde(deserialize_with = "lenient")]
    pub work_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub episode_number: Option<EpisodeRef>,
    #[serde(deserialize_with = "lenient")]
    pub episode_index: Option<EpisodeRef>,
    #[serde(deserialize_with = "lenient")]
    pub episode_title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub time_s: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub image_path: Option<String>,
    /// Older dumps used `image` instead of `image_path`.
    #[serde(deserialize_with = "lenient")]
    pub image: Option<String>,
}

impl LineRecord {
    pub fn episode(&self) -> Option<&EpisodeRef> {
        self.episode_number.as_ref().or(self.episode_index.as_ref())
    }

    pub fn image_path(&self) -> &str {
        self.image_path
            .as_deref()
            .or(self.image.as_deref())
            .unwrap_or("")
    }
}

/// The answering record nested inside a reply pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAnswerRecord {
    #[serde(deserialize_with = "lenient")]
    pub episode_number: Option<EpisodeRef>,
}

/// A question/answer line pair (the "reply" index).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyRecord {
    #[serde(deserialize_with = "lenient")]
    pub question_text: String,
    #[serde(deserialize_with = "lenient")]
    pub answer_text: String,
    #[serde(deserialize_with = "lenient")]
    pub work_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub episode_number: Option<EpisodeRef>,
    #[serde(deserialize_with = "lenient")]
    pub episode_title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub answer_time_s: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub answer_image_path: String,
    #[serde(deserialize_with = "lenient")]
    pub raw_answer_record: Option<RawAnswerRecord>,
}

impl ReplyRecord {
    pub fn episode(&self) -> Option<&EpisodeRef> {
        self.episode_number.as_ref().or_else(|| {
            self.raw_answer_record
                .as_ref()
                .and_then(|r| r.episode_number.as_ref())
        })
    }
}

/// An illustrated scene (the "scene" index). `text` describes the image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneRecord {
    #[serde(deserialize_with = "lenient")]
    pub text: String,
    #[serde(deserialize_with = "lenient")]
    pub image_path: String,
}

/// A metadata record tagged with the kind of index it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetadataRecord {
    Line(LineRecord),
    Reply(ReplyRecord),
    Scene(SceneRecord),
}

impl MetadataRecord {
    /// Text of the named field, or `""` when the record has no such field.
    ///
    /// This is how the pipeline picks the document it sends to the reranker.
    pub fn field_text(&self, field: &str) -> &str {
        match (self, field) {
            (Self::Line(r), "text") => &r.text,
            (Self::Line(r), "work_name") => r.work_name.as_deref().unwrap_or(""),
            (Self::Line(r), "episode_title") => r.episode_title.as_deref().unwrap_or(""),
            (Self::Line(r), "image_path") => r.image_path(),
            (Self::Reply(r), "question_text") => &r.question_text,
            (Self::Reply(r), "answer_text") => &r.answer_text,
            (Self::Reply(r), "work_name") => r.work_name.as_deref().unwrap_or(""),
            (Self::Reply(r), "episode_title") => r.episode_title.as_deref().unwrap_or(""),
            (Self::Reply(r), "answer_image_path") => &r.answer_image_path,
            (Self::Scene(r), "text") => &r.text,
            (Self::Scene(r), "image_path") => &r.image_path,
            _ => "",
        }
    }
}
