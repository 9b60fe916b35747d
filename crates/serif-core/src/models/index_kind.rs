use std::fmt;

use serde::{de, Deserialize, Serialize};

use super::{LineRecord, MetadataRecord, ReplyRecord, SceneRecord};

/// The kinds of index a deployment can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    /// Subtitle lines matched against the query.
    Match,
    /// Question lines whose answers are returned.
    Reply,
    /// Image descriptions.
    Scene,
}

impl IndexKind {
    pub const ALL: [IndexKind; 3] = [IndexKind::Match, IndexKind::Reply, IndexKind::Scene];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Reply => "reply",
            Self::Scene => "scene",
        }
    }

    /// File name of the vector index inside its directory.
    pub fn index_file(&self) -> &'static str {
        match self {
            Self::Match => "match.index",
            Self::Reply => "reply_answer.index",
            Self::Scene => "images.index",
        }
    }

    /// File name of the JSON-lines metadata inside its directory.
    pub fn meta_file(&self) -> &'static str {
        match self {
            Self::Match => "match_meta.jsonl",
            Self::Reply => "reply_meta.jsonl",
            Self::Scene => "images_meta.jsonl",
        }
    }

    /// Record field sent to the reranker for this kind.
    pub fn rerank_field(&self) -> &'static str {
        match self {
            Self::Match | Self::Scene => "text",
            Self::Reply => "question_text",
        }
    }

    /// Parse one metadata line into the record variant of this kind.
    ///
    /// Fails only when the line is not valid JSON or not a JSON object;
    /// unusable fields inside an object fall back to their defaults.
    pub fn parse_record(&self, line: &str) -> Result<MetadataRecord, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(line)?;
        if !value.is_object() {
            return Err(de::Error::custom("metadata line is not a JSON object"));
        }
        Ok(match self {
            Self::Match => MetadataRecord::Line(LineRecord::deserialize(value)?),
            Self::Reply => MetadataRecord::Reply(ReplyRecord::deserialize(value)?),
            Self::Scene => MetadataRecord::Scene(SceneRecord::deserialize(value)?),
        })
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
