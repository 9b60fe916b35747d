//! Client-facing views of ranked results.

use serde::Serialize;
use serif_core::models::{EpisodeRef, MetadataRecord, RankedResult};

/// Turn a stored image path into a URL path under `prefix`.
///
/// Empty stays empty and absolute `http…` URLs pass through. Anything else
/// is treated as relative to the image root.
pub fn resolve_web_path(prefix: &str, raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    if raw.starts_with("http") {
        return raw.to_string();
    }
    let clean = raw.trim_matches(|c| c == '/' || c == '\\');
    format!("{}/{clean}", prefix.trim_end_matches('/'))
}

/// A matched subtitle line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtitleHit {
    pub text: String,
    pub work_name: Option<String>,
    pub episode_index: Option<EpisodeRef>,
    pub episode_title: Option<String>,
    pub time_s: Option<f64>,
    pub image_path: String,
    pub coarse_score: f32,
    pub rerank_score: Option<f32>,
}

/// A question matched to its answering line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyHit {
    pub question_text: String,
    pub answer_text: String,
    pub work_name: Option<String>,
    pub episode_index: Option<EpisodeRef>,
    pub episode_title: Option<String>,
    pub answer_time_s: Option<f64>,
    pub answer_image_path: String,
    pub coarse_score: f32,
    pub rerank_score: Option<f32>,
}

/// An image matched by its description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneHit {
    pub image: String,
    pub text: String,
    /// Rerank relevance when reranked, otherwise the raw coarse similarity.
    pub score: f32,
    pub raw_path: String,
}

impl SubtitleHit {
    pub fn from_result(result: &RankedResult, image_prefix: &str) -> Option<Self> {
        let MetadataRecord::Line(r) = result.record() else {
            return None;
        };
        Some(Self {
            text: r.text.clone(),
            work_name: r.work_name.clone(),
            episode_index: r.episode().cloned(),
            episode_title: r.episode_title.clone(),
            time_s: r.time_s,
            image_path: resolve_web_path(image_prefix, r.image_path()),
            coarse_score: result.display_score,
            rerank_score: result.rerank_score,
        })
    }
}

impl ReplyHit {
    pub fn from_result(result: &RankedResult, image_prefix: &str) -> Option<Self> {
        let MetadataRecord::Reply(r) = result.record() else {
            return None;
        };
        Some(Self {
            question_text: r.question_text.clone(),
            answer_text: r.answer_text.clone(),
            work_name: r.work_name.clone(),
            episode_index: r.episode().cloned(),
            episode_title: r.episode_title.clone(),
            answer_time_s: r.answer_time_s,
            answer_image_path: resolve_web_path(image_prefix, &r.answer_image_path),
            coarse_score: result.display_score,
            rerank_score: result.rerank_score,
        })
    }
}

impl SceneHit {
    pub fn from_result(result: &RankedResult, image_prefix: &str) -> Option<Self> {
        let MetadataRecord::Scene(r) = result.record() else {
            return None;
        };
        Some(Self {
            image: resolve_web_path(image_prefix, &r.image_path),
            text: r.text.clone(),
            score: result.rerank_score.unwrap_or(result.coarse_score()),
            raw_path: r.image_path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serif_core::models::{Candidate, LineRecord, RawAnswerRecord, ReplyRecord, SceneRecord};

    fn result(record: MetadataRecord, score: f32, rerank: Option<f32>) -> RankedResult {
        let candidate = Candidate {
            position: 0,
            record,
            score,
        };
        match rerank {
            Some(r) => RankedResult::reranked(candidate, r),
            None => RankedResult::coarse(candidate),
        }
    }

    #[test]
    fn web_path_rules() {
        assert_eq!(resolve_web_path("/images", ""), "");
        assert_eq!(
            resolve_web_path("/images", "https://cdn.example/a.jpg"),
            "https://cdn.example/a.jpg"
        );
        assert_eq!(
            resolve_web_path("/images", "/haruhi/ep01/01.jpg"),
            "/images/haruhi/ep01/01.jpg"
        );
        assert_eq!(
            resolve_web_path("/images/", "\\ep02\\03.jpg\\"),
            "/images/ep02\\03.jpg"
        );
    }

    #[test]
    fn subtitle_hit_uses_fallback_fields() {
        let record = MetadataRecord::Line(LineRecord {
            text: "hello".to_string(),
            episode_index: Some(EpisodeRef::Label("SP".to_string())),
            image: Some("old/1.jpg".to_string()),
            ..Default::default()
        });
        let hit = SubtitleHit::from_result(&result(record, 0.0, Some(3.2)), "/images").unwrap();

        assert_eq!(hit.episode_index, Some(EpisodeRef::Label("SP".to_string())));
        assert_eq!(hit.image_path, "/images/old/1.jpg");
        assert_eq!(hit.coarse_score, 0.5);
        assert_eq!(hit.rerank_score, Some(3.2));
    }

    #[test]
    fn reply_hit_takes_episode_from_answer_record() {
        let record = MetadataRecord::Reply(ReplyRecord {
            question_text: "q".to_string(),
            answer_text: "a".to_string(),
            raw_answer_record: Some(RawAnswerRecord {
                episode_number: Some(EpisodeRef::Number(serde_json::Number::from(4u64))),
            }),
            ..Default::default()
        });
        let hit = ReplyHit::from_result(&result(record, 1.0, None), "/images").unwrap();

        assert_eq!(
            hit.episode_index,
            Some(EpisodeRef::Number(serde_json::Number::from(4u64)))
        );
        assert_eq!(hit.answer_image_path, "");
        assert_eq!(hit.coarse_score, 1.0);
        assert_eq!(hit.rerank_score, None);
    }

    #[test]
    fn scene_score_is_rerank_or_raw_coarse() {
        let record = MetadataRecord::Scene(SceneRecord {
            text: "sunset".to_string(),
            image_path: "s/1.png".to_string(),
        });
        let coarse = SceneHit::from_result(&result(record.clone(), -0.2, None), "/images").unwrap();
        let reranked = SceneHit::from_result(&result(record, -0.2, Some(0.7)), "/images").unwrap();

        assert_eq!(coarse.score, -0.2);
        assert_eq!(reranked.score, 0.7);
        assert_eq!(coarse.image, "/images/s/1.png");
        assert_eq!(coarse.raw_path, "s/1.png");
    }

    #[test]
    fn wrong_record_kind_is_skipped() {
        let record = MetadataRecord::Scene(SceneRecord::default());
        assert!(SubtitleHit::from_result(&result(record, 0.0, None), "/images").is_none());
    }
}
