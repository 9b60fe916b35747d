// Single source of truth for all default values.

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-v4";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1024;
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 10;
pub const DEFAULT_EMBEDDING_PARALLELISM: usize = 4;
pub const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_EMBEDDING_MAX_RETRIES: u32 = 2;
pub const DEFAULT_QUERY_CACHE_SIZE: u64 = 1_024;

// --- Rerank ---
pub const DEFAULT_RERANK_ENABLED: bool = true;
pub const DEFAULT_RERANK_MODEL: &str = "qwen3-rerank";
pub const DEFAULT_RERANK_ENDPOINT: &str =
    "https://dashscope.aliyuncs.com/api/v1/services/rerank/text-rerank/text-rerank";
pub const DEFAULT_RERANK_TIMEOUT_SECS: u64 = 15;

// --- Indexes ---
pub const DEFAULT_SCOPE_1_DIR: &str = "./data/indexes/scope1";
pub const DEFAULT_SCOPE_2_DIR: &str = "./data/indexes/scope2";
pub const DEFAULT_SCENE_DIR: &str = "./data/indexes/scene";
pub const DEFAULT_IMAGE_URL_PREFIX: &str = "/images";

// --- Retrieval ---
pub const DEFAULT_SCOPE: u32 = 1;
pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_SCENE_TOP_K: usize = 20;
pub const DEFAULT_TEXT_OVERFETCH: f32 = 5.0;
pub const DEFAULT_SCENE_OVERFETCH: f32 = 2.0;

// --- Observability ---
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
