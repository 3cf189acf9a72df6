use serde::Deserialize;

/// A server-tracked unit of pipeline work.
///
/// The list endpoint returns jobs without `recent_logs`; the single-job
/// detail endpoint includes it. The client never constructs a `Job`
/// itself, it only caches what the server reports.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    /// Opaque identifier, stable for the job's lifetime.
    pub id: String,
    pub name: String,
    /// Open-ended status string; `running`, `completed` and `failed` are
    /// the recognized values, anything else is rendered as-is.
    pub status: String,
    /// Seconds since epoch, display only.
    pub start_time: f64,
    /// Present once the job has terminated.
    pub return_code: Option<i32>,
    pub command: String,
    pub log_file: String,
    #[serde(default)]
    pub recent_logs: Option<String>,
}

/// Acknowledgement body returned by the trigger endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerAck {
    pub job_id: String,
    pub status: String,
}

/// The fixed pipeline stages the backend can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Stage {
    Setup,
    Tokenizer,
    Pretrain,
    Midtrain,
    Sft,
}

impl Stage {
    /// Trigger endpoint path on the backend.
    pub fn path(&self) -> &'static str {
        match self {
            Stage::Setup => "/jobs/setup",
            Stage::Tokenizer => "/jobs/tokenizer",
            Stage::Pretrain => "/jobs/pretrain",
            Stage::Midtrain => "/jobs/midtrain",
            Stage::Sft => "/jobs/sft",
        }
    }

    /// Human-readable label for action buttons and notices.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Setup => "Setup Dataset",
            Stage::Tokenizer => "Train Tokenizer",
            Stage::Pretrain => "Pretrain Base Model",
            Stage::Midtrain => "Mid-Training",
            Stage::Sft => "Supervised Fine-Tuning",
        }
    }

    /// All stages in pipeline order.
    pub fn all() -> [Stage; 5] {
        [
            Stage::Setup,
            Stage::Tokenizer,
            Stage::Pretrain,
            Stage::Midtrain,
            Stage::Sft,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_paths_match_backend_contract() {
        assert_eq!(Stage::Setup.path(), "/jobs/setup");
        assert_eq!(Stage::Tokenizer.path(), "/jobs/tokenizer");
        assert_eq!(Stage::Pretrain.path(), "/jobs/pretrain");
        assert_eq!(Stage::Midtrain.path(), "/jobs/midtrain");
        assert_eq!(Stage::Sft.path(), "/jobs/sft");
    }

    #[test]
    fn job_list_form_deserializes_without_logs() {
        let body = r#"{
            "id": "3f2c1a9e-0000-4000-8000-000000000000",
            "name": "base_train",
            "status": "running",
            "start_time": 1724700000.5,
            "return_code": null,
            "command": "torchrun -m scripts.base_train",
            "log_file": "/var/log/jobs/base_train.log"
        }"#;

        let job: Job = serde_json::from_str(body).unwrap();
        assert_eq!(job.status, "running");
        assert!(job.return_code.is_none());
        assert!(job.recent_logs.is_none());
    }

    #[test]
    fn job_detail_form_carries_recent_logs() {
        let body = r#"{
            "id": "a1",
            "name": "dataset_setup",
            "status": "completed",
            "start_time": 1724700000,
            "return_code": 0,
            "command": "python -m nanochat.dataset -n 8",
            "log_file": "/var/log/jobs/dataset_setup.log",
            "recent_logs": "downloaded shard 8/8"
        }"#;

        let job: Job = serde_json::from_str(body).unwrap();
        assert_eq!(job.return_code, Some(0));
        assert_eq!(job.recent_logs.as_deref(), Some("downloaded shard 8/8"));
    }
}
