//! Production job records for the shop-floor queue.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{JobId, MachineId};
use crate::quote::Quote;

/// Shop-floor status of a production job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Queued,
    Printing,
    PostProcessing,
    Completed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobStatus::Queued => "queued",
            JobStatus::Printing => "printing",
            JobStatus::PostProcessing => "post_processing",
            JobStatus::Completed => "completed",
        };
        f.write_str(name)
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "queued" => Ok(JobStatus::Queued),
            "printing" => Ok(JobStatus::Printing),
            "post_processing" => Ok(JobStatus::PostProcessing),
            "completed" => Ok(JobStatus::Completed),
            other => Err(format!("unknown job status: {}", other)),
        }
    }
}

/// Scheduling priority of a job.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum JobPriority {
    Low,
    #[default]
    Normal,
    High,
}

impl fmt::Display for JobPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobPriority::Low => "low",
            JobPriority::Normal => "normal",
            JobPriority::High => "high",
        };
        f.write_str(name)
    }
}

impl FromStr for JobPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(JobPriority::Low),
            "normal" => Ok(JobPriority::Normal),
            "high" => Ok(JobPriority::High),
            other => Err(format!("unknown job priority: {}", other)),
        }
    }
}

/// A queued unit of shop-floor work wrapping a quote snapshot.
///
/// `order` is the job's rank within its (status, machine) bucket. After a
/// move the target bucket is renumbered to a dense 0-based sequence;
/// removals may leave gaps, so consumers always sort before reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionJob {
    pub id: JobId,
    pub quote: Quote,
    pub status: JobStatus,

    /// `None` means the job sits in the unassigned queue.
    #[serde(default)]
    pub machine_id: Option<MachineId>,

    #[serde(default)]
    pub priority: JobPriority,

    pub order: usize,

    pub created_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ProductionJob {
    /// Creates a queued job at the given rank.
    pub fn new(quote: Quote, machine_id: Option<MachineId>, order: usize) -> Self {
        Self {
            id: JobId::new(),
            quote,
            status: JobStatus::Queued,
            machine_id,
            priority: JobPriority::Normal,
            order,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
            notes: None,
        }
    }

    /// Returns true when the job belongs to the given (status, machine)
    /// bucket.
    pub fn in_bucket(&self, status: JobStatus, machine_id: Option<&MachineId>) -> bool {
        self.status == status && self.machine_id.as_ref() == machine_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PrintType;
    use crate::ids::QuoteId;
    use crate::quote::{CostBreakdown, PrintParameters, QuoteStatus};

    fn sample_quote() -> Quote {
        Quote {
            id: QuoteId::new(),
            project_name: "Bracket".to_string(),
            print_colour: String::new(),
            print_type: PrintType::Fdm,
            status: QuoteStatus::Pending,
            costs: CostBreakdown::default(),
            unit_price: 10.0,
            total_price: 10.0,
            quantity: 1,
            customer_id: None,
            client_name: None,
            notes: None,
            status_timeline: Default::default(),
            parameters: PrintParameters::default(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_job_status_serialization() {
        assert_eq!(
            serde_json::to_string(&JobStatus::PostProcessing).unwrap(),
            "\"post_processing\""
        );
        let back: JobStatus = serde_json::from_str("\"queued\"").unwrap();
        assert_eq!(back, JobStatus::Queued);
    }

    #[test]
    fn test_job_status_from_str() {
        assert_eq!(
            "post-processing".parse::<JobStatus>().unwrap(),
            JobStatus::PostProcessing
        );
        assert!("paused".parse::<JobStatus>().is_err());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(JobPriority::High > JobPriority::Normal);
        assert!(JobPriority::Normal > JobPriority::Low);
    }

    #[test]
    fn test_new_job_defaults() {
        let job = ProductionJob::new(sample_quote(), None, 3);

        assert!(job.id.as_str().starts_with("job-"));
        assert_eq!(job.status, JobStatus::Queued);
        assert_eq!(job.priority, JobPriority::Normal);
        assert_eq!(job.order, 3);
        assert!(job.machine_id.is_none());
        assert!(job.started_at.is_none());
    }

    #[test]
    fn test_in_bucket() {
        let machine = MachineId::from("mach-1");
        let job = ProductionJob::new(sample_quote(), Some(machine.clone()), 0);

        assert!(job.in_bucket(JobStatus::Queued, Some(&machine)));
        assert!(!job.in_bucket(JobStatus::Queued, None));
        assert!(!job.in_bucket(JobStatus::Printing, Some(&machine)));
    }

    #[test]
    fn test_job_roundtrip() {
        let mut job = ProductionJob::new(sample_quote(), None, 0);
        job.notes = Some("supports everywhere".to_string());

        let json = serde_json::to_string(&job).unwrap();
        let back: ProductionJob = serde_json::from_str(&json).unwrap();

        assert_eq!(job, back);
    }
}
