use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::pkg::internal::adaptors::jobs::spec::JobStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "proposal_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Pending,
    Shortlisted,
    Rejected,
}

/// Job status side effect of a proposal status transition.
/// Shortlisting closes the job, rejecting reopens it.
pub fn job_status_after(status: ProposalStatus) -> Option<JobStatus> {
    match status {
        ProposalStatus::Shortlisted => Some(JobStatus::Closed),
        ProposalStatus::Rejected => Some(JobStatus::Open),
        ProposalStatus::Pending => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProposalEntry {
    pub id: i32,
    pub job_id: i32,
    pub freelancer_id: i32,
    pub cover_letter: String,
    pub score: f64,
    pub status: ProposalStatus,
    pub submitted_at: DateTime<Utc>,
}

/// Proposal joined with its job, for freelancer-facing listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProposalWithJob {
    pub id: i32,
    pub job_id: i32,
    pub job_title: String,
    pub job_status: JobStatus,
    pub freelancer_id: i32,
    pub cover_letter: String,
    pub score: f64,
    pub status: ProposalStatus,
    pub submitted_at: DateTime<Utc>,
}

/// Proposal joined with the applicant, for employer-facing listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProposalWithFreelancer {
    pub id: i32,
    pub job_id: i32,
    pub freelancer_id: i32,
    pub freelancer_username: String,
    pub freelancer_full_name: Option<String>,
    pub cover_letter: String,
    pub score: f64,
    pub status: ProposalStatus,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortlisting_closes_the_job() {
        assert_eq!(
            job_status_after(ProposalStatus::Shortlisted),
            Some(JobStatus::Closed)
        );
    }

    #[test]
    fn rejecting_reopens_the_job() {
        assert_eq!(
            job_status_after(ProposalStatus::Rejected),
            Some(JobStatus::Open)
        );
    }

    #[test]
    fn pending_leaves_the_job_alone() {
        assert_eq!(job_status_after(ProposalStatus::Pending), None);
    }
}
