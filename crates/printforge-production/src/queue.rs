//! The production queue: an ordered job list bucketed by status and
//! machine.
//!
//! Jobs carry an `order` rank that is only meaningful within their
//! (status, machine) bucket; buckets are independent numbering spaces.
//! Every mutation writes the full job list back to the session store
//! before returning.

use chrono::Utc;
use tracing::{debug, info};

use printforge_models::{JobId, JobPriority, JobStatus, MachineId, ProductionJob, Quote};
use printforge_store::{SessionStore, Storage};

use crate::error::{ProductionError, Result};

/// In-memory job list with write-through persistence.
pub struct ProductionQueue<S: Storage> {
    store: SessionStore<S>,
    jobs: Vec<ProductionJob>,
}

impl<S: Storage> ProductionQueue<S> {
    /// Loads the queue from the session store.
    pub fn load(store: SessionStore<S>) -> Result<Self> {
        let jobs = store.jobs()?;
        Ok(Self { store, jobs })
    }

    /// All jobs, in storage order.
    pub fn jobs(&self) -> &[ProductionJob] {
        &self.jobs
    }

    /// Looks up a job by id.
    pub fn get(&self, id: &JobId) -> Option<&ProductionJob> {
        self.jobs.iter().find(|j| j.id == *id)
    }

    /// Enqueues a quote as a new job, appended to the end of the list.
    pub fn add_job(&mut self, quote: Quote, machine_id: Option<MachineId>) -> Result<JobId> {
        let job = ProductionJob::new(quote, machine_id, self.jobs.len());
        let id = job.id.clone();

        info!(job_id = %id, project = %job.quote.project_name, "Job added to production queue");

        self.jobs.push(job);
        self.persist()?;
        Ok(id)
    }

    /// Moves a job to a (status, machine) bucket, optionally at a
    /// specific position.
    ///
    /// The target bucket is rebuilt in `order` order, the job is spliced
    /// in at `index` when it is a valid insertion point (`0..=len`) and
    /// appended otherwise, and the whole bucket is renumbered to a dense
    /// 0-based sequence. Jobs outside the target bucket keep their
    /// ranks untouched.
    pub fn move_job(
        &mut self,
        id: &JobId,
        new_status: JobStatus,
        new_machine_id: Option<MachineId>,
        index: Option<usize>,
    ) -> Result<()> {
        let position = self
            .jobs
            .iter()
            .position(|j| j.id == *id)
            .ok_or_else(|| ProductionError::JobNotFound(id.to_string()))?;
        let mut job = self.jobs.remove(position);

        job.status = new_status;
        job.machine_id = new_machine_id.clone();
        match new_status {
            JobStatus::Printing if job.started_at.is_none() => {
                job.started_at = Some(Utc::now());
            }
            JobStatus::Completed if job.completed_at.is_none() => {
                job.completed_at = Some(Utc::now());
            }
            _ => {}
        }

        let (mut bucket, mut rest): (Vec<ProductionJob>, Vec<ProductionJob>) = self
            .jobs
            .drain(..)
            .partition(|j| j.in_bucket(new_status, new_machine_id.as_ref()));
        bucket.sort_by_key(|j| j.order);

        let insert_at = match index {
            Some(i) if i <= bucket.len() => i,
            _ => bucket.len(),
        };
        bucket.insert(insert_at, job);

        for (rank, job) in bucket.iter_mut().enumerate() {
            job.order = rank;
        }

        debug!(
            job_id = %id,
            status = %new_status,
            machine = new_machine_id.as_ref().map(|m| m.as_str()).unwrap_or("-"),
            position = insert_at,
            "Moved production job"
        );

        rest.append(&mut bucket);
        self.jobs = rest;
        self.persist()
    }

    /// Deletes a job. Surviving jobs keep their ranks, so the source
    /// bucket may be left with gaps; consumers sort before reading.
    pub fn remove_job(&mut self, id: &JobId) -> Result<()> {
        let position = self
            .jobs
            .iter()
            .position(|j| j.id == *id)
            .ok_or_else(|| ProductionError::JobNotFound(id.to_string()))?;
        self.jobs.remove(position);

        info!(job_id = %id, "Job removed from production");
        self.persist()
    }

    /// Drops all completed jobs. Returns how many were removed.
    pub fn clear_completed(&mut self) -> Result<usize> {
        let before = self.jobs.len();
        self.jobs.retain(|j| j.status != JobStatus::Completed);
        let removed = before - self.jobs.len();

        if removed > 0 {
            info!(removed, "Cleared completed jobs");
            self.persist()?;
        }
        Ok(removed)
    }

    /// Changes a job's priority.
    pub fn set_priority(&mut self, id: &JobId, priority: JobPriority) -> Result<()> {
        self.update(id, |job| job.priority = priority)
    }

    /// Replaces a job's notes.
    pub fn set_notes(&mut self, id: &JobId, notes: Option<String>) -> Result<()> {
        self.update(id, |job| job.notes = notes)
    }

    fn update(&mut self, id: &JobId, apply: impl FnOnce(&mut ProductionJob)) -> Result<()> {
        let job = self
            .jobs
            .iter_mut()
            .find(|j| j.id == *id)
            .ok_or_else(|| ProductionError::JobNotFound(id.to_string()))?;
        apply(job);
        self.persist()
    }

    /// Jobs assigned to a machine, sorted by rank.
    pub fn jobs_for_machine(&self, machine_id: &MachineId) -> Vec<&ProductionJob> {
        let mut jobs: Vec<&ProductionJob> = self
            .jobs
            .iter()
            .filter(|j| j.machine_id.as_ref() == Some(machine_id))
            .collect();
        jobs.sort_by_key(|j| j.order);
        jobs
    }

    /// Jobs waiting without a machine, sorted by rank.
    pub fn unassigned_jobs(&self) -> Vec<&ProductionJob> {
        let mut jobs: Vec<&ProductionJob> =
            self.jobs.iter().filter(|j| j.machine_id.is_none()).collect();
        jobs.sort_by_key(|j| j.order);
        jobs
    }

    fn persist(&self) -> Result<()> {
        self.store.save_jobs(&self.jobs)?;
        Ok(())
    }
}
