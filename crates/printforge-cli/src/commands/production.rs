//! Production queue commands.

use printforge_models::{JobId, JobPriority, JobStatus, MachineId, ProductionJob, QuoteId};
use printforge_production::ProductionQueue;
use printforge_store::FileStorage;

use super::{truncate, Result, Stores};
use crate::cli::{OutputFormat, ProductionCommand};

pub fn execute(stores: &Stores, action: ProductionCommand) -> Result<()> {
    let mut queue = ProductionQueue::load(stores.session())?;

    match action {
        ProductionCommand::Add { quote_id, machine } => {
            let quote = stores.quotes().get(&QuoteId::from(quote_id.as_str()))?;
            let machine_id = machine.as_deref().map(MachineId::from);
            let job_id = queue.add_job(quote, machine_id)?;
            println!("Queued job {}", job_id);
            Ok(())
        }
        ProductionCommand::Move {
            job_id,
            status,
            machine,
            index,
        } => {
            let id = JobId::from(job_id.as_str());
            let status = status.parse::<JobStatus>()?;
            let machine_id = machine.as_deref().map(MachineId::from);

            queue.move_job(&id, status, machine_id.clone(), index)?;
            println!(
                "Moved {} to {} on {}",
                id,
                status,
                machine_id
                    .as_ref()
                    .map(|m| m.as_str())
                    .unwrap_or("unassigned")
            );
            Ok(())
        }
        ProductionCommand::Remove { job_id } => {
            let id = JobId::from(job_id.as_str());
            queue.remove_job(&id)?;
            println!("Removed job {}", id);
            Ok(())
        }
        ProductionCommand::List {
            machine,
            unassigned,
            format,
        } => cmd_list(&queue, machine.as_deref(), unassigned, format),
        ProductionCommand::Priority { job_id, priority } => {
            let id = JobId::from(job_id.as_str());
            let priority = priority.parse::<JobPriority>()?;
            queue.set_priority(&id, priority)?;
            println!("Set {} to {} priority", id, priority);
            Ok(())
        }
        ProductionCommand::Note { job_id, notes } => {
            let id = JobId::from(job_id.as_str());
            let notes = if notes.is_empty() { None } else { Some(notes) };
            queue.set_notes(&id, notes)?;
            println!("Updated notes on {}", id);
            Ok(())
        }
        ProductionCommand::ClearCompleted => {
            let removed = queue.clear_completed()?;
            println!("Cleared {} completed job(s)", removed);
            Ok(())
        }
    }
}

fn cmd_list(
    queue: &ProductionQueue<FileStorage>,
    machine: Option<&str>,
    unassigned: bool,
    format: OutputFormat,
) -> Result<()> {
    let jobs: Vec<&ProductionJob> = if unassigned {
        queue.unassigned_jobs()
    } else if let Some(machine) = machine {
        queue.jobs_for_machine(&MachineId::from(machine))
    } else {
        queue.jobs().iter().collect()
    };

    match format {
        OutputFormat::Table => {
            if jobs.is_empty() {
                println!("No production jobs.");
                return Ok(());
            }

            println!(
                "{:<40}  {:<20}  {:<15}  {:<18}  {:<8}  {:>5}",
                "ID", "PROJECT", "STATUS", "MACHINE", "PRIO", "ORDER"
            );
            println!("{}", "-".repeat(116));
            for job in &jobs {
                println!(
                    "{:<40}  {:<20}  {:<15}  {:<18}  {:<8}  {:>5}",
                    job.id,
                    truncate(&job.quote.project_name, 20),
                    job.status.to_string(),
                    job.machine_id
                        .as_ref()
                        .map(|m| truncate(m.as_str(), 18))
                        .unwrap_or_else(|| "-".to_string()),
                    job.priority.to_string(),
                    job.order
                );
            }
            println!("\n{} job(s)", jobs.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&jobs)?);
        }
        OutputFormat::Brief => {
            for job in &jobs {
                println!("{}\t{}", job.id, job.quote.project_name);
            }
        }
    }

    Ok(())
}
