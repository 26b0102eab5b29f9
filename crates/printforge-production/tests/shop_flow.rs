//! End-to-end flow over a real data directory: quote -> save -> board ->
//! production queue.

use printforge_models::{JobStatus, Machine, Material, PrintType, QuoteStatus};
use printforge_pricing::{calculate_fdm_quote, CostRates, FdmQuoteInput};
use printforge_production::{move_quote, Board, ProductionQueue};
use printforge_store::{FileStorage, QuoteStore, SessionStore};
use tempfile::tempdir;

fn make_quote(project: &str) -> printforge_models::Quote {
    let material = Material::new("PLA", 25.0, "kg", PrintType::Fdm);
    let machine = Machine::new("Ender 3", 2.0, Some(350.0), PrintType::Fdm);
    let input = FdmQuoteInput {
        project_name: project.to_string(),
        print_time_hours: 5.0,
        filament_weight_grams: 120.0,
        markup_percentage: 30.0,
        quantity: 2,
        ..FdmQuoteInput::default()
    };
    calculate_fdm_quote(
        &input,
        &material,
        &machine,
        &CostRates::default(),
        &[],
        None,
        None,
    )
}

#[test]
fn quote_to_board_to_production() {
    let dir = tempdir().unwrap();
    let quotes = QuoteStore::new(FileStorage::new(dir.path()));

    // Save a calculated quote and find it on the board.
    let quote = make_quote("Benchy");
    quotes.save(&quote).unwrap();

    let board = Board::derive(&quotes.quotes().unwrap());
    assert_eq!(board.column(QuoteStatus::Pending).len(), 1);

    // Approve it; the board re-derives into the new column.
    move_quote(&quotes, &quote.id, QuoteStatus::Approved).unwrap();
    let board = Board::derive(&quotes.quotes().unwrap());
    assert_eq!(board.column(QuoteStatus::Pending).len(), 0);
    assert_eq!(board.column(QuoteStatus::Approved).len(), 1);

    // Queue it for production and walk it through the shop floor.
    let session = SessionStore::new(FileStorage::new(dir.path().join("session")));
    let mut queue = ProductionQueue::load(session).unwrap();
    let approved = quotes.get(&quote.id).unwrap();
    let job_id = queue.add_job(approved, None).unwrap();

    queue
        .move_job(&job_id, JobStatus::Printing, None, None)
        .unwrap();
    queue
        .move_job(&job_id, JobStatus::Completed, None, None)
        .unwrap();

    // The job survives a reload from disk with its timestamps.
    let session = SessionStore::new(FileStorage::new(dir.path().join("session")));
    let mut queue = ProductionQueue::load(session).unwrap();
    let job = queue.get(&job_id).unwrap();
    assert_eq!(job.status, JobStatus::Completed);
    assert!(job.started_at.is_some());
    assert!(job.completed_at.is_some());

    assert_eq!(queue.clear_completed().unwrap(), 1);
    assert!(queue.jobs().is_empty());
}

#[test]
fn bucket_orders_stay_dense_across_moves() {
    let dir = tempdir().unwrap();
    let session = SessionStore::new(FileStorage::new(dir.path()));
    let mut queue = ProductionQueue::load(session).unwrap();

    let ids: Vec<_> = (0..5)
        .map(|i| {
            queue
                .add_job(make_quote(&format!("Job {}", i)), None)
                .unwrap()
        })
        .collect();

    // Interleave moves across two buckets.
    let machine = printforge_models::MachineId::from("mach-1");
    queue
        .move_job(&ids[0], JobStatus::Printing, Some(machine.clone()), None)
        .unwrap();
    queue
        .move_job(&ids[3], JobStatus::Printing, Some(machine.clone()), Some(0))
        .unwrap();
    queue
        .move_job(&ids[1], JobStatus::Printing, Some(machine.clone()), Some(1))
        .unwrap();

    let on_machine = queue.jobs_for_machine(&machine);
    let orders: Vec<usize> = on_machine.iter().map(|j| j.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);

    let names: Vec<&str> = on_machine
        .iter()
        .map(|j| j.quote.project_name.as_str())
        .collect();
    assert_eq!(names, vec!["Job 3", "Job 1", "Job 0"]);

    // The unassigned bucket was never renumbered, but listings sort.
    let unassigned = queue.unassigned_jobs();
    assert_eq!(unassigned.len(), 2);
    assert!(unassigned[0].order < unassigned[1].order);
}
