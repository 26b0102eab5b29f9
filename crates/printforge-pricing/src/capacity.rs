//! Capacity planning: distributes an order across machines and estimates
//! completion.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use printforge_models::{Machine, MachineId};

/// An order to fit onto the machine park.
#[derive(Debug, Clone)]
pub struct CapacityQuery {
    pub quantity: u32,
    /// Hours per unit.
    pub print_time_per_unit: f64,
    /// Restrict to these machines; `None` uses all of them.
    pub machine_ids: Option<Vec<MachineId>>,
    pub work_hours_per_day: f64,
    pub start_date: NaiveDate,
}

/// Load assigned to one machine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MachineLoad {
    pub machine_id: MachineId,
    pub machine_name: String,
    pub units_assigned: u32,
    pub hours_occupied: f64,
}

/// Result of a capacity query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityPlan {
    pub total_print_hours: f64,
    pub machine_count: usize,
    pub estimated_days: u32,
    pub completion_date: NaiveDate,
    /// Share of available machine-hours actually used, capped at 100.
    pub utilization_percent: f64,
    pub breakdown: Vec<MachineLoad>,
}

/// Feasibility of a deadline for a given order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeadlineCheck {
    pub feasible: bool,
    pub days_needed: u32,
    pub days_available: i64,
}

/// Distributes `quantity` units round-robin over the selected machines.
///
/// Each machine gets `floor(quantity / n)` units and the first
/// `quantity mod n` machines (in input order) one extra. The busiest
/// machine determines the day count. Zero machines yields a zero-filled
/// plan rather than an error.
pub fn plan_capacity(query: &CapacityQuery, machines: &[Machine]) -> CapacityPlan {
    let selected: Vec<&Machine> = match &query.machine_ids {
        Some(ids) if !ids.is_empty() => machines.iter().filter(|m| ids.contains(&m.id)).collect(),
        _ => machines.iter().collect(),
    };

    let machine_count = selected.len();
    if machine_count == 0 {
        return CapacityPlan {
            total_print_hours: 0.0,
            machine_count: 0,
            estimated_days: 0,
            completion_date: query.start_date,
            utilization_percent: 0.0,
            breakdown: Vec::new(),
        };
    }

    let total_print_hours = f64::from(query.quantity) * query.print_time_per_unit;
    let units_per_machine = query.quantity / machine_count as u32;
    let remainder = query.quantity % machine_count as u32;

    let breakdown: Vec<MachineLoad> = selected
        .iter()
        .enumerate()
        .map(|(index, machine)| {
            let extra = u32::from((index as u32) < remainder);
            let units_assigned = units_per_machine + extra;
            MachineLoad {
                machine_id: machine.id.clone(),
                machine_name: machine.name.clone(),
                units_assigned,
                hours_occupied: f64::from(units_assigned) * query.print_time_per_unit,
            }
        })
        .collect();

    let max_hours = breakdown
        .iter()
        .map(|load| load.hours_occupied)
        .fold(0.0, f64::max);

    let estimated_days = (max_hours / query.work_hours_per_day).ceil() as u32;
    let completion_date = query.start_date + Duration::days(i64::from(estimated_days));

    let total_available_hours =
        machine_count as f64 * f64::from(estimated_days) * query.work_hours_per_day;
    let utilization_percent = if total_available_hours > 0.0 {
        (total_print_hours / total_available_hours * 100.0).min(100.0)
    } else {
        0.0
    };

    CapacityPlan {
        total_print_hours,
        machine_count,
        estimated_days,
        completion_date,
        utilization_percent,
        breakdown,
    }
}

/// Checks whether the order fits before the deadline.
pub fn meets_deadline(
    query: &CapacityQuery,
    machines: &[Machine],
    deadline: NaiveDate,
) -> DeadlineCheck {
    let plan = plan_capacity(query, machines);
    let days_available = (deadline - query.start_date).num_days();

    DeadlineCheck {
        feasible: i64::from(plan.estimated_days) <= days_available,
        days_needed: plan.estimated_days,
        days_available,
    }
}

/// Formats an hour count for display, e.g. "45 min", "3h", "3h 30m".
pub fn format_hours(hours: f64) -> String {
    if hours < 1.0 {
        return format!("{} min", (hours * 60.0).round() as i64);
    }
    let whole = hours.floor() as i64;
    let minutes = ((hours - hours.floor()) * 60.0).round() as i64;
    if minutes > 0 {
        format!("{}h {}m", whole, minutes)
    } else {
        format!("{}h", whole)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use printforge_models::PrintType;

    const EPSILON: f64 = 1e-9;

    fn park(count: usize) -> Vec<Machine> {
        (0..count)
            .map(|i| Machine::new(format!("Printer {}", i + 1), 2.0, None, PrintType::Fdm))
            .collect()
    }

    fn query(quantity: u32, hours_per_unit: f64, work_hours: f64) -> CapacityQuery {
        CapacityQuery {
            quantity,
            print_time_per_unit: hours_per_unit,
            machine_ids: None,
            work_hours_per_day: work_hours,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        }
    }

    #[test]
    fn test_round_robin_distribution() {
        let machines = park(3);
        let plan = plan_capacity(&query(10, 1.0, 8.0), &machines);

        // 10 mod 3 = 1 extra unit for the first machine.
        assert_eq!(plan.breakdown[0].units_assigned, 4);
        assert_eq!(plan.breakdown[1].units_assigned, 3);
        assert_eq!(plan.breakdown[2].units_assigned, 3);

        let total: u32 = plan.breakdown.iter().map(|b| b.units_assigned).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn test_seven_units_two_machines_scenario() {
        let machines = park(2);
        let plan = plan_capacity(&query(7, 2.0, 8.0), &machines);

        assert_eq!(plan.breakdown[0].units_assigned, 4);
        assert!((plan.breakdown[0].hours_occupied - 8.0).abs() < EPSILON);
        assert_eq!(plan.breakdown[1].units_assigned, 3);
        assert!((plan.breakdown[1].hours_occupied - 6.0).abs() < EPSILON);

        assert_eq!(plan.estimated_days, 1);
        // 14 hours used of 2 machines * 1 day * 8 hours.
        assert!((plan.utilization_percent - 87.5).abs() < EPSILON);
    }

    #[test]
    fn test_assignment_follows_input_order() {
        let machines = park(3);
        let plan = plan_capacity(&query(4, 1.0, 8.0), &machines);

        assert_eq!(plan.breakdown[0].machine_name, "Printer 1");
        assert_eq!(plan.breakdown[0].units_assigned, 2);
        assert_eq!(plan.breakdown[1].units_assigned, 1);
        assert_eq!(plan.breakdown[2].units_assigned, 1);
    }

    #[test]
    fn test_machine_selection_by_id() {
        let machines = park(3);
        let mut q = query(4, 1.0, 8.0);
        q.machine_ids = Some(vec![machines[1].id.clone()]);

        let plan = plan_capacity(&q, &machines);

        assert_eq!(plan.machine_count, 1);
        assert_eq!(plan.breakdown[0].machine_name, "Printer 2");
        assert_eq!(plan.breakdown[0].units_assigned, 4);
    }

    #[test]
    fn test_zero_machines_zero_filled() {
        let plan = plan_capacity(&query(10, 2.0, 8.0), &[]);

        assert_eq!(plan.machine_count, 0);
        assert_eq!(plan.total_print_hours, 0.0);
        assert_eq!(plan.estimated_days, 0);
        assert_eq!(
            plan.completion_date,
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
        assert_eq!(plan.utilization_percent, 0.0);
        assert!(plan.breakdown.is_empty());
    }

    #[test]
    fn test_completion_date_offset_by_days() {
        let machines = park(1);
        // 5 units * 4 h = 20 h on one machine -> ceil(20 / 8) = 3 days.
        let plan = plan_capacity(&query(5, 4.0, 8.0), &machines);

        assert_eq!(plan.estimated_days, 3);
        assert_eq!(
            plan.completion_date,
            NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()
        );
    }

    #[test]
    fn test_utilization_capped_at_100() {
        let machines = park(1);
        // 24 h of work against an 8 h day: 3 days, fully used.
        let plan = plan_capacity(&query(24, 1.0, 8.0), &machines);
        assert!((plan.utilization_percent - 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_meets_deadline() {
        let machines = park(2);
        let q = query(7, 2.0, 8.0); // needs 1 day

        let ok = meets_deadline(
            &q,
            &machines,
            NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
        );
        assert!(ok.feasible);
        assert_eq!(ok.days_needed, 1);
        assert_eq!(ok.days_available, 2);

        let too_tight = meets_deadline(
            &q,
            &machines,
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        );
        assert!(!too_tight.feasible);
        assert_eq!(too_tight.days_available, 0);
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(0.5), "30 min");
        assert_eq!(format_hours(3.0), "3h");
        assert_eq!(format_hours(3.5), "3h 30m");
    }
}
