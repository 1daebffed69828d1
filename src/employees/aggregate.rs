//! In-memory aggregations over an employee listing.
//!
//! All functions are pure and preserve upstream order where order matters.

use crate::employees::model::Employee;

/// How many names the top-earners query returns.
pub const TOP_EARNERS_LIMIT: usize = 10;

/// Employees whose name contains `query`, compared case-insensitively.
///
/// An empty query matches everyone.
pub fn search_by_name(employees: Vec<Employee>, query: &str) -> Vec<Employee> {
    let needle = query.to_lowercase();
    employees
        .into_iter()
        .filter(|e| e.employee_name.to_lowercase().contains(&needle))
        .collect()
}

/// Highest salary in the listing, or 0 when it is empty.
pub fn highest_salary(employees: &[Employee]) -> u64 {
    employees
        .iter()
        .map(|e| e.employee_salary)
        .max()
        .unwrap_or(0)
}

/// Names of the `limit` best paid employees, highest first.
///
/// Equal salaries keep their listing order: `sort_by` is stable, so the
/// record that appeared earlier upstream ranks higher.
pub fn top_earner_names(employees: &[Employee], limit: usize) -> Vec<String> {
    let mut ranked: Vec<&Employee> = employees.iter().collect();
    ranked.sort_by(|a, b| b.employee_salary.cmp(&a.employee_salary));
    ranked
        .into_iter()
        .take(limit)
        .map(|e| e.employee_name.clone())
        .collect()
}
