use serde::Serialize;

use crate::model::{Task, TaskId};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct DeletedJson {
    pub deleted: TaskId,
}

/// Print any serializable value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Checkbox marker for a task
pub fn completion_symbol(completed: bool) -> &'static str {
    if completed { "[x]" } else { "[ ]" }
}

/// Format a task as a single line: `[ ]   3  Title`
pub fn format_task_line(task: &Task) -> String {
    format!(
        "{} {:>3}  {}",
        completion_symbol(task.completed),
        task.id.0,
        task.title
    )
}

/// Lines for `td list`, ending with a count summary
pub fn format_task_list(tasks: &[Task]) -> Vec<String> {
    if tasks.is_empty() {
        return vec!["No tasks yet.".to_string()];
    }
    let done = tasks.iter().filter(|t| t.completed).count();
    let mut lines: Vec<String> = tasks.iter().map(format_task_line).collect();
    lines.push(String::new());
    lines.push(format!("{} open, {} done", tasks.len() - done, done));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(id: u64, title: &str, completed: bool) -> Task {
        Task {
            id: TaskId(id),
            title: title.into(),
            completed,
            created_at: None,
        }
    }

    #[test]
    fn task_line_aligns_ids() {
        assert_eq!(format_task_line(&task(3, "Buy milk", false)), "[ ]   3  Buy milk");
        assert_eq!(format_task_line(&task(120, "Ship", true)), "[x] 120  Ship");
    }

    #[test]
    fn list_has_summary() {
        let lines = format_task_list(&[task(1, "A", false), task(2, "B", true)]);
        assert_eq!(
            lines,
            vec!["[ ]   1  A", "[x]   2  B", "", "1 open, 1 done"]
        );
    }

    #[test]
    fn empty_list_message() {
        assert_eq!(format_task_list(&[]), vec!["No tasks yet."]);
    }

    #[test]
    fn deleted_json_shape() {
        let value = serde_json::to_value(DeletedJson { deleted: TaskId(4) }).unwrap();
        assert_eq!(value, serde_json::json!({"deleted": 4}));
    }
}
