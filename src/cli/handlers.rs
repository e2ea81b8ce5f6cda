use std::path::PathBuf;

use crate::api;
use crate::entity::StoredTodo;
use crate::error::Result;
use crate::storage::TodoStore;

use super::ServeArgs;

pub async fn handle_serve(args: ServeArgs) -> Result<()> {
    api::serve(&args.config()).await
}

pub async fn handle_list(data_file: PathBuf, json: bool) -> Result<()> {
    let store = TodoStore::load(data_file).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&store.list().await)?);
        return Ok(());
    }

    if store.is_empty().await {
        println!("No todos.");
        return Ok(());
    }

    for todo in store.list().await {
        println!("{}", format_todo_line(&todo));
    }

    Ok(())
}

pub async fn handle_stats(data_file: PathBuf, json: bool) -> Result<()> {
    let store = TodoStore::load(data_file).await;
    let stats = store.stats().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Total:     {}", stats.total);
        println!("Completed: {}", stats.completed);
        println!("Pending:   {}", stats.pending);
        println!("Done:      {}%", stats.completion_rate);
    }

    Ok(())
}

fn format_todo_line(todo: &StoredTodo) -> String {
    let mark = if todo.is_completed() { 'x' } else { ' ' };
    let id = todo.id().map_or_else(|| "?".to_string(), |id| id.to_string());
    format!("[{}] {} - {}", mark, id, todo.text().unwrap_or("(no text)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::TodoItem;

    #[test]
    fn test_format_todo_line() {
        let mut todo = TodoItem::new(3, "Deploy to production".to_string());
        assert_eq!(
            format_todo_line(&StoredTodo::from(todo.clone())),
            "[ ] 3 - Deploy to production"
        );

        todo.completed = true;
        assert_eq!(
            format_todo_line(&StoredTodo::from(todo)),
            "[x] 3 - Deploy to production"
        );
    }

    #[test]
    fn test_format_odd_record() {
        let record: StoredTodo = serde_json::from_str(r#"{"title": "legacy", "completed": 1}"#).unwrap();
        assert_eq!(format_todo_line(&record), "[x] ? - (no text)");
    }
}
