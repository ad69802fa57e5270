//! Project management commands for CLI.

use clap::Subcommand;
use tracing::info;

use super::open_app;

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a new project and make it active
    Add {
        /// Project name
        name: String,
    },
    /// List all projects, newest first
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Switch the active project
    Select {
        /// Project id
        id: String,
    },
}

pub fn run(action: ProjectAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = open_app()?;

    match action {
        ProjectAction::Add { name } => match app.add_project(&name)? {
            Some(project) => {
                info!(id = %project.id, "project added");
                println!("Project created: {}", project.id);
                println!("{}", serde_json::to_string_pretty(&project)?);
            }
            None => println!("Project name is empty; nothing added"),
        },
        ProjectAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(app.projects())?);
            } else {
                let active_id = app.active_project().id.as_str();
                for project in app.projects() {
                    let marker = if project.id == active_id { "*" } else { " " };
                    println!("{marker} {}  {}", project.id, project.name);
                }
            }
        }
        ProjectAction::Select { id } => {
            if app.select_project(&id)? {
                println!("Active project: {}", app.active_project().name);
            } else {
                println!(
                    "Unknown project: {id}; active project is still {}",
                    app.active_project().name
                );
            }
        }
    }
    Ok(())
}
