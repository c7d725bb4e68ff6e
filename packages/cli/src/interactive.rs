//! Interactive tool selection.
//!
//! Lets the user pick what to do, then guides them through the inputs
//! for it.

use bike_lane_dataset::{DashboardContext, DatasetPaths};
use bike_lane_request_models::{
    DEFAULT_END_DATE, DEFAULT_MIN_ENTRIES, DEFAULT_START_DATE, FilterCriteria,
};
use dialoguer::{Confirm, Input, Select};

/// Top-level actions offered when no subcommand is given.
enum Tool {
    Render,
    Boards,
    Server,
}

impl Tool {
    const ALL: &[Self] = &[Self::Render, Self::Boards, Self::Server];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Render => "Render dashboard",
            Self::Boards => "List community boards",
            Self::Server => "Start server",
        }
    }
}

/// Prompts for a tool and runs it.
///
/// # Errors
///
/// Returns an error if a prompt fails, the dataset cannot be loaded, the
/// entered criteria are invalid, or the server fails.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("Blocked Bike Lane Dashboard");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Render => render()?,
        Tool::Boards => {
            let context = DashboardContext::load(&DatasetPaths::from_env())?;
            for option in context.board_options() {
                println!("{option}");
            }
        }
        Tool::Server => {
            actix_web::rt::System::new().block_on(bike_lane_server::interactive::run())?;
        }
    }

    Ok(())
}

/// Prompts for filter criteria and prints the rendered view model.
fn render() -> Result<(), Box<dyn std::error::Error>> {
    let context = DashboardContext::load(&DatasetPaths::from_env())?;

    let start: String = Input::new()
        .with_prompt("Start date")
        .default(DEFAULT_START_DATE.to_string())
        .interact_text()?;

    let end: String = Input::new()
        .with_prompt("End date")
        .default(DEFAULT_END_DATE.to_string())
        .interact_text()?;

    let options = context.board_options();
    let board_idx = Select::new()
        .with_prompt("Select Community Board")
        .items(&options)
        .default(0)
        .interact()?;

    let min_entries: u32 = Input::new()
        .with_prompt("Min. entries for map display (1-10)")
        .default(u32::from(DEFAULT_MIN_ENTRIES))
        .interact_text()?;

    let criteria = FilterCriteria::from_controls(
        Some(start.as_str()),
        Some(end.as_str()),
        Some(options[board_idx].as_str()),
        Some(min_entries),
    )?;

    let pretty = Confirm::new()
        .with_prompt("Pretty-print JSON?")
        .default(true)
        .interact()?;

    super::print_view(&context, &criteria, pretty)?;
    Ok(())
}
