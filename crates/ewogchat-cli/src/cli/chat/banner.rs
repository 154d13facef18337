//! Welcome banner display for chat sessions.

use console::style;

/// Print the welcome banner at the start of a chat session.
///
/// Shows the deployment in use, the session ID, and whether replies
/// stream incrementally, plus a hint about how to leave.
pub fn print_welcome_banner(deployment: &str, session_id: &str, streaming: bool) {
    println!();
    println!(
        "  {}",
        style("Welcome to Fuzzy Friends customer support!").cyan().bold()
    );
    println!("  {}", style("How may I help you?").dim());
    println!();
    println!(
        "  {}  {}",
        style("Deployment:").bold(),
        style(deployment).dim()
    );
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!(
        "  {}  {}",
        style("Streaming:").bold(),
        style(if streaming { "on" } else { "off" }).dim()
    );
    println!();
    println!(
        "  {}",
        style("Type 'exit' or press Ctrl+D to leave").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

/// Print the farewell message when the session ends.
pub fn print_farewell() {
    println!();
    println!("  {}", style("Exiting chat...").dim());
}
