//! Conversation CLI commands: list, show messages, send.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use chatlog_types::chat::{ConversationView, MessageView, Role};

use crate::state::AppState;

/// List conversations, most recent first.
pub async fn list_conversations(state: &AppState, json: bool) -> Result<()> {
    let conversations = state.chat_service.list_conversations().await?;
    let views: Vec<ConversationView> = conversations.iter().map(ConversationView::from).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    if views.is_empty() {
        println!();
        println!(
            "  {} No conversations yet. Start one with: {}",
            style("i").blue().bold(),
            style("chatlog send \"hello\"").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Title").fg(Color::White),
        Cell::new("Id").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for view in &views {
        table.add_row(vec![
            Cell::new(&view.title).fg(Color::Cyan),
            Cell::new(&view.id).fg(Color::DarkGrey),
            Cell::new(view.created_at.as_deref().unwrap_or("-")).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Print the messages of a conversation in order.
pub async fn show_messages(state: &AppState, conversation_id: &str, json: bool) -> Result<()> {
    let messages = state.chat_service.list_messages(conversation_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!();
        println!("  {} No messages in this conversation.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    println!();
    for message in &messages {
        print_message(message);
    }
    Ok(())
}

fn print_message(message: &MessageView) {
    let who = match message.role {
        Role::User => style("you").green().bold(),
        Role::Assistant => style("assistant").cyan().bold(),
    };
    let when = message.created_at.as_deref().unwrap_or("");
    println!("  {who} {}", style(when).dim());
    for line in message.content.lines() {
        println!("    {line}");
    }
    for attachment in &message.attachments {
        println!("    {} {}", style("📎").dim(), attachment.filename);
    }
    println!();
}

/// Run one chat turn and print the reply.
pub async fn send(
    state: &AppState,
    text: &str,
    conversation_id: Option<&str>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let reply = state
        .chat_service
        .chat(text, conversation_id, Vec::new())
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
        return Ok(());
    }

    if quiet {
        println!("{}", reply.reply.content);
        return Ok(());
    }

    println!();
    print_message(&reply.reply);
    println!(
        "  {} continue with: {}",
        style("→").dim(),
        style(format!("chatlog send \"...\" --conversation {}", reply.conversation_id)).yellow()
    );
    println!();
    Ok(())
}
