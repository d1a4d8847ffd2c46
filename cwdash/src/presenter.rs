use std::collections::HashSet;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use log::warn;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::models::Conversation;
use crate::relative_time::format_distance;

pub const TITLE: &str = "Dashboard de Tickets";
pub const LOADING_MESSAGE: &str = "Carregando tickets...";
pub const EMPTY_MESSAGE: &str = "Nenhum ticket encontrado.";
pub const UNASSIGNED: &str = "—";

const HEADER: [&str; 7] = [
    "ID",
    "Cliente",
    "Canal",
    "Status",
    "Etiquetas",
    "Criado em",
    "Responsável",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// One conversation with every column already derived for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationRow {
    pub id: u64,
    pub customer: String,
    pub channel: String,
    pub status: String,
    pub labels: String,
    pub created: String,
    pub assignee: String,
}

impl ConversationRow {
    pub fn new(conversation: &Conversation, now: DateTime<Utc>) -> Self {
        let created = match conversation.created_at.to_datetime() {
            Some(created_at) => format_distance(created_at, now),
            None => {
                warn!(
                    "conversation {} has unparseable created_at {:?}",
                    conversation.id, conversation.created_at
                );
                conversation.created_at.to_string()
            }
        };

        Self {
            id: conversation.id,
            customer: conversation.meta.sender.name.clone(),
            channel: conversation.inbox_identifier.clone(),
            status: conversation.status.clone(),
            labels: conversation.labels.join(", "),
            created,
            assignee: conversation
                .assignee
                .as_ref()
                .map(|assignee| assignee.name.clone())
                .unwrap_or_else(|| UNASSIGNED.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderState {
    Loading,
    Empty,
    Table(Vec<ConversationRow>),
}

/// Chooses what the dashboard shows for the given state.
///
/// Relative times are derived from `now` on every call; nothing is cached.
pub fn present(
    loading: bool,
    conversations: &[Conversation],
    now: DateTime<Utc>,
    dedupe: bool,
) -> RenderState {
    if loading {
        return RenderState::Loading;
    }

    let mut seen = HashSet::new();
    let rows: Vec<_> = conversations
        .iter()
        .filter(|conversation| !dedupe || seen.insert(conversation.id))
        .map(|conversation| ConversationRow::new(conversation, now))
        .collect();

    if rows.is_empty() {
        RenderState::Empty
    } else {
        RenderState::Table(rows)
    }
}

pub fn build_table(rows: &[ConversationRow]) -> Table {
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(HEADER.to_vec());

    for row in rows {
        table.add_row(vec![
            row.id.to_string(),
            row.customer.clone(),
            row.channel.clone(),
            row.status.clone(),
            row.labels.clone(),
            row.created.clone(),
            row.assignee.clone(),
        ]);
    }

    for index in [0, 2, 3] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Center);
        }
    }

    table
}

/// Renders the state as printable text.
///
/// JSON output has no loading representation and yields `None` for it.
pub fn render(state: &RenderState, format: OutputFormat) -> anyhow::Result<Option<String>> {
    let output = match (format, state) {
        (OutputFormat::Json, RenderState::Loading) => None,
        (OutputFormat::Json, RenderState::Empty) => Some("[]".to_string()),
        (OutputFormat::Json, RenderState::Table(rows)) => Some(serde_json::to_string_pretty(rows)?),
        (OutputFormat::Table, state) => {
            let body = match state {
                RenderState::Loading => LOADING_MESSAGE.to_string(),
                RenderState::Empty => EMPTY_MESSAGE.to_string(),
                RenderState::Table(rows) => build_table(rows).to_string(),
            };
            Some(format!("{}\n\n{}", TITLE.bold(), body))
        }
    };

    Ok(output)
}
