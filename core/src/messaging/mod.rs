//! Mock conversation board between clients and providers.
//!
//! Threads are keyed per conversation. Sending a message appends to the
//! thread and refreshes the conversation preview; opening a conversation
//! clears its unread counter.

use crate::session::state::now_millis;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Messaging errors
#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),

    #[error("Message body is empty")]
    EmptyMessage,
}

/// A conversation as the sidebar list shows it.
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    pub id: String,
    pub participant: String,
    pub last_message: String,
    pub unread: u32,
    pub updated_at: u64,
}

/// A single message within a conversation thread.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: String,
    pub body: String,
    pub sent_at: u64,
    /// True when the current user wrote the message
    pub outgoing: bool,
}

/// In-memory message board
pub struct MessageBoard {
    conversations: RwLock<Vec<Conversation>>,
    threads: RwLock<HashMap<String, Vec<Message>>>,
}

impl MessageBoard {
    /// Board seeded with the canonical mock conversations.
    pub fn new() -> Self {
        let (conversations, threads) = seed_board();
        Self {
            conversations: RwLock::new(conversations),
            threads: RwLock::new(threads),
        }
    }

    pub async fn conversations(&self) -> Vec<Conversation> {
        self.conversations.read().await.clone()
    }

    /// The full thread for a conversation, oldest first.
    pub async fn messages(&self, conversation_id: &str) -> Result<Vec<Message>, MessagingError> {
        let threads = self.threads.read().await;
        threads
            .get(conversation_id)
            .cloned()
            .ok_or_else(|| MessagingError::ConversationNotFound(conversation_id.to_string()))
    }

    /// Append an outgoing message and refresh the conversation preview.
    pub async fn send(
        &self,
        conversation_id: &str,
        body: &str,
    ) -> Result<Message, MessagingError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(MessagingError::EmptyMessage);
        }

        let mut threads = self.threads.write().await;
        let thread = threads
            .get_mut(conversation_id)
            .ok_or_else(|| MessagingError::ConversationNotFound(conversation_id.to_string()))?;

        let message = Message {
            id: Uuid::new_v4(),
            sender: "Você".to_string(),
            body: body.to_string(),
            sent_at: now_millis(),
            outgoing: true,
        };
        thread.push(message.clone());

        let mut conversations = self.conversations.write().await;
        if let Some(conversation) = conversations.iter_mut().find(|c| c.id == conversation_id) {
            conversation.last_message = message.body.clone();
            conversation.updated_at = message.sent_at;
        }

        debug!("Sent message in conversation {}", conversation_id);
        Ok(message)
    }

    /// Mark a conversation as read (the act of opening it).
    pub async fn open(&self, conversation_id: &str) -> Result<(), MessagingError> {
        let mut conversations = self.conversations.write().await;
        let conversation = conversations
            .iter_mut()
            .find(|c| c.id == conversation_id)
            .ok_or_else(|| MessagingError::ConversationNotFound(conversation_id.to_string()))?;

        conversation.unread = 0;
        Ok(())
    }

    /// Unread count across all conversations, for the navbar badge.
    pub async fn unread_total(&self) -> u32 {
        self.conversations.read().await.iter().map(|c| c.unread).sum()
    }
}

impl Default for MessageBoard {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_board() -> (Vec<Conversation>, HashMap<String, Vec<Message>>) {
    let base = now_millis();
    let minutes_ago = |m: u64| base.saturating_sub(m * 60 * 1000);

    let conversations = vec![
        Conversation {
            id: "1".to_string(),
            participant: "Maria Santos".to_string(),
            last_message: "Obrigada pelo interesse! Quando gostaria de agendar?".to_string(),
            unread: 2,
            updated_at: minutes_ago(5),
        },
        Conversation {
            id: "2".to_string(),
            participant: "Pedro Costa".to_string(),
            last_message: "Posso atender na próxima semana".to_string(),
            unread: 0,
            updated_at: minutes_ago(80),
        },
        Conversation {
            id: "3".to_string(),
            participant: "Ana Silva".to_string(),
            last_message: "Vamos começar as aulas na segunda-feira".to_string(),
            unread: 1,
            updated_at: minutes_ago(24 * 60),
        },
    ];

    let incoming = |sender: &str, body: &str, at: u64| Message {
        id: Uuid::new_v4(),
        sender: sender.to_string(),
        body: body.to_string(),
        sent_at: at,
        outgoing: false,
    };

    let mut threads = HashMap::new();
    threads.insert(
        "1".to_string(),
        vec![
            incoming(
                "Maria Santos",
                "Olá! Vi que tem interesse no meu serviço de limpeza.",
                minutes_ago(10),
            ),
            Message {
                id: Uuid::new_v4(),
                sender: "Você".to_string(),
                body: "Sim! Gostaria de saber mais sobre os preços e disponibilidade.".to_string(),
                sent_at: minutes_ago(9),
                outgoing: true,
            },
            incoming(
                "Maria Santos",
                "Cobro R$ 80 por hora e tenho disponibilidade nas tardes de segunda a sexta.",
                minutes_ago(7),
            ),
            incoming(
                "Maria Santos",
                "Obrigada pelo interesse! Quando gostaria de agendar?",
                minutes_ago(5),
            ),
        ],
    );
    threads.insert("2".to_string(), Vec::new());
    threads.insert("3".to_string(), Vec::new());

    (conversations, threads)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_board() {
        let board = MessageBoard::new();

        assert_eq!(board.conversations().await.len(), 3);
        assert_eq!(board.messages("1").await.unwrap().len(), 4);
        assert_eq!(board.unread_total().await, 3);
    }

    #[tokio::test]
    async fn test_send_appends_and_updates_preview() {
        let board = MessageBoard::new();

        let message = board.send("1", "Pode ser amanhã às 14h?").await.unwrap();
        assert!(message.outgoing);

        let thread = board.messages("1").await.unwrap();
        assert_eq!(thread.len(), 5);
        assert_eq!(thread.last().unwrap().body, "Pode ser amanhã às 14h?");

        let conversations = board.conversations().await;
        let conversation = conversations.iter().find(|c| c.id == "1").unwrap();
        assert_eq!(conversation.last_message, "Pode ser amanhã às 14h?");
        assert!(conversation.updated_at >= message.sent_at);
    }

    #[tokio::test]
    async fn test_send_trims_whitespace() {
        let board = MessageBoard::new();
        let message = board.send("2", "  olá  ").await.unwrap();
        assert_eq!(message.body, "olá");
    }

    #[tokio::test]
    async fn test_send_rejects_blank_body() {
        let board = MessageBoard::new();
        let result = board.send("1", "   ").await;
        assert!(matches!(result, Err(MessagingError::EmptyMessage)));

        // Nothing was appended
        assert_eq!(board.messages("1").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_send_to_unknown_conversation() {
        let board = MessageBoard::new();
        let result = board.send("99", "olá").await;
        assert!(matches!(
            result,
            Err(MessagingError::ConversationNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_open_clears_unread() {
        let board = MessageBoard::new();

        board.open("1").await.unwrap();
        assert_eq!(board.unread_total().await, 1);

        board.open("3").await.unwrap();
        assert_eq!(board.unread_total().await, 0);
    }

    #[tokio::test]
    async fn test_open_unknown_conversation() {
        let board = MessageBoard::new();
        assert!(matches!(
            board.open("99").await,
            Err(MessagingError::ConversationNotFound(_))
        ));
    }
}
