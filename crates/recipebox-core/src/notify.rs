// ── Notifications ──
//
// Messages for the notification collaborator. Presentation is up to the
// consumer; the store only decides what is said and when.

use serde::Serialize;
use strum::{Display, EnumString};

use crate::error::{CoreError, FailureKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// The store operation a notification reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub operation: Operation,
    /// Set on error notifications that came from a network failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl Notification {
    /// `None` for operations that succeed silently (a load shows its
    /// result directly).
    pub fn success(operation: Operation) -> Option<Self> {
        let message = match operation {
            Operation::Load => return None,
            Operation::Create => "Recipe added successfully",
            Operation::Update => "Recipe updated successfully",
            Operation::Delete => "Recipe deleted successfully",
        };
        Some(Self {
            kind: NotificationKind::Success,
            message: message.to_owned(),
            operation,
            failure: None,
        })
    }

    pub fn failure(operation: Operation, err: &CoreError) -> Self {
        let message = match operation {
            // A status means the server answered; anything else is unexpected.
            Operation::Load => match err {
                CoreError::Server { .. } => "Couldn't fetch recipes.".to_owned(),
                _ => "An unexpected error occurred. Please try again later.".to_owned(),
            },
            Operation::Create => format!("Failed to add recipe: {}", reason(err)),
            Operation::Update => format!("Failed to update recipe: {}", reason(err)),
            Operation::Delete => format!("Failed to delete recipe: {}", reason(err)),
        };
        Self {
            kind: NotificationKind::Error,
            message,
            operation,
            failure: err.failure_kind(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

fn reason(err: &CoreError) -> String {
    match err {
        CoreError::Server { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_failure_messages_distinguish_server_from_transport() {
        let server = Notification::failure(
            Operation::Load,
            &CoreError::Server {
                status: 500,
                message: "boom".into(),
            },
        );
        assert_eq!(server.message, "Couldn't fetch recipes.");
        assert_eq!(server.failure, Some(FailureKind::Server));

        let transport = Notification::failure(
            Operation::Load,
            &CoreError::Transport {
                message: "refused".into(),
            },
        );
        assert_eq!(
            transport.message,
            "An unexpected error occurred. Please try again later."
        );
        assert_eq!(transport.failure, Some(FailureKind::Transport));
        assert!(transport.is_error());
    }

    #[test]
    fn create_failure_surfaces_server_reason() {
        let n = Notification::failure(
            Operation::Create,
            &CoreError::Server {
                status: 400,
                message: "Missing required field: 'title'".into(),
            },
        );
        assert_eq!(n.message, "Failed to add recipe: Missing required field: 'title'");
    }

    #[test]
    fn success_messages() {
        assert_eq!(Notification::success(Operation::Load), None);

        let n = Notification::success(Operation::Delete).expect("delete reports success");
        assert_eq!(n.kind, NotificationKind::Success);
        assert_eq!(n.message, "Recipe deleted successfully");
        assert_eq!(n.failure, None);
        assert_eq!(n.kind.to_string(), "success");
    }
}
