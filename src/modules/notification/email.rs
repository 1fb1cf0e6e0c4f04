use super::{types, Error, Notification, Result};
use crate::{modules::user::repository::User, types::Context};
use lettre::{
    message::{header::ContentType, Mailbox},
    AsyncTransport, Message,
};
use std::sync::Arc;

pub async fn send(ctx: Arc<Context>, notification: Notification) -> Result<()> {
    match notification {
        Notification::PasswordResetRequested(n) => send_password_reset_email(ctx, n).await,
    }
}

struct SendEmailPayload {
    user: User,
    subject: String,
    body: String,
}

fn build_message(sender: &str, payload: SendEmailPayload) -> Result<Message> {
    let from = sender.parse::<Mailbox>().map_err(|err| {
        tracing::error!("Invalid mail sender {}: {}", sender, err);
        Error::InvalidAddress
    })?;
    let to = Mailbox::new(
        Some(payload.user.name.clone()),
        payload.user.email.parse().map_err(|err| {
            tracing::error!("Invalid recipient address {}: {}", payload.user.email, err);
            Error::InvalidAddress
        })?,
    );

    Message::builder()
        .from(from)
        .to(to)
        .subject(payload.subject)
        .header(ContentType::TEXT_HTML)
        .body(payload.body)
        .map_err(|err| {
            tracing::error!("Failed to build email: {}", err);
            Error::NotSent
        })
}

async fn send_email(ctx: Arc<Context>, payload: SendEmailPayload) -> Result<()> {
    let recipient = payload.user.email.clone();
    let message = build_message(&ctx.mail.sender, payload)?;

    match &ctx.mail.transport {
        Some(transport) => transport.send(message).await.map(|_| ()).map_err(|err| {
            tracing::error!("Failed to send email: {}", err);
            Error::NotSent
        }),
        None => {
            tracing::info!(
                "Mail transport not configured, email to {}:\n{}",
                recipient,
                String::from_utf8_lossy(&message.formatted())
            );
            Ok(())
        }
    }
}

fn password_reset_body(user: &User, reset_url: &str) -> String {
    format!(
        "<p>Hi {},</p>\
         <p>Forgot your password? Submit a PATCH request with your new password and \
         passwordConfirm to: <a href=\"{url}\">{url}</a></p>\
         <p>This link is valid for 10 minutes. If you didn't forget your password, \
         please ignore this email.</p>",
        user.name,
        url = reset_url
    )
}

async fn send_password_reset_email(
    ctx: Arc<Context>,
    notification: types::PasswordResetRequested,
) -> Result<()> {
    let body = password_reset_body(&notification.user, &notification.reset_url);

    send_email(
        ctx,
        SendEmailPayload {
            user: notification.user,
            subject: String::from("Your password reset token (valid for 10 min)"),
            body,
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::user::repository::Role;
    use chrono::Utc;

    fn user(email: &str) -> User {
        User {
            id: "01J0USER".to_string(),
            name: "Grace Hopper".to_string(),
            email: email.to_string(),
            password: String::new(),
            role: Role::User,
            active: true,
            password_changed_at: None,
            password_reset_token: None,
            password_reset_expires: None,
            created_at: Utc::now().naive_utc(),
            updated_at: None,
        }
    }

    #[test]
    fn reset_body_contains_the_link() {
        let body = password_reset_body(
            &user("grace@example.com"),
            "http://localhost:5000/api/auth/resetPassword/abc",
        );
        assert!(body.contains("http://localhost:5000/api/auth/resetPassword/abc"));
        assert!(body.contains("Grace Hopper"));
    }

    #[test]
    fn builds_a_message_for_valid_addresses() {
        let message = build_message(
            "Restaurant <noreply@restaurant.local>",
            SendEmailPayload {
                user: user("grace@example.com"),
                subject: "Hello".to_string(),
                body: "<p>Hi</p>".to_string(),
            },
        );
        assert!(message.is_ok());
    }

    #[test]
    fn rejects_invalid_recipient() {
        let message = build_message(
            "Restaurant <noreply@restaurant.local>",
            SendEmailPayload {
                user: user("not-an-email"),
                subject: "Hello".to_string(),
                body: "<p>Hi</p>".to_string(),
            },
        );
        assert!(matches!(message, Err(Error::InvalidAddress)));
    }
}
