use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, instrument};

use crate::config::email::EmailConfig;
use crate::utils::errors::AppError;

pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    #[instrument(skip(self, activation_token))]
    pub async fn send_welcome_email(
        &self,
        to_email: &str,
        to_name: &str,
        user_id: i64,
        activation_token: &str,
    ) -> Result<(), AppError> {
        let html_body = self.welcome_template(to_name, user_id, activation_token);
        let text_body = format!(
            "Hi {},\n\n\
             Thanks for signing up for a Reelbase account. We're excited to have you on board!\n\n\
             For future reference, your user ID number is {}.\n\n\
             Please send a request to the PUT /api/users/activated endpoint with the following \
             JSON body to activate your account:\n\n\
             {{\"token\": \"{}\"}}\n\n\
             Please note that this is a one-time use token and it will expire in 3 days.\n\n\
             Thanks,\n\
             The Reelbase Team",
            to_name, user_id, activation_token
        );

        self.send_email(to_email, "Welcome to Reelbase!", &text_body, &html_body)
            .await
    }

    #[instrument(skip(self, html_body, text_body))]
    async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), AppError> {
        if !self.config.enabled {
            debug!(to = %to_email, subject, "email sending disabled, skipping");
            return Ok(());
        }

        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| AppError::internal(anyhow::anyhow!("invalid from email: {e}")))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| AppError::internal(anyhow::anyhow!("invalid to email: {e}")))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .map_err(|e| AppError::internal(anyhow::anyhow!("failed to build email: {e}")))?;

        let mailer = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)
                .map_err(|e| {
                    AppError::internal(anyhow::anyhow!("failed to create SMTP relay: {e}"))
                })?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::internal(anyhow::anyhow!("task join error: {e}")))?
            .map_err(|e| AppError::internal(anyhow::anyhow!("failed to send email: {e}")))?;

        Ok(())
    }

    fn welcome_template(&self, name: &str, user_id: i64, activation_token: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Welcome to Reelbase</title>
</head>
<body style="margin: 0; padding: 20px; font-family: Arial, sans-serif; color: #333333;">
    <h2 style="color: #4F46E5;">Welcome to Reelbase!</h2>
    <p>Hi <strong>{}</strong>,</p>
    <p>Thanks for signing up for a Reelbase account. We're excited to have you on board!</p>
    <p>For future reference, your user ID number is <strong>{}</strong>.</p>
    <p>Please send a request to the <code>PUT /api/users/activated</code> endpoint with the
    following JSON body to activate your account:</p>
    <pre style="background-color: #f4f4f4; padding: 12px; border-radius: 4px;">{{"token": "{}"}}</pre>
    <p>Please note that this is a one-time use token and it will expire in 3 days.</p>
    <p>Thanks,<br>The Reelbase Team</p>
</body>
</html>"#,
            name, user_id, activation_token
        )
    }
}
