//! Mail delivery over a Resend-style HTTP API.

use anyhow::Context as _;

use crate::config::AccountsConfig;
use crate::domain::repository::MailNotifier;
use crate::error::AccountsServiceError;

#[derive(Clone)]
pub struct HttpMailNotifier {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
    public_base_url: String,
}

impl HttpMailNotifier {
    pub fn new(config: &AccountsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.mail_api_url.clone(),
            api_key: config.mail_api_key.clone(),
            from: config.mail_from.clone(),
            public_base_url: config.public_base_url.clone(),
        }
    }

    async fn send(
        &self,
        to: &str,
        subject: &str,
        text: &str,
    ) -> Result<(), AccountsServiceError> {
        let payload = serde_json::json!({
            "from": self.from,
            "to": to,
            "subject": subject,
            "text": text,
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .context("send mail request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AccountsServiceError::Internal(anyhow::anyhow!(
                "mail API error: HTTP {status}: {body}"
            )));
        }
        Ok(())
    }
}

impl MailNotifier for HttpMailNotifier {
    async fn send_verification(
        &self,
        email: &str,
        token: &str,
    ) -> Result<(), AccountsServiceError> {
        let link = format!("{}/api/v1/users/verify/{token}", self.public_base_url);
        self.send(
            email,
            "Verify your email",
            &format!("Please verify your email by clicking on the following link: {link}"),
        )
        .await
    }

    async fn send_password_reset(
        &self,
        email: &str,
        token: &str,
    ) -> Result<(), AccountsServiceError> {
        let link = format!(
            "{}/api/v1/users/reset-password/{token}",
            self.public_base_url
        );
        self.send(
            email,
            "Reset your password",
            &format!("You can reset your password within 10 minutes using this link: {link}"),
        )
        .await
    }
}
