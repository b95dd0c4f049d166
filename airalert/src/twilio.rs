use crate::errors::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::future::Future;
use tracing::{debug, info};

const API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Delivers a text message to a phone number.
pub trait Notifier: Send + Sync {
    fn send(&self, to: &str, body: &str) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct TwilioCredentials {
    pub account_sid: String,
    pub secret: String,
    pub source_number: String,
}

impl fmt::Debug for TwilioCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioCredentials")
            .field("account_sid", &self.account_sid)
            .field("secret", &"<redacted>")
            .field("source_number", &self.source_number)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TwilioNotifier {
    http: reqwest::Client,
    credentials: TwilioCredentials,
}

impl TwilioNotifier {
    pub fn new(credentials: TwilioCredentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            API_BASE, self.credentials.account_sid
        )
    }
}

impl Notifier for TwilioNotifier {
    async fn send(&self, to: &str, body: &str) -> Result<()> {
        info!("Sending message: {}", body);

        let response = self
            .http
            .post(self.messages_url())
            .basic_auth(&self.credentials.account_sid, Some(&self.credentials.secret))
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("To", to),
                ("From", self.credentials.source_number.as_str()),
                ("Body", body),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Notify(format!("provider returned {}", status)));
        }

        let message: MessageResponse = response.json().await?;
        debug!("Message accepted, sid={:?}", message.sid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_url() {
        let notifier = TwilioNotifier::new(TwilioCredentials {
            account_sid: "AC123".to_string(),
            secret: "shh".to_string(),
            source_number: "+15550000000".to_string(),
        });

        assert_eq!(
            notifier.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn test_debug_hides_secret() {
        let credentials = TwilioCredentials {
            account_sid: "AC123".to_string(),
            secret: "hunter2".to_string(),
            source_number: "+15550000000".to_string(),
        };

        assert!(!format!("{:?}", credentials).contains("hunter2"));
    }
}
