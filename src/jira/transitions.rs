use serde_json::json;

use super::*;
use crate::issue::{Transition, UserId};

impl JiraClient {
    pub async fn transitions(&self, issue_key: &str) -> Result<Vec<Transition>, FetchError> {
        let request = self
            .client
            .get(self.endpoint(&format!("issue/{}/transitions", issue_key)));
        let payload = self
            .send(request)
            .await?
            .json::<ApiTransitions>()
            .await
            .map_err(|error| FetchError::Protocol(format!("unreadable transitions: {}", error)))?;
        Ok(payload
            .transitions
            .into_iter()
            .map(|transition| Transition {
                id: transition.id,
                name: transition.name,
            })
            .collect())
    }

    pub async fn do_transition(
        &self,
        issue_key: &str,
        transition_id: &str,
    ) -> Result<(), FetchError> {
        let request = self
            .client
            .post(self.endpoint(&format!("issue/{}/transitions", issue_key)))
            .json(&json!({ "transition": { "id": transition_id } }));
        self.send(request).await?;
        Ok(())
    }

    pub async fn set_assignee(&self, issue_key: &str, user: &UserId) -> Result<(), FetchError> {
        let body = match user {
            UserId::Account(account_id) => json!({ "accountId": account_id }),
            UserId::Name(name) => json!({ "name": name }),
        };
        let request = self
            .client
            .put(self.endpoint(&format!("issue/{}/assignee", issue_key)))
            .json(&body);
        self.send(request).await?;
        Ok(())
    }

    pub async fn myself(&self) -> Result<UserId, FetchError> {
        let request = self.client.get(self.endpoint("myself"));
        let user = self
            .send(request)
            .await?
            .json::<ApiUser>()
            .await
            .map_err(|error| FetchError::Protocol(format!("unreadable user: {}", error)))?;
        user_id(user)
    }
}

fn user_id(user: ApiUser) -> Result<UserId, FetchError> {
    if let Some(account_id) = user.account_id {
        return Ok(UserId::Account(account_id));
    }
    if let Some(name) = user.name {
        return Ok(UserId::Name(name));
    }
    Err(FetchError::Protocol(
        "current user has neither accountId nor name".to_string(),
    ))
}
