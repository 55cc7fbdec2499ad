//
//  marketplace-sdk
//  services/discussions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Discussions API: buyer/vendor messaging.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{
    ApiClient, ApiError, ApiResult, DomainError, ErrorCode, HttpError, RequestOptions,
    StatusTranslation,
};

/// A conversation thread between the current user and someone else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub id: u64,
    /// User id of the other party.
    pub recipient: u64,
    #[serde(default)]
    pub product_id: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub unread_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub author: u64,
    pub content: String,
    pub date: DateTime<Utc>,
    /// Whether the current user wrote it.
    #[serde(default)]
    pub is_author: bool,
}

/// Discussion endpoints. All require authentication.
pub struct DiscussionService<'a> {
    client: &'a ApiClient,
}

impl<'a> DiscussionService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn discussions(&self) -> ApiResult<Vec<Discussion>> {
        self.client.must_be_authenticated()?;
        self.client
            .get("discussions")
            .await
            .or_default_status_errors()
    }

    pub async fn discussion(&self, discussion_id: u64) -> ApiResult<Discussion> {
        self.client.must_be_authenticated()?;
        self.client
            .get(&format!("discussions/{}", discussion_id))
            .await
            .on_status(404, |http| not_found(discussion_id, http))
            .or_default_status_errors()
    }

    /// Messages of a discussion, oldest first.
    pub async fn messages(&self, discussion_id: u64) -> ApiResult<Vec<Message>> {
        self.client.must_be_authenticated()?;
        let mut messages: Vec<Message> = self
            .client
            .get(&format!("discussions/{}/messages", discussion_id))
            .await
            .on_status(404, |http| not_found(discussion_id, http))
            .or_default_status_errors()?;
        messages.sort_by_key(|m| m.date);
        Ok(messages)
    }

    /// Posts a message and returns it as stored.
    ///
    /// The server refuses messages to oneself with
    /// [`ErrorCode::SenderIsAlsoRecipient`].
    pub async fn post_message(&self, discussion_id: u64, content: &str) -> ApiResult<Message> {
        self.client.must_be_authenticated()?;
        if content.trim().is_empty() {
            return Err(ApiError::InvalidRequest("Message content is empty".to_string()));
        }

        self.client
            .post(
                &format!("discussions/{}/messages", discussion_id),
                RequestOptions::new().form([("content", content)]),
            )
            .await
            .on_status(400, |http| {
                DomainError::new(
                    ErrorCode::SenderIsAlsoRecipient,
                    "You cannot send a message to yourself",
                )
                .with_context("discussionId", discussion_id)
                .caused_by(http)
                .into()
            })
            .on_status(404, |http| not_found(discussion_id, http))
            .or_default_status_errors()
    }
}

fn not_found(discussion_id: u64, http: HttpError) -> ApiError {
    DomainError::new(ErrorCode::DiscussionNotFound, "Discussion not found")
        .with_context("discussionId", discussion_id)
        .caused_by(http)
        .into()
}
